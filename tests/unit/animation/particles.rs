use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn field(seed: u64) -> ParticleField<StdRng> {
    ParticleField::new(
        ParticleConfig::default(),
        108,
        192,
        StdRng::seed_from_u64(seed),
    )
}

#[test]
fn initial_population_matches_config() {
    let f = field(1);
    assert_eq!(f.len(), 40);
    assert!(f.particles().iter().all(|p| p.opacity == 255.0));
}

#[test]
fn population_never_exceeds_max() {
    let mut f = field(7);
    for _ in 0..500 {
        f.step(1.0 / 24.0);
        assert!(f.len() <= f.config().max);
    }
}

#[test]
fn recovers_after_bulk_removal() {
    let mut f = field(3);
    for _ in 0..50 {
        f.step(1.0 / 24.0);
    }
    f.clear();
    assert!(f.is_empty());
    for _ in 0..30 {
        f.step(1.0 / 24.0);
    }
    assert!(f.len() >= 60, "only {} particles after recovery", f.len());
    assert!(f.len() <= 120);
}

#[test]
fn opacity_decays_with_elapsed_time() {
    let mut f = field(5);
    f.advance(1.0 / 24.0);
    for p in f.particles() {
        let expected = 255.0 - 255.0 * (1.0 / 24.0) / p.lifetime_secs;
        assert!((p.opacity - expected).abs() < 1e-9);
    }
}

#[test]
fn higher_frame_rates_decay_less_per_frame() {
    let mut slow = field(9);
    let mut fast = field(9);
    slow.advance(1.0 / 24.0);
    fast.advance(1.0 / 48.0);
    assert!(fast.particles()[0].opacity > slow.particles()[0].opacity);
}

#[test]
fn particles_die_after_their_lifetime() {
    let mut f = field(11);
    // Longest lifetime is 50 frames at 24 fps.
    for _ in 0..51 {
        f.advance(1.0 / 24.0);
    }
    assert!(f.is_empty());
}

#[test]
fn particles_below_the_canvas_are_dropped() {
    let mut f = field(13);
    for p in &mut f.particles {
        p.y = 196.5;
        p.speed = 1.0;
    }
    f.advance(1.0 / 24.0);
    assert!(f.is_empty());
}

#[test]
fn draw_blends_into_frame() {
    let f = field(2);
    let mut frame = RgbImage::new(108, 192);
    f.draw(&mut frame);
    assert!(frame.pixels().any(|p| p.0 != [0, 0, 0]));
}
