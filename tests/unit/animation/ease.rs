use super::*;

const ALL: [Ease; 3] = [Ease::Linear, Ease::Smoothstep, Ease::Smootherstep];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_over_unit_interval() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=1000 {
            let v = ease.apply(f64::from(i) / 1000.0);
            assert!(v >= prev, "{ease:?} decreased at step {i}");
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }
}

#[test]
fn curves_are_pure() {
    for ease in ALL {
        for t in [0.1, 0.37, 0.5, 0.92] {
            assert_eq!(ease.apply(t).to_bits(), ease.apply(t).to_bits());
        }
    }
}

#[test]
fn midpoint_is_symmetric() {
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
    assert!((smootherstep(0.5) - 0.5).abs() < 1e-12);
    assert!((smoothstep(0.25) + smoothstep(0.75) - 1.0).abs() < 1e-12);
}

#[test]
fn quintic_is_flatter_at_the_ends() {
    assert!(smootherstep(0.1) < smoothstep(0.1));
    assert!(smootherstep(0.9) > smoothstep(0.9));
}

#[test]
fn no_internal_clamp() {
    assert!(Ease::Linear.apply(1.5) > 1.0);
    assert!(smoothstep(1.5) < 1.0);
}
