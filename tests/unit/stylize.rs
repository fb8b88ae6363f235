use super::*;
use rand::SeedableRng;

#[test]
fn flat_image_stays_flat_and_unmasked() {
    let img = RgbImage::from_pixel(24, 32, Rgb([120, 60, 200]));
    let out = CartoonStylizer::default().stylize(&img).unwrap();
    assert_eq!(out.dimensions(), (24, 32));
    // A flat region is never darker than its own mean, so no edge pixels appear.
    assert!(out.pixels().all(|p| p.0 == [120, 60, 200]));
}

#[test]
fn dark_line_on_light_field_becomes_an_edge() {
    let img = RgbImage::from_fn(30, 30, |x, _| {
        if x == 15 { Rgb([0, 0, 0]) } else { Rgb([230, 230, 230]) }
    });
    let grey = to_grey(&img);
    let edges = adaptive_mean_threshold(&grey, 9, 10);
    assert_eq!(edges.get_pixel(15, 15).0[0], 0);
    assert_eq!(edges.get_pixel(2, 15).0[0], 255);
}

#[test]
fn median_removes_isolated_speck() {
    let mut g = GrayImage::from_pixel(9, 9, Luma([100]));
    g.put_pixel(4, 4, Luma([255]));
    let out = median_blur(&g, 7);
    assert_eq!(out.get_pixel(4, 4).0[0], 100);
}

#[test]
fn kmeans_separates_two_clusters() {
    let mut samples = vec![[10.0, 10.0, 10.0]; 50];
    samples.extend(vec![[240.0, 240.0, 240.0]; 50]);
    let mut rng = StdRng::seed_from_u64(3);
    let mut centres = kmeans(&samples, 2, 20, 1.0, &mut rng);
    centres.sort_by(|a, b| a[0].total_cmp(&b[0]));
    // Either both clusters were found, or one empty centre got reseeded onto a real sample.
    assert!(centres.iter().all(|c| c[0] == 10.0 || c[0] == 240.0));
}

#[test]
fn quantization_limits_palette() {
    let img = RgbImage::from_fn(40, 40, |x, y| Rgb([(x * 6) as u8, (y * 6) as u8, 128]));
    let sty = CartoonStylizer {
        clusters: 3,
        ..CartoonStylizer::default()
    };
    let q = sty.quantize(&img);
    let mut colours: Vec<[u8; 3]> = q.pixels().map(|p| p.0).collect();
    colours.sort();
    colours.dedup();
    assert!(colours.len() <= 3);
}

#[test]
fn bilateral_preserves_a_hard_edge() {
    let img = RgbImage::from_fn(20, 20, |x, _| {
        if x < 10 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
    });
    let out = bilateral(&img, 9, 20.0, 200.0);
    assert!(out.get_pixel(2, 10).0[0] < 5);
    assert!(out.get_pixel(17, 10).0[0] > 250);
}

#[test]
fn empty_input_is_an_external_failure() {
    let err = CartoonStylizer::default()
        .stylize(&RgbImage::new(0, 0))
        .unwrap_err();
    assert!(!err.is_fatal());
}
