use super::*;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::ReelError;
use image::Rgb;

struct Failing;

impl Stylizer for Failing {
    fn stylize(&self, _img: &RgbImage) -> ReelResult<RgbImage> {
        Err(ReelError::external("boom"))
    }
}

#[test]
fn failing_stylizer_falls_back_to_plain_blend() {
    let bg = RgbImage::from_pixel(10, 20, Rgb([0, 0, 0]));
    let setup = Setup {
        canvas: Canvas::new(10, 20).unwrap(),
        fps: Fps::whole(30).unwrap(),
        background: &bg,
        seed: None,
    };
    let p = Cartoon::with_stylizer(
        &RgbImage::from_pixel(5, 5, Rgb([200, 100, 0])),
        &setup,
        &Failing,
    )
    .unwrap();
    assert_eq!(p.frame_count(Fps::whole(30).unwrap()), 120);
    let px = p.composite.get_pixel(3, 3).0;
    assert!((139..=141).contains(&px[0]) && (69..=71).contains(&px[1]) && px[2] == 0, "{px:?}");
}
