use image::RgbImage;

use crate::foundation::error::{ReelError, ReelResult};

/// Decode any format `image` understands into packed RGB8, dropping alpha.
pub fn decode_image(bytes: &[u8]) -> ReelResult<RgbImage> {
    if bytes.is_empty() {
        return Err(ReelError::input_unavailable("image data is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ReelError::input_unavailable(format!("decode image: {e}")))?;
    let rgb = dyn_img.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(ReelError::input_unavailable("decoded image has no pixels"));
    }
    Ok(rgb)
}
