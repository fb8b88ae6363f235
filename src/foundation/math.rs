pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Float to pixel offset, truncating toward zero.
pub fn trunc_px(v: f64) -> i32 {
    v as i32
}

/// Saturating float to `u8`, truncating toward zero.
pub(crate) fn sat_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
