//! Pixel-side building blocks operating on packed RGB8 frames.
//!
//! Nothing here knows about time; programs compose these per frame.

/// Background providers.
pub mod background;
/// Weighted blends and fades.
pub mod blend;
/// Odd-kernel Gaussian blur.
pub mod blur;
/// Primitive shapes.
pub mod draw;
/// Resizing, cover-cropping and borders.
pub mod fit;
/// Bounds-safe paste.
pub mod paste;
/// Affine warps.
pub mod warp;
