//! Time-side building blocks: easing, phase tables, per-frame state and particles.

/// Easing curves.
pub mod ease;
/// Decorative particle overlay.
pub mod particles;
/// Per-frame geometric and photometric parameters.
pub mod state;
/// Phase tables and time resolution.
pub mod timeline;
