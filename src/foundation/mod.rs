/// Core value types shared by every layer.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Small numeric helpers.
pub mod math;
