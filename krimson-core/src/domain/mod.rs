//! Domain layer
//!
//! Pure data shaping with no I/O. Everything here is safe to call with
//! arbitrary, possibly malformed, input.

pub mod activity;
pub mod analysis;
pub mod lenient;

pub use lenient::LenientEnum;
