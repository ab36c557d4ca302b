//! Field classes and per-field text normalization.
//!
//! This module provides:
//! - The closed set of detector labels this crate understands
//! - Static OCR confusion and digit-inversion lookup tables
//! - The per-class normalizer that turns raw OCR text into canonical strings

pub mod class;
pub mod normalize;
pub mod tables;

pub use class::{FieldClass, Position};
pub use normalize::normalize;
