// Shared helpers used across the scanning and provider layers.

/// Prop name conversion between the two surface syntaxes
pub mod case;

pub use case::{camel_to_snake, snake_to_camel};
