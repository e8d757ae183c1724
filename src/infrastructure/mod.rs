//! Infrastructure layer - Concrete implementations of the domain ports

pub mod api_key;
pub mod logging;
