//! Use-case services.
//!
//! # Responsibility
//! - Run the fetch-then-validate protocol: repositories query, validators decide.
//! - Translate store and validation failures into per-use-case error enums.

pub mod reservation_service;
pub mod theme_service;
