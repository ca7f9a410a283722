//! Core utilities and shared types
//!
//! This module contains shared utilities used across the application:
//!
//! - `error`: the typed error taxonomy surfaced at the command boundary
//! - `atomic_file`: write-temp-then-rename helper used by every mutable file

pub mod atomic_file;
pub mod error;
