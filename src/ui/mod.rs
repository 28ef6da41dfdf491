//! Terminal feedback for humans.
//!
//! All of it goes to stderr; stdout carries only the machine-readable outputs.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_status, display_success, display_summary,
};
