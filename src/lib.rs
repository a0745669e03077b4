pub mod aggregate;
pub mod api;
pub mod config;
pub mod course;
pub mod error;
pub mod formats;
pub mod handicap;
pub mod strokes_gained;
// cmd and reports belong to the binary crate (main.rs).
