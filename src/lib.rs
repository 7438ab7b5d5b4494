//! CSVMAN - Terminal CSV Manager Library
//!
//! A terminal-based editor for comma-delimited tables, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
