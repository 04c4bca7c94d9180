/// State management module
///
/// This module handles all gallery state, including:
/// - Shared data structures (data.rs)
/// - Styles, transform parameters and selections (style.rs)
/// - The append-only artwork collection (gallery.rs)

pub mod data;
pub mod gallery;
pub mod style;
