//! Helpers for naming page sources and bundle outputs.
//!
//! Source paths, page names and output filenames are computed here so the resolver and the build
//! plan agree on one spelling, independent of the native directory separator.

mod names;
mod output;

pub use names::{is_hidden_file, make_entry_source_path, strip_recognized_extension};
pub use output::render_output_filename;
