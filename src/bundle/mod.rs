//! Helpers preparing the output directory and persisting the build plan for the bundler.

pub mod output;
pub mod plan;
pub mod prelude;
