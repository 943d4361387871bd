#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod builder;
pub mod bundle;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod project;

pub use builder::{BuildArtifacts, BuildResult, SiteBuilder};
pub use config::{ConfigError, ProjectConfig};
pub use error::ResolveError;
pub use project::{BuildContext, BuildMode, ProjectLayout};
