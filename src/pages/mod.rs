//! Page asset resolution split into scanning, entry discovery and render job generation.

mod entries;
mod listing;
mod render;

pub use entries::{build_entry_map, discover_entry_bundles};
pub use listing::{DirectoryListing, PageFile, PageScan};
pub use render::{generate_page_jobs, resolve_script_bundle, resolve_style_bundle};
