//! Result bundle export

mod json_bundle;

pub use json_bundle::{JsonBundleExporter, read_bundle};
