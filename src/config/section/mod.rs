//! Configuration section definitions.

mod build;
mod serve;
mod site;

pub use build::BuildSectionConfig;
pub use serve::{DEFAULT_PORT, ServeConfig};
pub use site::{AuthorConfig, DEFAULT_SITE_URL, SiteSectionConfig};
