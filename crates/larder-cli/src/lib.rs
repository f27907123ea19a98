//! Larder CLI
//!
//! The demo driver: loads a recipe book, builds every entry concurrently into
//! one shared collection and prints the final catalog.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod book;
pub mod driver;
pub mod logging;

// Re-exports
pub use book::{BookError, RecipeBook, RecipeSpec};
pub use driver::{run_book, DriverError, RunOptions, RunSummary};
pub use logging::init_tracing;

/// Heading printed above the rendered collection
pub const REPORT_HEADING: &str = "Recipe Collection:";

/// Rule printed below the rendered collection
pub const REPORT_RULE: &str = "------------------------------";

/// Format the text report for a rendered collection
#[must_use]
pub fn text_report(rendered: &str) -> String {
    if rendered.is_empty() {
        format!("{REPORT_HEADING}\n{REPORT_RULE}\n")
    } else {
        format!("{REPORT_HEADING}\n{rendered}\n{REPORT_RULE}\n")
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
