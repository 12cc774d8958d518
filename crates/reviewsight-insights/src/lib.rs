//! Insight synthesis over theme-labeled reviews.
//!
//! Turns theme-labeled reviews into per-bank drivers and pain points with
//! segment-relative support, maps them to prioritized recommendations, and
//! renders the cross-bank comparison and Markdown report.

pub mod aggregate;
pub mod compare;
pub mod rank;
pub mod recommend;
pub mod report;
pub mod types;

pub use aggregate::{aggregate, tally};
pub use compare::{banks, compare_banks, theme_coverage, theme_summary, MIN_THEMES_PER_BANK};
pub use rank::identify_drivers_and_pain_points;
pub use recommend::generate_recommendations;
pub use report::render_markdown;
pub use types::*;
