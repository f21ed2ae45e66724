//! CLI presentation: column tables, summaries and primary fields per command family.

pub mod account;
pub mod catalog;
pub mod documents;
pub mod initiatives;
pub mod issues;
mod shared;

pub use shared::{date_part, priority_label, progress_label};
