//! Built-in search tools, one per query domain.
//!
//! Each tool pairs an explicit configuration struct (named, typed,
//! optional fields with documented defaults) with a `Tool`
//! implementation that merges those bound defaults into a
//! `SearchRequest` at invocation time.

mod bio;
mod economics;
mod finance;
mod paper;
mod patent;
mod sec;
mod web;

pub use bio::{BioSearchConfig, BioSearchTool};
pub use economics::{EconomicsSearchConfig, EconomicsSearchTool};
pub use finance::{FinanceSearchConfig, FinanceSearchTool};
pub use paper::{PaperSearchConfig, PaperSearchTool};
pub use patent::{PatentSearchConfig, PatentSearchTool};
pub use sec::{SecSearchConfig, SecSearchTool};
pub use web::{WebSearchConfig, WebSearchTool};
