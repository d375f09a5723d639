// ABOUTME: Built-in tools exposed to agent hosts.
// ABOUTME: Gmail submission and Google Custom Search.

mod gmail;
mod google_search;

pub use gmail::*;
pub use google_search::*;
