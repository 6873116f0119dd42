//! Command implementations for the docsearch CLI
//!
//! Each command lives in its own submodule and takes already-parsed
//! arguments; loading and logging happen in `main`.

mod cache;
mod completions;
mod export;
mod lookup;
mod pages;
mod search;
mod show;
mod stats;
mod validate;

pub use cache::execute as manage_cache;
pub use completions::generate;
pub use export::execute as export_index;
pub use lookup::execute as lookup_symbols;
pub use pages::execute as list_pages;
pub use search::execute as search;
pub use show::execute as show_location;
pub use stats::execute as show_stats;
pub use validate::execute as validate_index;
