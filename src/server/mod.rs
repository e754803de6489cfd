//! HTTP surface for the invoice actions
//!
//! Form posts are handed to the actions; their outcome effects are then
//! applied here: refreshes drop cached pages and redirects become
//! `303 See Other`.

pub mod builder;
pub mod cache;
pub mod effects;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use cache::PageCache;
pub use handlers::{AppState, PAGE_CACHE_HEADER};
pub use router::build_router;
