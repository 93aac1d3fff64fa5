//! Pagination module
//!
//! Supports: Count (offset/limit), Flag (has_next), Page Count, Last Id, Single Page
//!
//! # Overview
//!
//! Providers page through large result sets in several ways. Each strategy
//! owns the rules for one of them: which body fields describe the current
//! page, how the response advances the [`PageCursor`], and when the window
//! is exhausted. The fetch loop itself lives in [`crate::engine::paginate`].

mod strategies;
mod types;

pub use strategies::{
    CountPaginator, FlagPaginator, LastIdPaginator, PageCountPaginator, SinglePagePaginator,
};
pub use types::{NextPage, PageCursor, PaginationConfig, Paginator};
