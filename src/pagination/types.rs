//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use super::strategies::{
    CountPaginator, FlagPaginator, LastIdPaginator, PageCountPaginator, SinglePagePaginator,
};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available; the cursor has been advanced
    Continue,
    /// No more pages
    Done,
}

impl NextPage {
    /// Continue when `more` is true, otherwise done
    pub fn from_bool(more: bool) -> Self {
        if more {
            Self::Continue
        } else {
            Self::Done
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Strategy-specific pagination state for one window
///
/// Owned by exactly one fetch task and never shared across windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// Single request, nothing to track
    Unpaged,
    /// Offset/limit pagination terminated by a short page
    Offset {
        /// Records to skip
        offset: u64,
        /// Page size (also the offset step)
        limit: u32,
    },
    /// Offset/limit pagination terminated by a `has_more` flag
    Flag {
        /// Records to skip
        offset: u64,
        /// Page size (also the offset step)
        limit: u32,
        /// Last flag value seen
        has_more: bool,
    },
    /// Page-number pagination terminated by a page count
    Page {
        /// Current page number
        page: u32,
        /// Records per page
        page_size: u32,
        /// Page count reported by the provider
        page_count: Option<u32>,
    },
    /// Continuation-token pagination terminated by a total count
    LastId {
        /// Token returned by the previous page
        last_id: Option<String>,
        /// Records per page
        limit: u32,
        /// Records requested so far
        fetched: u64,
        /// Total reported by the provider
        total: Option<u64>,
    },
}

impl PageCursor {
    /// Current offset, for offset-based cursors
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::Offset { offset, .. } | Self::Flag { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Current page, for page-based cursors
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Page { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Short description used in debug logs
    pub fn describe(&self) -> String {
        match self {
            Self::Unpaged => "single".to_string(),
            Self::Offset { offset, limit } => format!("offset={offset} limit={limit}"),
            Self::Flag { offset, limit, .. } => format!("offset={offset} limit={limit}"),
            Self::Page {
                page, page_count, ..
            } => match page_count {
                Some(count) => format!("page={page}/{count}"),
                None => format!("page={page}"),
            },
            Self::LastId {
                last_id, fetched, ..
            } => format!(
                "last_id={} fetched={fetched}",
                last_id.as_deref().unwrap_or("-")
            ),
        }
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Cursor for the first request of a window
    fn initial_cursor(&self) -> PageCursor;

    /// Body fields describing the cursor (e.g., `offset` and `limit`)
    fn request_params(&self, cursor: &PageCursor) -> JsonObject;

    /// Process a response, advance the cursor and decide whether to continue
    fn process_response(
        &self,
        body: &JsonValue,
        records_count: usize,
        cursor: &mut PageCursor,
    ) -> NextPage;
}

/// Configuration for pagination behavior
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationConfig {
    /// No pagination
    #[default]
    None,

    /// Offset pagination, stop on a page shorter than `limit`
    Count {
        /// Body field name for offset
        #[serde(default = "default_offset_param")]
        offset_param: String,
        /// Body field name for limit
        #[serde(default = "default_limit_param")]
        limit_param: String,
        /// Number of records per page
        #[serde(default = "default_limit")]
        limit: u32,
    },

    /// Offset pagination, stop when a response flag is false
    Flag {
        /// Body field name for offset
        #[serde(default = "default_offset_param")]
        offset_param: String,
        /// Body field name for limit
        #[serde(default = "default_limit_param")]
        limit_param: String,
        /// Number of records per page
        #[serde(default = "default_limit")]
        limit: u32,
        /// Path to the boolean flag in the response
        flag_path: String,
    },

    /// Page number pagination, stop when the page count is reached
    PageCount {
        /// Body field name for page number
        #[serde(default = "default_page_param")]
        page_param: String,
        /// Body field name for page size
        #[serde(default = "default_page_size_param")]
        page_size_param: String,
        /// Records per page
        #[serde(default = "default_limit")]
        page_size: u32,
        /// First page number
        #[serde(default = "default_start_page")]
        start_page: u32,
        /// Path to the page count in the response
        page_count_path: String,
    },

    /// Continuation token pagination, stop when the total is reached
    LastId {
        /// Body field name for the token
        #[serde(default = "default_last_id_param")]
        last_id_param: String,
        /// Body field name for limit
        #[serde(default = "default_limit_param")]
        limit_param: String,
        /// Records per page
        #[serde(default = "default_limit")]
        limit: u32,
        /// Path to the next token in the response
        last_id_path: String,
        /// Path to the total count in the response
        total_path: String,
    },
}

fn default_offset_param() -> String {
    "offset".to_string()
}

fn default_limit_param() -> String {
    "limit".to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_page_size_param() -> String {
    "page_size".to_string()
}

fn default_last_id_param() -> String {
    "last_id".to_string()
}

fn default_limit() -> u32 {
    1000
}

fn default_start_page() -> u32 {
    1
}

impl PaginationConfig {
    /// Count-based config with default field names
    pub fn count(limit: u32) -> Self {
        Self::Count {
            offset_param: default_offset_param(),
            limit_param: default_limit_param(),
            limit,
        }
    }

    /// Flag-based config with default field names
    pub fn flag(limit: u32, flag_path: impl Into<String>) -> Self {
        Self::Flag {
            offset_param: default_offset_param(),
            limit_param: default_limit_param(),
            limit,
            flag_path: flag_path.into(),
        }
    }

    /// Page-count config with default field names, starting at page 1
    pub fn page_count(page_size: u32, page_count_path: impl Into<String>) -> Self {
        Self::PageCount {
            page_param: default_page_param(),
            page_size_param: default_page_size_param(),
            page_size,
            start_page: default_start_page(),
            page_count_path: page_count_path.into(),
        }
    }

    /// Last-id config with default field names
    pub fn last_id(
        limit: u32,
        last_id_path: impl Into<String>,
        total_path: impl Into<String>,
    ) -> Self {
        Self::LastId {
            last_id_param: default_last_id_param(),
            limit_param: default_limit_param(),
            limit,
            last_id_path: last_id_path.into(),
            total_path: total_path.into(),
        }
    }

    /// Reject page sizes that would never advance the cursor
    pub fn validate(&self) -> Result<()> {
        let (field, size) = match self {
            Self::None => return Ok(()),
            Self::Count { limit, .. } | Self::Flag { limit, .. } => ("pagination.limit", *limit),
            Self::LastId { limit, .. } => ("pagination.limit", *limit),
            Self::PageCount { page_size, .. } => ("pagination.page_size", *page_size),
        };
        if size == 0 {
            return Err(Error::invalid_value(field, "must be positive"));
        }
        Ok(())
    }

    /// Build the paginator described by this config
    pub fn build(&self) -> Arc<dyn Paginator> {
        match self {
            Self::None => Arc::new(SinglePagePaginator),
            Self::Count {
                offset_param,
                limit_param,
                limit,
            } => Arc::new(CountPaginator::new(offset_param, limit_param, *limit)),
            Self::Flag {
                offset_param,
                limit_param,
                limit,
                flag_path,
            } => Arc::new(FlagPaginator::new(
                offset_param,
                limit_param,
                *limit,
                flag_path,
            )),
            Self::PageCount {
                page_param,
                page_size_param,
                page_size,
                start_page,
                page_count_path,
            } => Arc::new(
                PageCountPaginator::new(page_param, page_size_param, *page_size, page_count_path)
                    .with_start_page(*start_page),
            ),
            Self::LastId {
                last_id_param,
                limit_param,
                limit,
                last_id_path,
                total_path,
            } => Arc::new(LastIdPaginator::new(
                last_id_param,
                limit_param,
                *limit,
                last_id_path,
                total_path,
            )),
        }
    }
}
