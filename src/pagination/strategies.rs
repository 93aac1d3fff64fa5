//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{NextPage, PageCursor, Paginator};
use crate::decode::extract_path;
use crate::types::{JsonObject, JsonValue, OptionStringExt};
use serde_json::json;
use tracing::warn;

// ============================================================================
// Count Pagination
// ============================================================================

/// Offset/limit pagination that stops on a short page
///
/// The provider returns up to `limit` records; a page with fewer records
/// is the last one. The offset advances by `limit` on every page.
#[derive(Debug, Clone)]
pub struct CountPaginator {
    /// Body field name for offset
    pub offset_param: String,
    /// Body field name for limit
    pub limit_param: String,
    /// Number of records per page
    pub limit: u32,
}

impl CountPaginator {
    /// Create a new count paginator
    pub fn new(offset_param: impl Into<String>, limit_param: impl Into<String>, limit: u32) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit,
        }
    }
}

impl Paginator for CountPaginator {
    fn initial_cursor(&self) -> PageCursor {
        PageCursor::Offset {
            offset: 0,
            limit: self.limit,
        }
    }

    fn request_params(&self, cursor: &PageCursor) -> JsonObject {
        offset_params(
            &self.offset_param,
            &self.limit_param,
            cursor.offset().unwrap_or(0),
            self.limit,
        )
    }

    fn process_response(
        &self,
        _body: &JsonValue,
        records_count: usize,
        cursor: &mut PageCursor,
    ) -> NextPage {
        if let PageCursor::Offset { offset, limit } = cursor {
            *offset += u64::from(*limit);
        }
        NextPage::from_bool(records_count >= self.limit as usize)
    }
}

// ============================================================================
// Flag Pagination
// ============================================================================

/// Offset/limit pagination driven by a `has_more` style flag
///
/// Common patterns:
/// - `{ "result": { "has_next": true } }`
/// - `{ "has_more": false }`
#[derive(Debug, Clone)]
pub struct FlagPaginator {
    /// Body field name for offset
    pub offset_param: String,
    /// Body field name for limit
    pub limit_param: String,
    /// Number of records per page
    pub limit: u32,
    /// Path to the boolean flag
    pub flag_path: String,
}

impl FlagPaginator {
    /// Create a new flag paginator
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        limit: u32,
        flag_path: impl Into<String>,
    ) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit,
            flag_path: flag_path.into(),
        }
    }
}

impl Paginator for FlagPaginator {
    fn initial_cursor(&self) -> PageCursor {
        PageCursor::Flag {
            offset: 0,
            limit: self.limit,
            has_more: true,
        }
    }

    fn request_params(&self, cursor: &PageCursor) -> JsonObject {
        offset_params(
            &self.offset_param,
            &self.limit_param,
            cursor.offset().unwrap_or(0),
            self.limit,
        )
    }

    fn process_response(
        &self,
        body: &JsonValue,
        _records_count: usize,
        cursor: &mut PageCursor,
    ) -> NextPage {
        let flag = match extract_path(body, &self.flag_path).and_then(JsonValue::as_bool) {
            Some(flag) => flag,
            None => {
                warn!(path = %self.flag_path, "Pagination flag missing, stopping");
                false
            }
        };

        if let PageCursor::Flag {
            offset,
            limit,
            has_more,
        } = cursor
        {
            *offset += u64::from(*limit);
            *has_more = flag;
        }
        NextPage::from_bool(flag)
    }
}

// ============================================================================
// Page Count Pagination
// ============================================================================

/// Page number pagination bounded by a provider-reported page count
///
/// Common patterns:
/// - `{ "page": 2, "page_size": 1000 }` with `{ "result": { "page_count": 4 } }`
#[derive(Debug, Clone)]
pub struct PageCountPaginator {
    /// Body field name for page number
    pub page_param: String,
    /// Body field name for page size
    pub page_size_param: String,
    /// Records per page
    pub page_size: u32,
    /// First page number (usually 1)
    pub start_page: u32,
    /// Path to the page count
    pub page_count_path: String,
}

impl PageCountPaginator {
    /// Create a new page count paginator starting at page 1
    pub fn new(
        page_param: impl Into<String>,
        page_size_param: impl Into<String>,
        page_size: u32,
        page_count_path: impl Into<String>,
    ) -> Self {
        Self {
            page_param: page_param.into(),
            page_size_param: page_size_param.into(),
            page_size,
            start_page: 1,
            page_count_path: page_count_path.into(),
        }
    }

    /// Set the first page number
    #[must_use]
    pub fn with_start_page(mut self, start_page: u32) -> Self {
        self.start_page = start_page;
        self
    }
}

impl Paginator for PageCountPaginator {
    fn initial_cursor(&self) -> PageCursor {
        PageCursor::Page {
            page: self.start_page,
            page_size: self.page_size,
            page_count: None,
        }
    }

    fn request_params(&self, cursor: &PageCursor) -> JsonObject {
        let mut params = JsonObject::new();
        params.insert(
            self.page_param.clone(),
            json!(cursor.page().unwrap_or(self.start_page)),
        );
        params.insert(self.page_size_param.clone(), json!(self.page_size));
        params
    }

    fn process_response(
        &self,
        body: &JsonValue,
        _records_count: usize,
        cursor: &mut PageCursor,
    ) -> NextPage {
        let PageCursor::Page {
            page, page_count, ..
        } = cursor
        else {
            return NextPage::Done;
        };

        if let Some(count) = extract_path(body, &self.page_count_path).and_then(as_u64) {
            *page_count = Some(u32::try_from(count).unwrap_or(u32::MAX));
        }

        let Some(count) = *page_count else {
            warn!(path = %self.page_count_path, "Page count missing, stopping");
            return NextPage::Done;
        };

        let pages_done = page.saturating_sub(self.start_page) + 1;
        if pages_done >= count {
            return NextPage::Done;
        }

        *page += 1;
        NextPage::Continue
    }
}

// ============================================================================
// Last Id Pagination
// ============================================================================

/// Continuation-token pagination bounded by a total count
///
/// Each response carries the token for the next page (`last_id`) and the
/// total number of records. Pagination stops once `limit * pages >= total`
/// or the provider stops returning a token.
#[derive(Debug, Clone)]
pub struct LastIdPaginator {
    /// Body field name for the token
    pub last_id_param: String,
    /// Body field name for limit
    pub limit_param: String,
    /// Records per page
    pub limit: u32,
    /// Path to the next token
    pub last_id_path: String,
    /// Path to the total count
    pub total_path: String,
}

impl LastIdPaginator {
    /// Create a new last id paginator
    pub fn new(
        last_id_param: impl Into<String>,
        limit_param: impl Into<String>,
        limit: u32,
        last_id_path: impl Into<String>,
        total_path: impl Into<String>,
    ) -> Self {
        Self {
            last_id_param: last_id_param.into(),
            limit_param: limit_param.into(),
            limit,
            last_id_path: last_id_path.into(),
            total_path: total_path.into(),
        }
    }
}

impl Paginator for LastIdPaginator {
    fn initial_cursor(&self) -> PageCursor {
        PageCursor::LastId {
            last_id: None,
            limit: self.limit,
            fetched: 0,
            total: None,
        }
    }

    fn request_params(&self, cursor: &PageCursor) -> JsonObject {
        let token = match cursor {
            PageCursor::LastId {
                last_id: Some(id), ..
            } => JsonValue::String(id.clone()),
            _ => JsonValue::Null,
        };

        let mut params = JsonObject::new();
        params.insert(self.last_id_param.clone(), token);
        params.insert(self.limit_param.clone(), json!(self.limit));
        params
    }

    fn process_response(
        &self,
        body: &JsonValue,
        _records_count: usize,
        cursor: &mut PageCursor,
    ) -> NextPage {
        let PageCursor::LastId {
            last_id,
            limit,
            fetched,
            total,
        } = cursor
        else {
            return NextPage::Done;
        };

        *fetched += u64::from(*limit);
        if let Some(t) = extract_path(body, &self.total_path).and_then(as_u64) {
            *total = Some(t);
        }
        *last_id = extract_path(body, &self.last_id_path)
            .and_then(JsonValue::as_str)
            .map(String::from)
            .none_if_empty();

        match (*total, last_id.is_some()) {
            (Some(t), true) => NextPage::from_bool(*fetched < t),
            (None, _) => {
                warn!(path = %self.total_path, "Total count missing, stopping");
                NextPage::Done
            }
            (Some(_), false) => NextPage::Done,
        }
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct SinglePagePaginator;

impl Paginator for SinglePagePaginator {
    fn initial_cursor(&self) -> PageCursor {
        PageCursor::Unpaged
    }

    fn request_params(&self, _cursor: &PageCursor) -> JsonObject {
        JsonObject::new()
    }

    fn process_response(
        &self,
        _body: &JsonValue,
        _records_count: usize,
        _cursor: &mut PageCursor,
    ) -> NextPage {
        NextPage::Done
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn offset_params(offset_param: &str, limit_param: &str, offset: u64, limit: u32) -> JsonObject {
    let mut params = JsonObject::new();
    params.insert(offset_param.to_string(), json!(offset));
    params.insert(limit_param.to_string(), json!(limit));
    params
}

/// Accept counts sent either as numbers or numeric strings
fn as_u64(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}
