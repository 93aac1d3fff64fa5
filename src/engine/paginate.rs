//! Per-window pagination loop

use crate::decode::{check_remote_error, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::pagination::Paginator;
use crate::partition::Window;
use crate::request::RequestBuilder;
use crate::types::{JsonValue, Method, Record};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fetch every page of one window, strictly in sequence
///
/// Each iteration builds the window body, merges in the cursor fields,
/// posts it, fails on a provider error, extracts the records and lets the
/// paginator decide whether another page follows. A `GET` endpoint sends no
/// body. The token is checked before each request and raced against the
/// request in flight. On error the records gathered so far are discarded.
#[allow(clippy::too_many_arguments)]
pub async fn paginate(
    transport: &dyn Transport,
    method: Method,
    url: &str,
    window: Option<&Window>,
    builder: &dyn RequestBuilder,
    decoder: &dyn RecordDecoder,
    paginator: &dyn Paginator,
    token: &CancellationToken,
) -> Result<Vec<Record>> {
    let api_method = transport.resolve_url(url);
    let mut cursor = paginator.initial_cursor();
    let mut records = Vec::new();
    let mut pages = 0usize;

    loop {
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        debug!(url = %api_method, cursor = %cursor.describe(), "Requesting page");

        let request = async {
            match method {
                Method::Get => transport.get_json(url).await,
                Method::Post => {
                    let mut body = builder.build(window)?;
                    let JsonValue::Object(fields) = &mut body else {
                        return Err(Error::invalid_value(
                            "body",
                            "request body must be a JSON object",
                        ));
                    };
                    fields.extend(paginator.request_params(&cursor));
                    transport.post_json(url, &body).await
                }
            }
        };

        let response = tokio::select! {
            biased;
            () = token.cancelled() => return Err(Error::Cancelled),
            response = request => response?,
        };

        check_remote_error(response.status, &api_method, &response.body)?;

        let page = decoder.decode(&response.body)?;
        let count = page.len();
        records.extend(page);
        pages += 1;

        if paginator
            .process_response(&response.body, count, &mut cursor)
            .is_done()
        {
            break;
        }
    }

    match window {
        Some(w) => debug!(url = %api_method, window = %w, pages, records = records.len(), "Window exhausted"),
        None => debug!(url = %api_method, pages, records = records.len(), "Endpoint exhausted"),
    }

    Ok(records)
}
