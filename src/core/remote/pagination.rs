//! Link-header pagination.
//!
//! GitLab pages collection endpoints and advertises the following page in
//! the `Link` response header (`<url>; rel="next"`). [`collect_pages`]
//! walks those links iteratively and returns every item in server order.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{RemoteError, Result};

/// One fetched page.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// URL of the following page, if any
    pub next: Option<String>,
}

/// Extract the `rel="next"` target from a `Link` header.
///
/// Handles several comma-separated links, extra parameters, unquoted
/// relation values, and space-separated relation lists.
pub fn next_page_url(header: &str) -> Option<String> {
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>')?;
        let target = &after[..end];

        let tail = &after[end + 1..];
        let params = tail.find('<').map_or(tail, |next| &tail[..next]);

        if params.split([';', ',']).any(is_next_relation) {
            return Some(target.trim().to_string());
        }
        rest = tail;
    }

    None
}

fn is_next_relation(param: &str) -> bool {
    let Some((name, value)) = param.split_once('=') else {
        return false;
    };
    name.trim().eq_ignore_ascii_case("rel")
        && value
            .trim()
            .trim_matches('"')
            .split_whitespace()
            .any(|rel| rel.eq_ignore_ascii_case("next"))
}

/// Fetch every page starting at `first_url`.
///
/// `fetch` performs one request and returns the page or a failure reason.
/// Requests are strictly sequential; pages are concatenated in order.
///
/// # Errors
///
/// Returns `RemoteError::Fetch` naming the failing URL. Items from earlier
/// pages are dropped. A `next` link pointing back at a visited page is
/// also an error.
pub fn collect_pages<T, F>(first_url: &str, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(&str) -> std::result::Result<Page<T>, String>,
{
    let mut items = Vec::new();
    let mut visited = HashSet::new();
    let mut url = first_url.to_string();

    loop {
        if !visited.insert(url.clone()) {
            return Err(RemoteError::Fetch {
                url,
                reason: "pagination loops back to a visited page".to_string(),
            }
            .into());
        }

        let page = fetch(&url).map_err(|reason| RemoteError::Fetch {
            url: url.clone(),
            reason,
        })?;

        debug!(url = %url, items = page.items.len(), "fetched page");
        items.extend(page.items);

        match page.next {
            Some(next) => url = next,
            None => break,
        }
    }

    Ok(items)
}
