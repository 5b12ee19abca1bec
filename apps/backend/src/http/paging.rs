//! Page metadata and navigation links for list responses.

use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetaData {
    pub page: i64,
    pub size: i64,
    pub total_item: i64,
    pub total_page: i64,
    pub links: Option<Links>,
}

impl PageMetaData {
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_: String,
    pub first: String,
    pub prev: String,
    pub next: String,
    pub last: String,
}

impl Links {
    /// Absolute links for the current request, keeping its query string and
    /// replacing `page`.
    pub fn for_request(req: &HttpRequest, page: i64, total_page: i64) -> Self {
        let base = {
            let info = req.connection_info();
            format!("{}://{}{}", info.scheme(), info.host(), req.path())
        };
        let query: Vec<(String, String)> =
            serde_urlencoded::from_str(req.query_string()).unwrap_or_default();
        Self::build(&base, &query, page, total_page)
    }

    /// Pure link construction. `prev` never goes below 1 and `next`/`last`
    /// never go past the last page (1 when there are no pages).
    pub fn build(base: &str, query: &[(String, String)], page: i64, total_page: i64) -> Self {
        let last_page = total_page.max(1);
        let prev = page.saturating_sub(1).max(1);
        let next = match page.checked_add(1) {
            Some(next) if next < total_page => next,
            _ => last_page,
        };

        let link = |target: i64| page_url(base, query, target);
        Self {
            self_: link(page),
            first: link(1),
            prev: link(prev),
            next: link(next),
            last: link(last_page),
        }
    }
}

fn page_url(base: &str, query: &[(String, String)], page: i64) -> String {
    let mut pairs: Vec<(&str, String)> = query
        .iter()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.as_str(), value.clone()))
        .collect();
    pairs.push(("page", page.to_string()));
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let encoded = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    format!("{base}?{encoded}")
}

/// Slice `items` to the requested page and describe the full set.
///
/// Non-positive `page` or `limit` fall back to the defaults. A page past the
/// end yields an empty list.
pub fn paginate<T>(items: Vec<T>, page: i64, limit: i64) -> (Vec<T>, PageMetaData) {
    let page = if page <= 0 { DEFAULT_PAGE } else { page };
    let limit = if limit <= 0 { DEFAULT_LIMIT } else { limit };

    let total_item = i64::try_from(items.len()).unwrap_or(i64::MAX);
    let total_page = total_item / limit + i64::from(total_item % limit != 0);

    let skip = usize::try_from(limit.saturating_mul(page - 1)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    let window: Vec<T> = items.into_iter().skip(skip).take(take).collect();

    let meta = PageMetaData {
        page,
        size: limit,
        total_item,
        total_page,
        links: None,
    };
    (window, meta)
}
