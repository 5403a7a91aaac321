//! Pure URL derivation for item resources.
//!
//! These take the org's portal base URL (e.g.
//! `https://myorg.maps.example.com`) and compute the user-facing and API
//! endpoints for an item. No I/O; composition happens eagerly at content
//! construction time.

use crate::models::Item;

/// The item's landing page in the portal home application.
pub fn item_home_url(portal_base: &str, item_id: &str) -> String {
    format!(
        "{}/home/item.html?id={}",
        portal_base.trim_end_matches('/'),
        item_id
    )
}

/// The item's REST API endpoint. The token, when given, is appended so the
/// URL is directly fetchable for private items.
pub fn item_api_url(portal_base: &str, item_id: &str, token: Option<&str>) -> String {
    let url = format!(
        "{}/sharing/rest/content/items/{}?f=json",
        portal_base.trim_end_matches('/'),
        item_id
    );
    with_token(url, token)
}

/// The item's data endpoint.
pub fn item_data_url(portal_base: &str, item_id: &str, token: Option<&str>) -> String {
    let url = format!(
        "{}/sharing/rest/content/items/{}/data",
        portal_base.trim_end_matches('/'),
        item_id
    );
    with_token(url, token)
}

/// The full URL of the item's thumbnail, or `None` when the item has no
/// thumbnail resource.
pub fn item_thumbnail_url(portal_base: &str, item: &Item, token: Option<&str>) -> Option<String> {
    let thumbnail = item.thumbnail.as_deref()?;
    let url = format!(
        "{}/sharing/rest/content/items/{}/info/{}",
        portal_base.trim_end_matches('/'),
        item.id,
        thumbnail
    );
    Some(with_token(url, token))
}

fn with_token(url: String, token: Option<&str>) -> String {
    match token {
        Some(token) => {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!("{}{}token={}", url, separator, token)
        }
        None => url,
    }
}
