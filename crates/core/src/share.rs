use url::Url;

use crate::model::PromptId;

/// Query parameter carrying the prompt id in a deep link.
pub const QUERY_KEY: &str = "q";

/// `<origin><path>?q=<id>` for the given address. Any other query and the
/// fragment are dropped.
#[must_use]
pub fn share_url(location: &Url, id: PromptId) -> Url {
    let mut url = location.clone();
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(QUERY_KEY, &id.to_string());
    url
}

/// Reads the deep-link id from an address, if present and valid.
///
/// Out-of-range or malformed values are ignored.
#[must_use]
pub fn deep_link_id(location: &Url) -> Option<PromptId> {
    location
        .query_pairs()
        .find(|(key, _)| key == QUERY_KEY)
        .and_then(|(_, value)| PromptId::parse_input(&value).ok())
}

/// The same address with the query removed, as shown after a preview is
/// confirmed.
#[must_use]
pub fn without_query(location: &Url) -> Url {
    let mut url = location.clone();
    url.set_query(None);
    url
}
