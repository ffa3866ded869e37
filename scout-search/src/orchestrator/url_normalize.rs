//! Canonical product links for candidate identity.
//!
//! The same product page comes back from different variant queries with
//! different campaign parameters, fragments or trailing slashes. Links are
//! canonicalised so those copies share one identity.

use url::Url;

/// Query parameters that carry attribution rather than identify a product.
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "ref", "spm", "scm", "srsltid", "mc_cid", "mc_eid",
];

/// Prefix shared by the campaign parameters (`utm_source`, `utm_medium`...).
const UTM_PREFIX: &str = "utm_";

/// Canonicalise a product link for identity comparison.
///
/// 1. Lowercase scheme and host (the url crate does this on parse).
/// 2. Drop default ports and the fragment.
/// 3. Drop tracking parameters, then sort what remains by key.
/// 4. Drop a trailing slash from the path (unless the path is `/`).
///
/// Relative or otherwise unparsable links are returned trimmed but
/// unchanged, so they still compare equal to themselves.
///
/// # Examples
///
/// ```
/// use scout_search::orchestrator::url_normalize::canonical_link;
///
/// let a = canonical_link("https://WWW.Jumia.sn/perruque-lisse-123.html/?utm_source=fb#avis");
/// let b = canonical_link("https://www.jumia.sn/perruque-lisse-123.html");
/// assert_eq!(a, b);
/// ```
pub fn canonical_link(raw: &str) -> String {
    let raw = raw.trim();
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_owned();
    };

    parsed.set_fragment(None);
    if is_default_port(&parsed) {
        let _ = parsed.set_port(None);
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();

    if params.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(&params);
    }

    let path = parsed.path().to_owned();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    parsed.to_string()
}

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with(UTM_PREFIX) || TRACKING_PARAMS.contains(&key.as_str())
}

fn is_default_port(url: &Url) -> bool {
    matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    )
}
