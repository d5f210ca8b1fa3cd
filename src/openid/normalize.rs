//! Identifier Normalization
//!
//! Turns user-typed OpenID identifiers into the canonical URL used as the
//! discovery cache key (OpenID 2.0 section 7.2).

use url::Url;

use crate::error::{CacheError, Result};

/// XRI global context symbols; identifiers starting with one are XRIs.
const XRI_GLOBAL_CONTEXT: [char; 5] = ['=', '@', '+', '$', '!'];

// == Normalize ==
/// Normalizes `id` into an http(s) URL.
///
/// XRI identifiers are not supported and are rejected.
pub fn normalize(id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CacheError::InvalidIdentifier("No id provided".to_string()));
    }

    if has_prefix_ignore_case(id, "xri://") || id.starts_with(XRI_GLOBAL_CONTEXT) {
        return Err(CacheError::InvalidIdentifier(format!(
            "XRI identifiers not supported: {}",
            id
        )));
    }

    let mut candidate = if has_prefix_ignore_case(id, "http://")
        || has_prefix_ignore_case(id, "https://")
    {
        id.to_string()
    } else {
        format!("http://{}", id)
    };

    if let Some(fragment) = candidate.find('#') {
        candidate.truncate(fragment);
    }

    let mut url = Url::parse(&candidate)
        .map_err(|e| CacheError::InvalidIdentifier(format!("{}: {}", id, e)))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(CacheError::InvalidIdentifier(format!(
            "Invalid address provided as id: {}",
            id
        )));
    }
    if url.path().is_empty() {
        url.set_path("/");
    }

    Ok(url.to_string())
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
