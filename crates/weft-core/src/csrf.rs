//! CSRF token lookup
//!
//! A page meta tag `csrf-param` names the cookie holding the token;
//! the `csrf-token` meta tag is the fallback. A missing token is not
//! an error; the header is simply omitted.

use crate::host::HostEnvironment;
use percent_encoding::percent_decode_str;

/// Header the token is injected under, for non-GET submissions
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Look up the page's CSRF token, if any
pub fn token(host: &dyn HostEnvironment) -> Option<String> {
    if let Some(param) = host.meta_content("csrf-param") {
        if let Some(raw) = host.cookie(&param) {
            let decoded = percent_decode_str(&raw)
                .decode_utf8()
                .map(|value| value.to_string())
                .unwrap_or(raw);
            if !decoded.is_empty() {
                return Some(decoded);
            }
        }
    }
    host.meta_content("csrf-token")
}
