// ABOUTME: Session cookie helpers
// ABOUTME: Reads a named cookie from request headers and builds HttpOnly Set-Cookie values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::cookies::AUTH_TOKEN;
use http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};

/// Value of cookie `name`, searching every `Cookie` header
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Add a `Set-Cookie` header carrying the session token
pub fn set_auth_cookie(headers: &mut HeaderMap, token: &str, max_age_secs: i64, secure: bool) {
    let cookie = format!(
        "{AUTH_TOKEN}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}{}",
        secure_attribute(secure)
    );
    append_cookie(headers, &cookie);
}

/// Add a `Set-Cookie` header that expires the session cookie
pub fn clear_auth_cookie(headers: &mut HeaderMap, secure: bool) {
    let cookie = format!(
        "{AUTH_TOKEN}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{}",
        secure_attribute(secure)
    );
    append_cookie(headers, &cookie);
}

const fn secure_attribute(secure: bool) -> &'static str {
    if secure {
        "; Secure"
    } else {
        ""
    }
}

fn append_cookie(headers: &mut HeaderMap, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => tracing::error!("Refusing to emit invalid Set-Cookie header: {e}"),
    }
}
