/// Signed-cookie sessions and the owner check
///
/// Session identity is a single signed cookie whose value is the
/// authenticated username. The signature (HMAC, via the `cookie` crate's
/// signed jar) makes the credential opaque to tampering; there is no
/// server-side session store.
///
/// The jar is extracted once per request, so the verified identity is an
/// explicit, request-scoped value handlers receive as an argument rather
/// than ambient global state.
///
/// # Example
///
/// ```
/// use axum_extra::extract::SignedCookieJar;
/// use tasknest_shared::auth::session::{self, session_key};
///
/// let key = session_key("an-example-secret-of-at-least-32-bytes!!");
/// let jar = SignedCookieJar::new(key);
///
/// let jar = session::remember(jar, "nhuntwalker");
/// assert!(session::is_user(&jar, "nhuntwalker"));
/// assert!(!session::is_user(&jar, "somebody_else"));
///
/// let jar = session::forget(jar);
/// assert!(session::authenticated_username(&jar).is_none());
/// ```

use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use axum_extra::extract::SignedCookieJar;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "tasknest_session";

/// Derives the cookie signing key from the configured secret
///
/// # Panics
///
/// Panics if the secret is shorter than 32 bytes. Config validation
/// rejects such secrets before this is ever called.
pub fn session_key(secret: &str) -> Key {
    Key::derive_from(secret.as_bytes())
}

/// Issues a session credential for `username`
///
/// Adds the signed session cookie to the jar. The cookie is `HttpOnly`
/// and `SameSite=Lax`, scoped to the whole site.
pub fn remember(jar: SignedCookieJar, username: &str) -> SignedCookieJar {
    let mut cookie = Cookie::new(SESSION_COOKIE, username.to_owned());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Revokes the session credential
///
/// Adds a removal cookie so the client drops the session on receipt.
pub fn forget(jar: SignedCookieJar) -> SignedCookieJar {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    jar.remove(cookie)
}

/// Returns the verified identity carried by the request, if any
///
/// None if there is no session cookie or its signature does not verify.
pub fn authenticated_username(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// The owner check: does the session identity match `username`?
///
/// This is the sole authorization rule in the system. Equality is on the
/// username string, exactly as supplied in the request path.
pub fn is_user(jar: &SignedCookieJar, username: &str) -> bool {
    authenticated_username(jar).as_deref() == Some(username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap};

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    fn empty_jar() -> SignedCookieJar {
        SignedCookieJar::new(session_key(SECRET))
    }

    #[test]
    fn test_remember_then_read_back() {
        let jar = remember(empty_jar(), "nhuntwalker");

        assert_eq!(
            authenticated_username(&jar).as_deref(),
            Some("nhuntwalker")
        );
    }

    #[test]
    fn test_is_user_matches_exact_username_only() {
        let jar = remember(empty_jar(), "nhuntwalker");

        assert!(is_user(&jar, "nhuntwalker"));
        assert!(!is_user(&jar, "Nhuntwalker"));
        assert!(!is_user(&jar, "somebody_else"));
        assert!(!is_user(&jar, ""));
    }

    #[test]
    fn test_no_cookie_means_no_identity() {
        let jar = empty_jar();

        assert!(authenticated_username(&jar).is_none());
        assert!(!is_user(&jar, "anyone"));
    }

    #[test]
    fn test_forget_clears_identity() {
        let jar = remember(empty_jar(), "nhuntwalker");
        let jar = forget(jar);

        assert!(authenticated_username(&jar).is_none());
    }

    #[test]
    fn test_unsigned_cookie_is_rejected() {
        // A client-forged cookie without a valid signature must not
        // produce an identity.
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("{}=nhuntwalker", SESSION_COOKIE).parse().unwrap(),
        );

        let jar = SignedCookieJar::from_headers(&headers, session_key(SECRET));
        assert!(authenticated_username(&jar).is_none());
    }

    #[test]
    fn test_session_key_is_deterministic() {
        // The same secret must derive the same key across restarts,
        // otherwise every deploy would log everyone out.
        assert_eq!(session_key(SECRET).master(), session_key(SECRET).master());
        assert_ne!(
            session_key(SECRET).master(),
            session_key("a-completely-different-32-byte-secret!!!").master()
        );
    }
}
