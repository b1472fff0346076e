pub mod login;
pub mod logout;
pub mod whoami;

pub use login::login;
pub use logout::logout;
pub use whoami::whoami;

use crate::config;
use crate::middleware::AUTH_COOKIE;

/// Build the `Set-Cookie` value for the session cookie. A zero `max_age`
/// with an empty value clears it (logout).
pub(crate) fn auth_cookie(token: &str, max_age_secs: i64) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        AUTH_COOKIE, token, max_age_secs
    );
    if config::config().security.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_cookie_has_zero_max_age() {
        let cookie = auth_cookie("", 0);
        assert!(cookie.starts_with("auth-token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn session_cookie_carries_token_and_expiry() {
        let cookie = auth_cookie("tok123", 3600);
        assert!(cookie.starts_with("auth-token=tok123;"));
        assert!(cookie.contains("Max-Age=3600"));
    }
}
