use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

/// Clears the session cookies shared with embedded web content.
pub trait CookieManager: Send + Sync {
    fn clear_web_view_cookie(&self);
}

/// Process-local cookie jar for embedded course content.
#[derive(Default)]
pub struct SessionCookieStore {
    cookies: Mutex<HashMap<String, String>>,
}

impl SessionCookieStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut cookies) = self.cookies.lock() {
            cookies.insert(name.into(), value.into());
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .lock()
            .ok()
            .and_then(|cookies| cookies.get(name).cloned())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies
            .lock()
            .map(|cookies| cookies.is_empty())
            .unwrap_or(true)
    }
}

impl CookieManager for SessionCookieStore {
    fn clear_web_view_cookie(&self) {
        // A poisoned jar is still cleared; logout must not leave a session behind.
        let mut cookies = match self.cookies.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        debug!(count = cookies.len(), "clearing session cookies");
        cookies.clear();
    }
}
