//! Session type holding the shop and access token used for API calls.

use crate::config::ShopDomain;
use chrono::{DateTime, Utc};

/// An authenticated connection to one Shopify store.
///
/// A process may hold sessions for many stores at once; every client built
/// from a session only ever talks to that session's shop.
#[derive(Clone, Debug)]
pub struct Session {
    /// The shop this session is for.
    pub shop: ShopDomain,

    /// The Admin API access token.
    pub access_token: String,

    /// When the access token expires, if it does.
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session with a non-expiring access token.
    #[must_use]
    pub fn new(shop: ShopDomain, access_token: impl Into<String>) -> Self {
        Self {
            shop,
            access_token: access_token.into(),
            expires: None,
        }
    }

    /// Sets the token expiry.
    #[must_use]
    pub const fn with_expiry(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Returns `true` if the access token has expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if the session has a token that has not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
