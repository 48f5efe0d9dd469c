//! Authentication state for Shopify Admin API calls.
//!
//! Obtaining an access token (OAuth, token exchange, client credentials) is
//! left to the caller; this module only carries the resulting credentials.
//!
//! # Example
//!
//! ```rust
//! use shopify_bulk::{Session, ShopDomain};
//!
//! let session = Session::new(ShopDomain::new("my-store").unwrap(), "shpat_token");
//! assert!(session.is_active());
//! ```

pub mod session;

pub use session::Session;
