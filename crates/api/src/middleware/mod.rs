//! Authentication extractors and permission checks.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Anonymous when the header is absent.
//! - [`permissions::authorize`] -- Applies a resource [`Policy`](kennel_core::access::Policy).

pub mod auth;
pub mod permissions;
