//! Resource policies applied by the catalog handlers.
//!
//! Handlers call [`authorize`] twice for object-level writes: once before the
//! target is loaded (request level, `owner = None`) and once with the loaded
//! row's owner. That ordering makes an anonymous write to a missing id a 401,
//! and an authenticated write to a missing id a 404.

use kennel_core::access::{evaluate, Method, Policy};
use kennel_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;

/// Policy applied to `/breeds`.
pub const BREED_POLICY: Policy = Policy::ReadOrAuthenticated;

/// Policy applied to `/dogs`.
pub const DOG_POLICY: Policy = Policy::ReadOrAuthenticatedOrOwner;

/// Evaluate `policy` for the caller and fail with 401/403 on denial.
pub fn authorize(
    policy: Policy,
    method: Method,
    caller: &MaybeAuthUser,
    owner: Option<DbId>,
) -> AppResult<()> {
    let decision = evaluate(policy, method, caller.user_id(), owner);
    if !decision.is_allowed() {
        tracing::debug!(
            ?policy,
            ?method,
            caller = ?caller.user_id(),
            ?owner,
            ?decision,
            "Request denied by policy",
        );
    }
    decision.into_result()?;
    Ok(())
}
