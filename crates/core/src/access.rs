//! Access-control policies for catalog resources.
//!
//! Each resource type is tagged with a [`Policy`]; [`evaluate`] decides a
//! request from the method, the caller identity, and (for object-level
//! checks) the owner of the target row. The function is pure so that the
//! HTTP layer only has to translate the [`Decision`] into a response.

use crate::error::CoreError;
use crate::types::DbId;

/// Request method, reduced to what the policies care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Options,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Safe methods never modify state and are open to anonymous callers.
    pub fn is_safe(self) -> bool {
        matches!(self, Method::Get | Method::Head | Method::Options)
    }
}

/// Permission policy attached to a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Anyone may read; any authenticated caller may write. Used for breeds.
    ReadOrAuthenticated,
    /// Anyone may read; writes need authentication, and writes to an
    /// existing object need the caller to own it. Used for dogs.
    ReadOrAuthenticatedOrOwner,
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    NotOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }

    /// Convert a denial into the matching [`CoreError`].
    ///
    /// Non-owner writes are reported as `Forbidden` rather than `NotFound`:
    /// reads are public, so the object's existence is not a secret.
    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::Unauthenticated) => Err(CoreError::Unauthorized(
                "Authentication credentials were not provided.".into(),
            )),
            Decision::Deny(DenyReason::NotOwner) => Err(CoreError::Forbidden(
                "You do not have permission to perform this action.".into(),
            )),
        }
    }
}

/// Evaluate `policy` for a request.
///
/// `caller` is the authenticated user id, or `None` for anonymous requests.
/// `owner` is the owner of the target object for object-level checks; pass
/// `None` for collection-level checks (list, create) and for resources
/// without owners.
pub fn evaluate(
    policy: Policy,
    method: Method,
    caller: Option<DbId>,
    owner: Option<DbId>,
) -> Decision {
    if method.is_safe() {
        return Decision::Allow;
    }
    let Some(caller) = caller else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };
    match (policy, owner) {
        (Policy::ReadOrAuthenticated, _) => Decision::Allow,
        (Policy::ReadOrAuthenticatedOrOwner, None) => Decision::Allow,
        (Policy::ReadOrAuthenticatedOrOwner, Some(owner)) if owner == caller => Decision::Allow,
        (Policy::ReadOrAuthenticatedOrOwner, Some(_)) => Decision::Deny(DenyReason::NotOwner),
    }
}
