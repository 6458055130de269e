//! Access policies for snippet endpoints.
//!
//! A `Policy` answers two questions: may this requester make this request at
//! all, and may it act on this particular record. Policies compose as a list
//! where every entry must allow; the first denial wins.

use http::Method;

use crate::types::{Snippet, UserId};

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No identity was presented for a write.
    NotAuthenticated,
    /// The requester does not own the record.
    NotOwner,
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// GET, HEAD and OPTIONS never modify state.
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Records that carry an owner.
pub trait Owned {
    fn owner_id(&self) -> Option<UserId>;
}

impl Owned for Snippet {
    fn owner_id(&self) -> Option<UserId> {
        Snippet::owner_id(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Anyone may read; writes need an identity.
    AuthenticatedOrReadOnly,
    /// Anyone may read; writes need to come from the record's owner.
    OwnerOrReadOnly,
}

impl Policy {
    /// Request-level check, before any record is loaded.
    pub fn allows_request(self, method: &Method, requester: Option<UserId>) -> Decision {
        match self {
            Policy::AuthenticatedOrReadOnly => {
                if is_safe_method(method) || requester.is_some() {
                    Decision::Allow
                } else {
                    Decision::Deny(Denial::NotAuthenticated)
                }
            }
            Policy::OwnerOrReadOnly => Decision::Allow,
        }
    }

    /// Object-level check against a loaded record's owner.
    ///
    /// A record without an owner is read-only for everyone.
    pub fn allows_object(
        self,
        method: &Method,
        requester: Option<UserId>,
        owner: Option<UserId>,
    ) -> Decision {
        match self {
            Policy::AuthenticatedOrReadOnly => self.allows_request(method, requester),
            Policy::OwnerOrReadOnly => {
                if is_safe_method(method) {
                    return Decision::Allow;
                }
                match (requester, owner) {
                    (Some(r), Some(o)) if r == o => Decision::Allow,
                    _ => Decision::Deny(Denial::NotOwner),
                }
            }
        }
    }
}

/// Policies guarding collection endpoints.
pub const COLLECTION_POLICIES: &[Policy] = &[Policy::AuthenticatedOrReadOnly];

/// Policies guarding single-record endpoints.
pub const ITEM_POLICIES: &[Policy] = &[Policy::AuthenticatedOrReadOnly, Policy::OwnerOrReadOnly];

/// Run every policy's request check; first denial wins.
pub fn check_request(policies: &[Policy], method: &Method, requester: Option<UserId>) -> Decision {
    policies
        .iter()
        .map(|p| p.allows_request(method, requester))
        .find(|d| !d.is_allowed())
        .unwrap_or(Decision::Allow)
}

/// Run every policy's object check; first denial wins.
pub fn check_object<R: Owned + ?Sized>(
    policies: &[Policy],
    method: &Method,
    requester: Option<UserId>,
    record: &R,
) -> Decision {
    let owner = record.owner_id();
    policies
        .iter()
        .map(|p| p.allows_object(method, requester, owner))
        .find(|d| !d.is_allowed())
        .unwrap_or(Decision::Allow)
}

/// Full check for a single-record operation.
pub fn authorize<R: Owned + ?Sized>(
    method: &Method,
    record: &R,
    requester: Option<UserId>,
) -> Decision {
    match check_request(ITEM_POLICIES, method, requester) {
        Decision::Allow => check_object(ITEM_POLICIES, method, requester, record),
        deny => deny,
    }
}

/// Full check for a collection operation.
pub fn authorize_collection(method: &Method, requester: Option<UserId>) -> Decision {
    check_request(COLLECTION_POLICIES, method, requester)
}
