//! Role policies.
//!
//! A policy is a named flat set of roles; a token satisfies it when at least
//! one of its roles is in the set. Policies never inherit from each other:
//! `ManagerPolicy` lists `Admin` and `SuperAdmin` itself instead of deriving
//! them from `AdminPolicy`, so widening one policy never widens another.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::claims::Claims;
use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    name: Cow<'static, str>,
    roles: BTreeSet<String>,
}

impl Policy {
    pub fn new<I, R>(name: impl Into<Cow<'static, str>>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            name: name.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Non-empty intersection between `roles` and this policy.
    pub fn allows<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|role| self.roles.contains(role.as_ref()))
    }

    /// Like [`authorize`], but as a typed result for the request router.
    pub fn require(&self, claims: &Claims) -> Result<(), AuthError> {
        if authorize(claims, self) {
            Ok(())
        } else {
            Err(AuthError::PolicyDenied {
                policy: self.name.to_string(),
            })
        }
    }
}

/// Decide whether verified `claims` satisfy `policy`.
///
/// Only meaningful for claims returned by the verifier; a token with zero
/// roles is valid but satisfies no policy.
pub fn authorize(claims: &Claims, policy: &Policy) -> bool {
    policy.allows(&claims.roles)
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::roles;

    fn role_set() -> impl Strategy<Value = Vec<&'static str>> {
        prop::sample::subsequence(roles::ALL.to_vec(), 0..=roles::ALL.len())
    }

    proptest! {
        /// `authorize` is exactly "the two role sets intersect".
        #[test]
        fn authorize_is_set_intersection(held in role_set(), required in role_set()) {
            let claims = Claims::new("iss", "aud", "user-1", 0).with_roles(held.iter().copied());
            let policy = Policy::new("AnyPolicy", required.iter().copied());

            let intersects = held.iter().any(|r| required.contains(r));
            prop_assert_eq!(authorize(&claims, &policy), intersects);
            prop_assert_eq!(policy.require(&claims).is_ok(), intersects);
        }

        /// Adding roles to a token never revokes access.
        #[test]
        fn adding_roles_never_revokes(held in role_set(), extra in role_set(), required in role_set()) {
            let policy = Policy::new("AnyPolicy", required.iter().copied());
            let before = Claims::new("iss", "aud", "u", 0).with_roles(held.iter().copied());
            let after = Claims::new("iss", "aud", "u", 0)
                .with_roles(held.iter().chain(extra.iter()).copied());

            prop_assert!(!authorize(&before, &policy) || authorize(&after, &policy));
        }
    }
}
