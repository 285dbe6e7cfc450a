//! Owner authorization.
//!
//! The election never decides on its own who the administrator is. It asks
//! an [`Authorizer`], which the embedding application provides.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Address;

/// The role an operation demands of its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    RegisteredVoter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Administrator => f.write_str("administrator"),
            Role::RegisteredVoter => f.write_str("registered voter"),
        }
    }
}

/// Decides whether a caller is the election administrator.
pub trait Authorizer: Send + Sync {
    /// The administrator identity.
    fn administrator(&self) -> Address;

    fn is_administrator(&self, caller: &Address) -> bool {
        *caller == self.administrator()
    }
}

/// A single fixed owner, set when the election is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnerAuthorizer {
    owner: Address,
}

impl OwnerAuthorizer {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }
}

impl Authorizer for OwnerAuthorizer {
    fn administrator(&self) -> Address {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_only_administrator() {
        let owner = Address([1; 20]);
        let auth = OwnerAuthorizer::new(owner);

        assert_eq!(auth.administrator(), owner);
        assert!(auth.is_administrator(&owner));
        assert!(!auth.is_administrator(&Address([2; 20])));
    }
}
