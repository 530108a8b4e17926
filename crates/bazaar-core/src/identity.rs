//! Session identity: who is acting on the current request.

use serde::Serialize;

use crate::models::{Role, UserId};

/// An authenticated account as seen by the access policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

/// The acting identity of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    User(Principal),
}

impl Identity {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::User(p) => Some(p),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.principal().map(|p| p.role)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl From<Principal> for Identity {
    fn from(p: Principal) -> Self {
        Self::User(p)
    }
}
