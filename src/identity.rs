//! Caller-supplied identity and its sign-in lifecycle.
//!
//! The engine never authenticates anyone; it only needs an identity to
//! stamp onto persisted results. Instead of a process-global "current
//! user", identity travels in an explicit [`SessionContext`] created at
//! sign-in and invalidated at sign-out.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub role: Role,
}

/// One signed-in user, from login until logout.
#[derive(Debug)]
pub struct SessionContext {
    identity: Identity,
    signed_in_at: DateTime<Local>,
    active: bool,
}

impl SessionContext {
    pub fn sign_in(identity: Identity) -> Self {
        Self {
            identity,
            signed_in_at: Local::now(),
            active: true,
        }
    }

    /// The signed-in identity, or `None` once signed out.
    pub fn identity(&self) -> Option<&Identity> {
        self.active.then_some(&self.identity)
    }

    pub fn signed_in_at(&self) -> DateTime<Local> {
        self.signed_in_at
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Invalidate the context. Idempotent; the identity is gone for good.
    pub fn sign_out(&mut self) {
        self.active = false;
    }
}
