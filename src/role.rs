//! Closed role set and the capabilities each role carries.
//!
//! Capability checks happen at the boundary (API handler, page action),
//! before a request reaches the engine; the engine assumes them done.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Broker,
    Client,
    Photographer,
    Editor,
}

impl Role {
    /// Roles allowed to create booking drafts and request assignment.
    pub fn can_schedule(self) -> bool {
        matches!(self, Self::Admin | Self::Broker | Self::Client)
    }

    /// Roster management: create, edit, deactivate photographers.
    pub fn can_manage_roster(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Time-off blocks are created by the photographer themselves or by an
    /// admin on their behalf.
    pub fn can_manage_time_off(self) -> bool {
        matches!(self, Self::Admin | Self::Photographer)
    }
}
