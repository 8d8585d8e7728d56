//! Room and participant capabilities consumed by client tools.
//!
//! The transport that actually connects to a room lives outside this crate.
//! It implements [`Room`] and publishes the active room through a
//! [`RoomContext`], which client tools consult on every call.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::AgentError;

/// How a remote participant joined the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParticipantKind {
    /// A regular client such as a browser.
    Standard,
    Ingress,
    Egress,
    /// A phone caller bridged through a SIP trunk.
    Sip,
    /// Another agent.
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteParticipant {
    pub identity: String,
    pub kind: ParticipantKind,
}

impl RemoteParticipant {
    pub fn new(identity: impl Into<String>, kind: ParticipantKind) -> Self {
        Self {
            identity: identity.into(),
            kind,
        }
    }
}

/// A remote method call addressed to one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    pub destination_identity: String,
    pub method: String,
    pub payload: String,
}

/// The active room, as seen from the local participant.
#[async_trait]
pub trait Room: Send + Sync {
    /// Connected remote participants, in join order.
    fn remote_participants(&self) -> Vec<RemoteParticipant>;

    /// Perform an RPC from the local participant and await the response
    /// payload. Any timeout is the transport's concern.
    async fn perform_rpc(&self, request: RpcRequest) -> Result<String, AgentError>;
}

/// Resolves the room a call should use at the moment it is made.
pub trait RoomContext: Send + Sync {
    fn current_room(&self) -> Result<Arc<dyn Room>, AgentError>;
}

/// First connected participant that is a standard (browser) client.
pub fn first_standard_participant(room: &dyn Room) -> Option<RemoteParticipant> {
    room.remote_participants()
        .into_iter()
        .find(|p| p.kind == ParticipantKind::Standard)
}

/// A [`RoomContext`] the session attaches its room to once connected.
///
/// Starts empty; lookups fail with [`AgentError::RoomUnavailable`] until a
/// room is attached.
#[derive(Default)]
pub struct RoomSlot {
    room: RwLock<Option<Arc<dyn Room>>>,
}

impl RoomSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_room(room: Arc<dyn Room>) -> Self {
        Self {
            room: RwLock::new(Some(room)),
        }
    }

    pub fn attach(&self, room: Arc<dyn Room>) {
        let mut slot = self.room.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(room);
    }

    pub fn detach(&self) {
        let mut slot = self.room.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}

impl RoomContext for RoomSlot {
    fn current_room(&self) -> Result<Arc<dyn Room>, AgentError> {
        let slot = self
            .room
            .read()
            .map_err(|_| AgentError::RoomUnavailable("room slot lock poisoned".into()))?;
        slot.clone()
            .ok_or_else(|| AgentError::RoomUnavailable("not connected to a room".into()))
    }
}

impl std::fmt::Debug for RoomSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attached = self.room.read().map(|r| r.is_some()).unwrap_or(false);
        f.debug_struct("RoomSlot").field("attached", &attached).finish()
    }
}
