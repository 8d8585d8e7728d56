//! dynamic-agent: config-driven tools for voice agents.
//!
//! A session's tools are not known at build time. They arrive as loosely typed
//! descriptors inside the job metadata and are compiled into strict
//! function-call schemas plus handlers:
//!
//! - client tools perform an RPC on the connected browser participant;
//! - server tools issue an authenticated HTTP request.
//!
//! Handlers always return a string (`"Result: ..."`, `"Error: ..."`, or a
//! benign lookup message) and never fail the conversation turn.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use dynamic_agent::prelude::*;
//!
//! # async fn example() {
//! let config = SessionConfig::from_metadata(r#"{"tools": [{"name": "open_door"}]}"#);
//! let room = Arc::new(RoomSlot::new());
//! let agent = DynamicAgent::new(&config, room);
//!
//! let tool = &agent.tools()[0];
//! let result = tool
//!     .invoke(&ToolArguments::empty(), &ToolExecutionContext::default())
//!     .await;
//! println!("{result}");
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod prelude;
pub mod room;
pub mod tools;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
