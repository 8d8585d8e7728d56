//! Session wiring: the dynamic agent and its contract with the session.

pub mod agent;
pub mod session;

pub use agent::DynamicAgent;
pub use session::{GreetingAction, NoiseCancellation, SessionOptions, SessionService};
