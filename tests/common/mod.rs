//! Shared test helpers: a scripted room, a recording session, and log capture.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use dynamic_agent::agent::SessionService;
use dynamic_agent::error::AgentError;
use dynamic_agent::room::{ParticipantKind, RemoteParticipant, Room, RpcRequest};
use dynamic_agent::tools::ToolDescriptor;

/// A room with fixed participants that records every RPC it receives.
pub struct MockRoom {
    participants: Vec<RemoteParticipant>,
    response: Mutex<Result<String, String>>,
    calls: Mutex<Vec<RpcRequest>>,
}

impl MockRoom {
    pub fn new(participants: Vec<RemoteParticipant>) -> Self {
        Self {
            participants,
            response: Mutex::new(Ok("ok".to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A room with a single browser participant named `browser`.
    pub fn with_browser() -> Self {
        Self::new(vec![RemoteParticipant::new("browser", ParticipantKind::Standard)])
    }

    pub fn respond_with(self, response: &str) -> Self {
        *self.response.lock().unwrap() = Ok(response.to_string());
        self
    }

    pub fn fail_with(self, message: &str) -> Self {
        *self.response.lock().unwrap() = Err(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RpcRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Room for MockRoom {
    fn remote_participants(&self) -> Vec<RemoteParticipant> {
        self.participants.clone()
    }

    async fn perform_rpc(&self, request: RpcRequest) -> Result<String, AgentError> {
        let method = request.method.clone();
        self.calls.lock().unwrap().push(request);
        self.response
            .lock()
            .unwrap()
            .clone()
            .map_err(|message| AgentError::rpc(method, message))
    }
}

/// What the agent asked the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    Say { text: String, allow_interruptions: bool },
    GenerateReply { instructions: String, allow_interruptions: bool },
}

#[derive(Default)]
pub struct RecordingSession {
    calls: Mutex<Vec<SessionCall>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SessionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionService for RecordingSession {
    async fn say(&self, text: &str, allow_interruptions: bool) -> Result<(), AgentError> {
        self.calls.lock().unwrap().push(SessionCall::Say {
            text: text.to_string(),
            allow_interruptions,
        });
        Ok(())
    }

    async fn generate_reply(
        &self,
        instructions: &str,
        allow_interruptions: bool,
    ) -> Result<(), AgentError> {
        self.calls.lock().unwrap().push(SessionCall::GenerateReply {
            instructions: instructions.to_string(),
            allow_interruptions,
        });
        Ok(())
    }
}

pub fn client_descriptor(name: &str, args: &[(&str, &str)]) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        description: Some(format!("{name} tool")),
        args: to_args(args),
        ..Default::default()
    }
}

pub fn server_descriptor(name: &str, url: &str, method: &str, args: &[(&str, &str)]) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        description: Some(format!("{name} tool")),
        kind: Some(dynamic_agent::tools::ToolKind::Server),
        args: to_args(args),
        url: Some(url.to_string()),
        method: Some(method.to_string()),
    }
}

fn to_args(args: &[(&str, &str)]) -> BTreeMap<String, String> {
    args.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Log output captured from the current thread.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route `tracing` output on this thread into a buffer until the guard drops.
pub fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}
