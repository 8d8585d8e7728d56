//! Validate tool descriptors before any handler is built.
//!
//! Both validators are pure: they inspect a descriptor and either return the
//! validated spec or describe everything that is wrong with it. The tool-set
//! builder decides what to do with a rejection.

use super::descriptor::{ClientToolSpec, HttpMethod, ServerToolSpec, ToolDescriptor};
use crate::error::{AgentError, ConfigProblem, ServerToolConfigError};

/// Fields a server tool must carry, in the order they are reported.
pub const SERVER_REQUIRED_FIELDS: [&str; 4] = ["name", "url", "method", "description"];

/// Validate a server (HTTP) tool descriptor.
///
/// Empty strings count as missing. A method that is present but not one of
/// [`HttpMethod::ALLOWED`] (compared case-insensitively) is reported alongside
/// any missing fields.
pub fn validate_server_descriptor(
    descriptor: &ToolDescriptor,
) -> Result<ServerToolSpec, ServerToolConfigError> {
    let present = |field: &str| -> bool {
        let value = match field {
            "name" => Some(descriptor.name.as_str()),
            "url" => descriptor.url.as_deref(),
            "method" => descriptor.method.as_deref(),
            "description" => descriptor.description.as_deref(),
            _ => None,
        };
        value.is_some_and(|v| !v.is_empty())
    };

    let missing: Vec<&'static str> = SERVER_REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !present(field))
        .collect();

    let mut problems = Vec::new();
    if !missing.is_empty() {
        problems.push(ConfigProblem::MissingFields(missing));
    }

    let method = match descriptor.method.as_deref().filter(|m| !m.is_empty()) {
        Some(raw) => match raw.parse::<HttpMethod>() {
            Ok(method) => Some(method),
            Err(_) => {
                problems.push(ConfigProblem::InvalidMethod(raw.to_string()));
                None
            }
        },
        None => None,
    };

    match (problems.is_empty(), method, &descriptor.url, &descriptor.description) {
        (true, Some(method), Some(url), Some(description)) => Ok(ServerToolSpec {
            name: descriptor.name.clone(),
            description: description.clone(),
            args: descriptor.args.clone(),
            url: url.clone(),
            method,
        }),
        _ => Err(ServerToolConfigError {
            tool: descriptor.display_name().to_string(),
            problems,
        }),
    }
}

/// Validate a client (RPC) tool descriptor.
///
/// Only the name is required, since it is both the tool name and the source of
/// the remote method name. A missing description becomes empty.
pub fn validate_client_descriptor(descriptor: &ToolDescriptor) -> Result<ClientToolSpec, AgentError> {
    if descriptor.name.is_empty() {
        return Err(AgentError::Configuration(
            "client tool is missing a name".to_string(),
        ));
    }

    Ok(ClientToolSpec {
        name: descriptor.name.clone(),
        description: descriptor.description.clone().unwrap_or_default(),
        args: descriptor.args.clone(),
    })
}
