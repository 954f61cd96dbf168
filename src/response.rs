//! Response interpretation: classifies one raw round trip into a typed outcome.
//!
//! Structured output only needs the received document (order-preserving
//! `Value`); the entity model is decoded only when a table is rendered, so a
//! field of an unexpected type never hides a valid document.

use crate::client::RawResponse;
use crate::config::OutputMode;
use crate::error::StateError;
use crate::types::Stack;
use serde_json::Value;
use tracing::warn;

/// How far a success body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoding {
    /// Any JSON document; re-serialized as received.
    Document,
    /// Entity model for tabular rendering.
    Typed,
}

impl From<OutputMode> for Decoding {
    fn from(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Json => Decoding::Document,
            OutputMode::Table => Decoding::Typed,
        }
    }
}

/// Result of a successful list call.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    /// Non-empty list decoded into stacks, in service order.
    Stacks(Vec<Stack>),
    /// Non-empty body kept as received.
    Document(Value),
    /// Empty list.
    Empty(Value),
}

/// Result of a successful get call.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowOutcome {
    /// Stack summary decoded for tabular rendering.
    Stack(Box<Stack>),
    /// Body kept as received (structured output, or the stored state with `raw`).
    Document(Value),
}

/// Result of a successful delete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub id: String,
}

pub fn interpret_list(
    response: &RawResponse,
    decoding: Decoding,
) -> Result<ListOutcome, StateError> {
    check_status(response, "")?;
    let document = parse_document(response, "")?;
    if document.as_array().is_some_and(|items| items.is_empty()) {
        return Ok(ListOutcome::Empty(document));
    }
    match decoding {
        Decoding::Document => Ok(ListOutcome::Document(document)),
        Decoding::Typed => {
            let stacks: Vec<Stack> =
                serde_json::from_value(document).map_err(|e| decode_error(response, "", e))?;
            Ok(ListOutcome::Stacks(stacks))
        }
    }
}

pub fn interpret_show(
    response: &RawResponse,
    id: &str,
    decoding: Decoding,
) -> Result<ShowOutcome, StateError> {
    check_status(response, id)?;
    let document = parse_document(response, id)?;
    match decoding {
        Decoding::Document => Ok(ShowOutcome::Document(document)),
        Decoding::Typed => {
            if !document.is_object() {
                return Err(decode_error(response, id, "expected a JSON object"));
            }
            let stack: Stack =
                serde_json::from_value(document).map_err(|e| decode_error(response, id, e))?;
            Ok(ShowOutcome::Stack(Box::new(stack)))
        }
    }
}

pub fn interpret_delete(response: &RawResponse, id: &str) -> Result<Deleted, StateError> {
    check_status(response, id)?;
    Ok(Deleted { id: id.to_string() })
}

fn check_status(response: &RawResponse, id: &str) -> Result<(), StateError> {
    if response.is_success() {
        return Ok(());
    }
    // A list has no identifier to report, so its 404 stays a service error.
    if response.status == 404 && !id.is_empty() {
        return Err(StateError::NotFound { id: id.to_string() });
    }
    Err(StateError::Service {
        status: response.status_line.clone(),
    })
}

fn parse_document(response: &RawResponse, id: &str) -> Result<Value, StateError> {
    serde_json::from_slice(&response.body).map_err(|e| decode_error(response, id, e))
}

fn decode_error(response: &RawResponse, id: &str, detail: impl ToString) -> StateError {
    let detail = detail.to_string();
    warn!(
        status = %response.status_line,
        id,
        detail = %detail,
        "Success status without the expected JSON body"
    );
    StateError::Decode {
        id: id.to_string(),
        status: response.status_line.clone(),
        detail,
    }
}
