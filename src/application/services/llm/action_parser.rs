//! Untrusted oracle text to a proposed action
//!
//! The oracle is asked for a single JSON object but routinely wraps it in
//! prose or code fences. The parser scrapes the span from the first `{` to the
//! last `}` and decodes that; it checks nothing beyond a successful decode and
//! a recognised action name.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::value_objects::{ActionKind, ProposedAction};

/// Why an oracle reply could not be turned into an action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("no JSON object found in oracle reply")]
    MissingObject,
    #[error("oracle reply is not a valid action object: {0}")]
    Decode(String),
    #[error("oracle proposed unknown action '{0}'")]
    UnknownAction(String),
}

/// Raw reply object. Parts are kept untyped so that an odd value in one of
/// them never fails the decode.
#[derive(Debug, Deserialize)]
struct OracleActionDto {
    #[serde(default)]
    action: Value,
    #[serde(default)]
    target: Value,
    #[serde(default)]
    meta: Value,
}

/// Decode an object-valued part; anything else counts as absent
fn object_part<T: DeserializeOwned>(value: Value) -> Option<T> {
    value
        .is_object()
        .then(|| serde_json::from_value(value))
        .and_then(Result::ok)
}

/// The substring from the first `{` to the last `}`, inclusive
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse an oracle reply.
///
/// A missing or blank `action` is not an error: the proposal simply carries no
/// action and the caller decides what that means.
pub fn parse_oracle_action(text: &str) -> Result<ProposedAction, ActionParseError> {
    let json = extract_json_object(text).ok_or(ActionParseError::MissingObject)?;
    let dto: OracleActionDto =
        serde_json::from_str(json).map_err(|e| ActionParseError::Decode(e.to_string()))?;

    let action = match &dto.action {
        Value::Null => None,
        Value::String(name) if name.trim().is_empty() => None,
        Value::String(name) => Some(
            ActionKind::from_wire(name)
                .ok_or_else(|| ActionParseError::UnknownAction(name.trim().to_string()))?,
        ),
        other => return Err(ActionParseError::UnknownAction(other.to_string())),
    };

    Ok(ProposedAction {
        action,
        target: object_part(dto.target),
        meta: object_part(dto.meta),
    })
}
