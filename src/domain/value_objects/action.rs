//! Actions returned to the game client
//!
//! An [`Action`] is the single unit of work the client performs next. Decision
//! procedures produce a [`ProposedAction`], which may be missing parts when it
//! was scraped from oracle text; the dispatcher normalizes it into an `Action`.

use serde::{Deserialize, Deserializer, Serialize};

/// Reason attached when a proposal carries no meta record at all
pub const NO_META_REASON: &str = "No meta given";

/// The fixed set of actions the game client knows how to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    WalkToTile,
    TalkToNpc,
    InteractObject,
    DialogContinue,
    AdjustCamera,
    Wait,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::WalkToTile,
        ActionKind::TalkToNpc,
        ActionKind::InteractObject,
        ActionKind::DialogContinue,
        ActionKind::AdjustCamera,
        ActionKind::Wait,
    ];

    /// Wire name used by the client and in oracle prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::WalkToTile => "walk_to_tile",
            ActionKind::TalkToNpc => "talk_to_npc",
            ActionKind::InteractObject => "interact_object",
            ActionKind::DialogContinue => "dialog_continue",
            ActionKind::AdjustCamera => "adjust_camera",
            ActionKind::Wait => "wait",
        }
    }

    /// Parse a wire name, ignoring case and surrounding whitespace
    pub fn from_wire(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an action is aimed at. Which fields matter depends on the action:
/// tiles use x/y/plane, NPCs use name, objects use x/y/plane plus name/option.
///
/// Decoding never fails on a field: whole-number floats and numeric strings
/// are accepted as tiles, and values of any other type are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionTarget {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_tile")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_tile")]
    pub y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_tile")]
    pub plane: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub option: Option<String>,
}

impl ActionTarget {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_tile(mut self, x: Option<i32>, y: Option<i32>, plane: Option<i32>) -> Self {
        self.x = x;
        self.y = y;
        self.plane = plane;
        self
    }
}

/// Human-readable justification shown in the client panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMeta {
    /// A `null` or non-string reason decodes as empty
    #[serde(default, deserialize_with = "reason_text")]
    pub reason: String,
}

impl ActionMeta {
    pub fn reason(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

fn lenient_tile<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let whole = |v: f64| (v.fract() == 0.0).then_some(v as i64);
    let value = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok().and_then(whole),
        _ => None,
    };
    Ok(value.and_then(|v| i32::try_from(v).ok()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Some(text),
        _ => None,
    })
}

fn reason_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// A fully-formed action as returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action: ActionKind,
    pub target: Option<ActionTarget>,
    pub meta: ActionMeta,
}

impl Action {
    pub fn new(action: ActionKind, target: Option<ActionTarget>, reason: impl Into<String>) -> Self {
        Self {
            action,
            target,
            meta: ActionMeta::reason(reason),
        }
    }

    pub fn wait(reason: impl Into<String>) -> Self {
        Self::new(ActionKind::Wait, None, reason)
    }

    pub fn dialog_continue(reason: impl Into<String>) -> Self {
        Self::new(ActionKind::DialogContinue, None, reason)
    }

    pub fn adjust_camera(reason: impl Into<String>) -> Self {
        Self::new(ActionKind::AdjustCamera, None, reason)
    }

    pub fn talk_to_npc(target: ActionTarget, reason: impl Into<String>) -> Self {
        Self::new(ActionKind::TalkToNpc, Some(target), reason)
    }
}

/// An action as proposed by a decision procedure, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposedAction {
    pub action: Option<ActionKind>,
    pub target: Option<ActionTarget>,
    pub meta: Option<ActionMeta>,
}

impl ProposedAction {
    pub fn is(&self, kind: ActionKind) -> bool {
        self.action == Some(kind)
    }

    /// Fill in every missing part with its safe default
    pub fn normalize(self) -> Action {
        Action {
            action: self.action.unwrap_or(ActionKind::Wait),
            target: self.target,
            meta: self
                .meta
                .unwrap_or_else(|| ActionMeta::reason(NO_META_REASON)),
        }
    }
}

impl From<Action> for ProposedAction {
    fn from(action: Action) -> Self {
        Self {
            action: Some(action.action),
            target: action.target,
            meta: Some(action.meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_wire_names() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_wire(kind.as_str()), Some(kind));
        }
        assert_eq!(ActionKind::from_wire("  Talk_To_NPC "), Some(ActionKind::TalkToNpc));
        assert_eq!(ActionKind::from_wire("use_inventory_item"), None);
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let action = ProposedAction::default().normalize();
        assert_eq!(action.action, ActionKind::Wait);
        assert!(action.target.is_none());
        assert_eq!(action.meta.reason, NO_META_REASON);
    }

    #[test]
    fn test_normalize_keeps_given_parts() {
        let proposed = ProposedAction {
            action: Some(ActionKind::WalkToTile),
            target: Some(ActionTarget::default().with_tile(Some(3222), Some(3218), Some(0))),
            meta: None,
        };
        let action = proposed.normalize();
        assert_eq!(action.action, ActionKind::WalkToTile);
        assert_eq!(action.target.and_then(|t| t.x), Some(3222));
        assert_eq!(action.meta.reason, NO_META_REASON);
    }

    #[test]
    fn test_action_serializes_null_target() {
        let json = serde_json::to_value(Action::wait("idle")).unwrap();
        assert_eq!(json["action"], "wait");
        assert!(json["target"].is_null());
        assert_eq!(json["meta"]["reason"], "idle");
    }

    #[test]
    fn test_target_decodes_leniently() {
        let target: ActionTarget = serde_json::from_str(
            r#"{"x": 3209.0, "y": "3214", "plane": 0.5, "name": 12, "option": "Mine"}"#,
        )
        .unwrap();
        assert_eq!(target.x, Some(3209));
        assert_eq!(target.y, Some(3214));
        assert_eq!(target.plane, None);
        assert_eq!(target.name, None);
        assert_eq!(target.option.as_deref(), Some("Mine"));

        let target: ActionTarget =
            serde_json::from_str(r#"{"x": "north", "y": 1e12, "plane": null}"#).unwrap();
        assert_eq!(target, ActionTarget::default());
    }

    #[test]
    fn test_null_reason_is_empty() {
        let meta: ActionMeta = serde_json::from_str(r#"{"reason": null}"#).unwrap();
        assert_eq!(meta.reason, "");
        let meta: ActionMeta = serde_json::from_str("{}").unwrap();
        assert_eq!(meta.reason, "");
    }
}
