//! Game state snapshot sent by the client with every decision request
//!
//! Every field is optional on the wire. Missing or `null` collections decode
//! as empty, non-string entries in string lists are dropped, and coordinates
//! are decoded leniently (see [`Coordinate`]) so a single odd value does not
//! reject the whole snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// A world coordinate as reported by the client
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Coordinate {
    /// Absent or `null`; counts as 0 for distance purposes
    #[default]
    Missing,
    Value(f64),
    /// Present but not a number
    Invalid,
}

impl Coordinate {
    /// Numeric value for distance math, `None` when the value is unusable
    pub fn numeric(self) -> Option<f64> {
        match self {
            Coordinate::Missing => Some(0.0),
            Coordinate::Value(v) => Some(v),
            Coordinate::Invalid => None,
        }
    }

    /// Tile index to echo back in an action target
    pub fn as_tile(self) -> Option<i32> {
        match self {
            Coordinate::Value(v) if v.is_finite() => Some(v as i32),
            _ => None,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coordinate::Value(v) => write!(f, "{}", v),
            _ => f.write_str("?"),
        }
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => Coordinate::Missing,
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Coordinate::Value)
                .unwrap_or(Coordinate::Invalid),
            _ => Coordinate::Invalid,
        })
    }
}

/// Position of something in the world
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tile {
    pub x: Coordinate,
    pub y: Coordinate,
    pub plane: Coordinate,
}

impl Tile {
    /// Euclidean distance in the x/y plane, ignoring `plane`.
    ///
    /// Returns `f64::INFINITY` when either tile has a non-numeric coordinate.
    pub fn planar_distance(&self, other: &Tile) -> f64 {
        match (
            self.x.numeric(),
            self.y.numeric(),
            other.x.numeric(),
            other.y.numeric(),
        ) {
            (Some(ax), Some(ay), Some(bx), Some(by)) => (ax - bx).hypot(ay - by),
            _ => f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Player {
    pub name: Option<String>,
    pub x: Coordinate,
    pub y: Coordinate,
    pub plane: Coordinate,
}

impl Player {
    pub fn tile(&self) -> Tile {
        Tile {
            x: self.x,
            y: self.y,
            plane: self.plane,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Npc {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub x: Coordinate,
    pub y: Coordinate,
    pub plane: Coordinate,
    #[serde(deserialize_with = "string_entries")]
    pub actions: Vec<String>,
}

impl Npc {
    /// Trimmed name, `None` when blank
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn tile(&self) -> Tile {
        Tile {
            x: self.x,
            y: self.y,
            plane: self.plane,
        }
    }

    /// Whether any menu option contains "talk", case-insensitively
    pub fn can_talk(&self) -> bool {
        self.actions
            .iter()
            .any(|action| action.to_lowercase().contains("talk"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameObject {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub x: Coordinate,
    pub y: Coordinate,
    pub plane: Coordinate,
    #[serde(deserialize_with = "string_entries")]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InventoryItem {
    pub slot: Option<u32>,
    pub id: Option<i64>,
    pub quantity: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Dialog {
    pub npc_text: Option<String>,
    pub player_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub can_continue: bool,
}

/// A visible widget text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiText {
    pub group: Option<i64>,
    pub id: Option<i64>,
    pub text: Option<String>,
}

/// One inbound rendering of the current game world
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameStateSnapshot {
    pub player: Option<Player>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: BTreeMap<String, f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub npcs: Vec<Npc>,
    #[serde(deserialize_with = "null_as_default")]
    pub objects: Vec<GameObject>,
    #[serde(deserialize_with = "null_as_default")]
    pub inventory: Vec<InventoryItem>,
    pub dialog: Option<Dialog>,
    #[serde(deserialize_with = "string_entries")]
    pub chat_log: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub ui_text: Vec<UiText>,
}

impl GameStateSnapshot {
    /// Decode a request body. An empty body is an empty snapshot.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// The dialog state alone, for a body that failed to decode as a whole.
    ///
    /// `Some` only when the body is a JSON object whose dialog can be clicked
    /// through; the rest of the snapshot is left empty.
    pub fn continuable_dialog(bytes: &[u8]) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
        let can_continue = value.get("dialog")?.get("can_continue")?.as_bool()?;
        can_continue.then(|| Self {
            dialog: Some(Dialog {
                can_continue,
                ..Dialog::default()
            }),
            ..Self::default()
        })
    }

    pub fn dialog_can_continue(&self) -> bool {
        self.dialog.as_ref().is_some_and(|d| d.can_continue)
    }

    /// Player position, or the origin when the client sent no player
    pub fn player_tile(&self) -> Tile {
        self.player.as_ref().map(Player::tile).unwrap_or_default()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keep the string entries of a list. Anything that is not a list decodes
/// as empty.
fn string_entries<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_empty_snapshot() {
        let snapshot: GameStateSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, GameStateSnapshot::default());
        assert!(!snapshot.dialog_can_continue());
    }

    #[test]
    fn test_empty_body_is_empty_snapshot() {
        let snapshot = GameStateSnapshot::from_json_bytes(b"  ").unwrap();
        assert!(snapshot.npcs.is_empty());
    }

    #[test]
    fn test_nulls_decode_as_empty() {
        let snapshot: GameStateSnapshot = serde_json::from_str(
            r#"{"npcs": null, "chat_log": null, "dialog": {"can_continue": null}}"#,
        )
        .unwrap();
        assert!(snapshot.npcs.is_empty());
        assert!(snapshot.chat_log.is_empty());
        assert!(!snapshot.dialog_can_continue());
    }

    #[test]
    fn test_client_payload_decodes() {
        let snapshot: GameStateSnapshot = serde_json::from_str(
            r#"{
                "player": {"name": "Zezima", "x": 3222, "y": 3218, "plane": 0},
                "npcs": [{"id": 4626, "name": "Cook", "x": 3209, "y": 3214, "plane": 0,
                          "actions": ["Talk-to", "Examine"]}],
                "inventory": [{"slot": 0, "id": 1931, "quantity": 1, "name": "Pot"}],
                "skills": {"Mining": 12, "Cooking": 3},
                "dialog": {"npc_text": "What am I to do?", "can_continue": true},
                "context": {"mode": "quest"},
                "ui_text": [{"group": 231, "id": 6, "text": "Click here to continue"}]
            }"#,
        )
        .unwrap();

        assert!(snapshot.dialog_can_continue());
        assert_eq!(snapshot.npcs[0].display_name(), Some("Cook"));
        assert!(snapshot.npcs[0].can_talk());
        assert_eq!(snapshot.player_tile().x, Coordinate::Value(3222.0));
        assert_eq!(snapshot.skills.get("Mining"), Some(&12.0));
        assert_eq!(snapshot.inventory[0].name.as_deref(), Some("Pot"));
    }

    #[test]
    fn test_non_numeric_coordinate_is_invalid() {
        let npc: Npc = serde_json::from_str(r#"{"name": "Hans", "x": "far", "y": 3}"#).unwrap();
        assert_eq!(npc.x, Coordinate::Invalid);
        assert_eq!(npc.y, Coordinate::Value(3.0));
        assert_eq!(npc.plane, Coordinate::Missing);
        assert_eq!(npc.tile().planar_distance(&Tile::default()), f64::INFINITY);
    }

    #[test]
    fn test_planar_distance_ignores_plane() {
        let a = Tile {
            x: Coordinate::Value(0.0),
            y: Coordinate::Value(0.0),
            plane: Coordinate::Value(0.0),
        };
        let b = Tile {
            x: Coordinate::Value(3.0),
            y: Coordinate::Value(4.0),
            plane: Coordinate::Value(2.0),
        };
        assert_eq!(a.planar_distance(&b), 5.0);
        // Missing coordinates count as the origin
        assert_eq!(Tile::default().planar_distance(&b), 5.0);
    }

    #[test]
    fn test_display_name_trims_blank() {
        let npc = Npc {
            name: Some("   ".to_string()),
            ..Npc::default()
        };
        assert_eq!(npc.display_name(), None);
    }

    #[test]
    fn test_non_string_menu_entries_are_dropped() {
        let snapshot: GameStateSnapshot = serde_json::from_str(
            r#"{"npcs": [{"name": "Cook", "actions": [null, "Talk-to", 7]},
                         {"name": "Goblin", "actions": "Attack"}],
                "objects": [{"name": "Range", "actions": [null, "Cook"]}],
                "chat_log": ["Welcome", null]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.npcs[0].actions, vec!["Talk-to".to_string()]);
        assert!(snapshot.npcs[0].can_talk());
        assert!(snapshot.npcs[1].actions.is_empty());
        assert_eq!(snapshot.objects[0].actions, vec!["Cook".to_string()]);
        assert_eq!(snapshot.chat_log, vec!["Welcome".to_string()]);
    }

    #[test]
    fn test_continuable_dialog_survives_bad_fields() {
        let body = br#"{"dialog": {"can_continue": true, "npc_text": 12}, "npcs": 5}"#;
        assert!(GameStateSnapshot::from_json_bytes(body).is_err());

        let snapshot = GameStateSnapshot::continuable_dialog(body).unwrap();
        assert!(snapshot.dialog_can_continue());
        assert!(snapshot.npcs.is_empty());

        let closed = br#"{"dialog": {"can_continue": false}, "npcs": 5}"#;
        assert!(GameStateSnapshot::continuable_dialog(closed).is_none());
        assert!(GameStateSnapshot::continuable_dialog(b"not json").is_none());
    }
}
