//! Static quest knowledge: which NPCs start each quest, and the order in which
//! quests are attempted when the operator asks for all of them.

use crate::domain::value_objects::{ControlState, DEFAULT_QUEST};

/// Lowercase quest name to the NPCs relevant to its opening steps
const QUEST_NPCS: &[(&str, &[&str])] = &[
    (
        "tutorial island",
        &[
            "Gielinor Guide",
            "Survival Expert",
            "Master Chef",
            "Quest Guide",
            "Mining Instructor",
            "Combat Instructor",
            "Brother Brace",
            "Magic Instructor",
        ],
    ),
    ("cook's assistant", &["Cook"]),
    ("sheep shearer", &["Fred the Farmer"]),
    ("the restless ghost", &["Father Aereck", "Father Urhney"]),
    ("rune mysteries", &["Duke Horacio", "Sedridor"]),
    ("demon slayer", &["Gypsy Aris", "Sir Prysin"]),
    (
        "shield of arrav",
        &["Reldo", "Charlie the Tramp", "Curator Haig Halen"],
    ),
    ("vampire slayer", &["Morgan", "Dr Harlow"]),
    ("goblin diplomacy", &["General Bentnoze", "General Wartface"]),
    ("imp catcher", &["Wizard Mizgog"]),
    ("doric's quest", &["Doric"]),
    ("the knight's sword", &["Sir Vyvin"]),
    ("pirate's treasure", &["Redbeard Frank"]),
    ("prince ali rescue", &["Hassan", "Osman"]),
    ("black knights' fortress", &["Sir Amik Varze"]),
    ("witch's potion", &["Hetty"]),
    ("the corsair curse", &["Captain Tock"]),
    ("below ice mountain", &["Willie"]),
    ("dragon slayer i", &["Guildmaster", "Oziach"]),
];

/// Order used when `do_all_quests` is set
pub const QUEST_SEQUENCE: &[&str] = &[
    "Tutorial Island",
    "Cook's Assistant",
    "Sheep Shearer",
    "The Restless Ghost",
    "Rune Mysteries",
    "Imp Catcher",
    "Witch's Potion",
    "Doric's Quest",
    "Goblin Diplomacy",
    "Below Ice Mountain",
    "The Knight's Sword",
    "Pirate's Treasure",
    "Prince Ali Rescue",
    "Vampire Slayer",
    "Demon Slayer",
    "Shield of Arrav",
    "Black Knights' Fortress",
    "The Corsair Curse",
    "Dragon Slayer I",
];

/// NPC names expected for a quest; empty for quests the table does not know
pub fn expected_npcs(quest_name: &str) -> &'static [&'static str] {
    let key = quest_name.trim().to_lowercase();
    QUEST_NPCS
        .iter()
        .find(|(quest, _)| *quest == key)
        .map(|(_, npcs)| *npcs)
        .unwrap_or(&[])
}

/// The quest the quest procedure should work on for this control context
pub fn active_quest(context: &ControlState) -> String {
    let chosen = context.current_quest.trim();
    if !chosen.is_empty() {
        return chosen.to_string();
    }
    if context.do_all_quests {
        if let Some(first) = QUEST_SEQUENCE.first() {
            return (*first).to_string();
        }
    }
    DEFAULT_QUEST.to_string()
}
