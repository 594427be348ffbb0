//! Picks the NPC the quest procedure should walk up to and talk to

use crate::domain::entities::{GameStateSnapshot, Npc};
use crate::domain::services::quest_catalog;

/// Select the best NPC to approach for `quest_name`.
///
/// NPCs named in the quest table always win over generic talk-capable NPCs,
/// however close the latter are. Within each group the nearest one wins, and
/// on a tie the earlier NPC in the snapshot is kept.
pub fn find_best_npc<'a>(snapshot: &'a GameStateSnapshot, quest_name: &str) -> Option<&'a Npc> {
    let quest_npcs: Vec<String> = quest_catalog::expected_npcs(quest_name)
        .iter()
        .map(|name| name.to_lowercase())
        .collect();
    let player = snapshot.player_tile();

    let mut best_quest_npc: Option<(&Npc, f64)> = None;
    let mut best_talker: Option<(&Npc, f64)> = None;

    for npc in &snapshot.npcs {
        let Some(name) = npc.display_name() else {
            continue;
        };
        let distance = player.planar_distance(&npc.tile());

        if quest_npcs.contains(&name.to_lowercase()) {
            keep_nearest(&mut best_quest_npc, npc, distance);
        } else if best_quest_npc.is_none() && npc.can_talk() {
            keep_nearest(&mut best_talker, npc, distance);
        }
    }

    best_quest_npc.or(best_talker).map(|(npc, _)| npc)
}

fn keep_nearest<'a>(best: &mut Option<(&'a Npc, f64)>, npc: &'a Npc, distance: f64) {
    match best {
        Some((_, best_distance)) if distance >= *best_distance => {}
        _ => *best = Some((npc, distance)),
    }
}
