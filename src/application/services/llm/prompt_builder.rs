//! Prompt building functions for oracle requests
//!
//! Each mode gets its own system instructions and a context header; the game
//! state rendering below the header is shared.

use crate::domain::entities::GameStateSnapshot;
use crate::domain::services::quest_catalog;
use crate::domain::value_objects::{ActionKind, ControlState};

const MAX_NPCS: usize = 15;
const MAX_OBJECTS: usize = 20;
const MAX_CHAT_MESSAGES: usize = 10;
const MAX_UI_TEXT: usize = 30;

/// System instructions plus the rendered user message for one oracle call
#[derive(Debug, Clone)]
pub struct OraclePrompt {
    pub system: String,
    pub user: String,
}

/// Prompt for quest mode
pub fn quest_prompt(
    snapshot: &GameStateSnapshot,
    context: &ControlState,
    quest_name: &str,
) -> OraclePrompt {
    let mut system = String::from(
        "You control an Old School RuneScape character via a bot.\n\
         Your role is QUESTING: progress the active quest one safe step at a time.\n\n",
    );
    push_action_schema(&mut system);
    system.push_str("Rules:\n");
    system.push_str(" - Prefer talk_to_npc for the quest NPCs listed in the context.\n");
    system.push_str(" - Use dialog_continue if a dialogue is open.\n");
    system.push_str(
        " - Do NOT invent map coordinates: only use the player's tile or tiles of visible NPCs/objects.\n",
    );
    system.push_str(" - Never choose adjust_camera while questing.\n");
    system.push_str(" - Use wait if there is no obvious safe action.\n");

    let mut header = format!(
        "CONTEXT (QUEST): mode={}, quest={}, do_all_quests={}",
        context.mode, quest_name, context.do_all_quests
    );
    let expected = quest_catalog::expected_npcs(quest_name);
    if !expected.is_empty() {
        header.push_str(&format!("\nQUEST NPCS: {}", expected.join(", ")));
    }

    let user = format!(
        "Here is the current game state and quest context.\n\n{}\n\n\
         Decide the best SINGLE next action to progress the quest and return ONLY the JSON object.",
        render_summary(&header, snapshot)
    );

    OraclePrompt { system, user }
}

/// Prompt for skill mode
pub fn skill_prompt(snapshot: &GameStateSnapshot, context: &ControlState) -> OraclePrompt {
    let mut system = String::from(
        "You control an Old School RuneScape character via a bot.\n\
         Your role is SKILLING: train the indicated skill toward the target level without overspending.\n\n",
    );
    push_action_schema(&mut system);
    system.push_str("Additional rules:\n");
    system.push_str(" - Skill information:\n");
    system.push_str("   * skill_target: which skill should be trained (e.g. Mining, Woodcutting).\n");
    system.push_str("   * skill_target_level: goal level.\n");
    system.push_str("   * skill_budget_gp: maximum gold to spend this training run.\n");
    system.push_str(" - Do NOT invent map coordinates. For walk_to_tile, either:\n");
    system.push_str("   * Use the player's current tile (to stay put), or\n");
    system.push_str(
        "   * Use the tile of a visible NPC you want to approach (like Banker, Grand Exchange Clerk).\n",
    );
    system.push_str(
        " - Use interact_object for skilling spots like trees, rocks, or range fires that are visible.\n",
    );
    system.push_str(
        " - Prefer talk_to_npc when interacting with Grand Exchange, bankers or skilling tutors.\n",
    );
    system.push_str(" - Use dialog_continue if a dialogue is open.\n");
    system.push_str(" - Use wait if there is no obvious safe action.\n");

    let header = format!(
        "CONTEXT (SKILLING): mode={}, skill_target={}, target_level={}, budget_gp={}, skilling_goal={}",
        context.mode,
        context.skill_target,
        context.skill_target_level,
        context.skill_budget_gp,
        context.skilling_goal
    );

    let user = format!(
        "Here is the current game state and skilling context.\n\n{}\n\n\
         Decide the best SINGLE next action to progress skilling and return ONLY the JSON object.",
        render_summary(&header, snapshot)
    );

    OraclePrompt { system, user }
}

/// Prompt for manual mode, steered by the operator's free-text goal
pub fn manual_prompt(snapshot: &GameStateSnapshot, context: &ControlState) -> OraclePrompt {
    let mut system = String::from(
        "You control an Old School RuneScape character via a bot.\n\
         Your role is MANUAL: follow the human's high-level instruction (manual_goal) as much as possible,\n\
         while choosing a single safe low-level action.\n\n",
    );
    push_action_schema(&mut system);
    system.push_str("Rules:\n");
    system.push_str(
        " - Use manual_goal as the high-level desire (e.g. 'walk to the bank', 'talk to the guide').\n",
    );
    system.push_str(
        " - Never invent map coordinates: for walking, only use player tile or tiles of visible NPCs/objects.\n",
    );
    system.push_str(
        " - Prefer talk_to_npc for direct interactions and interact_object for things like trees, doors, or fires.\n",
    );
    system.push_str(" - Use dialog_continue if a dialogue is open.\n");
    system.push_str(" - If the instruction cannot be furthered right now, use wait or adjust_camera.\n");

    let header = format!(
        "CONTEXT (MANUAL): manual_goal={:?}, mode={}",
        context.manual_goal, context.mode
    );

    let user = format!(
        "manual_goal = {:?}\n\nHere is the current game state and context:\n\n{}\n\n\
         Decide the best SINGLE next action and return ONLY the JSON object.",
        context.manual_goal,
        render_summary(&header, snapshot)
    );

    OraclePrompt { system, user }
}

fn push_action_schema(prompt: &mut String) {
    let names: Vec<String> = ActionKind::ALL
        .iter()
        .map(|kind| format!("\"{}\"", kind))
        .collect();

    prompt.push_str("You can ONLY choose ONE of these actions:\n");
    for kind in ActionKind::ALL {
        prompt.push_str(&format!("  - {}\n", kind));
    }
    prompt.push_str("\nAction JSON schema (strict):\n");
    prompt.push_str("{\n");
    prompt.push_str(&format!("  \"action\": {},\n", names.join(" | ")));
    prompt.push_str("  \"target\": null | {\n");
    prompt.push_str("      \"x\": int,\n");
    prompt.push_str("      \"y\": int,\n");
    prompt.push_str("      \"plane\": int,\n");
    prompt.push_str("      \"name\": string,\n");
    prompt.push_str("      \"option\": string\n");
    prompt.push_str("  },\n");
    prompt.push_str("  \"meta\": { \"reason\": string }\n");
    prompt.push_str("}\n\n");
}

fn render_summary(header: &str, snapshot: &GameStateSnapshot) -> String {
    let mut lines = vec![header.to_string()];
    lines.extend(render_game_state(snapshot));
    lines.join("\n")
}

/// Human-readable lines describing the snapshot
pub fn render_game_state(snapshot: &GameStateSnapshot) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(player) = &snapshot.player {
        lines.push(format!(
            "PLAYER: name={}, pos=({},{},{})",
            player.name.as_deref().unwrap_or("?"),
            player.x,
            player.y,
            player.plane
        ));
    }

    if !snapshot.skills.is_empty() {
        let pairs: Vec<String> = snapshot
            .skills
            .iter()
            .map(|(skill, level)| format!("{}={}", skill, level))
            .collect();
        lines.push(format!("SKILLS: {}", pairs.join(", ")));
    }

    if !snapshot.inventory.is_empty() {
        lines.push("INVENTORY:".to_string());
        for item in &snapshot.inventory {
            lines.push(format!(
                "- slot {}: {} x{}",
                item.slot.map(|s| s.to_string()).unwrap_or_else(|| "?".to_string()),
                item.name.as_deref().unwrap_or("?"),
                item.quantity.unwrap_or(1)
            ));
        }
    }

    lines.push(format!("NPCS (up to {}):", MAX_NPCS));
    for npc in snapshot.npcs.iter().take(MAX_NPCS) {
        lines.push(format!(
            "- {} @ ({},{},{}) actions={:?}",
            npc.name.as_deref().unwrap_or("?"),
            npc.x,
            npc.y,
            npc.plane,
            npc.actions
        ));
    }

    if !snapshot.objects.is_empty() {
        lines.push(format!("OBJECTS (up to {}):", MAX_OBJECTS));
        for object in snapshot.objects.iter().take(MAX_OBJECTS) {
            lines.push(format!(
                "- {} @ ({},{},{}) actions={:?}",
                object.name.as_deref().unwrap_or("?"),
                object.x,
                object.y,
                object.plane,
                object.actions
            ));
        }
    }

    let dialog = snapshot.dialog.clone().unwrap_or_default();
    lines.push(format!("DIALOG.can_continue={}", dialog.can_continue));
    if let Some(npc_text) = dialog.npc_text.filter(|t| !t.is_empty()) {
        lines.push(format!("DIALOG.NPC: {}", npc_text));
    }
    if let Some(player_text) = dialog.player_text.filter(|t| !t.is_empty()) {
        lines.push(format!("DIALOG.PLAYER: {}", player_text));
    }

    if !snapshot.chat_log.is_empty() {
        lines.push(format!("CHAT_LOG (last {}):", MAX_CHAT_MESSAGES));
        let skip = snapshot.chat_log.len().saturating_sub(MAX_CHAT_MESSAGES);
        for message in snapshot.chat_log.iter().skip(skip) {
            lines.push(format!("- {}", message));
        }
    }

    if !snapshot.ui_text.is_empty() {
        lines.push(format!("UI_TEXT (first {} entries):", MAX_UI_TEXT));
        for widget in snapshot.ui_text.iter().take(MAX_UI_TEXT) {
            lines.push(format!(
                "- [{}:{}] {}",
                widget.group.map(|g| g.to_string()).unwrap_or_default(),
                widget.id.map(|i| i.to_string()).unwrap_or_default(),
                widget.text.as_deref().unwrap_or("")
            ));
        }
    }

    lines
}
