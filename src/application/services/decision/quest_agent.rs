//! Quest procedure
//!
//! Asks the oracle first. When the oracle is down, its reply cannot be parsed,
//! or it names no action, falls back to talking to the most relevant NPC in
//! view, and otherwise waits. The fallback never moves the camera.

use std::sync::Arc;

use async_trait::async_trait;

use super::{consult_oracle, DecisionError, DecisionProcedure};
use crate::application::ports::outbound::LlmPort;
use crate::application::services::llm::prompt_builder;
use crate::domain::entities::GameStateSnapshot;
use crate::domain::services::{find_best_npc, quest_catalog};
use crate::domain::value_objects::{
    Action, ActionTarget, ControlState, Mode, ProposedAction,
};

const NOTHING_TO_DO_REASON: &str =
    "No relevant quest NPC or dialogue - waiting safely instead of moving camera.";

pub struct QuestAgent {
    llm: Arc<dyn LlmPort>,
}

impl QuestAgent {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    /// Deterministic step used whenever the oracle gives nothing usable
    fn fallback(snapshot: &GameStateSnapshot, quest_name: &str) -> Action {
        match find_best_npc(snapshot, quest_name) {
            Some(npc) => {
                let name = npc.display_name().unwrap_or_default();
                let target = ActionTarget::named(name).with_tile(
                    npc.x.as_tile(),
                    npc.y.as_tile(),
                    npc.plane.as_tile(),
                );
                Action::talk_to_npc(
                    target,
                    format!("Talking to quest NPC '{}' for quest '{}'.", name, quest_name),
                )
            }
            None => Action::wait(NOTHING_TO_DO_REASON),
        }
    }
}

#[async_trait]
impl DecisionProcedure for QuestAgent {
    fn mode(&self) -> Mode {
        Mode::Quest
    }

    async fn plan(
        &self,
        snapshot: &GameStateSnapshot,
        context: &ControlState,
    ) -> Result<ProposedAction, DecisionError> {
        let quest_name = quest_catalog::active_quest(context);
        let prompt = prompt_builder::quest_prompt(snapshot, context, &quest_name);

        match consult_oracle(self.llm.as_ref(), prompt).await {
            Ok(proposed) if proposed.action.is_some() => Ok(proposed),
            Ok(_) => {
                tracing::warn!(quest = %quest_name, "Oracle named no action, using quest fallback");
                Ok(Self::fallback(snapshot, &quest_name).into())
            }
            Err(e) => {
                tracing::warn!(quest = %quest_name, error = %e, "Using quest fallback");
                Ok(Self::fallback(snapshot, &quest_name).into())
            }
        }
    }
}
