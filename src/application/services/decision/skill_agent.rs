//! Skill procedure - Always asks the oracle, nudges the camera when it can't

use std::sync::Arc;

use async_trait::async_trait;

use super::{consult_oracle, DecisionError, DecisionProcedure, PARSE_FAILED_REASON};
use crate::application::ports::outbound::LlmPort;
use crate::application::services::llm::prompt_builder;
use crate::domain::entities::GameStateSnapshot;
use crate::domain::value_objects::{Action, ControlState, Mode, ProposedAction};

pub struct SkillAgent {
    llm: Arc<dyn LlmPort>,
}

impl SkillAgent {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl DecisionProcedure for SkillAgent {
    fn mode(&self) -> Mode {
        Mode::Skill
    }

    async fn plan(
        &self,
        snapshot: &GameStateSnapshot,
        context: &ControlState,
    ) -> Result<ProposedAction, DecisionError> {
        let prompt = prompt_builder::skill_prompt(snapshot, context);
        match consult_oracle(self.llm.as_ref(), prompt).await {
            Ok(proposed) => Ok(proposed),
            Err(e) => {
                tracing::warn!(skill = %context.skill_target, error = %e, "Using skill fallback");
                Ok(Action::adjust_camera(PARSE_FAILED_REASON).into())
            }
        }
    }
}
