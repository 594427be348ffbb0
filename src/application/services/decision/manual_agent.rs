//! Manual procedure - Follows the operator's free-text goal through the oracle

use std::sync::Arc;

use async_trait::async_trait;

use super::{consult_oracle, DecisionError, DecisionProcedure, PARSE_FAILED_REASON};
use crate::application::ports::outbound::LlmPort;
use crate::application::services::llm::prompt_builder;
use crate::domain::entities::GameStateSnapshot;
use crate::domain::value_objects::{Action, ControlState, Mode, ProposedAction};

pub struct ManualAgent {
    llm: Arc<dyn LlmPort>,
}

impl ManualAgent {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl DecisionProcedure for ManualAgent {
    fn mode(&self) -> Mode {
        Mode::Manual
    }

    async fn plan(
        &self,
        snapshot: &GameStateSnapshot,
        context: &ControlState,
    ) -> Result<ProposedAction, DecisionError> {
        let prompt = prompt_builder::manual_prompt(snapshot, context);
        match consult_oracle(self.llm.as_ref(), prompt).await {
            Ok(proposed) => Ok(proposed),
            Err(e) => {
                tracing::warn!(error = %e, "Using manual fallback");
                Ok(Action::adjust_camera(PARSE_FAILED_REASON).into())
            }
        }
    }
}
