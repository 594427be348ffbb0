//! Decision procedures - One per mode
//!
//! Every procedure shares the dialog short-circuit: when the client reports a
//! "click here to continue" dialog the answer is `dialog_continue`, and the
//! oracle is not consulted. Everything else is mode-specific.

mod manual_agent;
mod quest_agent;
mod skill_agent;

pub use manual_agent::ManualAgent;
pub use quest_agent::QuestAgent;
pub use skill_agent::SkillAgent;

use async_trait::async_trait;

use crate::application::ports::outbound::{ChatMessage, LlmError, LlmPort, LlmRequest};
use crate::application::services::llm::action_parser::{parse_oracle_action, ActionParseError};
use crate::application::services::llm::prompt_builder::OraclePrompt;
use crate::domain::entities::GameStateSnapshot;
use crate::domain::value_objects::{Action, ControlState, Mode, ProposedAction};

/// Reason given for the dialog short-circuit
pub const DIALOG_CONTINUE_REASON: &str = "Dialogue shows 'Click here to continue'.";

/// Reason given when skill/manual mode could not use the oracle's answer
pub const PARSE_FAILED_REASON: &str = "LLM JSON parse failed, adjust camera as safe fallback.";

const MAX_LOGGED_REPLY_CHARS: usize = 500;

/// Errors raised while deciding.
///
/// The procedures recover from oracle and parse failures themselves; the
/// dispatcher turns anything that still escapes into a safe wait.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(#[from] LlmError),
    #[error("oracle reply unusable: {0}")]
    ParseFailure(#[from] ActionParseError),
    #[error("invalid game state snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("internal decision error: {0}")]
    Internal(String),
}

/// A mode-specific decision procedure
#[async_trait]
pub trait DecisionProcedure: Send + Sync {
    /// The mode this procedure serves
    fn mode(&self) -> Mode;

    /// Mode-specific planning, called only when no dialog is waiting
    async fn plan(
        &self,
        snapshot: &GameStateSnapshot,
        context: &ControlState,
    ) -> Result<ProposedAction, DecisionError>;

    /// Decide the next action for a snapshot
    async fn decide(
        &self,
        snapshot: &GameStateSnapshot,
        context: &ControlState,
    ) -> Result<ProposedAction, DecisionError> {
        if let Some(action) = dialog_short_circuit(snapshot) {
            return Ok(action.into());
        }
        self.plan(snapshot, context).await
    }
}

/// `dialog_continue` when the open dialog can be clicked through
pub fn dialog_short_circuit(snapshot: &GameStateSnapshot) -> Option<Action> {
    snapshot
        .dialog_can_continue()
        .then(|| Action::dialog_continue(DIALOG_CONTINUE_REASON))
}

/// Send a prompt to the oracle and parse its reply
pub(crate) async fn consult_oracle(
    llm: &dyn LlmPort,
    prompt: OraclePrompt,
) -> Result<ProposedAction, DecisionError> {
    let request = LlmRequest::new(vec![ChatMessage::user(prompt.user)])
        .with_system_prompt(prompt.system);

    let response = llm.generate(request).await?;
    if let Some(usage) = response.usage {
        tracing::debug!(
            model = %response.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Oracle replied"
        );
    }

    parse_oracle_action(&response.content).map_err(|e| {
        tracing::warn!(
            error = %e,
            raw = %truncate(response.content.trim(), MAX_LOGGED_REPLY_CHARS),
            "Failed to parse oracle reply"
        );
        DecisionError::from(e)
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}
