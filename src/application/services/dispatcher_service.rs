//! Decision dispatcher - Routes each snapshot to the procedure for the active mode
//!
//! Per request: read the control state, pick the procedure for its mode, run
//! it, apply the mode safety override, then normalize. Every failure path ends
//! in a well-formed action; errors are only visible in the logs.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::Instrument;

use crate::application::services::control_service::ControlStateStore;
use crate::application::services::decision::{DecisionError, DecisionProcedure};
use crate::domain::entities::GameStateSnapshot;
use crate::domain::value_objects::{
    Action, ActionKind, ControlState, DecisionId, Mode, ProposedAction,
};

/// Reason given when a procedure failed outright
pub const AGENT_ERROR_REASON: &str = "Agent error, falling back to safe wait.";

/// Reason given when quest mode tried to move the camera
pub const CAMERA_DISABLED_REASON: &str = "adjust_camera disabled in quest mode; converted to wait.";

pub struct DecisionDispatcher {
    control: Arc<ControlStateStore>,
    procedures: HashMap<Mode, Arc<dyn DecisionProcedure>>,
}

impl DecisionDispatcher {
    pub fn new(control: Arc<ControlStateStore>) -> Self {
        Self {
            control,
            procedures: HashMap::new(),
        }
    }

    /// Register a procedure for the mode it reports
    pub fn with_procedure(mut self, procedure: Arc<dyn DecisionProcedure>) -> Self {
        self.procedures.insert(procedure.mode(), procedure);
        self
    }

    /// Decide from a raw request body. A body that does not decode as a
    /// snapshot is still checked for a continuable dialog; otherwise it gets
    /// the same safe wait as a failed procedure.
    pub async fn decide_payload(&self, payload: &[u8]) -> Action {
        let error = match GameStateSnapshot::from_json_bytes(payload) {
            Ok(snapshot) => return self.decide(snapshot).await,
            Err(e) => DecisionError::InvalidSnapshot(e.to_string()),
        };

        match GameStateSnapshot::continuable_dialog(payload) {
            Some(snapshot) => {
                tracing::warn!(error = %error, "Snapshot partly rejected, deciding on its dialog");
                self.decide(snapshot).await
            }
            None => {
                tracing::error!(error = %error, "Rejected snapshot, falling back to safe wait");
                Action::wait(AGENT_ERROR_REASON)
            }
        }
    }

    /// Decide the next action for a snapshot
    pub async fn decide(&self, snapshot: GameStateSnapshot) -> Action {
        let context = self.control.read().await;
        let mode = context.mode.clone();
        let decision_id = DecisionId::new();
        let span = tracing::info_span!("decide", decision_id = %decision_id.short(), mode = %mode);

        async move {
            let proposed = match self.procedures.get(&mode) {
                Some(procedure) => run_procedure(procedure.clone(), snapshot, context).await,
                None => {
                    tracing::debug!("No procedure registered for mode");
                    Action::wait(format!("Mode '{}' not implemented - waiting.", mode)).into()
                }
            };

            let action = enforce_mode_safety(&mode, proposed).normalize();
            tracing::debug!(action = %action.action, reason = %action.meta.reason, "Decided");
            action
        }
        .instrument(span)
        .await
    }
}

/// Run a procedure on its own task so that a panic inside it is contained
/// like any other error.
async fn run_procedure(
    procedure: Arc<dyn DecisionProcedure>,
    snapshot: GameStateSnapshot,
    context: ControlState,
) -> ProposedAction {
    let task = tokio::spawn(
        async move { procedure.decide(&snapshot, &context).await }
            .instrument(tracing::Span::current()),
    );

    let outcome = match task.await {
        Ok(result) => result,
        Err(join_error) => Err(DecisionError::Internal(join_error.to_string())),
    };

    match outcome {
        Ok(proposed) => proposed,
        Err(e) => {
            tracing::error!(error = %e, "Error in decision procedure");
            Action::wait(AGENT_ERROR_REASON).into()
        }
    }
}

/// Quest mode never moves the camera, whoever proposed it
pub fn enforce_mode_safety(mode: &Mode, proposed: ProposedAction) -> ProposedAction {
    if *mode == Mode::Quest && proposed.is(ActionKind::AdjustCamera) {
        tracing::warn!("Quest mode proposed adjust_camera, converting to wait");
        return Action::wait(CAMERA_DISABLED_REASON).into();
    }
    proposed
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::services::decision::test_support::ScriptedLlm;
    use crate::application::services::decision::{
        ManualAgent, QuestAgent, SkillAgent, DIALOG_CONTINUE_REASON, PARSE_FAILED_REASON,
    };
    use crate::domain::value_objects::{ControlUpdate, NO_META_REASON};

    /// Procedure returning a fixed proposal, registered under any mode
    struct FixedProcedure {
        mode: Mode,
        proposal: ProposedAction,
    }

    #[async_trait]
    impl DecisionProcedure for FixedProcedure {
        fn mode(&self) -> Mode {
            self.mode.clone()
        }

        async fn plan(
            &self,
            _snapshot: &GameStateSnapshot,
            _context: &ControlState,
        ) -> Result<ProposedAction, DecisionError> {
            Ok(self.proposal.clone())
        }
    }

    struct FailingProcedure;

    #[async_trait]
    impl DecisionProcedure for FailingProcedure {
        fn mode(&self) -> Mode {
            Mode::Skill
        }

        async fn plan(
            &self,
            _snapshot: &GameStateSnapshot,
            _context: &ControlState,
        ) -> Result<ProposedAction, DecisionError> {
            Err(DecisionError::Internal("inventory lookup failed".to_string()))
        }
    }

    struct PanickingProcedure;

    #[async_trait]
    impl DecisionProcedure for PanickingProcedure {
        fn mode(&self) -> Mode {
            Mode::Manual
        }

        async fn plan(
            &self,
            _snapshot: &GameStateSnapshot,
            _context: &ControlState,
        ) -> Result<ProposedAction, DecisionError> {
            panic!("procedure blew up")
        }
    }

    fn dispatcher_with(llm: Arc<ScriptedLlm>) -> (Arc<ControlStateStore>, DecisionDispatcher) {
        let control = Arc::new(ControlStateStore::default());
        let dispatcher = DecisionDispatcher::new(control.clone())
            .with_procedure(Arc::new(QuestAgent::new(llm.clone())))
            .with_procedure(Arc::new(SkillAgent::new(llm.clone())))
            .with_procedure(Arc::new(ManualAgent::new(llm)));
        (control, dispatcher)
    }

    async fn set_mode(control: &ControlStateStore, mode: &str) {
        control
            .update(ControlUpdate {
                mode: Some(Mode::parse(mode)),
                ..ControlUpdate::default()
            })
            .await;
    }

    #[tokio::test]
    async fn test_dialog_continue_in_every_mode_without_oracle() {
        let llm = Arc::new(ScriptedLlm::replying(r#"{"action": "adjust_camera"}"#));
        let (control, dispatcher) = dispatcher_with(llm.clone());

        for mode in ["quest", "skill", "manual"] {
            set_mode(&control, mode).await;
            let action = dispatcher
                .decide_payload(br#"{"dialog": {"can_continue": true}}"#)
                .await;

            assert_eq!(action.action, ActionKind::DialogContinue, "mode {}", mode);
            assert!(action.target.is_none());
            assert_eq!(action.meta.reason, DIALOG_CONTINUE_REASON);
        }
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_quest_mode_overrides_oracle_camera() {
        let llm = Arc::new(ScriptedLlm::replying(
            r#"{"action": "adjust_camera", "meta": {"reason": "look around"}}"#,
        ));
        let (_control, dispatcher) = dispatcher_with(llm);

        let action = dispatcher.decide(GameStateSnapshot::default()).await;

        assert_eq!(action.action, ActionKind::Wait);
        assert_eq!(action.meta.reason, CAMERA_DISABLED_REASON);
    }

    #[tokio::test]
    async fn test_quest_mode_overrides_camera_from_any_procedure() {
        let control = Arc::new(ControlStateStore::default());
        let dispatcher = DecisionDispatcher::new(control).with_procedure(Arc::new(FixedProcedure {
            mode: Mode::Quest,
            proposal: Action::adjust_camera("custom").into(),
        }));

        let action = dispatcher.decide(GameStateSnapshot::default()).await;

        assert_eq!(action.action, ActionKind::Wait);
        assert_eq!(action.meta.reason, CAMERA_DISABLED_REASON);
    }

    #[tokio::test]
    async fn test_skill_mode_may_move_camera() {
        let (control, dispatcher) = dispatcher_with(Arc::new(ScriptedLlm::failing()));
        set_mode(&control, "skill").await;

        let action = dispatcher.decide(GameStateSnapshot::default()).await;

        assert_eq!(action.action, ActionKind::AdjustCamera);
        assert_eq!(action.meta.reason, PARSE_FAILED_REASON);
    }

    #[tokio::test]
    async fn test_unknown_mode_waits() {
        let llm = Arc::new(ScriptedLlm::replying(r#"{"action": "walk_to_tile"}"#));
        let (control, dispatcher) = dispatcher_with(llm.clone());
        set_mode(&control, "unknown_mode").await;

        let action = dispatcher.decide(GameStateSnapshot::default()).await;

        assert_eq!(action.action, ActionKind::Wait);
        assert_eq!(action.meta.reason, "Mode 'unknown_mode' not implemented - waiting.");
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_unregistered_mode_waits() {
        let control = Arc::new(ControlStateStore::default());
        let dispatcher = DecisionDispatcher::new(control.clone())
            .with_procedure(Arc::new(QuestAgent::new(Arc::new(ScriptedLlm::failing()))));
        set_mode(&control, "manual").await;

        let action = dispatcher.decide(GameStateSnapshot::default()).await;

        assert_eq!(action.action, ActionKind::Wait);
        assert!(action.meta.reason.contains("not implemented"));
    }

    #[tokio::test]
    async fn test_procedure_error_becomes_wait() {
        let control = Arc::new(ControlStateStore::default());
        let dispatcher =
            DecisionDispatcher::new(control.clone()).with_procedure(Arc::new(FailingProcedure));
        set_mode(&control, "skill").await;

        let action = dispatcher.decide(GameStateSnapshot::default()).await;

        assert_eq!(action.action, ActionKind::Wait);
        assert_eq!(action.meta.reason, AGENT_ERROR_REASON);
    }

    #[tokio::test]
    async fn test_procedure_panic_becomes_wait() {
        let control = Arc::new(ControlStateStore::default());
        let dispatcher =
            DecisionDispatcher::new(control.clone()).with_procedure(Arc::new(PanickingProcedure));
        set_mode(&control, "manual").await;

        let action = dispatcher.decide(GameStateSnapshot::default()).await;

        assert_eq!(action.action, ActionKind::Wait);
        assert_eq!(action.meta.reason, AGENT_ERROR_REASON);
    }

    #[tokio::test]
    async fn test_normalizes_partial_proposal() {
        let control = Arc::new(ControlStateStore::default());
        let dispatcher = DecisionDispatcher::new(control).with_procedure(Arc::new(FixedProcedure {
            mode: Mode::Quest,
            proposal: ProposedAction {
                action: Some(ActionKind::WalkToTile),
                ..ProposedAction::default()
            },
        }));

        let action = dispatcher.decide(GameStateSnapshot::default()).await;

        assert_eq!(action.action, ActionKind::WalkToTile);
        assert!(action.target.is_none());
        assert_eq!(action.meta.reason, NO_META_REASON);
    }

    #[tokio::test]
    async fn test_empty_and_malformed_payloads_are_well_formed() {
        let (_control, dispatcher) = dispatcher_with(Arc::new(ScriptedLlm::failing()));

        let action = dispatcher.decide_payload(b"{}").await;
        assert_eq!(action.action, ActionKind::Wait);

        let action = dispatcher.decide_payload(br#"{"npcs": 5}"#).await;
        assert_eq!(action.action, ActionKind::Wait);
        assert_eq!(action.meta.reason, AGENT_ERROR_REASON);

        let action = dispatcher.decide_payload(b"not json").await;
        assert_eq!(action.action, ActionKind::Wait);
    }

    #[tokio::test]
    async fn test_dialog_continue_survives_odd_snapshot_fields() {
        let llm = Arc::new(ScriptedLlm::replying(r#"{"action": "walk_to_tile"}"#));
        let (control, dispatcher) = dispatcher_with(llm.clone());

        let action = dispatcher
            .decide_payload(
                br#"{"dialog": {"can_continue": true},
                     "npcs": [{"name": "Cook", "x": 1, "y": 1, "actions": [null, "Talk-to"]}]}"#,
            )
            .await;
        assert_eq!(action.action, ActionKind::DialogContinue);

        set_mode(&control, "skill").await;
        let action = dispatcher
            .decide_payload(br#"{"dialog": {"can_continue": true}, "npcs": 5}"#)
            .await;
        assert_eq!(action.action, ActionKind::DialogContinue);
        assert_eq!(action.meta.reason, DIALOG_CONTINUE_REASON);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_enforce_mode_safety_only_touches_quest_camera() {
        let camera: ProposedAction = Action::adjust_camera("look").into();

        assert!(enforce_mode_safety(&Mode::Quest, camera.clone()).is(ActionKind::Wait));
        assert!(enforce_mode_safety(&Mode::Skill, camera.clone()).is(ActionKind::AdjustCamera));
        assert!(enforce_mode_safety(&Mode::Manual, camera).is(ActionKind::AdjustCamera));

        let talk: ProposedAction = Action::wait("idle").into();
        assert_eq!(enforce_mode_safety(&Mode::Quest, talk.clone()), talk);
    }
}
