//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::LlmPort;
use crate::application::services::{
    ControlStateStore, DecisionDispatcher, ManualAgent, QuestAgent, SkillAgent,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::oracle::OracleClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Operator control state, shared with the dispatcher
    pub control: Arc<ControlStateStore>,
    pub dispatcher: DecisionDispatcher,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let oracle = OracleClient::from_config(&config);
        tracing::info!(model = %oracle.model(), "Oracle client ready");
        Ok(Self::with_llm(config, Arc::new(oracle)))
    }

    /// Wire the services around an arbitrary oracle
    pub fn with_llm(config: AppConfig, llm: Arc<dyn LlmPort>) -> Self {
        let control = Arc::new(ControlStateStore::default());
        let dispatcher = DecisionDispatcher::new(control.clone())
            .with_procedure(Arc::new(QuestAgent::new(llm.clone())))
            .with_procedure(Arc::new(SkillAgent::new(llm.clone())))
            .with_procedure(Arc::new(ManualAgent::new(llm)));

        Self {
            config,
            control,
            dispatcher,
        }
    }
}
