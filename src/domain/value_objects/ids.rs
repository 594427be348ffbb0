//! Identifiers used to correlate log lines for one decision request

use uuid::Uuid;

/// Identifier attached to the tracing span of one `/decide` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecisionId(Uuid);

impl DecisionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight characters, enough to follow a request through the logs
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for DecisionId {
    fn default() -> Self {
        Self::new()
    }
}
