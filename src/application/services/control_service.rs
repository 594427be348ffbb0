use tokio::sync::RwLock;

use crate::domain::value_objects::{ControlState, ControlUpdate};

/// Holds the operator's control state for the lifetime of the process.
///
/// Reads hand out a copy, so a decision in flight keeps a consistent view even
/// if the operator changes settings meanwhile. Updates merge under the write
/// lock, so no reader ever sees a half-applied update.
pub struct ControlStateStore {
    state: RwLock<ControlState>,
}

impl ControlStateStore {
    pub fn new(initial: ControlState) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }

    /// Current state (copied)
    pub async fn read(&self) -> ControlState {
        self.state.read().await.clone()
    }

    /// Merge a partial update and return the resulting state
    pub async fn update(&self, update: ControlUpdate) -> ControlState {
        let fields = update.field_names();
        let mut state = self.state.write().await;
        state.apply(update);

        if fields.is_empty() {
            tracing::debug!("Control update carried no known fields");
        } else {
            tracing::info!(
                fields = ?fields,
                mode = %state.mode,
                "Control state updated"
            );
        }
        state.clone()
    }
}

impl Default for ControlStateStore {
    fn default() -> Self {
        Self::new(ControlState::default())
    }
}
