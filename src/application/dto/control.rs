use serde::Serialize;

use crate::domain::value_objects::ControlState;

/// Body returned by the control endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ControlResponseDto {
    pub ok: bool,
    pub state: ControlState,
}

impl From<ControlState> for ControlResponseDto {
    fn from(state: ControlState) -> Self {
        Self { ok: true, state }
    }
}
