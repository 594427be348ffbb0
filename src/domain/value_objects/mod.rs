//! Value objects - Immutable objects defined by their attributes

mod action;
mod control;
mod ids;

pub use action::{Action, ActionKind, ActionMeta, ActionTarget, ProposedAction, NO_META_REASON};
pub use control::{ControlState, ControlUpdate, Mode, DEFAULT_QUEST};
pub use ids::DecisionId;
