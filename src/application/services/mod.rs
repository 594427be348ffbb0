//! Application services - Use case implementations
//!
//! The dispatcher is the entry point for `/decide`; it reads the control
//! store and delegates to one decision procedure per mode.

pub mod control_service;
pub mod decision;
pub mod dispatcher_service;
pub mod llm;

pub use control_service::ControlStateStore;
pub use decision::{DecisionProcedure, ManualAgent, QuestAgent, SkillAgent};
pub use dispatcher_service::DecisionDispatcher;
