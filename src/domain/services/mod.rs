//! Domain services - Pure decision helpers with no I/O

pub mod npc_resolver;
pub mod quest_catalog;

pub use npc_resolver::find_best_npc;
