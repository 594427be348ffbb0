//! Domain layer - Core decision logic with no external dependencies
//!
//! This layer contains:
//! - Entities: the game state snapshot reported by the client
//! - Value Objects: actions, operator control state, identifiers
//! - Domain Services: quest knowledge and NPC proximity resolution

pub mod entities;
pub mod services;
pub mod value_objects;
