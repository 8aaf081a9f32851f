//! Avatar collaborator boundary
//!
//! The session core never talks to an avatar backend directly. It resolves a
//! model descriptor through an `AvatarCatalog` and drives the live avatar
//! through an `AvatarAgent` handle created per session.

mod agent;
mod catalog;

pub use agent::{AvatarAgent, AvatarAgentFactory, LoggingAgent, LoggingAgentFactory};
pub use catalog::{AvatarCatalog, AvatarModel, BuiltinCatalog, CachedCatalog};
