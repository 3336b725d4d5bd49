//! Data-driven inputs for the squad tactical core.
//!
//! This crate reads the files the decision core is configured and exercised
//! with:
//! - Tactics tuning (TOML), deserialized straight into [`squad_core::TacticsConfig`]
//! - Battle scenarios (RON), deserialized into [`squad_core::StaticBattlefield`]
//!
//! Content never reaches the decision core directly; it is turned into oracle
//! implementations and configuration by the caller.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, Scenario, ScenarioLoader};
