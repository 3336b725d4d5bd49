//! Shared data model for the squad tactical decision core.
//!
//! `squad-core` defines the read-only views of units and abilities, the
//! collaborator traits ("oracles") the decision core consumes, the typed
//! configuration, and the error taxonomy. It performs no decision making
//! itself; see the `squad-tactics` crate for that.
pub mod ability;
pub mod config;
pub mod env;
pub mod error;
pub mod unit;

pub use ability::{Ability, AbilityCategory, AbilityHandle};
pub use config::{ConfigError, MoveTimings, TacticsConfig};
pub use env::{
    AbilityOracle, Combatant, DecisionEnv, Env, RetreatOracle, StaticBattlefield, TargetingOracle,
    TimeMode, WorldOracle,
};
pub use error::{DecisionError, DecisionResult, FailureClass};
pub use unit::{
    ActionEconomy, AttackStyle, CcKinds, Faction, Position, RangePreference, Role, SaveKind, Saves,
    UnitId, UnitView,
};
