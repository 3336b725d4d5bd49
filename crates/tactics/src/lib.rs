//! Tactical decision core for squad combat.
//!
//! Each decision cycle turns the battlefield into a target and an ordered
//! sequence of actions for one unit:
//!
//! - [`influence`]: grid-sampled threat/control field with frontline and
//!   safe-zone analysis, cached across units within a short time window
//! - [`situation`]: immutable per-cycle snapshot of the unit, its neighbours,
//!   its abilities, the combat phase and whether it is in danger
//! - [`scoring`]: role-weighted attack, heal and debuff target scoring
//! - [`planner`]: generation, simulation and comparison of whole action
//!   sequences
//!
//! [`TacticalBrain`] wires them together. Collaborators (world, abilities,
//! targeting, retreat) come from `squad-core` as trait objects, so the core
//! never depends on a particular engine.

pub mod brain;
pub mod influence;
pub mod planner;
pub mod scoring;
pub mod situation;

pub use brain::{Decision, TacticalBrain};
pub use influence::{FieldCache, InfluenceField};
pub use planner::{ActionSequence, PlannedAction, SequenceKind, SequencePlanner};
pub use scoring::{RoleWeights, SENTINEL_SCORE, TargetPurpose, TargetScore, TargetSelector};
pub use situation::{AbilityPools, CombatPhase, Diagnostic, Situation, SituationBuilder};
