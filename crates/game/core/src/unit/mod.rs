//! Read-only combatant data consumed by the decision core.
mod common;
mod conditions;
mod profile;
mod view;

pub use common::{Faction, Position, UnitId};
pub use conditions::CcKinds;
pub use profile::{AttackStyle, RangePreference, Role, SaveKind, Saves};
pub use view::{ActionEconomy, UnitView};
