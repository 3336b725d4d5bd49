//! Traits describing the read-only collaborators of the decision core.
//!
//! Oracles expose the living units, the classified abilities of a unit,
//! targeting feasibility, and retreat suggestions. The [`Env`] aggregate
//! bundles them so the core can access everything it needs without hard
//! coupling to an engine.
mod abilities;
mod battlefield;
mod retreat;
mod targeting;
mod world;

pub use abilities::AbilityOracle;
pub use battlefield::{Combatant, StaticBattlefield};
pub use retreat::RetreatOracle;
pub use targeting::TargetingOracle;
pub use world::{TimeMode, WorldOracle};

/// Aggregates the oracles consulted during one decision cycle.
pub struct Env<'a, W, A, T, R>
where
    W: WorldOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    T: TargetingOracle + ?Sized,
    R: RetreatOracle + ?Sized,
{
    world: &'a W,
    abilities: &'a A,
    targeting: &'a T,
    retreat: &'a R,
}

impl<W, A, T, R> Clone for Env<'_, W, A, T, R>
where
    W: WorldOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    T: TargetingOracle + ?Sized,
    R: RetreatOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, A, T, R> Copy for Env<'_, W, A, T, R>
where
    W: WorldOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    T: TargetingOracle + ?Sized,
    R: RetreatOracle + ?Sized,
{
}

pub type DecisionEnv<'a> = Env<
    'a,
    dyn WorldOracle + 'a,
    dyn AbilityOracle + 'a,
    dyn TargetingOracle + 'a,
    dyn RetreatOracle + 'a,
>;

impl<'a, W, A, T, R> Env<'a, W, A, T, R>
where
    W: WorldOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    T: TargetingOracle + ?Sized,
    R: RetreatOracle + ?Sized,
{
    pub fn new(world: &'a W, abilities: &'a A, targeting: &'a T, retreat: &'a R) -> Self {
        Self {
            world,
            abilities,
            targeting,
            retreat,
        }
    }

    pub fn world(&self) -> &'a W {
        self.world
    }

    pub fn abilities(&self) -> &'a A {
        self.abilities
    }

    pub fn targeting(&self) -> &'a T {
        self.targeting
    }

    pub fn retreat(&self) -> &'a R {
        self.retreat
    }
}

impl<'a, W, A, T, R> Env<'a, W, A, T, R>
where
    W: WorldOracle + 'a,
    A: AbilityOracle + 'a,
    T: TargetingOracle + 'a,
    R: RetreatOracle + 'a,
{
    /// Converts this environment into a trait-object based [`DecisionEnv`].
    pub fn into_decision_env(self) -> DecisionEnv<'a> {
        let world: &'a dyn WorldOracle = self.world;
        let abilities: &'a dyn AbilityOracle = self.abilities;
        let targeting: &'a dyn TargetingOracle = self.targeting;
        let retreat: &'a dyn RetreatOracle = self.retreat;
        Env::new(world, abilities, targeting, retreat)
    }
}

impl<'a> DecisionEnv<'a> {
    /// Builds an environment where a single value answers every oracle.
    pub fn from_bundle<B>(bundle: &'a B) -> Self
    where
        B: WorldOracle + AbilityOracle + TargetingOracle + RetreatOracle + 'a,
    {
        Env::new(bundle, bundle, bundle, bundle).into_decision_env()
    }
}
