//! Sequence scoring.
//!
//! ```text
//! total    = offense + safety + role_fit
//! offense  = 20 + expected damage               (sequences with an attack)
//! safety   = expected safety × w_role − 40 × w_role  (exposed attacks)
//! role_fit = +40 support holding back in danger
//!            −30 tank opening distance to the nearest enemy
//! ```
//!
//! `w_role` is [`safety_weight`]: supports value safety most, tanks least.
//! A sequence is exposed when it attacks while the unit is in danger and
//! leaves it inside the safe distance (see [`is_exposed`]).
//!
//! [`is_exposed`]: super::simulation::is_exposed

use squad_core::{DecisionError, DecisionResult, Role};

use super::ActionSequence;
use super::simulation::nearest_enemy_from;
use crate::scoring::weights::safety_weight;
use crate::situation::Situation;

pub const ATTACK_BASE: f32 = 20.0;
pub const EXPOSED_PENALTY: f32 = 40.0;
pub const SUPPORT_RESTRAINT_BONUS: f32 = 40.0;
pub const TANK_WITHDRAW_PENALTY: f32 = 30.0;

pub fn offense(sequence: &ActionSequence) -> f32 {
    if sequence.attack().is_some() {
        ATTACK_BASE + sequence.expected_damage
    } else {
        0.0
    }
}

pub fn safety(sequence: &ActionSequence, role: Role) -> f32 {
    let weight = safety_weight(role);
    let mut safety = sequence.expected_safety * weight;
    if sequence.exposed {
        safety -= EXPOSED_PENALTY * weight;
    }
    safety
}

pub fn role_fit(sequence: &ActionSequence, situation: &Situation, role: Role) -> f32 {
    match role {
        Role::Support if situation.in_danger() && sequence.is_skip() => SUPPORT_RESTRAINT_BONUS,
        Role::Tank => {
            let before = situation.nearest_enemy_distance();
            let after = nearest_enemy_from(situation.enemies(), sequence.final_position);
            if after > before + f32::EPSILON {
                -TANK_WITHDRAW_PENALTY
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Fills in the score components of a simulated sequence. Higher is better.
pub fn evaluate(
    sequence: &mut ActionSequence,
    situation: &Situation,
    role: Role,
) -> DecisionResult<()> {
    let offense = offense(sequence);
    let safety = safety(sequence, role);
    let role_fit = role_fit(sequence, situation, role);
    let total = offense + safety + role_fit;
    if !total.is_finite() {
        return Err(DecisionError::malformed(
            "evaluation",
            format!("{} scored {}", sequence.kind, total),
        ));
    }

    sequence.offense = offense;
    sequence.safety = safety;
    sequence.role_fit = role_fit;
    sequence.total = total;
    Ok(())
}
