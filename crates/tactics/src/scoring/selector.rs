//! Best-target selection.
//!
//! Scores every candidate for a purpose and keeps the highest. Candidates
//! scored at [`SENTINEL_SCORE`](super::SENTINEL_SCORE) are never returned.
//!
//! # Determinism
//!
//! Scoring is pure. Ties resolve to the first candidate in input order
//! (enemies / allies as the world oracle listed them), so the same battlefield
//! always yields the same pick.

use squad_core::Ability;

use super::{ScoringContext, TargetPurpose, TargetScore, attack, debuff, heal};

pub struct TargetSelector;

impl TargetSelector {
    /// Highest selectable score; first wins on ties.
    pub fn best<I>(scores: I) -> Option<TargetScore>
    where
        I: IntoIterator<Item = TargetScore>,
    {
        let mut best: Option<TargetScore> = None;
        for candidate in scores {
            if !candidate.is_selectable() {
                continue;
            }
            if best
                .as_ref()
                .is_none_or(|current| candidate.score > current.score)
            {
                best = Some(candidate);
            }
        }
        best
    }

    /// Selects a target for `purpose`.
    ///
    /// `debuffs` is only consulted for [`TargetPurpose::Debuff`].
    pub fn select(
        ctx: &ScoringContext<'_>,
        purpose: TargetPurpose,
        debuffs: &[Ability],
    ) -> Option<TargetScore> {
        let best = match purpose {
            TargetPurpose::Attack => Self::attack(ctx),
            TargetPurpose::Heal => Self::heal(ctx),
            TargetPurpose::Debuff => Self::debuff(ctx, debuffs),
        };

        match &best {
            Some(pick) => tracing::debug!(
                "TargetSelector: {} → {} (score={:.1}, {})",
                purpose,
                pick.target,
                pick.score,
                pick.reason
            ),
            None => tracing::debug!("TargetSelector: {} → no candidate", purpose),
        }
        best
    }

    pub fn attack(ctx: &ScoringContext<'_>) -> Option<TargetScore> {
        Self::best(
            ctx.enemies
                .iter()
                .filter(|e| e.is_alive())
                .map(|enemy| attack::score(ctx, enemy)),
        )
    }

    /// Self first, then allies.
    pub fn heal(ctx: &ScoringContext<'_>) -> Option<TargetScore> {
        Self::best(
            std::iter::once(ctx.actor)
                .chain(ctx.allies.iter())
                .map(|ally| heal::score(ctx, ally)),
        )
    }

    /// Every (debuff, enemy) pair, abilities in order, enemies in order.
    pub fn debuff(ctx: &ScoringContext<'_>, debuffs: &[Ability]) -> Option<TargetScore> {
        Self::best(debuffs.iter().flat_map(move |ability| {
            ctx.enemies
                .iter()
                .filter(|e| e.is_alive())
                .map(move |enemy| debuff::score(ctx, ability, enemy))
        }))
    }
}
