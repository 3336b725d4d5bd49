//! Caller-owned memoisation of the influence field.
//!
//! Building a field is O(cells × units). Within one encounter the field
//! changes slowly, so a field is reused while the signature (who stands on
//! each side) is unchanged and the entry is younger than the cache window.
//! Identities rather than counts are compared so that a unit of the other
//! faction never receives a field with threat and control swapped.
//!
//! The cache is a plain value owned by the controller and handed to the core
//! by `&mut` each decision cycle. A multi-threaded host keeps one per thread.
//! Always rebuilding is equally correct.

use std::sync::Arc;

use squad_core::{TacticsConfig, UnitId, UnitView};

use super::InfluenceField;

/// Key under which a field is cached: the sorted ids on each side.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldSignature {
    pub enemies: Vec<UnitId>,
    pub allies: Vec<UnitId>,
}

impl FieldSignature {
    pub fn of(enemies: &[UnitView], allies: &[UnitView]) -> Self {
        Self {
            enemies: sorted_ids(enemies),
            allies: sorted_ids(allies),
        }
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn ally_count(&self) -> usize {
        self.allies.len()
    }
}

fn sorted_ids(units: &[UnitView]) -> Vec<UnitId> {
    let mut ids: Vec<UnitId> = units.iter().map(|u| u.id).collect();
    ids.sort_unstable();
    ids
}

/// Counters for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub rebuilds: u64,
    pub stale: u64,
    pub signature_mismatches: u64,
}

#[derive(Debug)]
struct CacheEntry {
    signature: FieldSignature,
    built_at: f32,
    field: Arc<InfluenceField>,
}

/// Single-entry field cache with time-based expiry.
#[derive(Debug, Default)]
pub struct FieldCache {
    entry: Option<CacheEntry>,
    stats: CacheStats,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache pre-seeded with `field`, as if it had been built at `built_at`.
    pub fn seeded(field: InfluenceField, signature: FieldSignature, built_at: f32) -> Self {
        Self {
            entry: Some(CacheEntry {
                signature,
                built_at,
                field: Arc::new(field),
            }),
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached field when still fresh, otherwise builds and stores
    /// a new one.
    ///
    /// `now` is the game clock in seconds; a clock that moved backwards counts
    /// as stale.
    pub fn get_or_build(
        &mut self,
        enemies: &[UnitView],
        allies: &[UnitView],
        now: f32,
        config: &TacticsConfig,
    ) -> Arc<InfluenceField> {
        let signature = FieldSignature::of(enemies, allies);

        if let Some(entry) = &self.entry {
            let age = now - entry.built_at;
            if entry.signature != signature {
                self.stats.signature_mismatches += 1;
            } else if !(0.0..=config.cache_window_secs).contains(&age) {
                self.stats.stale += 1;
            } else {
                self.stats.hits += 1;
                tracing::trace!(
                    "FieldCache: hit {}v{} (age={:.2}s)",
                    signature.ally_count(),
                    signature.enemy_count(),
                    age
                );
                return Arc::clone(&entry.field);
            }
        }

        self.stats.rebuilds += 1;
        let field = Arc::new(InfluenceField::build(enemies, allies, config));
        self.entry = Some(CacheEntry {
            signature,
            built_at: now,
            field: Arc::clone(&field),
        });
        field
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
