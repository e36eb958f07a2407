//! Per-nexus effect registry.
//!
//! Each nexus keeps the passive effects currently active for its player,
//! bucketed by event category. The registry refuses to hold two equal
//! effects in one bucket, so logically identical passives never stack.
//!
//! The bus runs a nexus's passives for a category after that category's
//! card subscribers.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::EntityId;
use crate::events::EventCategory;

use super::effect::Effect;

/// Active effects of one nexus, keyed by event category.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    by_category: FxHashMap<EventCategory, SmallVec<[Effect; 2]>>,
}

impl EffectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is an effect equal to `effect` registered under `category`?
    ///
    /// Unregistered categories answer `false`.
    #[must_use]
    pub fn has_effect(&self, category: EventCategory, effect: &Effect) -> bool {
        self.by_category
            .get(&category)
            .is_some_and(|bucket| bucket.contains(effect))
    }

    /// Does any effect live under `category`?
    #[must_use]
    pub fn has_any(&self, category: EventCategory) -> bool {
        self.by_category.get(&category).is_some_and(|b| !b.is_empty())
    }

    /// Register `effect` under `category` unless an equal one is present.
    ///
    /// The check and the insert happen under one exclusive borrow, so nothing
    /// can slip in between. Returns `false` for a duplicate.
    pub fn add_effect(&mut self, category: EventCategory, effect: Effect) -> bool {
        let bucket = self.by_category.entry(category).or_default();
        if bucket.contains(&effect) {
            debug!(category = %category, owner = %effect.owner, "duplicate effect rejected");
            return false;
        }
        bucket.push(effect);
        true
    }

    /// Remove the effect equal to `effect` from `category`.
    ///
    /// Returns whether one was present.
    pub fn remove_effect(&mut self, category: EventCategory, effect: &Effect) -> bool {
        let Some(bucket) = self.by_category.get_mut(&category) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|e| e == effect) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.by_category.remove(&category);
        }
        true
    }

    /// Drop every effect owned by `owner`, in every category.
    ///
    /// Returns the number of effects removed.
    pub fn remove_owned_by(&mut self, owner: EntityId) -> usize {
        let mut removed = 0;
        self.by_category.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|e| e.owner != owner);
            removed += before - bucket.len();
            !bucket.is_empty()
        });
        removed
    }

    /// Effects under `category`, in registration order.
    #[must_use]
    pub fn effects(&self, category: EventCategory) -> &[Effect] {
        self.by_category
            .get(&category)
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of registered effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_category.values().map(|b| b.len()).sum()
    }

    /// Check if no effect is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    /// Iterate all (category, effect) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EventCategory, &Effect)> {
        self.by_category
            .iter()
            .flat_map(|(category, bucket)| bucket.iter().map(move |e| (*category, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectAction, Side};

    fn damage(owner: u32, amount: i64) -> Effect {
        Effect::new(
            EntityId(owner),
            EventCategory::RoundEnd,
            EffectAction::DamageNexus { side: Side::Opponents, amount },
        )
    }

    #[test]
    fn test_empty_registry() {
        let registry = EffectRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.has_effect(EventCategory::RoundEnd, &damage(1, 1)));
        assert!(registry.effects(EventCategory::RoundEnd).is_empty());
    }

    #[test]
    fn test_add_then_query() {
        let mut registry = EffectRegistry::new();
        assert!(registry.add_effect(EventCategory::RoundEnd, damage(1, 1)));

        assert!(registry.has_effect(EventCategory::RoundEnd, &damage(1, 1)));
        assert!(!registry.has_effect(EventCategory::RoundEnd, &damage(1, 2)));
        assert!(!registry.has_effect(EventCategory::RoundStart, &damage(1, 1)));
        assert!(registry.has_any(EventCategory::RoundEnd));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = EffectRegistry::new();
        assert!(registry.add_effect(EventCategory::RoundEnd, damage(1, 1)));
        assert!(!registry.add_effect(EventCategory::RoundEnd, damage(1, 1)));
        assert_eq!(registry.effects(EventCategory::RoundEnd).len(), 1);

        // Same effect under a different bucket is a separate registration.
        assert!(registry.add_effect(EventCategory::RoundStart, damage(1, 1)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_effect() {
        let mut registry = EffectRegistry::new();
        registry.add_effect(EventCategory::RoundEnd, damage(1, 1));
        registry.add_effect(EventCategory::RoundEnd, damage(2, 1));

        assert!(registry.remove_effect(EventCategory::RoundEnd, &damage(1, 1)));
        assert!(!registry.remove_effect(EventCategory::RoundEnd, &damage(1, 1)));
        assert!(!registry.remove_effect(EventCategory::Attack, &damage(2, 1)));

        assert_eq!(registry.effects(EventCategory::RoundEnd), &[damage(2, 1)]);

        assert!(registry.remove_effect(EventCategory::RoundEnd, &damage(2, 1)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_owned_by() {
        let mut registry = EffectRegistry::new();
        registry.add_effect(EventCategory::RoundEnd, damage(1, 1));
        registry.add_effect(EventCategory::RoundStart, damage(1, 2));
        registry.add_effect(EventCategory::RoundStart, damage(2, 2));

        assert_eq!(registry.remove_owned_by(EntityId(1)), 2);
        assert_eq!(registry.len(), 1);
        assert!(!registry.has_any(EventCategory::RoundEnd));
        assert_eq!(registry.remove_owned_by(EntityId(1)), 0);
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = EffectRegistry::new();
        for owner in [3, 1, 2] {
            registry.add_effect(EventCategory::RoundEnd, damage(owner, 1));
        }
        let owners: Vec<_> = registry
            .effects(EventCategory::RoundEnd)
            .iter()
            .map(|e| e.owner.raw())
            .collect();
        assert_eq!(owners, vec![3, 1, 2]);
    }
}
