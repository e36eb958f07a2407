//! Effect registry properties.

use ccg_dispatch::core::EntityId;
use ccg_dispatch::effects::{Effect, EffectAction, EffectRegistry, Side};
use ccg_dispatch::events::EventCategory;
use proptest::prelude::*;

fn category_strategy() -> impl Strategy<Value = EventCategory> {
    (0..EventCategory::ALL.len()).prop_map(|i| EventCategory::ALL[i])
}

fn effect_strategy() -> impl Strategy<Value = Effect> {
    (0u32..16, category_strategy(), -4i64..4, any::<bool>()).prop_map(
        |(owner, category, amount, opponents)| {
            let side = if opponents { Side::Opponents } else { Side::Own };
            Effect::new(EntityId(owner), category, EffectAction::DamageNexus { side, amount })
        },
    )
}

proptest! {
    /// An empty registry knows no effect under any category.
    #[test]
    fn empty_registry_has_nothing(category in category_strategy(), effect in effect_strategy()) {
        let registry = EffectRegistry::new();
        prop_assert!(!registry.has_effect(category, &effect));
        prop_assert!(!registry.has_any(category));
    }

    /// After one add, only that (category, effect) pair is present.
    #[test]
    fn add_is_exact(
        category in category_strategy(),
        other_category in category_strategy(),
        effect in effect_strategy(),
        other in effect_strategy(),
    ) {
        let mut registry = EffectRegistry::new();
        prop_assert!(registry.add_effect(category, effect.clone()));

        prop_assert!(registry.has_effect(category, &effect));
        if other != effect {
            prop_assert!(!registry.has_effect(category, &other));
        }
        if other_category != category {
            prop_assert!(!registry.has_effect(other_category, &effect));
        }
    }

    /// Adding an equal effect twice keeps one copy.
    #[test]
    fn duplicates_rejected(category in category_strategy(), effect in effect_strategy()) {
        let mut registry = EffectRegistry::new();
        prop_assert!(registry.add_effect(category, effect.clone()));
        prop_assert!(!registry.add_effect(category, effect.clone()));
        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(registry.effects(category).len(), 1);
    }

    /// A bucket never holds two equal effects, whatever the insert sequence.
    #[test]
    fn buckets_stay_unique(
        inserts in proptest::collection::vec((category_strategy(), effect_strategy()), 0..40),
    ) {
        let mut registry = EffectRegistry::new();
        for (category, effect) in inserts {
            registry.add_effect(category, effect);
        }
        for &category in EventCategory::ALL {
            let bucket = registry.effects(category);
            for (i, a) in bucket.iter().enumerate() {
                for b in &bucket[i + 1..] {
                    prop_assert_ne!(a, b);
                }
            }
        }
    }

    /// Remove undoes add.
    #[test]
    fn remove_undoes_add(category in category_strategy(), effect in effect_strategy()) {
        let mut registry = EffectRegistry::new();
        registry.add_effect(category, effect.clone());
        prop_assert!(registry.remove_effect(category, &effect));
        prop_assert!(!registry.has_effect(category, &effect));
        prop_assert!(!registry.remove_effect(category, &effect));
        prop_assert!(registry.is_empty());
    }

    /// Purging an owner leaves no effect of that owner anywhere.
    #[test]
    fn remove_owned_by_purges_owner(
        inserts in proptest::collection::vec((category_strategy(), effect_strategy()), 0..40),
        owner in 0u32..16,
    ) {
        let mut registry = EffectRegistry::new();
        for (category, effect) in inserts {
            registry.add_effect(category, effect);
        }
        let before = registry.len();
        let removed = registry.remove_owned_by(EntityId(owner));

        prop_assert_eq!(registry.len(), before - removed);
        prop_assert!(registry.iter().all(|(_, e)| e.owner != EntityId(owner)));
    }
}
