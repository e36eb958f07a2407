//! Subscription registry.
//!
//! Tracks which entities react to which event categories. The bus reads it
//! on every dispatch; the card lifecycle manager writes it as cards enter and
//! leave play. An entity appears at most once in a category's list, and
//! lists keep subscription order.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::cards::Card;
use crate::core::EntityId;

use super::catalog::EventCategory;

/// Subscriber list for one category.
pub type Subscribers = SmallVec<[EntityId; 8]>;

/// Category → ordered subscriber handles.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionRegistry {
    by_category: FxHashMap<EventCategory, Subscribers>,
}

impl SubscriptionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `entity` to each of `categories` it is not already in.
    ///
    /// Returns the number of categories newly joined.
    pub fn subscribe(
        &mut self,
        entity: EntityId,
        categories: impl IntoIterator<Item = EventCategory>,
    ) -> usize {
        let mut joined = 0;
        for category in categories {
            let list = self.by_category.entry(category).or_default();
            if !list.contains(&entity) {
                list.push(entity);
                joined += 1;
                trace!(%entity, %category, "subscribed");
            }
        }
        joined
    }

    /// Subscribe a card to every category its effects react to.
    pub fn subscribe_card(&mut self, card: &Card) -> usize {
        self.subscribe(card.id, card.categories())
    }

    /// Remove `entity` from every category.
    ///
    /// Returns whether it was subscribed anywhere. Calling again is a no-op.
    pub fn unsubscribe(&mut self, entity: EntityId) -> bool {
        let mut removed = false;
        self.by_category.retain(|category, list| {
            if let Some(pos) = list.iter().position(|&e| e == entity) {
                list.remove(pos);
                removed = true;
                trace!(%entity, %category, "unsubscribed");
            }
            !list.is_empty()
        });
        removed
    }

    /// Remove `entity` from one category only.
    pub fn unsubscribe_from(&mut self, entity: EntityId, category: EventCategory) -> bool {
        let Some(list) = self.by_category.get_mut(&category) else {
            return false;
        };
        let Some(pos) = list.iter().position(|&e| e == entity) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.by_category.remove(&category);
        }
        trace!(%entity, %category, "unsubscribed");
        true
    }

    #[must_use]
    pub fn is_subscribed(&self, entity: EntityId, category: EventCategory) -> bool {
        self.by_category
            .get(&category)
            .is_some_and(|list| list.contains(&entity))
    }

    /// Current subscribers of `category`, in dispatch order.
    #[must_use]
    pub fn subscribers(&self, category: EventCategory) -> &[EntityId] {
        self.by_category
            .get(&category)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Owned copy of the subscriber list, safe to iterate while the
    /// registry changes.
    #[must_use]
    pub fn snapshot(&self, category: EventCategory) -> Subscribers {
        self.subscribers(category).iter().copied().collect()
    }

    /// Categories `entity` is subscribed to, in catalog order.
    #[must_use]
    pub fn categories_of(&self, entity: EntityId) -> SmallVec<[EventCategory; 4]> {
        EventCategory::ALL
            .iter()
            .copied()
            .filter(|&c| self.is_subscribed(entity, c))
            .collect()
    }

    /// Total number of (entity, category) subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_category.values().map(|list| list.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_category.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Team;
    use crate::effects::EffectAction;

    #[test]
    fn test_subscribe_once_per_category() {
        let mut registry = SubscriptionRegistry::new();
        let e = EntityId(1);

        assert_eq!(registry.subscribe(e, [EventCategory::Attack, EventCategory::Block]), 2);
        assert_eq!(registry.subscribe(e, [EventCategory::Attack]), 0);
        assert_eq!(registry.subscribers(EventCategory::Attack), &[e]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_order_is_subscription_order() {
        let mut registry = SubscriptionRegistry::new();
        for id in [3, 1, 2] {
            registry.subscribe(EntityId(id), [EventCategory::Summon]);
        }
        assert_eq!(
            registry.subscribers(EventCategory::Summon),
            &[EntityId(3), EntityId(1), EntityId(2)]
        );
    }

    #[test]
    fn test_unsubscribe_all_categories() {
        let mut registry = SubscriptionRegistry::new();
        let x = EntityId(7);
        registry.subscribe(x, [EventCategory::Attack, EventCategory::Block]);
        registry.subscribe(EntityId(8), [EventCategory::Block]);

        assert!(registry.unsubscribe(x));
        assert!(!registry.is_subscribed(x, EventCategory::Attack));
        assert!(!registry.is_subscribed(x, EventCategory::Block));
        assert_eq!(registry.subscribers(EventCategory::Block), &[EntityId(8)]);

        assert!(!registry.unsubscribe(x));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unsubscribe_from_one_category() {
        let mut registry = SubscriptionRegistry::new();
        let x = EntityId(2);
        registry.subscribe(x, [EventCategory::Attack, EventCategory::Block]);

        assert!(registry.unsubscribe_from(x, EventCategory::Attack));
        assert!(!registry.unsubscribe_from(x, EventCategory::Attack));
        assert_eq!(registry.categories_of(x).as_slice(), &[EventCategory::Block]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut registry = SubscriptionRegistry::new();
        registry.subscribe(EntityId(1), [EventCategory::Cast]);
        registry.subscribe(EntityId(2), [EventCategory::Cast]);

        let snapshot = registry.snapshot(EventCategory::Cast);
        registry.unsubscribe(EntityId(1));

        assert_eq!(snapshot.as_slice(), &[EntityId(1), EntityId(2)]);
        assert_eq!(registry.subscribers(EventCategory::Cast), &[EntityId(2)]);
    }

    #[test]
    fn test_subscribe_card() {
        let card = crate::cards::Card::unit(EntityId(4), "Watcher", Team::BLUE, 1, 1)
            .with_effect(EventCategory::RoundStart, EffectAction::DrawCards { count: 1 })
            .with_effect(EventCategory::RoundStart, EffectAction::GainManaGem { amount: 1 })
            .with_effect(EventCategory::UnitDied, EffectAction::Buff { power: 1, health: 1 });

        let mut registry = SubscriptionRegistry::new();
        assert_eq!(registry.subscribe_card(&card), 2);
        assert!(registry.is_subscribed(EntityId(4), EventCategory::RoundStart));
        assert!(registry.is_subscribed(EntityId(4), EventCategory::UnitDied));
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = SubscriptionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.subscribers(EventCategory::Target).is_empty());
        registry.subscribe(EntityId(1), [EventCategory::Target]);
        registry.clear();
        assert!(registry.is_empty());
    }
}
