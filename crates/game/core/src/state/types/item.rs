use std::sync::Arc;

use crate::action::{Action, ActionTags};
use crate::stats::{StatKind, ValueTransform, apply_chain};

/// Equipment definition.
///
/// Items never act on their own initiative: their transform chains are read
/// whenever the holder's stats or damage power are computed, and their
/// tagged actions run during the start/end-of-turn phases.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: Vec<ValueTransform>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defence: Vec<ValueTransform>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: Vec<ValueTransform>,
    /// Chain applied to a damage calculator's base power.
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: Vec<ValueTransform>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: Vec<Action>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stat_transform(mut self, kind: StatKind, transform: ValueTransform) -> Self {
        match kind {
            StatKind::Attack => self.attack.push(transform),
            StatKind::Defence => self.defence.push(transform),
            StatKind::Speed => self.speed.push(transform),
        }
        self
    }

    pub fn with_power_transform(mut self, transform: ValueTransform) -> Self {
        self.power.push(transform);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn stat_chain(&self, kind: StatKind) -> &[ValueTransform] {
        match kind {
            StatKind::Attack => &self.attack,
            StatKind::Defence => &self.defence,
            StatKind::Speed => &self.speed,
        }
    }

    pub fn transform_stat(&self, kind: StatKind, value: i64) -> i64 {
        apply_chain(self.stat_chain(kind), value)
    }

    pub fn transform_power(&self, power: i64) -> i64 {
        apply_chain(&self.power, power)
    }

    /// Actions carrying every flag in `tag`, in declaration order.
    pub fn actions_tagged(&self, tag: ActionTags) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .filter(move |action| action.tags.contains(tag))
    }
}

/// Single equipment slot backed by a stack.
///
/// Equipping pushes; removing pops and re-exposes whatever was held before.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemSlot {
    stack: Vec<Arc<Item>>,
}

impl ItemSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Arc<Item>> {
        self.stack.last()
    }

    pub fn equip(&mut self, item: Arc<Item>) {
        self.stack.push(item);
    }

    /// Removes the current item, restoring the previously equipped one.
    pub fn remove(&mut self) -> Option<Arc<Item>> {
        self.stack.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_restores_previous_item() {
        let mut slot = ItemSlot::new();
        slot.equip(Arc::new(Item::new("Bronze Sword")));
        slot.equip(Arc::new(Item::new("Iron Sword")));

        assert_eq!(slot.current().map(|i| i.name.as_str()), Some("Iron Sword"));
        let removed = slot.remove();
        assert_eq!(removed.map(|i| i.name.clone()), Some("Iron Sword".to_string()));
        assert_eq!(slot.current().map(|i| i.name.as_str()), Some("Bronze Sword"));
        slot.remove();
        assert!(slot.current().is_none());
    }

    #[test]
    fn transforms_follow_stat_kind() {
        let item = Item::new("Gauntlets")
            .with_stat_transform(StatKind::Attack, ValueTransform::Flat(5))
            .with_power_transform(ValueTransform::Percent(50));

        assert_eq!(item.transform_stat(StatKind::Attack, 10), 15);
        assert_eq!(item.transform_stat(StatKind::Defence, 10), 10);
        assert_eq!(item.transform_power(20), 30);
    }
}
