use std::fmt;

use thiserror::Error;

/// Countable goods tracked by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Wood,
    Planks,
    Food,
}

impl ResourceKind {
    pub const COUNT: usize = 3;
    pub const ALL: [ResourceKind; Self::COUNT] =
        [ResourceKind::Wood, ResourceKind::Planks, ResourceKind::Food];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Wood => "Wood",
            ResourceKind::Planks => "Planks",
            ResourceKind::Food => "Food",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A quantity of one resource, used for costs, recipe inputs and outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Amount {
    pub kind: ResourceKind,
    pub quantity: u32,
}

impl Amount {
    pub const fn new(kind: ResourceKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

/// Returned when a spend would take a resource below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not enough {kind}: need {needed}, have {available}")]
pub struct Shortfall {
    pub kind: ResourceKind,
    pub needed: u32,
    pub available: u32,
}

/// Resource counts. Unsigned storage keeps every count non-negative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resources {
    counts: [u32; ResourceKind::COUNT],
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used to seed a starting stockpile.
    #[must_use]
    pub fn with(mut self, kind: ResourceKind, quantity: u32) -> Self {
        self.counts[kind.index()] = quantity;
        self
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn add(&mut self, kind: ResourceKind, quantity: u32) {
        let count = &mut self.counts[kind.index()];
        *count = count.saturating_add(quantity);
    }

    /// First resource in `cost` that cannot be covered, if any.
    ///
    /// Amounts naming the same kind more than once are summed.
    pub fn shortfall(&self, cost: &[Amount]) -> Option<Shortfall> {
        let mut needed = [0u32; ResourceKind::COUNT];
        for amount in cost {
            needed[amount.kind.index()] = needed[amount.kind.index()].saturating_add(amount.quantity);
        }
        ResourceKind::ALL.into_iter().find_map(|kind| {
            let need = needed[kind.index()];
            let have = self.get(kind);
            (need > have).then_some(Shortfall {
                kind,
                needed: need,
                available: have,
            })
        })
    }

    pub fn can_afford(&self, cost: &[Amount]) -> bool {
        self.shortfall(cost).is_none()
    }

    /// Deduct `cost` entirely, or leave the store untouched and report what was missing.
    pub fn try_spend(&mut self, cost: &[Amount]) -> Result<(), Shortfall> {
        if let Some(shortfall) = self.shortfall(cost) {
            return Err(shortfall);
        }
        for amount in cost {
            self.counts[amount.kind.index()] -= amount.quantity;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let resources = Resources::new();
        assert!(resources.iter().all(|(_, count)| count == 0));
    }

    #[test]
    fn spend_deducts_exact_amounts() {
        let mut resources = Resources::new().with(ResourceKind::Planks, 7);
        resources
            .try_spend(&[Amount::new(ResourceKind::Planks, 5)])
            .expect("7 planks cover 5");
        assert_eq!(resources.get(ResourceKind::Planks), 2);
    }

    #[test]
    fn failed_spend_leaves_store_untouched() {
        let mut resources = Resources::new()
            .with(ResourceKind::Wood, 10)
            .with(ResourceKind::Planks, 4);
        let before = resources.clone();

        let err = resources
            .try_spend(&[
                Amount::new(ResourceKind::Wood, 2),
                Amount::new(ResourceKind::Planks, 5),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            Shortfall {
                kind: ResourceKind::Planks,
                needed: 5,
                available: 4,
            }
        );
        assert_eq!(resources, before);
    }

    #[test]
    fn repeated_kinds_in_a_cost_are_summed() {
        let resources = Resources::new().with(ResourceKind::Wood, 3);
        let cost = [
            Amount::new(ResourceKind::Wood, 2),
            Amount::new(ResourceKind::Wood, 2),
        ];
        assert!(!resources.can_afford(&cost));
    }

    #[test]
    fn empty_cost_is_always_affordable() {
        let mut resources = Resources::new();
        assert!(resources.try_spend(&[]).is_ok());
    }

    #[test]
    fn add_saturates_instead_of_wrapping() {
        let mut resources = Resources::new().with(ResourceKind::Food, u32::MAX);
        resources.add(ResourceKind::Food, 1);
        assert_eq!(resources.get(ResourceKind::Food), u32::MAX);
    }

    #[test]
    fn shortfall_message_names_the_resource() {
        let err = Resources::new()
            .try_spend(&[Amount::new(ResourceKind::Planks, 3)])
            .unwrap_err();
        assert_eq!(err.to_string(), "not enough Planks: need 3, have 0");
    }
}
