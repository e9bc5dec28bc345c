use crate::catalog::Perk;

/// One perk's share of ranks on one side of the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerkRow {
    pub perk: Perk,
    pub ranks: u32,
    /// Level at which each rank was taken, oldest first. Empty on the
    /// available side.
    pub level_selected: Vec<u32>,
}

impl PerkRow {
    fn new(perk: Perk, ranks: u32) -> Self {
        Self {
            perk,
            ranks,
            level_selected: Vec::new(),
        }
    }
}

/// A perk with ranks left to take, plus whether it can be taken right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OfferedPerk {
    pub perk: Perk,
    pub ranks_remaining: u32,
    pub requirements_met: bool,
}

/// Available and acquired ranks for every perk in the catalog.
///
/// Both sides hold one row per catalog perk, indexed by [`Perk::index`].
/// Invariant: `available.ranks + acquired.ranks == max_ranks` for every perk.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerkLedger {
    available: Vec<PerkRow>,
    acquired: Vec<PerkRow>,
}

impl PerkLedger {
    pub fn new() -> Self {
        Self {
            available: Perk::ALL
                .iter()
                .map(|&p| PerkRow::new(p, p.max_ranks()))
                .collect(),
            acquired: Perk::ALL.iter().map(|&p| PerkRow::new(p, 0)).collect(),
        }
    }

    pub fn available(&self, perk: Perk) -> &PerkRow {
        &self.available[perk.index()]
    }

    pub fn acquired(&self, perk: Perk) -> &PerkRow {
        &self.acquired[perk.index()]
    }

    pub fn ranks(&self, perk: Perk) -> u32 {
        self.acquired(perk).ranks
    }

    pub fn remaining(&self, perk: Perk) -> u32 {
        self.available(perk).ranks
    }

    /// Rows the character holds at least one rank of, in catalog order.
    pub fn acquired_rows(&self) -> impl Iterator<Item = &PerkRow> {
        self.acquired.iter().filter(|row| row.ranks > 0)
    }

    pub fn acquired_perks(&self) -> impl Iterator<Item = Perk> + '_ {
        self.acquired_rows().map(|row| row.perk)
    }

    pub fn acquired_ranks(&self) -> impl Iterator<Item = (Perk, u32)> + '_ {
        self.acquired_rows().map(|row| (row.perk, row.ranks))
    }

    /// Rows with ranks left to take, in catalog order.
    pub fn available_rows(&self) -> impl Iterator<Item = &PerkRow> {
        self.available.iter().filter(|row| row.ranks > 0)
    }

    /// Moves one rank to the acquired side. Returns `false` if none remain.
    pub(crate) fn take_rank(&mut self, perk: Perk, level: u32) -> bool {
        let available = &mut self.available[perk.index()];
        if available.ranks == 0 {
            return false;
        }
        available.ranks -= 1;

        let acquired = &mut self.acquired[perk.index()];
        acquired.ranks += 1;
        acquired.level_selected.push(level);
        true
    }

    /// Moves the most recent rank back. Returns the level it was taken at.
    pub(crate) fn return_rank(&mut self, perk: Perk) -> Option<u32> {
        let acquired = &mut self.acquired[perk.index()];
        if acquired.ranks == 0 {
            return None;
        }
        acquired.ranks -= 1;
        let level = acquired.level_selected.pop();

        self.available[perk.index()].ranks += 1;
        level
    }

    /// True when both sides hold one row per catalog perk, in catalog order,
    /// and every acquired rank has a recorded level.
    pub fn is_well_formed(&self) -> bool {
        let in_order = |rows: &[PerkRow]| {
            rows.len() == Perk::COUNT && rows.iter().zip(Perk::ALL).all(|(row, p)| row.perk == p)
        };
        in_order(&self.available)
            && in_order(&self.acquired)
            && self
                .acquired
                .iter()
                .all(|row| row.level_selected.len() == row.ranks as usize)
    }

    /// Returns the first perk whose two sides do not add up to its cap.
    pub fn rank_violation(&self) -> Option<Perk> {
        Perk::ALL
            .into_iter()
            .find(|&p| self.remaining(p) + self.ranks(p) != p.max_ranks())
    }
}

impl Default for PerkLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ledger_offers_every_rank() {
        let ledger = PerkLedger::new();
        assert_eq!(ledger.remaining(Perk::Toughness), 3);
        assert_eq!(ledger.ranks(Perk::Toughness), 0);
        assert_eq!(ledger.acquired_perks().count(), 0);
        assert_eq!(ledger.rank_violation(), None);
    }

    #[test]
    fn take_and_return_preserve_rank_sum() {
        let mut ledger = PerkLedger::new();
        assert!(ledger.take_rank(Perk::Toughness, 3));
        assert!(ledger.take_rank(Perk::Toughness, 6));
        assert_eq!(ledger.acquired(Perk::Toughness).level_selected, vec![3, 6]);
        assert_eq!(ledger.rank_violation(), None);

        assert_eq!(ledger.return_rank(Perk::Toughness), Some(6));
        assert_eq!(ledger.ranks(Perk::Toughness), 1);
        assert_eq!(ledger.remaining(Perk::Toughness), 2);
        assert_eq!(ledger.rank_violation(), None);
    }

    #[test]
    fn exhausted_and_empty_sides_refuse() {
        let mut ledger = PerkLedger::new();
        assert!(ledger.take_rank(Perk::Tag, 12));
        assert!(!ledger.take_rank(Perk::Tag, 15));
        assert_eq!(ledger.return_rank(Perk::Dodger), None);
    }
}
