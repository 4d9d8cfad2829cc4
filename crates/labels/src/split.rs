//! Carton splits and the split algorithm.
//!
//! A line with no splits is printed whole. Once split, a line always holds at
//! least two cartons, kept in creation order; the order drives carton
//! numbering on the labels.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use cartonforge_core::{Entity, EntryId, SplitId, position_of};

/// One carton's share of a line's total quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    id: SplitId,
    parent: EntryId,
    quantity: u32,
}

impl Split {
    fn new(parent: EntryId, quantity: u32) -> Self {
        Self {
            id: SplitId::new(),
            parent,
            quantity,
        }
    }

    pub fn id(&self) -> SplitId {
        self.id
    }

    pub fn parent(&self) -> EntryId {
        self.parent
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl Entity for Split {
    type Id = SplitId;

    fn id(&self) -> &SplitId {
        &self.id
    }
}

/// Why a split operation left the state untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("line is not part of the loaded order")]
    UnknownLine,

    #[error("a quantity of {total} cannot be split")]
    TooSmall { total: u32 },

    #[error("every carton already holds a single unit")]
    NothingSplittable,

    #[error("line is not split")]
    NotSplit,

    #[error("carton does not belong to this line")]
    UnknownSplit,
}

/// Result of a split operation, for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// A whole line was split into its first two cartons.
    Created { first: u32, second: u32 },
    /// A carton holding the unallocated remainder was appended.
    RemainderAdded { quantity: u32 },
    /// The largest carton was halved; `kept` stays in place, `added` is appended.
    Halved { kept: u32, added: u32 },
    /// The last two cartons were removed; the line prints whole again.
    Unsplit,
    /// The last carton was merged into the previous one.
    Merged { quantity: u32 },
    /// A carton quantity was set as requested.
    Updated { quantity: u32 },
    /// A carton quantity was set, but not to the requested value.
    Clamped { requested: i64, applied: u32 },
    Rejected(Rejection),
}

impl SplitOutcome {
    /// Whether the operation changed any state.
    pub fn is_applied(&self) -> bool {
        !matches!(self, SplitOutcome::Rejected(_))
    }
}

impl core::fmt::Display for SplitOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SplitOutcome::Created { first, second } => {
                write!(f, "created 2 cartons with quantities {first} and {second}")
            }
            SplitOutcome::RemainderAdded { quantity } => {
                write!(f, "added carton with remaining quantity {quantity}")
            }
            SplitOutcome::Halved { kept, added } => {
                write!(f, "split largest carton into {kept} and {added}")
            }
            SplitOutcome::Unsplit => f.write_str("splits removed, quantity restored to line"),
            SplitOutcome::Merged { quantity } => {
                write!(f, "merged last carton into previous (new quantity: {quantity})")
            }
            SplitOutcome::Updated { quantity } => write!(f, "carton quantity set to {quantity}"),
            SplitOutcome::Clamped { requested, applied } if *requested < 0 => {
                write!(f, "quantity cannot be negative, set to {applied}")
            }
            SplitOutcome::Clamped { requested, applied } => write!(
                f,
                "requested quantity {requested} exceeds what is available, set to {applied}"
            ),
            SplitOutcome::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

/// Carton splits per order line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSet {
    entries: HashMap<EntryId, Vec<Split>>,
}

fn sum(splits: &[Split]) -> u64 {
    splits.iter().map(|s| u64::from(s.quantity)).sum()
}

impl SplitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits of a line in carton order; empty when the line is whole.
    pub fn get(&self, parent: &EntryId) -> &[Split] {
        self.entries.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_split(&self, parent: &EntryId) -> bool {
        !self.get(parent).is_empty()
    }

    /// Sum of carton quantities of a line (0 when whole).
    pub fn sum(&self, parent: &EntryId) -> u64 {
        sum(self.get(parent))
    }

    /// Number of lines currently split.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntryId, &[Split])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add one carton to a line whose total quantity is `total_quantity`.
    ///
    /// - whole line: two cartons, the second takes the odd unit
    /// - cartons short of the total: one carton with the remainder
    /// - otherwise: the largest carton (first on ties) is halved and the
    ///   smaller half appended
    pub fn add_split(&mut self, parent: EntryId, total_quantity: u32) -> SplitOutcome {
        if total_quantity <= 1 {
            return SplitOutcome::Rejected(Rejection::TooSmall {
                total: total_quantity,
            });
        }

        let splits = match self.entries.get_mut(&parent) {
            Some(splits) if !splits.is_empty() => splits,
            _ => {
                let first = total_quantity / 2;
                let second = total_quantity - first;
                self.entries.insert(
                    parent,
                    vec![Split::new(parent, first), Split::new(parent, second)],
                );
                return SplitOutcome::Created { first, second };
            }
        };

        let allocated = sum(splits);
        if allocated < u64::from(total_quantity) {
            // allocated < total_quantity, so the difference fits in u32
            let quantity = (u64::from(total_quantity) - allocated) as u32;
            splits.push(Split::new(parent, quantity));
            return SplitOutcome::RemainderAdded { quantity };
        }

        let mut largest = 0;
        for (index, split) in splits.iter().enumerate() {
            if split.quantity > splits[largest].quantity {
                largest = index;
            }
        }

        let quantity = splits[largest].quantity;
        if quantity <= 1 {
            return SplitOutcome::Rejected(Rejection::NothingSplittable);
        }

        let added = quantity / 2;
        let kept = quantity - added;
        splits[largest].quantity = kept;
        splits.push(Split::new(parent, added));

        SplitOutcome::Halved { kept, added }
    }

    /// Undo the last carton: two cartons collapse back to a whole line, more
    /// than two merge the last into the one before it.
    pub fn remove_split(&mut self, parent: EntryId) -> SplitOutcome {
        let Some(splits) = self.entries.get_mut(&parent) else {
            return SplitOutcome::Rejected(Rejection::NotSplit);
        };

        match splits.len() {
            0 | 1 => SplitOutcome::Rejected(Rejection::NotSplit),
            2 => {
                self.entries.remove(&parent);
                SplitOutcome::Unsplit
            }
            len => {
                let last = splits.remove(len - 1);
                let target = &mut splits[len - 2];
                target.quantity = target.quantity.saturating_add(last.quantity);
                SplitOutcome::Merged {
                    quantity: target.quantity,
                }
            }
        }
    }

    /// Set one carton's quantity, clamped to `[0, total - other cartons]`.
    pub fn update_split_quantity(
        &mut self,
        parent: EntryId,
        split_id: SplitId,
        new_quantity: i64,
        total_quantity: u32,
    ) -> SplitOutcome {
        let Some(splits) = self.entries.get_mut(&parent) else {
            return SplitOutcome::Rejected(Rejection::NotSplit);
        };
        let Some(index) = position_of(splits.as_slice(), &split_id) else {
            return SplitOutcome::Rejected(Rejection::UnknownSplit);
        };

        let others = sum(splits) - u64::from(splits[index].quantity);
        let max_allowed = u64::from(total_quantity).saturating_sub(others);
        // max_allowed <= total_quantity, so the clamped value fits in u32
        let applied = new_quantity.clamp(0, max_allowed as i64) as u32;
        splits[index].quantity = applied;

        if i64::from(applied) == new_quantity {
            SplitOutcome::Updated { quantity: applied }
        } else {
            SplitOutcome::Clamped {
                requested: new_quantity,
                applied,
            }
        }
    }
}
