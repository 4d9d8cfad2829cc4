use chrono::{DateTime, Utc};
use tracing::{debug, info};

use cartonforge_core::{EntryId, SplitId};

use crate::order::OrderData;
use crate::print::{self, PrintError, PrintItem, SplitMismatch};
use crate::selection::Selection;
use crate::split::{Rejection, SplitOutcome, SplitSet};

/// Label session state for the currently loaded order.
///
/// Owns the order, its carton splits and the print selection. All mutations
/// go through the methods below; each runs to completion and reports what it
/// did through its return value.
#[derive(Debug, Clone, Default)]
pub struct SplitStore {
    order: Option<OrderData>,
    splits: SplitSet,
    selection: Selection,
    loaded_at: Option<DateTime<Utc>>,
}

impl SplitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with a freshly fetched order.
    ///
    /// Splits and selection from the previous order are dropped, lines without
    /// a committed quantity move to the bottom, and every line with something
    /// to print is selected.
    pub fn load_order(&mut self, mut order: OrderData) {
        self.splits.clear();
        self.selection.clear();

        order.sort_uncommitted_last();
        self.selection = order
            .printable_lines()
            .map(|line| line.entry_id)
            .collect();

        info!(
            tran_id = %order.tran_id,
            is_sales_order = order.is_sales_order,
            lines = order.items.len(),
            selected = self.selection.len(),
            "order loaded"
        );

        self.order = Some(order);
        self.loaded_at = Some(Utc::now());
    }

    /// Drop the loaded order and all session state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn order(&self) -> Option<&OrderData> {
        self.order.as_ref()
    }

    pub fn splits(&self) -> &SplitSet {
        &self.splits
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Total quantity of a line of the loaded order.
    pub fn total_quantity(&self, entry_id: &EntryId) -> Option<u32> {
        self.order.as_ref()?.total_of(entry_id)
    }

    pub fn add_split(&mut self, entry_id: EntryId) -> SplitOutcome {
        let outcome = match self.total_quantity(&entry_id) {
            Some(total) => self.splits.add_split(entry_id, total),
            None => SplitOutcome::Rejected(Rejection::UnknownLine),
        };
        trace_outcome("add_split", entry_id, outcome)
    }

    pub fn remove_split(&mut self, entry_id: EntryId) -> SplitOutcome {
        let outcome = self.splits.remove_split(entry_id);
        trace_outcome("remove_split", entry_id, outcome)
    }

    /// Set a carton quantity, clamped so the line never exceeds its total.
    pub fn update_split_quantity(
        &mut self,
        entry_id: EntryId,
        split_id: SplitId,
        new_quantity: i64,
    ) -> SplitOutcome {
        let outcome = match self.total_quantity(&entry_id) {
            Some(total) => {
                self.splits
                    .update_split_quantity(entry_id, split_id, new_quantity, total)
            }
            None => SplitOutcome::Rejected(Rejection::UnknownLine),
        };
        trace_outcome("update_split_quantity", entry_id, outcome)
    }

    /// Select every line with a positive total quantity, or clear the selection.
    pub fn mark_all(&mut self, select: bool) {
        self.selection = match (&self.order, select) {
            (Some(order), true) => order.printable_lines().map(|line| line.entry_id).collect(),
            _ => Selection::new(),
        };
        debug!(select, selected = self.selection.len(), "mark_all");
    }

    /// Flip the selection of one line.
    ///
    /// Returns the new membership, or `None` when the line cannot be selected
    /// (unknown, or nothing to print). Deselecting always works.
    pub fn toggle_row(&mut self, entry_id: EntryId) -> Option<bool> {
        let selectable = self.selection.contains(&entry_id)
            || self.total_quantity(&entry_id).is_some_and(|total| total > 0);
        if !selectable {
            debug!(%entry_id, "toggle_row rejected");
            return None;
        }

        let selected = self.selection.toggle(entry_id);
        debug!(%entry_id, selected, "toggle_row");
        Some(selected)
    }

    /// Split lines whose cartons disagree with the line total.
    pub fn validate(&self) -> Vec<SplitMismatch> {
        match &self.order {
            Some(order) => print::validate_split_quantities(order, &self.splits),
            None => Vec::new(),
        }
    }

    /// Labels for the current selection.
    pub fn print_items(&self) -> Result<Vec<PrintItem>, PrintError> {
        match &self.order {
            Some(order) => print::build_print_items(order, &self.selection, &self.splits),
            None => Err(PrintError::NothingSelected),
        }
    }
}

fn trace_outcome(
    operation: &'static str,
    entry_id: EntryId,
    outcome: SplitOutcome,
) -> SplitOutcome {
    if outcome.is_applied() {
        debug!(operation, %entry_id, %outcome, "split updated");
    } else {
        debug!(operation, %entry_id, %outcome, "split operation rejected");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderLinePayload, OrderPayload};

    fn line(item: &str, ordered: u32, committed: u32) -> OrderLinePayload {
        OrderLinePayload {
            item: item.to_string(),
            item_id: Some(format!("id-{item}")),
            description: String::new(),
            location: String::new(),
            units: None,
            quantity_ordered: ordered,
            quantity_committed: committed,
        }
    }

    fn order(is_sales_order: bool, lines: Vec<OrderLinePayload>) -> OrderData {
        OrderData::from_payload(OrderPayload {
            id: "42".to_string(),
            tran_id: "if-42".to_string(),
            entity: String::new(),
            entity_contact: String::new(),
            ship_address: String::new(),
            transaction_date: String::new(),
            po_number: None,
            is_sales_order,
            items: lines,
        })
    }

    fn loaded(is_sales_order: bool, lines: Vec<OrderLinePayload>) -> SplitStore {
        let mut store = SplitStore::new();
        store.load_order(order(is_sales_order, lines));
        store
    }

    fn entry(store: &SplitStore, index: usize) -> EntryId {
        store.order().unwrap().items[index].entry_id
    }

    #[test]
    fn load_selects_lines_with_quantity() {
        let store = loaded(
            true,
            vec![line("A", 5, 0), line("B", 3, 3), line("C", 2, 2)],
        );

        let items = &store.order().unwrap().items;
        assert_eq!(
            items.iter().map(|l| l.item.as_str()).collect::<Vec<_>>(),
            vec!["B", "C", "A"]
        );
        assert_eq!(store.selection().len(), 2);
        assert!(!store.selection().contains(&entry(&store, 2)));
        assert!(store.loaded_at().is_some());
    }

    #[test]
    fn loading_a_new_order_resets_state() {
        let mut store = loaded(true, vec![line("A", 6, 6)]);
        let a = entry(&store, 0);
        store.add_split(a);
        store.mark_all(false);

        store.load_order(order(false, vec![line("Z", 4, 0)]));

        assert!(store.splits().is_empty());
        assert_eq!(store.selection().len(), 1);
        assert!(!store.selection().contains(&a));
    }

    #[test]
    fn add_split_uses_committed_quantity_on_sales_orders() {
        let mut store = loaded(true, vec![line("A", 10, 7)]);
        let a = entry(&store, 0);

        assert_eq!(
            store.add_split(a),
            SplitOutcome::Created { first: 3, second: 4 }
        );
    }

    #[test]
    fn add_split_uses_ordered_quantity_on_fulfillments() {
        let mut store = loaded(false, vec![line("A", 10, 7)]);
        let a = entry(&store, 0);

        assert_eq!(
            store.add_split(a),
            SplitOutcome::Created { first: 5, second: 5 }
        );
    }

    #[test]
    fn operations_on_unknown_lines_are_rejected() {
        let mut store = loaded(true, vec![line("A", 4, 4)]);
        let stranger = EntryId::new();

        assert_eq!(
            store.add_split(stranger),
            SplitOutcome::Rejected(Rejection::UnknownLine)
        );
        assert_eq!(
            store.update_split_quantity(stranger, SplitId::new(), 1),
            SplitOutcome::Rejected(Rejection::UnknownLine)
        );
        assert_eq!(store.toggle_row(stranger), None);
        assert!(store.splits().is_empty());
    }

    #[test]
    fn empty_store_rejects_everything() {
        let mut store = SplitStore::new();
        let line = EntryId::new();

        assert!(!store.add_split(line).is_applied());
        assert!(!store.remove_split(line).is_applied());
        store.mark_all(true);
        assert!(store.selection().is_empty());
        assert_eq!(store.print_items().unwrap_err(), PrintError::NothingSelected);
        assert!(store.validate().is_empty());
    }

    #[test]
    fn mark_all_and_toggle() {
        let mut store = loaded(true, vec![line("A", 5, 5), line("B", 5, 0)]);
        let a = entry(&store, 0);
        let b = entry(&store, 1);

        store.mark_all(false);
        assert!(store.selection().is_empty());

        assert_eq!(store.toggle_row(a), Some(true));
        assert_eq!(store.toggle_row(b), None);
        assert_eq!(store.toggle_row(a), Some(false));

        store.mark_all(true);
        assert!(store.selection().contains(&a));
        assert!(!store.selection().contains(&b));
    }

    #[test]
    fn toggle_row_round_trips_a_printable_line() {
        let mut store = loaded(true, vec![line("A", 3, 3)]);
        let a = entry(&store, 0);

        assert!(store.selection().contains(&a));
        assert_eq!(store.toggle_row(a), Some(false));
        assert!(!store.selection().contains(&a));
        assert_eq!(store.toggle_row(a), Some(true));
        assert!(store.selection().contains(&a));
        assert_eq!(store.selection().len(), 1);
    }

    #[test]
    fn clamped_edit_then_refill_passes_validation() {
        let mut store = loaded(true, vec![line("A", 9, 9)]);
        let a = entry(&store, 0);
        store.add_split(a);

        let second = store.splits().get(&a)[1].id();
        assert_eq!(
            store.update_split_quantity(a, second, 100),
            SplitOutcome::Clamped {
                requested: 100,
                applied: 5
            }
        );
        store.update_split_quantity(a, second, 1);
        assert_eq!(store.validate().len(), 1);
        assert!(matches!(
            store.print_items(),
            Err(PrintError::SplitMismatch(_))
        ));

        assert_eq!(
            store.add_split(a),
            SplitOutcome::RemainderAdded { quantity: 4 }
        );
        assert!(store.validate().is_empty());
        assert_eq!(store.print_items().unwrap().len(), 3);
    }

    #[test]
    fn clear_unloads_the_order() {
        let mut store = loaded(true, vec![line("A", 4, 4)]);
        store.clear();

        assert!(store.order().is_none());
        assert!(store.selection().is_empty());
        assert!(store.loaded_at().is_none());
    }
}
