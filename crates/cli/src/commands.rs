use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

use cartonforge_core::EntryId;
use cartonforge_labels::{OrderData, SplitOutcome, SplitStore};

use crate::cli::{Cli, Command};
use crate::gesture::Gesture;

pub fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Lines { order } => cmd_lines(&order),
        Command::Print { order, gestures } => cmd_print(&order, &gestures),
    }
}

fn load_store(path: &Path) -> Result<SplitStore> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read order file {}", path.display()))?;
    let order = OrderData::from_proxy_json(&body)
        .with_context(|| format!("failed to load order from {}", path.display()))?;

    let mut store = SplitStore::new();
    store.load_order(order);
    Ok(store)
}

fn lines_header(store: &SplitStore) -> Result<String> {
    let order = store
        .order()
        .ok_or_else(|| anyhow!("no order loaded"))?;
    let loaded_at = store
        .loaded_at()
        .ok_or_else(|| anyhow!("no order loaded"))?;

    let kind = if order.is_sales_order {
        "Order"
    } else {
        "Fulfillment"
    };
    Ok(format!(
        "{kind} #{}  PO #{}  loaded {}",
        order.tran_id.to_uppercase(),
        order.po_number,
        loaded_at.format("%Y-%m-%d %H:%M:%S UTC"),
    ))
}

fn cmd_lines(path: &Path) -> Result<()> {
    let store = load_store(path)?;
    let order = store
        .order()
        .ok_or_else(|| anyhow!("no order loaded"))?;

    println!("{}", lines_header(&store)?);

    for (index, line) in order.items.iter().enumerate() {
        let mark = if store.selection().contains(&line.entry_id) {
            "[x]"
        } else {
            "[ ]"
        };
        println!(
            "{mark} {:>3}  {:<20} {:>6}  {}",
            index + 1,
            line.part_number(order.is_sales_order),
            order.total_quantity(line),
            line.label_description(order.is_sales_order),
        );
    }

    Ok(())
}

fn cmd_print(path: &Path, gestures: &[Gesture]) -> Result<()> {
    let mut store = load_store(path)?;

    for gesture in gestures {
        apply(&mut store, *gesture)?;
    }

    let items = store.print_items()?;
    info!(labels = items.len(), "labels assembled");
    println!("{}", serde_json::to_string_pretty(&items)?);

    Ok(())
}

fn line_entry(store: &SplitStore, line: usize) -> Result<EntryId> {
    store
        .order()
        .and_then(|order| order.items.get(line.checked_sub(1)?))
        .map(|l| l.entry_id)
        .ok_or_else(|| anyhow!("order has no line {line}"))
}

fn apply(store: &mut SplitStore, gesture: Gesture) -> Result<()> {
    let outcome = match gesture {
        Gesture::Split { line } => {
            let entry = line_entry(store, line)?;
            store.add_split(entry)
        }
        Gesture::Unsplit { line } => {
            let entry = line_entry(store, line)?;
            store.remove_split(entry)
        }
        Gesture::Set {
            line,
            carton,
            quantity,
        } => {
            let entry = line_entry(store, line)?;
            let split = store
                .splits()
                .get(&entry)
                .get(carton.wrapping_sub(1))
                .map(|s| s.id())
                .ok_or_else(|| anyhow!("line {line} has no carton {carton}"))?;
            store.update_split_quantity(entry, split, quantity)
        }
        Gesture::Toggle { line } => {
            let entry = line_entry(store, line)?;
            match store.toggle_row(entry) {
                Some(selected) => info!(%gesture, selected, "selection changed"),
                None => warn!(%gesture, "line has nothing to print and cannot be selected"),
            }
            return Ok(());
        }
        Gesture::SelectAll | Gesture::SelectNone => {
            store.mark_all(gesture == Gesture::SelectAll);
            info!(%gesture, selected = store.selection().len(), "selection changed");
            return Ok(());
        }
    };

    report(gesture, outcome);
    Ok(())
}

fn report(gesture: Gesture, outcome: SplitOutcome) {
    match outcome {
        SplitOutcome::Rejected(_) | SplitOutcome::Clamped { .. } => {
            warn!(%gesture, %outcome, "gesture adjusted or rejected")
        }
        _ => info!(%gesture, %outcome, "gesture applied"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SplitStore {
        let body = r#"{"order": {"tranId": "so-7", "isSalesOrder": true, "items": [
            {"item": "A-1 Alpha", "quantityOrdered": 7, "quantityCommitted": 7},
            {"item": "B-2 Beta", "quantityOrdered": 3, "quantityCommitted": 3}
        ]}}"#;
        let mut store = SplitStore::new();
        store.load_order(OrderData::from_proxy_json(body).unwrap());
        store
    }

    #[test]
    fn gestures_drive_the_store() {
        let mut store = store();
        for raw in ["split:1", "split:1", "unsplit:1", "set:1:1=9", "toggle:2"] {
            apply(&mut store, raw.parse().unwrap()).unwrap();
        }

        let a = line_entry(&store, 1).unwrap();
        let quantities: Vec<u32> = store.splits().get(&a).iter().map(|s| s.quantity()).collect();
        assert_eq!(quantities, vec![3, 4]);
        assert_eq!(store.selection().len(), 1);

        let items = store.print_items().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn mismatched_split_blocks_printing() {
        let mut store = store();
        for raw in ["split:1", "set:1:1=1"] {
            apply(&mut store, raw.parse().unwrap()).unwrap();
        }

        let a = line_entry(&store, 1).unwrap();
        assert_eq!(store.splits().sum(&a), 5);

        let err = anyhow::Error::from(store.print_items().unwrap_err());
        assert_eq!(
            err.to_string(),
            "split quantities don't match the line total for: A-1"
        );

        apply(&mut store, "split:1".parse().unwrap()).unwrap();
        assert_eq!(store.print_items().unwrap().len(), 4);
    }

    #[test]
    fn lines_header_shows_load_time() {
        let store = store();
        let header = lines_header(&store).unwrap();

        assert!(header.starts_with("Order #SO-7  PO #  loaded "));
        assert!(header.ends_with(" UTC"));
        assert!(lines_header(&SplitStore::new()).is_err());
    }

    #[test]
    fn out_of_range_line_is_an_error() {
        let mut store = store();
        let err = apply(&mut store, Gesture::Split { line: 9 }).unwrap_err();
        assert_eq!(err.to_string(), "order has no line 9");

        let err = apply(
            &mut store,
            Gesture::Set {
                line: 1,
                carton: 1,
                quantity: 2,
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "line 1 has no carton 1");
    }
}
