//! Print assembly: one label per carton, or one per unsplit line.

use serde::Serialize;
use thiserror::Error;

use cartonforge_core::EntryId;

use crate::order::OrderData;
use crate::selection::Selection;
use crate::split::SplitSet;

/// A split line whose carton quantities disagree with the line total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitMismatch {
    pub entry_id: EntryId,
    pub part_number: String,
    pub expected: u32,
    pub actual: u64,
}

/// Why labels cannot be printed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("select at least one item to print labels")]
    NothingSelected,

    #[error(
        "split quantities don't match the line total for: {}",
        part_numbers(.0)
    )]
    SplitMismatch(Vec<SplitMismatch>),
}

fn part_numbers(mismatches: &[SplitMismatch]) -> String {
    mismatches
        .iter()
        .map(|m| m.part_number.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Content of one label, handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintItem {
    pub entry_id: EntryId,
    pub po_number: String,
    pub tran_id: String,
    pub is_sales_order: bool,
    pub part_number: String,
    pub description: String,
    pub quantity: u32,
    /// "Split i of N" for cartons, absent for whole lines.
    pub carton_info: Option<String>,
}

/// Every split line (selected or not) whose carton sum differs from its
/// total, in line order.
pub fn validate_split_quantities(order: &OrderData, splits: &SplitSet) -> Vec<SplitMismatch> {
    order
        .items
        .iter()
        .filter(|line| splits.is_split(&line.entry_id))
        .filter_map(|line| {
            let expected = order.total_quantity(line);
            let actual = splits.sum(&line.entry_id);
            (actual != u64::from(expected)).then(|| SplitMismatch {
                entry_id: line.entry_id,
                part_number: line.part_number(order.is_sales_order),
                expected,
                actual,
            })
        })
        .collect()
}

/// Flatten the selected lines into labels.
///
/// Fails closed: an empty selection or any split mismatch yields no labels at
/// all. Labels follow line order, then carton order within a line.
pub fn build_print_items(
    order: &OrderData,
    selection: &Selection,
    splits: &SplitSet,
) -> Result<Vec<PrintItem>, PrintError> {
    if selection.is_empty() {
        return Err(PrintError::NothingSelected);
    }

    let mismatches = validate_split_quantities(order, splits);
    if !mismatches.is_empty() {
        return Err(PrintError::SplitMismatch(mismatches));
    }

    let is_sales_order = order.is_sales_order;
    let items = order
        .items
        .iter()
        .filter(|line| selection.contains(&line.entry_id))
        .flat_map(|line| {
            let label = |quantity: u32, carton_info: Option<String>| PrintItem {
                entry_id: line.entry_id,
                po_number: order.po_number.clone(),
                tran_id: order.tran_id.to_uppercase(),
                is_sales_order,
                part_number: line.part_number(is_sales_order),
                description: line.label_description(is_sales_order),
                quantity,
                carton_info,
            };

            let cartons = splits.get(&line.entry_id);
            if cartons.is_empty() {
                return vec![label(order.total_quantity(line), None)];
            }

            let count = cartons.len();
            cartons
                .iter()
                .enumerate()
                .map(|(index, split)| {
                    label(
                        split.quantity(),
                        Some(format!("Split {} of {}", index + 1, count)),
                    )
                })
                .collect()
        })
        .collect();

    Ok(items)
}
