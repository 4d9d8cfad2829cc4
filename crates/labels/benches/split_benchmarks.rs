use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cartonforge_core::EntryId;
use cartonforge_labels::{
    OrderData, OrderLinePayload, OrderPayload, Selection, SplitSet, build_print_items,
};

fn order_with_lines(lines: usize, quantity: u32) -> OrderData {
    OrderData::from_payload(OrderPayload {
        id: "bench".to_string(),
        tran_id: "so-bench".to_string(),
        entity: String::new(),
        entity_contact: String::new(),
        ship_address: String::new(),
        transaction_date: String::new(),
        po_number: Some("PO-BENCH".to_string()),
        is_sales_order: true,
        items: (0..lines)
            .map(|n| OrderLinePayload {
                item: format!("P-{n} bench part"),
                item_id: None,
                description: String::new(),
                location: String::new(),
                units: None,
                quantity_ordered: quantity,
                quantity_committed: quantity,
            })
            .collect(),
    })
}

/// Split one line down to single units.
fn bench_split_to_units(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_to_units");

    for total in [16u32, 256, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(total), &total, |b, &total| {
            b.iter(|| {
                let mut set = SplitSet::new();
                let line = EntryId::new();
                while set.add_split(line, total).is_applied() {}
                black_box(set.get(&line).len())
            });
        });
    }

    group.finish();
}

/// Assemble labels for an order where every line is split into 8 cartons.
fn bench_build_print_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_print_items");

    for lines in [10usize, 100, 500] {
        let order = order_with_lines(lines, 64);
        let mut splits = SplitSet::new();
        for line in &order.items {
            for _ in 0..7 {
                splits.add_split(line.entry_id, 64);
            }
        }
        let selection: Selection = order.items.iter().map(|l| l.entry_id).collect();

        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| black_box(build_print_items(&order, &selection, &splits)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split_to_units, bench_build_print_items);
criterion_main!(benches);
