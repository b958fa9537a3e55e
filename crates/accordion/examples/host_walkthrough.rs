//! Walkthrough of driving the engine from a hosting list widget.
//!
//! Run with logging enabled to see the engine's trace output:
//!
//! ```sh
//! RUST_LOG=accordion=debug cargo run --example host_walkthrough
//! ```

use std::sync::Arc;

use accordion::{Accordion, RowKey, RowPath, VecOutline};

fn print_flat_list(label: &str, list: &Accordion) {
    println!("{label} (flat count {}):", list.flat_count());
    for flat in 0..list.flat_count() {
        let path = list.path_at(flat).expect("index within flat count");
        let indent = if path.is_sub_row() { "    " } else { "  " };
        println!("{indent}[{flat}] {path}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A settings-screen-like shape: section 0 has three rows, the middle
    // one expands into two detail sub-rows; section 1 has one expandable
    // row with a single sub-row.
    let outline = Arc::new(VecOutline::new(vec![vec![0, 2, 0], vec![1]]));
    let mut list = Accordion::new(outline).with_exclusive_expansion(true);

    list.expanded
        .connect(|key| println!("  signal: expanded {key}"));
    list.collapsed
        .connect(|key| println!("  signal: collapsed {key}"));

    print_flat_list("initial", &list);

    println!("\nexpand 0.1:");
    let diff = list.expand(RowKey::new(0, 1));
    println!("  inserted {:?}, removed {:?}", diff.inserted(), diff.removed());
    print_flat_list("after expand", &list);

    println!("\nexpand 1.0 (exclusive mode displaces 0.1):");
    let diff = list.expand(RowKey::new(1, 0));
    println!("  inserted {:?}, removed {:?}", diff.inserted(), diff.removed());
    print_flat_list("after re-expand", &list);

    println!("\nrefresh and scroll to 1.0:");
    match list.refresh_and_scroll_to(&RowPath::parent(1, 0)) {
        Ok((diff, index)) => {
            println!("  removed {:?}, scroll to flat index {index}", diff.removed());
        }
        Err(err) => println!("  error: {err}"),
    }
    print_flat_list("after refresh", &list);
}
