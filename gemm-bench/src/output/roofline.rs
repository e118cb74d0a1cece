//! ASCII utilization bars: how close each configuration came to the
//! binding peak.
//!
//! ```text
//!   NN  0 512x512x512     |██████████████████░░░░░░░░░░░░| 61.2% gflops
//!   NN  5 64x2048x64      |████░░░░░░░░░░░░░░░░░░░░░░░░░░| 13.5% memory
//! ```

use crate::sweep::SweepRecord;

const BAR_WIDTH: usize = 30;

/// Print utilization bars for all records.
pub fn print_utilization(records: &[SweepRecord]) {
    if records.is_empty() {
        return;
    }

    println!("\n  PEAK UTILIZATION");
    println!("  {}", "-".repeat(60));

    let max_label = records
        .iter()
        .map(|rec| shape_label(rec).len())
        .max()
        .unwrap_or(10);

    for rec in records {
        let pct = rec.classification.bound_percent;

        let fill_count = ((pct / 100.0) * BAR_WIDTH as f64)
            .round()
            .clamp(0.0, BAR_WIDTH as f64) as usize;
        let empty_count = BAR_WIDTH - fill_count;

        let filled: String = "\u{2588}".repeat(fill_count);
        let empty: String = "\u{2591}".repeat(empty_count);

        let color = if pct >= 50.0 {
            "\x1b[32m" // green
        } else if pct >= 20.0 {
            "\x1b[36m" // cyan
        } else if pct >= 5.0 {
            "\x1b[33m" // yellow
        } else {
            "\x1b[31m" // red
        };
        let reset = "\x1b[0m";

        println!(
            "  {:<width$}  |{}{}{}{}| {:>5.1}% {}",
            shape_label(rec),
            color,
            filled,
            reset,
            empty,
            pct,
            rec.classification.bound_by.label(),
            width = max_label,
        );
    }

    println!();
}

fn shape_label(rec: &SweepRecord) -> String {
    format!(
        "{} {:2} {}x{}x{}",
        rec.config.mode_label(),
        rec.index,
        rec.config.m,
        rec.config.n,
        rec.config.k
    )
}
