//! Per-configuration report blocks.

use std::fmt::Write;

use crate::sweep::SweepRecord;

/// Render one configuration's report block:
///
/// ```text
///   NN  0:  512,  512,  512
///     8123.4 GFlops (81.23%)    123.4 GB/s (24.57%) limited by gflops 81.23%
/// ```
pub fn render_record(rec: &SweepRecord) -> String {
    let c = &rec.classification;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "  {} {:2}: {:4}, {:4}, {:4}",
        rec.config.mode_label(),
        rec.index,
        rec.config.m,
        rec.config.n,
        rec.config.k
    );
    let _ = writeln!(
        out,
        "  {:8.1} GFlops ({:5.2}%) {:8.1} GB/s ({:5.2}%) limited by {} {:5.2}%",
        rec.metrics.flops_per_second * 1e-9,
        c.flops_percent_of_peak,
        rec.metrics.bytes_per_second * 1e-9,
        c.bandwidth_percent_of_peak,
        c.bound_by.label(),
        c.bound_percent,
    );

    out
}

/// Print all report blocks, one blank line between configurations.
pub fn print_records(records: &[SweepRecord]) {
    for rec in records {
        println!("{}", render_record(rec));
    }
}
