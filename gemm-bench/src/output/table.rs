//! Summary table over all configurations, using comfy-table.

use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::classify::BoundBy;
use crate::sweep::SweepRecord;

/// Render all sweep records as one summary table.
pub fn render_summary(records: &[SweepRecord]) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Mode").add_attribute(Attribute::Bold),
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("M").add_attribute(Attribute::Bold),
            Cell::new("N").add_attribute(Attribute::Bold),
            Cell::new("K").add_attribute(Attribute::Bold),
            Cell::new("GFLOP/s").add_attribute(Attribute::Bold),
            Cell::new("FLOP%").add_attribute(Attribute::Bold),
            Cell::new("GB/s").add_attribute(Attribute::Bold),
            Cell::new("BW%").add_attribute(Attribute::Bold),
            Cell::new("Bound").add_attribute(Attribute::Bold),
            Cell::new("CV%").add_attribute(Attribute::Bold),
        ]);

    for rec in records {
        let c = &rec.classification;

        let bound_label = format!("{} {:.1}%", c.bound_by.label(), c.bound_percent);
        let bound_cell = match c.bound_by {
            BoundBy::Compute => Cell::new(&bound_label).fg(Color::Cyan),
            BoundBy::Memory => Cell::new(&bound_label).fg(Color::Yellow),
        };

        table.add_row(vec![
            Cell::new(rec.config.mode_label()),
            Cell::new(rec.index).set_alignment(CellAlignment::Right),
            Cell::new(rec.config.m).set_alignment(CellAlignment::Right),
            Cell::new(rec.config.n).set_alignment(CellAlignment::Right),
            Cell::new(rec.config.k).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", rec.metrics.flops_per_second * 1e-9))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", c.flops_percent_of_peak))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", rec.metrics.bytes_per_second * 1e-9))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", c.bandwidth_percent_of_peak))
                .set_alignment(CellAlignment::Right),
            bound_cell,
            Cell::new(format!("{:.1}", rec.call_stats.cv_percent))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Print the summary table with a heading.
pub fn print_summary(records: &[SweepRecord]) {
    if records.is_empty() {
        println!("No results to display.");
        return;
    }

    println!("\n=== sweep summary ===");
    println!("{}", render_summary(records));
}
