use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{ClassifiedRecord, MatchRule};

/// Record counts by outcome. The rule buckets only hold rows that got a
/// real production mode; anything labelled `"unknown"` lands in `unknown`
/// whichever rule produced it.
#[derive(Debug, Default, PartialEq)]
struct Tally {
    total: usize,
    specific: usize,
    canonical: usize,
    generic: usize,
    unknown: usize,
    rejected: usize,
}

impl Tally {
    fn from_rows(rows: &[ClassifiedRecord]) -> Self {
        let mut tally = Tally {
            total: rows.len(),
            ..Tally::default()
        };
        for row in rows {
            if row.is_rejected() {
                tally.rejected += 1;
            } else if row.is_unknown() {
                tally.unknown += 1;
            } else {
                match row.rule {
                    Some(MatchRule::Specific) => tally.specific += 1,
                    Some(MatchRule::Canonical) => tally.canonical += 1,
                    Some(MatchRule::Generic) => tally.generic += 1,
                    _ => tally.unknown += 1,
                }
            }
        }
        tally
    }

    fn mapped(&self) -> usize {
        self.specific + self.canonical + self.generic
    }
}

/// Render a colored terminal report.
pub fn render(rows: &[ClassifiedRecord], input: &Path, verbose: bool, quiet: bool) -> Result<()> {
    let tally = Tally::from_rows(rows);

    if quiet {
        println!(
            "Total: {}  Mapped: {}  Unknown: {}  Rejected: {}",
            tally.total,
            tally.mapped().to_string().green(),
            tally.unknown.to_string().yellow(),
            tally.rejected.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "ember-modes".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Input: {}\n", input.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total records      : {}", tally.total));
    println!(
        " │  {:<48} │",
        format!("{}  Zone override   : {:>4}", "✓".green(), tally.specific)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Canonical       : {:>4}", "✓".green(), tally.canonical)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Generic mapping : {:>4}", "✓".green(), tally.generic)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Unknown         : {:>4}", "⚠".yellow(), tally.unknown)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Rejected        : {:>4}", "✗".red(), tally.rejected)
    );
    println!(" │  {:<48} │", summarize_modes(rows));
    println!(" └────────────────────────────────────────────────────┘\n");

    if tally.rejected > 0 {
        println!(" {} Records with invalid modes:\n", "[ERROR]".red().bold());
        render_table(rows.iter().filter(|r| r.is_rejected()));
        println!();
    }

    if tally.unknown > 0 {
        println!(" {} Records classified as unknown:\n", "[WARN]".yellow().bold());
        render_table(rows.iter().filter(|r| r.is_unknown()));
        println!();
    }

    if verbose {
        println!(" {} All records:\n", "[ALL]".green().bold());
        render_table(rows.iter());
        println!();
    }

    Ok(())
}

fn render_table<'a>(rows: impl Iterator<Item = &'a ClassifiedRecord>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Zone").add_attribute(Attribute::Bold),
            Cell::new("Raw mode").add_attribute(Attribute::Bold),
            Cell::new("Production mode").add_attribute(Attribute::Bold),
            Cell::new("Rule").add_attribute(Attribute::Bold),
        ]);

    for row in rows {
        let (mode, rule, color) = match (&row.production_mode, row.rule) {
            (Some(mode), Some(rule)) => {
                let color = if row.is_unknown() {
                    Color::Yellow
                } else {
                    Color::Green
                };
                (mode.clone(), rule.to_string(), color)
            }
            _ => (
                "-".to_string(),
                row.error.clone().unwrap_or_default(),
                Color::Red,
            ),
        };

        table.add_row(vec![
            Cell::new(&row.zone_key),
            Cell::new(raw_mode_display(&row.raw_mode)),
            Cell::new(mode).fg(color),
            Cell::new(rule)
                .fg(color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

fn raw_mode_display(raw: &serde_json::Value) -> String {
    match raw {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Top three production modes by record count, e.g. `[solar (4), wind (2)]`.
fn summarize_modes(rows: &[ClassifiedRecord]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for mode in rows.iter().filter_map(|r| r.production_mode.as_deref()) {
        *counts.entry(mode).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(mode, cnt)| format!("{} ({})", mode, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
