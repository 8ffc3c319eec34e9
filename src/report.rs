//! Render a finished run as text or JSON.

use crate::run::RunReport;
use crate::tree::Node;
use crate::types::WordCount;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable size in base-1024 units, at most two decimals, trailing zeros dropped.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// One line per node, children indented two spaces below their parent.
pub fn format_tree_text(root: &Node) -> String {
    let mut out = String::new();
    write_node(root, 0, &mut out);
    out
}

fn write_node(node: &Node, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    if let WordCount::Counted(words) = node.word_count {
        if words > 0 {
            out.push_str(&format!("[{}] ", words));
        }
    }
    out.push_str(&node.name);
    if node.is_folder() {
        out.push('/');
    }
    if let Some(size) = node.size_bytes {
        out.push_str(&format!(" ({})", format_size(size)));
    }
    if node.word_count == WordCount::Unknown {
        out.push_str(" [?]");
    }
    out.push('\n');
    for child in &node.children {
        write_node(child, depth + 1, out);
    }
}

/// Tree followed by the statistics table.
pub fn format_report_text(report: &RunReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Tree")));
    out.push_str(&format_tree_text(&report.tree));
    out.push('\n');
    out.push_str(&format!("{}\n\n", format_section_heading("Statistics")));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Folders".to_string(), stats.folders.to_string()]);
    table.add_row(vec!["Files".to_string(), stats.files.to_string()]);
    table.add_row(vec![
        "Total size".to_string(),
        format_size(stats.total_size_bytes),
    ]);
    table.add_row(vec!["Words".to_string(), stats.total_words.to_string()]);
    table.add_row(vec!["Started".to_string(), stats.started_at.to_rfc3339()]);
    table.add_row(vec!["Finished".to_string(), stats.finished_at.to_rfc3339()]);
    table.add_row(vec![
        "Elapsed".to_string(),
        format!("{:.3} s", stats.elapsed_seconds),
    ]);
    table.add_row(vec![
        "Reading time".to_string(),
        stats.estimated_reading_time.clone(),
    ]);
    out.push_str(&format!("{}\n", table));
    out
}

/// Pretty-printed `{ "tree": ..., "stats": ... }`.
pub fn format_report_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
