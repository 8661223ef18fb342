//! Report rendering

use bindscan_core::PermutationTag;
use bindscan_index::AggregatedEntry;
use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{Cell, Table};

const COLUMNS: [&str; 6] = ["Register", "Feature", "Type", "Name", "File", "Register Type"];

/// Render entries as a markdown table, in the order given
pub fn render_markdown(entries: &[AggregatedEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);

    let mut header: Vec<Cell> = COLUMNS.iter().map(|c| Cell::new(*c)).collect();
    header.extend(PermutationTag::ALL.iter().map(|tag| Cell::new(tag.label())));
    table.set_header(header);

    for entry in entries {
        let mut row = vec![
            Cell::new(entry.register.to_string()),
            Cell::new(escape(&entry.feature)),
            Cell::new(format!("`{}`", escape(&entry.type_name))),
            Cell::new(&entry.name),
            Cell::new(format!("[{}]({})", escape(&entry.location.to_string()), entry.link)),
            Cell::new(entry.kind.as_str()),
        ];
        row.extend(
            PermutationTag::ALL
                .iter()
                .map(|tag| Cell::new(entry.permutations.get(*tag))),
        );
        table.add_row(row);
    }

    table.to_string()
}

/// Render entries as pretty-printed JSON
pub fn render_json(entries: &[AggregatedEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
