//! CLI output: error mapping and rendering of command results.

use crate::error::CliError;
use crate::types::{FileStat, FileType};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Write;

/// Result of a command, ready to be written to stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Text(String),
    /// Raw file content; written without a trailing newline
    Bytes(Vec<u8>),
}

impl CommandOutput {
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        match self {
            CommandOutput::Text(text) => writeln!(writer, "{}", text),
            CommandOutput::Bytes(bytes) => writer.write_all(bytes),
        }?;
        writer.flush()
    }
}

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &CliError) -> String {
    format!("Error: {}", e)
}

/// One row of a directory listing
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ListingRow {
    pub name: String,
    pub kind: FileType,
    pub size: u64,
}

/// One line of a recursive walk
#[derive(Debug, Clone)]
pub(crate) struct TreeLine {
    pub depth: usize,
    pub name: String,
    pub kind: FileType,
}

pub(crate) fn format_listing_text(path: &str, rows: &[ListingRow]) -> String {
    if rows.is_empty() {
        return format!("{}\n(empty directory)", format_heading(path));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Type", "Size"]);
    for row in rows {
        let size = match row.kind {
            FileType::File => row.size.to_string(),
            FileType::Directory => "-".to_string(),
        };
        table.add_row(vec![display_name(&row.name, row.kind), row.kind.to_string(), size]);
    }
    format!("{}\n{}", format_heading(path), table)
}

pub(crate) fn format_listing_json(rows: &[ListingRow]) -> Result<String, CliError> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| CliError::Output(std::io::Error::other(e)))
}

pub(crate) fn format_stat_text(path: &str, stat: &FileStat) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.add_row(vec!["Path".to_string(), path.to_string()]);
    table.add_row(vec!["Type".to_string(), stat.kind.to_string()]);
    let size_label = match stat.kind {
        FileType::File => "Size",
        FileType::Directory => "Entries",
    };
    table.add_row(vec![size_label.to_string(), stat.size.to_string()]);
    table.add_row(vec!["Created".to_string(), stat.ctime.to_rfc3339()]);
    table.add_row(vec!["Modified".to_string(), stat.mtime.to_rfc3339()]);
    table.to_string()
}

pub(crate) fn format_stat_json(stat: &FileStat) -> Result<String, CliError> {
    serde_json::to_string_pretty(stat).map_err(|e| CliError::Output(std::io::Error::other(e)))
}

pub(crate) fn format_tree(root: &str, lines: &[TreeLine]) -> String {
    let mut out = format_heading(root);
    for line in lines {
        out.push('\n');
        out.push_str(&"  ".repeat(line.depth));
        out.push_str(&display_name(&line.name, line.kind));
    }
    out
}

fn display_name(name: &str, kind: FileType) -> String {
    match kind {
        FileType::Directory => format!("{}/", name),
        FileType::File => name.to_string(),
    }
}

fn format_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}
