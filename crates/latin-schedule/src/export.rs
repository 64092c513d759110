//! Tabular projections of an episode sequence.
//!
//! Every export consumes `&[Episode]` and nothing else, so it works for any
//! schedule without touching the scheduler itself. Columns are always
//! `episode_id, variant, context1, context2`.
//!
//! DataFrame export requires the `dataframe` feature (polars).

use std::fmt::{self, Display};

use serde::Serialize;

#[cfg(feature = "dataframe")]
use polars::prelude::*;

use crate::error::Result;
use crate::scheduler::Episode;

/// Column names, in output order.
pub const COLUMNS: [&str; 4] = ["episode_id", "variant", "context1", "context2"];

/// Output format for an exported schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of episode records
    Json,
    /// Aligned plain-text columns
    Table,
    /// polars DataFrame rendering (requires the `dataframe` feature)
    Dataframe,
}

impl ExportFormat {
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Table => "table",
            ExportFormat::Dataframe => "dataframe",
        }
    }

    /// Default file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Table | ExportFormat::Dataframe => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render episodes in the requested format.
///
/// Fails with `MissingOptionalDependency` when `Dataframe` is requested from
/// a build without the `dataframe` feature.
pub fn render<V, C1, C2>(episodes: &[Episode<V, C1, C2>], format: ExportFormat) -> Result<String>
where
    V: Serialize + Display,
    C1: Serialize + Display,
    C2: Serialize + Display,
{
    match format {
        ExportFormat::Json => to_json(episodes),
        ExportFormat::Table => Ok(to_table(episodes)),
        ExportFormat::Dataframe => render_dataframe(episodes),
    }
}

/// Serialize episodes as a pretty-printed JSON array.
pub fn to_json<V, C1, C2>(episodes: &[Episode<V, C1, C2>]) -> Result<String>
where
    V: Serialize,
    C1: Serialize,
    C2: Serialize,
{
    Ok(serde_json::to_string_pretty(episodes)?)
}

/// Render episodes as aligned plain-text columns with a header row.
pub fn to_table<V, C1, C2>(episodes: &[Episode<V, C1, C2>]) -> String
where
    V: Display,
    C1: Display,
    C2: Display,
{
    let rows: Vec<[String; 4]> = episodes
        .iter()
        .map(|ep| {
            [
                ep.episode_id.to_string(),
                ep.variant.to_string(),
                ep.context1.to_string(),
                ep.context2.to_string(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &COLUMNS, &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, &width))| {
            // Right-align ids, left-align payloads
            if col == 0 {
                format!("{:>width$}", cell.as_ref(), width = width)
            } else {
                format!("{:<width$}", cell.as_ref(), width = width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Project episodes into a polars DataFrame.
///
/// Payload columns hold the `Display` rendering of each value.
#[cfg(feature = "dataframe")]
pub fn to_dataframe<V, C1, C2>(episodes: &[Episode<V, C1, C2>]) -> Result<DataFrame>
where
    V: Display,
    C1: Display,
    C2: Display,
{
    let ids: Vec<u64> = episodes.iter().map(|ep| ep.episode_id as u64).collect();
    let variants: Vec<String> = episodes.iter().map(|ep| ep.variant.to_string()).collect();
    let context1: Vec<String> = episodes.iter().map(|ep| ep.context1.to_string()).collect();
    let context2: Vec<String> = episodes.iter().map(|ep| ep.context2.to_string()).collect();

    let df = df!(
        "episode_id" => ids,
        "variant" => variants,
        "context1" => context1,
        "context2" => context2,
    )?;

    Ok(df)
}

#[cfg(feature = "dataframe")]
fn render_dataframe<V: Display, C1: Display, C2: Display>(
    episodes: &[Episode<V, C1, C2>],
) -> Result<String> {
    Ok(to_dataframe(episodes)?.to_string())
}

#[cfg(not(feature = "dataframe"))]
fn render_dataframe<V, C1, C2>(_episodes: &[Episode<V, C1, C2>]) -> Result<String> {
    Err(crate::error::ScheduleError::MissingOptionalDependency {
        feature: "dataframe",
    })
}
