//! Play export
//!
//! Renders a decoded play sequence as a table (CSV, one row per play) or as
//! JSON. Column order is fixed here and nowhere else.
//!
//! Per-contest files carry one contest each. When several contests share one
//! stream, the table gains a leading `contest_id` column and is written with a
//! single header row; JSON becomes an array of contests.

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use pbp_decoder::{DecodedContest, Participant, Play, ROSTER_SIZE, SIDE_SIZE};
use serde::Serialize;
use std::io::Write;

/// Leading column of the combined table
pub const CONTEST_ID_COLUMN: &str = "contest_id";

/// Column headers, in output order
pub fn header() -> Vec<String> {
    let mut columns = Vec::with_capacity(2 * ROSTER_SIZE + 10);
    for side in ["home", "away"] {
        for slot in 1..=SIDE_SIZE {
            columns.push(format!("{}_{}_id", side, slot));
            columns.push(format!("{}_{}_name", side, slot));
        }
    }
    columns.extend(
        [
            "period",
            "clock",
            "sequence",
            "category_code",
            "category_label",
            "player1_id",
            "player1_name",
            "player2_id",
            "player2_name",
            "description",
        ]
        .map(String::from),
    );
    columns
}

fn participant_cells(participant: Option<&Participant>) -> [String; 2] {
    match participant {
        Some(p) => [p.id.to_string(), p.name.clone()],
        None => [String::new(), String::new()],
    }
}

/// One table row for a play
pub fn row(play: &Play) -> Vec<String> {
    let mut cells: Vec<String> = play
        .roster
        .home()
        .iter()
        .chain(play.roster.away())
        .flat_map(|p| participant_cells(Some(p)))
        .collect();
    cells.push(play.period.to_string());
    cells.push(play.clock.clone());
    cells.push(play.sequence.to_string());
    cells.push(play.category_code.to_string());
    cells.push(play.category_label.to_string());
    cells.extend(participant_cells(play.player1.as_ref()));
    cells.extend(participant_cells(play.player2.as_ref()));
    cells.push(play.description.clone().unwrap_or_default());
    cells
}

/// Write plays as CSV
pub fn write_csv<W: Write>(plays: &[Play], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header()).context("Failed to write CSV header")?;
    for play in plays {
        writer
            .write_record(row(play))
            .with_context(|| format!("Failed to write play {}", play.sequence))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a decoded contest in the requested format
pub fn write_contest<W: Write>(
    decoded: &DecodedContest,
    format: OutputFormat,
    mut out: W,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(&decoded.plays, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, decoded).context("Failed to write JSON")?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// One contest in the combined JSON array
#[derive(Serialize)]
struct ContestExport<'a> {
    contest_id: &'a str,
    #[serde(flatten)]
    decoded: &'a DecodedContest,
}

/// Write several contests to one stream
///
/// CSV gets a single header row with [`CONTEST_ID_COLUMN`] in front; JSON is
/// an array of contests in the given order.
pub fn write_combined<W: Write>(
    contests: &[(&str, &DecodedContest)],
    format: OutputFormat,
    mut out: W,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            let mut columns = vec![CONTEST_ID_COLUMN.to_string()];
            columns.extend(header());
            writer.write_record(columns).context("Failed to write CSV header")?;

            for (id, decoded) in contests {
                for play in &decoded.plays {
                    let mut cells = vec![id.to_string()];
                    cells.extend(row(play));
                    writer.write_record(cells).with_context(|| {
                        format!("Failed to write {} play {}", id, play.sequence)
                    })?;
                }
            }
            writer.flush()?;
            Ok(())
        }
        OutputFormat::Json => {
            let exports: Vec<ContestExport> = contests
                .iter()
                .map(|&(contest_id, decoded)| ContestExport { contest_id, decoded })
                .collect();
            serde_json::to_writer_pretty(&mut out, &exports).context("Failed to write JSON")?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Per-contest summary line
pub fn summary(id: &str, events: usize, decoded: &DecodedContest) -> String {
    format!(
        "{}: {} events -> {} plays, {} of {} substitution(s) desynced ({:.1}%)",
        id,
        events,
        decoded.plays.len(),
        decoded.diagnostics.len(),
        decoded.substitutions,
        decoded.desync_rate() * 100.0
    )
}
