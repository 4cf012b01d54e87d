//! CSV export of the match log.

use crate::models::MatchLogEntry;
use serde::Serialize;
use std::io;

#[derive(Serialize)]
struct CsvRow<'a> {
    round: u32,
    court: &'a str,
    team_a: String,
    team_b: String,
    raw_a: u32,
    raw_b: u32,
    points_a: f64,
    points_b: f64,
    settled_at: String,
}

/// Write one row per settled court, in log order, with a header line.
pub fn write_match_log_csv<W: io::Write>(
    entries: &[MatchLogEntry],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for e in entries {
        wtr.serialize(CsvRow {
            round: e.round,
            court: &e.court,
            team_a: e.team_a.join(" & "),
            team_b: e.team_b.join(" & "),
            raw_a: e.raw_score.a,
            raw_b: e.raw_score.b,
            points_a: e.points_a,
            points_b: e.points_b,
            settled_at: e.settled_at.to_rfc3339(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// The match log as a CSV string.
pub fn match_log_csv(entries: &[MatchLogEntry]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_match_log_csv(entries, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}
