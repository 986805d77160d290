use itertools::Itertools;
use serde_json::{Map, Number, Value};

use crate::error::SyncError;

/// How many rows of the feed make it into a post.
pub const TOP_ROWS: usize = 3;

pub const MESSAGE_HEADER: &str = "🗳️ ChunabLive – Election Update (2079)";
pub const MESSAGE_FOOTER: &str = "Source: Election Commission of Nepal";

// Rendering of a missing Rank/Remarks inside the change key. Must not change,
// otherwise every persisted hash stops matching.
const ABSENT_KEY_PART: &str = "undefined";

pub type RawRow = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct RowSummary {
    /// Only used for change detection, never displayed.
    pub key: String,
    pub text: String,
}

/// Accepts a bare array or `{ "rows": [...] }`. Non-object entries become
/// empty rows so they still take a slot in the top rows.
pub fn parse_election_rows(body: &str) -> Result<Vec<RawRow>, SyncError> {
    let data: Value = serde_json::from_str(body)?;

    let rows = match data {
        Value::Array(rows) => rows,
        Value::Object(mut object) => match object.remove("rows") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(SyncError::UnknownFormat),
        },
        _ => return Err(SyncError::UnknownFormat),
    };

    Ok(rows
        .into_iter()
        .map(|row| match row {
            Value::Object(fields) => fields,
            _ => RawRow::new(),
        })
        .collect())
}

pub fn summarize_top_rows(rows: &[RawRow]) -> Vec<RowSummary> {
    rows.iter().take(TOP_ROWS).map(summarize_row).collect()
}

pub fn summarize_row(row: &RawRow) -> RowSummary {
    let state = present_text(row, "StateName").unwrap_or_else(|| "—".to_string());
    let district = present_text(row, "DistrictName").unwrap_or_default();
    let party = present_text(row, "PoliticalPartyName").unwrap_or_else(|| "Independent".to_string());
    let candidate = present_text(row, "CandidateName").unwrap_or_else(|| "—".to_string());
    let symbol = present_text(row, "SymbolName")
        .map(|symbol| format!(" ({})", symbol))
        .unwrap_or_default();

    // A present 0 or "" is kept, only missing/null falls back.
    let votes = match row.get("TotalVoteReceived") {
        None | Some(Value::Null) => "0".to_string(),
        Some(value) => render_value(value),
    };

    let rank = present_text(row, "Rank").map(|rank| format!("Rank: {}", rank));
    let remarks = present_text(row, "Remarks").map(|remarks| format!("({})", remarks));

    let place = [state, district]
        .into_iter()
        .filter(|part| !part.is_empty())
        .join(" – ");

    let stats = [rank, remarks].into_iter().flatten().join(" ");
    let stats = match stats.is_empty() {
        true => stats,
        false => format!("📊 {}", stats),
    };

    RowSummary {
        key: format!(
            "{}|{}|{}|{}|{}|{}",
            candidate,
            party,
            place,
            votes,
            key_part(row, "Rank"),
            key_part(row, "Remarks"),
        ),
        text: format!(
            "📍 {}\n👤 उम्मेदवार: {}\n🏳️ पार्टी: {}{}\n🗳️ मत: {}\n{}",
            place, candidate, party, symbol, votes, stats
        ),
    }
}

/// Hash material: the keys as a compact JSON array.
pub fn change_material(summaries: &[RowSummary]) -> String {
    Value::Array(
        summaries
            .iter()
            .map(|summary| Value::String(summary.key.clone()))
            .collect(),
    )
    .to_string()
}

pub fn format_election_message(summaries: &[RowSummary]) -> String {
    let body = summaries.iter().map(|summary| summary.text.as_str()).join("\n\n");
    format!("{}\n\n{}\n\n{}", MESSAGE_HEADER, body, MESSAGE_FOOTER)
}

/// Null, false, 0 and "" all count as not filled in.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn present_text(row: &RawRow, field: &str) -> Option<String> {
    row.get(field)
        .filter(|value| is_present(value))
        .map(render_value)
}

fn key_part(row: &RawRow, field: &str) -> String {
    match row.get(field) {
        Some(value) => render_value(value),
        None => ABSENT_KEY_PART.to_string(),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => render_number(number),
        other => other.to_string(),
    }
}

// Whole floats print without the trailing ".0".
fn render_number(number: &Number) -> String {
    match number.as_f64() {
        Some(n) if number.is_f64() && n.fract() == 0.0 && n.abs() < 1e15 => {
            format!("{}", n as i64)
        }
        _ => number.to_string(),
    }
}
