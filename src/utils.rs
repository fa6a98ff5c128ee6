use crate::race::Racer;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Leading integer, the way a browser number field hands it over.
static LEADING_INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?)(\d+)").unwrap());

/// English ordinal suffix for a 1-based place.
pub fn ordinal_suffix(n: usize) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `1` → `"1st"`, `12` → `"12th"`, `22` → `"22nd"`.
pub fn ordinal(n: usize) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

/// Parse the minute field of the countdown.
///
/// Only the leading integer counts (`"12min"` is 12). Anything without one,
/// negative values and values too large to hold are coerced to zero.
pub fn parse_minutes(input: &str) -> u32 {
    let Some(captures) = LEADING_INT_REGEX.captures(input) else {
        debug!("Minute input {:?} has no number, using 0", input);
        return 0;
    };
    if &captures[1] == "-" {
        return 0;
    }
    captures[2].parse().unwrap_or(0)
}

/// Format a clock as zero-padded `MM:SS`.
pub fn format_clock(minutes: u32, seconds: u32) -> String {
    format!("{:02}:{:02}", minutes, seconds)
}

/// Format a duration in milliseconds as seconds with two decimals.
pub fn format_seconds(ms: u64) -> String {
    format!("{:.2} s", ms as f64 / 1000.0)
}

/// Load the race field from CSV with a `name,color` header.
///
/// Rows with a blank name and repeated names are skipped; a racer is
/// identified by its name.
pub fn read_racers_from_csv_string(
    csv_content: &str,
) -> Result<Vec<Racer>, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let mut racers = Vec::new();
    let mut seen_names = HashSet::new();

    for (i, record) in reader.deserialize::<Racer>().enumerate() {
        let racer = record?;
        if racer.name.is_empty() {
            debug!("Warning: Row {} has no name, skipping", i + 1);
            continue;
        }
        if !seen_names.insert(racer.name.clone()) {
            debug!(
                "Warning: Duplicate racer '{}' found on row {}, skipping",
                racer.name,
                i + 1
            );
            continue;
        }
        racers.push(racer);
    }

    info!("Loaded {} racers from CSV content", racers.len());
    Ok(racers)
}
