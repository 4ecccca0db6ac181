use chrono::NaiveDateTime;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::features::pickups::models::{DatasetError, Pickup, PickupDataset};
use crate::shared::constants::PICKUP_DATE_COLUMN;

/// Accepted `date/time` layouts. The first matches the raw ride exports.
const DATE_TIME_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Load at most `nrows` data rows from a CSV file, gunzipping `.gz` paths
pub fn load_dataset(path: &Path, nrows: usize) -> Result<PickupDataset, DatasetError> {
    let file = File::open(path)?;
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");

    let dataset = if gzipped {
        parse_dataset(BufReader::new(GzDecoder::new(file)), nrows)?
    } else {
        parse_dataset(BufReader::new(file), nrows)?
    };

    tracing::info!(
        "Pickup dataset loaded: path={}, rows={}",
        path.display(),
        dataset.rows.len()
    );
    Ok(dataset)
}

/// Split one CSV record. Commas inside double quotes stay in the field and
/// `""` inside quotes is a literal quote.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parse CSV text with a header row. Column names are lowercased.
pub fn parse_dataset<R: BufRead>(reader: R, nrows: usize) -> Result<PickupDataset, DatasetError> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Ok(PickupDataset::default()),
    };
    let columns: Vec<String> = split_record(&header)
        .into_iter()
        .map(|c| c.to_lowercase())
        .collect();

    let index_of = |name: &str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };
    let date_idx = index_of(PICKUP_DATE_COLUMN)?;
    let lat_idx = index_of("lat")?;
    let lon_idx = index_of("lon")?;
    let base_idx = columns.iter().position(|c| c == "base");

    let mut rows = Vec::new();
    for (offset, line) in lines.enumerate() {
        if rows.len() >= nrows {
            break;
        }

        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        // Header is line 1
        let line_no = offset + 2;
        let fields = split_record(&line);
        let field = |idx: usize| {
            fields.get(idx).map(String::as_str).ok_or_else(|| DatasetError::Parse {
                line: line_no,
                message: format!("expected at least {} fields", idx + 1),
            })
        };

        let raw_date = field(date_idx)?;
        let date_time = parse_date_time(raw_date).ok_or_else(|| DatasetError::Parse {
            line: line_no,
            message: format!("invalid date/time '{}'", raw_date),
        })?;

        let parse_coord = |idx: usize, name: &str| -> Result<f64, DatasetError> {
            let raw = field(idx)?;
            raw.parse::<f64>().map_err(|_| DatasetError::Parse {
                line: line_no,
                message: format!("invalid {} '{}'", name, raw),
            })
        };

        rows.push(Pickup {
            date_time,
            lat: parse_coord(lat_idx, "lat")?,
            lon: parse_coord(lon_idx, "lon")?,
            base: base_idx
                .and_then(|idx| fields.get(idx))
                .filter(|b| !b.is_empty())
                .cloned(),
        });
    }

    Ok(PickupDataset { columns, rows })
}
