use crate::error::{CropCheckError, Result};
use crate::models::CropRecord;
use std::collections::BTreeMap;
use std::path::Path;

const SCIENTIFIC_NAME: &str = "ScientificName";
const COMMON_NAME: &str = "COMNAME";

/// Columns with no display value for growers
const DROPPED_COLUMNS: [&str; 2] = ["AUTH", "FAMNAME"];

/// Cell values the export uses for "no data"
const MISSING_MARKERS: [&str; 4] = ["na", "nan", "n/a", "null"];

/// Reads the FAO EcoCrop CSV export into typed crop records.
pub struct EcoCropLoader;

impl EcoCropLoader {
    pub fn load(path: &Path) -> Result<Vec<CropRecord>> {
        let bytes = std::fs::read(path).map_err(|e| {
            CropCheckError::Dataset(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let records = Self::from_bytes(&bytes)?;
        tracing::info!(
            "Loaded {} crop records from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    /// Parse raw file contents. The official export is Windows-1252, so
    /// anything that is not valid UTF-8 is decoded as such.
    pub fn from_bytes(bytes: &[u8]) -> Result<Vec<CropRecord>> {
        let text = match std::str::from_utf8(bytes) {
            Ok(s) => s.trim_start_matches('\u{feff}').to_string(),
            Err(_) => decode_windows_1252(bytes),
        };
        Self::parse(&text)
    }

    pub fn parse(content: &str) -> Result<Vec<CropRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);

        let scientific_idx = column(SCIENTIFIC_NAME).ok_or_else(|| {
            CropCheckError::Dataset(format!("missing required column {}", SCIENTIFIC_NAME))
        })?;
        let common_idx = column(COMMON_NAME).ok_or_else(|| {
            CropCheckError::Dataset(format!("missing required column {}", COMMON_NAME))
        })?;

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row?;
            let cell = |idx: usize| row.get(idx).unwrap_or("");

            let scientific_name = cell(scientific_idx);
            if is_missing(scientific_name) {
                tracing::warn!("Skipping EcoCrop row {}: no scientific name", line + 2);
                continue;
            }

            let mut record = CropRecord::new(scientific_name, clean_text(cell(common_idx)));
            let mut attributes = BTreeMap::new();

            for (idx, header) in headers.iter().enumerate() {
                if idx == scientific_idx || idx == common_idx {
                    continue;
                }
                let value = cell(idx);
                match header {
                    "TMIN" => record.t_min = parse_number(value),
                    "TMAX" => record.t_max = parse_number(value),
                    "RMIN" => record.r_min = parse_number(value),
                    "RMAX" => record.r_max = parse_number(value),
                    "ROPMN" => record.rop_min = parse_number(value),
                    "ROPMX" => record.rop_max = parse_number(value),
                    h if DROPPED_COLUMNS.contains(&h) || h.is_empty() => {}
                    h => {
                        if !is_missing(value) {
                            attributes.insert(h.to_string(), value.to_string());
                        }
                    }
                }
            }

            record.attributes = attributes;
            records.push(record);
        }

        Ok(records)
    }
}

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|m| value.eq_ignore_ascii_case(m))
}

fn clean_text(value: &str) -> String {
    if is_missing(value) {
        String::new()
    } else {
        value.to_string()
    }
}

/// Numeric cell to `Option<f64>`. Blank, marker and garbage cells become
/// `None`, never zero, and non-finite values are rejected.
fn parse_number(value: &str) -> Option<f64> {
    if is_missing(value) {
        return None;
    }
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        Ok(_) => None,
        Err(_) => {
            tracing::debug!("Ignoring non-numeric EcoCrop value {:?}", value);
            None
        }
    }
}

/// Bytes 0x80-0x9F differ from Latin-1 in Windows-1252.
const CP1252_HIGH: [char; 32] = [
    '€', '\u{81}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{8d}', 'Ž',
    '\u{8f}', '\u{90}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ', '\u{9d}',
    'ž', 'Ÿ',
];

fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}
