//! Diurnal FFMC lookup table
//!
//! Hourly FFMC from 13:00 to 07:00 the next morning, one row per integer
//! solar-noon FFMC from 0 to 101. The packaged table is embedded at compile
//! time and parsed once on first use.
//!
//! Format: `#` lines are comments, then a header `ffmc,13:00,...,07:00`, then
//! rows `<bucket>,<ffmc at 13:00>,...,<ffmc at 07:00>` in bucket order.

use std::sync::LazyLock;

use crate::error::{FbaError, FbaResult};

/// First clock hour in the table (13:00)
pub const FIRST_HOUR: u32 = 13;
/// Number of hourly columns, 13:00 through 07:00 the next day
pub const HOURS: usize = 19;
/// Last clock hour in the table, counted past midnight (31 = 07:00 next day)
pub const LAST_HOUR: u32 = FIRST_HOUR + HOURS as u32 - 1;
/// Highest solar-noon FFMC bucket
pub const MAX_BUCKET: usize = 101;

const PACKAGED_CSV: &str = include_str!("../../data/diurnal_ffmc.csv");

static PACKAGED: LazyLock<FbaResult<DiurnalFfmcTable>> =
    LazyLock::new(|| DiurnalFfmcTable::from_csv(PACKAGED_CSV));

/// Hourly FFMC keyed by solar-noon FFMC bucket
#[derive(Debug, Clone, PartialEq)]
pub struct DiurnalFfmcTable {
    rows: Vec<[f64; HOURS]>,
}

impl DiurnalFfmcTable {
    /// The table shipped with the crate
    ///
    /// # Errors
    /// Returns [`FbaError::DiurnalTable`] if the embedded CSV is malformed.
    pub fn packaged() -> FbaResult<&'static Self> {
        PACKAGED.as_ref().map_err(Clone::clone)
    }

    /// Parse a table from CSV text
    ///
    /// # Errors
    /// Returns [`FbaError::DiurnalTable`] with the offending 1-based line when
    /// the header, a row, or the set of buckets is wrong.
    pub fn from_csv(source: &str) -> FbaResult<Self> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (header_line, header) = lines.next().ok_or(FbaError::DiurnalTable {
            line: 0,
            reason: "missing header".to_string(),
        })?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns.len() != HOURS + 1 || columns[0] != "ffmc" {
            return Err(FbaError::DiurnalTable {
                line: header_line,
                reason: format!("expected header 'ffmc' plus {HOURS} hour columns"),
            });
        }

        let mut rows = Vec::with_capacity(MAX_BUCKET + 1);
        let mut last_line = header_line;
        for (line, text) in lines {
            last_line = line;
            rows.push(parse_row(line, text, rows.len())?);
        }

        if rows.len() != MAX_BUCKET + 1 {
            return Err(FbaError::DiurnalTable {
                line: last_line,
                reason: format!("expected {} rows, found {}", MAX_BUCKET + 1, rows.len()),
            });
        }

        tracing::debug!(rows = rows.len(), "parsed diurnal FFMC table");
        Ok(Self { rows })
    }

    /// The 13:00-07:00 row for a solar-noon FFMC
    ///
    /// FFMC is rounded to the nearest integer bucket and clamped to 0-101.
    pub fn row(&self, solar_noon_ffmc: f64) -> &[f64; HOURS] {
        &self.rows[bucket(solar_noon_ffmc)]
    }

    /// Adjusted FFMC at `clock_hour` for a day with the given solar-noon FFMC
    ///
    /// `clock_hour` runs from 13 to 31, hours past midnight counting on from
    /// 24. Returns `None` outside that range.
    pub fn hourly_ffmc(&self, solar_noon_ffmc: f64, clock_hour: u32) -> Option<f64> {
        if !(FIRST_HOUR..=LAST_HOUR).contains(&clock_hour) {
            return None;
        }
        Some(self.row(solar_noon_ffmc)[(clock_hour - FIRST_HOUR) as usize])
    }
}

fn bucket(solar_noon_ffmc: f64) -> usize {
    if solar_noon_ffmc.is_nan() {
        return 0;
    }
    solar_noon_ffmc.round().clamp(0.0, MAX_BUCKET as f64) as usize
}

fn parse_row(line: usize, text: &str, expected_bucket: usize) -> FbaResult<[f64; HOURS]> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != HOURS + 1 {
        return Err(FbaError::DiurnalTable {
            line,
            reason: format!("expected {} columns, found {}", HOURS + 1, fields.len()),
        });
    }

    let bucket: usize = fields[0].parse().map_err(|_| FbaError::DiurnalTable {
        line,
        reason: format!("invalid FFMC bucket '{}'", fields[0]),
    })?;
    if bucket != expected_bucket {
        return Err(FbaError::DiurnalTable {
            line,
            reason: format!("expected bucket {expected_bucket}, found {bucket}"),
        });
    }

    let mut values = [0.0; HOURS];
    for (value, field) in values.iter_mut().zip(&fields[1..]) {
        *value = field.parse().map_err(|_| FbaError::DiurnalTable {
            line,
            reason: format!("invalid FFMC value '{field}'"),
        })?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_table(rows: usize) -> String {
        let mut csv = String::from("# test\nffmc");
        for hour in 0..HOURS {
            csv.push_str(&format!(",h{hour}"));
        }
        csv.push('\n');
        for bucket in 0..rows {
            csv.push_str(&bucket.to_string());
            for _ in 0..HOURS {
                csv.push_str(&format!(",{bucket}.0"));
            }
            csv.push('\n');
        }
        csv
    }

    #[test]
    fn test_packaged_table_loads() {
        let table = DiurnalFfmcTable::packaged().unwrap();
        assert_eq!(table.hourly_ffmc(91.0, 13), Some(87.4));
        assert_eq!(table.hourly_ffmc(91.0, 17), Some(91.2));
        assert_eq!(table.hourly_ffmc(91.0, 31), Some(73.5));
    }

    #[test]
    fn test_driest_bucket_recovers_overnight() {
        let table = DiurnalFfmcTable::packaged().unwrap();
        assert_eq!(table.hourly_ffmc(101.0, 17), Some(101.0));
        assert_eq!(table.hourly_ffmc(101.0, 31), Some(100.0));
        assert!(table.hourly_ffmc(101.0, 31) > table.hourly_ffmc(100.0, 31));
    }

    #[test]
    fn test_packaged_rows_are_monotone() {
        let table = DiurnalFfmcTable::packaged().unwrap();
        for bucket in 0..=MAX_BUCKET {
            let row = table.row(bucket as f64);
            // Rises to a 16:00-17:00 peak, then dries no further overnight
            assert!(row[..5].windows(2).all(|w| w[0] <= w[1]), "bucket {}", bucket);
            assert!(row[4..].windows(2).all(|w| w[0] >= w[1]), "bucket {}", bucket);
            if bucket > 0 {
                let wetter = table.row(bucket as f64 - 1.0);
                assert!(row.iter().zip(wetter).all(|(a, b)| a >= b), "bucket {}", bucket);
            }
        }
        assert!(table.row(0.0).iter().all(|&ffmc| ffmc == 0.0));
    }

    #[test]
    fn test_hour_range() {
        let table = DiurnalFfmcTable::packaged().unwrap();
        assert_eq!(table.hourly_ffmc(90.0, 12), None);
        assert_eq!(table.hourly_ffmc(90.0, 32), None);
    }

    #[test]
    fn test_bucket_rounding_and_clamping() {
        let table = DiurnalFfmcTable::packaged().unwrap();
        assert_eq!(table.row(90.638), table.row(91.0));
        assert_eq!(table.row(90.4), table.row(90.0));
        assert_eq!(table.row(150.0), table.row(101.0));
        assert_eq!(table.row(-3.0), table.row(0.0));
    }

    #[test]
    fn test_from_csv_accepts_well_formed_table() {
        let table = DiurnalFfmcTable::from_csv(&tiny_table(MAX_BUCKET + 1)).unwrap();
        assert_eq!(table.hourly_ffmc(42.0, 20), Some(42.0));
    }

    #[test]
    fn test_from_csv_rejects_missing_rows() {
        let err = DiurnalFfmcTable::from_csv(&tiny_table(50)).unwrap_err();
        assert!(matches!(err, FbaError::DiurnalTable { reason, .. } if reason.contains("102")));
    }

    #[test]
    fn test_from_csv_reports_bad_line() {
        let mut csv = tiny_table(MAX_BUCKET + 1);
        csv = csv.replacen("\n3,3.0", "\n3,oops", 1);
        let err = DiurnalFfmcTable::from_csv(&csv).unwrap_err();
        // comment, header, buckets 0-2, then bucket 3 on line 6
        assert_eq!(
            err,
            FbaError::DiurnalTable {
                line: 6,
                reason: "invalid FFMC value 'oops'".to_string(),
            }
        );
    }

    #[test]
    fn test_from_csv_rejects_bad_header() {
        assert!(DiurnalFfmcTable::from_csv("bucket,a,b\n").is_err());
        assert!(DiurnalFfmcTable::from_csv("# only comments\n").is_err());
    }
}
