//! Tail-window extraction and delimited-text export.

use crate::ResultsResult;
use crate::types::TimeseriesRecord;
use std::path::Path;

pub const EXPORT_HEADER: &str = "t_days,juveniles,adults,survival_scale,delay_days,temperature_k";

/// The trailing `keep_days` of the series, measured back from the last
/// record. Records are assumed time-ordered, as the store writes them.
pub fn tail_window(records: &[TimeseriesRecord], keep_days: f64) -> &[TimeseriesRecord] {
    let Some(last) = records.last() else {
        return records;
    };
    let cutoff = last.t_days - keep_days;
    let start = records.partition_point(|r| r.t_days < cutoff);
    &records[start..]
}

/// Render records as delimited text, one record per line with a header.
pub fn to_delimited(records: &[TimeseriesRecord], sep: char) -> String {
    let mut out = String::with_capacity(64 * (records.len() + 1));
    out.push_str(&EXPORT_HEADER.replace(',', &sep.to_string()));
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{t}{sep}{j}{sep}{a}{sep}{s}{sep}{d}{sep}{k}\n",
            t = r.t_days,
            j = r.juveniles,
            a = r.adults,
            s = r.survival_scale,
            d = r.delay_days,
            k = r.temperature_k,
        ));
    }
    out
}

pub fn write_delimited(
    path: &Path,
    records: &[TimeseriesRecord],
    sep: char,
) -> ResultsResult<()> {
    std::fs::write(path, to_delimited(records, sep))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(t: f64) -> TimeseriesRecord {
        TimeseriesRecord {
            t_days: t,
            juveniles: t * 2.0,
            adults: t * 3.0,
            survival_scale: 0.5,
            delay_days: 4.0,
            temperature_k: 290.0,
        }
    }

    #[test]
    fn tail_window_keeps_the_trailing_span() {
        let records: Vec<_> = (0..=100).map(|d| record(d as f64)).collect();
        let tail = tail_window(&records, 10.0);
        assert_eq!(tail.len(), 11);
        assert_eq!(tail[0].t_days, 90.0);
        assert_eq!(tail[10].t_days, 100.0);
    }

    #[test]
    fn tail_window_longer_than_series_keeps_everything() {
        let records: Vec<_> = (0..5).map(|d| record(d as f64)).collect();
        assert_eq!(tail_window(&records, 1e6).len(), 5);
        assert!(tail_window(&[], 10.0).is_empty());
    }

    #[test]
    fn delimited_output_has_header_and_rows() {
        let records: Vec<_> = (0..3).map(|d| record(d as f64)).collect();
        let text = to_delimited(&records, ',');
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], EXPORT_HEADER);
        assert!(lines[1].starts_with("0,"));
        assert_eq!(lines[1].split(',').count(), 6);
    }

    #[test]
    fn tab_separator_is_honored() {
        let records = vec![record(1.0)];
        let text = to_delimited(&records, '\t');
        assert!(text.lines().next().unwrap().contains('\t'));
        assert!(!text.lines().next().unwrap().contains(','));
    }
}
