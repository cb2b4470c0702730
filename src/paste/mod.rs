//! Bulk-paste parser for spreadsheet rows.
//!
//! Input is a block of rows copied from a spreadsheet: one record per line,
//! tab-separated columns in this order:
//!
//! ```text
//! location  imp_1m  clicks_1m  ctr  imp_4w  clicks_4w  cpc  [cpm]
//! ```
//!
//! The pasted layout has no platform column, so the platform is chosen
//! out of band and applied to the whole batch.
//!
//! Parsing never fails. Rows with fewer than [`MIN_COLUMNS`] columns are
//! skipped, malformed numeric cells coerce to `0`, and an empty result is
//! the caller's signal that the format was not recognized.

use crate::record::numeric::{clean_cell, to_whole};
use crate::record::{Platform, Record, round2};

/// Minimum tab-separated columns for a row to qualify (CPM is optional).
pub const MIN_COLUMNS: usize = 7;

/// Parse a pasted block into records tagged with `platform`.
///
/// Records come back in the order of their qualifying input lines.
pub fn parse_paste(text: &str, platform: Platform) -> Vec<Record> {
    text.trim()
        .lines()
        .filter_map(|line| parse_row(line, platform))
        .collect()
}

/// Parse one pasted row, or `None` if it has too few columns.
pub fn parse_row(line: &str, platform: Platform) -> Option<Record> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < MIN_COLUMNS {
        return None;
    }

    let impressions = clean_cell(cols[1]);
    let clicks = clean_cell(cols[2]);
    let ctr = ctr_cell(cols[3], clicks, impressions);

    Some(Record {
        location: cols[0].trim().to_string(),
        platform,
        avg_impressions_1m: to_whole(impressions),
        avg_clicks_1m: to_whole(clicks),
        ctr: round2(ctr),
        avg_impressions_4w: to_whole(clean_cell(cols[4])),
        avg_clicks_4w: to_whole(clean_cell(cols[5])),
        cpc: to_whole(clean_cell(cols[6])),
        cpm: to_whole(clean_cell(cols.get(7).copied().unwrap_or(""))),
    })
}

/// Resolve the CTR of a pasted row.
///
/// A cell formatted with `%` is trusted as a percentage. Without one the
/// spreadsheet most likely exported the raw ratio, so the rate is
/// recomputed from clicks and impressions whenever impressions are
/// positive. This mirrors how common spreadsheet exports behave; it is a
/// compatibility quirk, not a general rule.
fn ctr_cell(raw: &str, clicks: f64, impressions: f64) -> f64 {
    if impressions > 0.0 && !raw.contains('%') {
        clicks / impressions * 100.0
    } else {
        clean_cell(raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_row() {
        let records = parse_paste(
            "Sidebar\t100000\t200\t0.2%\t50000\t90\t1500\t3000",
            Platform::Pc,
        );
        assert_eq!(
            records,
            vec![Record {
                location: "Sidebar".to_string(),
                platform: Platform::Pc,
                avg_impressions_1m: 100_000,
                avg_clicks_1m: 200,
                ctr: 0.2,
                avg_impressions_4w: 50_000,
                avg_clicks_4w: 90,
                cpc: 1500,
                cpm: 3000,
            }]
        );
    }

    #[test]
    fn zero_impressions_keep_zero_ctr() {
        let records = parse_paste("Footer\t0\t0\t0%\t0\t0\t0\t0", Platform::Mobile);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ctr, 0.0);
        assert_eq!(records[0].cpc, 0);
        assert_eq!(records[0].platform, Platform::Mobile);
    }

    #[test]
    fn short_rows_are_skipped() {
        assert!(parse_paste("a\tb\n", Platform::Pc).is_empty());
        assert!(parse_paste("", Platform::Pc).is_empty());
        assert!(parse_paste("x\t1\t2\t3\t4\t5", Platform::Pc).is_empty());
    }

    #[test]
    fn missing_cpm_defaults_to_zero() {
        let records = parse_paste("X\t1000\t10\t1%\t500\t5\t700", Platform::Pc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cpc, 700);
        assert_eq!(records[0].cpm, 0);
    }

    #[test]
    fn ratio_ctr_is_recomputed_from_counts() {
        // 0.0015 is a raw ratio; without a percent sign the rate is derived.
        let records = parse_paste("X\t100000\t150\t0.0015\t0\t0\t100\t100", Platform::Pc);
        assert_eq!(records[0].ctr, 0.15);
    }

    #[test]
    fn percent_ctr_is_trusted_over_counts() {
        let records = parse_paste("X\t100000\t150\t0.5%\t0\t0\t100\t100", Platform::Pc);
        assert_eq!(records[0].ctr, 0.5);
    }

    #[test]
    fn decorated_cells_are_cleaned() {
        let records = parse_paste(
            "메인 하단\t744,956\t306\t0.04%\t672,863\t276\t₩7,236\t₩2,972",
            Platform::Mobile,
        );
        let r = &records[0];
        assert_eq!(r.avg_impressions_1m, 744_956);
        assert_eq!(r.avg_impressions_4w, 672_863);
        assert_eq!(r.cpc, 7236);
        assert_eq!(r.cpm, 2972);
        assert_eq!(r.ctr, 0.04);
    }

    #[test]
    fn division_error_cells_become_zero() {
        let records = parse_paste("X\t0\t0\t#DIV/0!\t0\t0\t#DIV/0!\t#DIV/0!", Platform::Pc);
        assert_eq!(records[0].ctr, 0.0);
        assert_eq!(records[0].cpc, 0);
        assert_eq!(records[0].cpm, 0);
    }

    #[test]
    fn mixed_block_keeps_qualifying_lines_in_order() {
        let block = "\n  header only\n\
                     First\t10\t1\t10%\t0\t0\t5\t5\n\
                     garbage line\n\
                     Second\t20\t1\t5%\t0\t0\t6\t6\r\n\
                     Third\t30\t3\t10%\t0\t0\t7\t7\n\n";
        let names: Vec<_> = parse_paste(block, Platform::Pc)
            .into_iter()
            .map(|r| r.location)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn parsing_is_repeatable() {
        let block = "메인 하단\t744,956\t306\t0.04%\t672,863\t276\t₩7,236\t₩2,972\n\
                     X\t100000\t150\t0.0015\t0\t0\t100\n\
                     short\trow\n";
        let first = parse_paste(block, Platform::Mobile);
        let second = parse_paste(block, Platform::Mobile);
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn rendered_rows_parse_back_to_the_same_records() {
        let records = parse_paste(
            "A\t1000\t7\t0.0007\t900\t5\t640\t4480\nB\t500\t0\t0%\t0\t0\t0",
            Platform::Pc,
        );
        let rendered: Vec<String> = records
            .iter()
            .map(|r| {
                format!(
                    "{}\t{}\t{}\t{}%\t{}\t{}\t{}\t{}",
                    r.location,
                    r.avg_impressions_1m,
                    r.avg_clicks_1m,
                    r.ctr,
                    r.avg_impressions_4w,
                    r.avg_clicks_4w,
                    r.cpc,
                    r.cpm
                )
            })
            .collect();
        assert_eq!(parse_paste(&rendered.join("\n"), Platform::Pc), records);
    }

    #[test]
    fn hostile_input_never_panics() {
        assert!(parse_paste("\t\t\t\t\t\t\t", Platform::Pc).is_empty());
        assert!(parse_paste("\r", Platform::Pc).is_empty());
        assert!(parse_paste("\r\r\n\r", Platform::Pc).is_empty());

        let tabs_between = "A\t1\t0\t0%\t0\t0\t0\n\t\t\t\t\t\t\t\nB\t1\t0\t0%\t0\t0\t0";
        let names: Vec<_> = parse_paste(tabs_between, Platform::Pc)
            .into_iter()
            .map(|r| r.location)
            .collect();
        assert_eq!(names, vec!["A", "", "B"]);

        let garbage = parse_paste("abc\txyz\t!!\t??\tNaN\tinf\t-5\t1e999", Platform::Pc);
        let r = &garbage[0];
        assert_eq!(r.location, "abc");
        assert_eq!(
            (r.avg_impressions_1m, r.avg_clicks_1m, r.avg_impressions_4w, r.avg_clicks_4w),
            (0, 0, 0, 0)
        );
        assert_eq!((r.ctr, r.cpc, r.cpm), (0.0, 0, 0));

        let multibyte = parse_paste("위치\t일이삼\t백\t십%\t천\t만\t₩오\t억", Platform::Mobile);
        assert_eq!(multibyte[0].location, "위치");
        assert_eq!(multibyte[0].avg_impressions_1m, 0);
        assert_eq!(multibyte[0].ctr, 0.0);
        assert_eq!(multibyte[0].cpc, 0);

        let long_location = "L".repeat(100_000);
        let long_number = "9".repeat(100_000);
        let line = format!("{long_location}\t{long_number}\t1\t1%\t{long_number}\t1\t1\t1");
        let records = parse_paste(&line, Platform::Pc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location.len(), 100_000);
    }

    #[test]
    fn location_is_trimmed() {
        let records = parse_paste("  TOP  \t1\t0\t0%\t0\t0\t0\t0", Platform::Pc);
        assert_eq!(records[0].location, "TOP");
    }
}
