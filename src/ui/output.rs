//! ui::output
//!
//! Text layout for command output.
//!
//! # Design
//!
//! Every function here is pure and returns a `String`; handlers decide which
//! stream it goes to. The layouts are fixed because scripts parse them:
//! - list headers end with a `(N of M)` suffix only when a page is partial
//! - key/value blocks are space padded to the longest key
//! - release tables use tab stops (width 8, padding 1)

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};

const TAB_WIDTH: usize = 8;
const TAB_PADDING: usize = 1;

/// The header suffix for a list: `"\n"` for a full page, else `" (R of T)\n"`.
pub fn limit_count(returned: usize, total: usize) -> String {
    if returned == total {
        "\n".to_string()
    } else {
        format!(" ({} of {})\n", returned, total)
    }
}

/// `=== <subject> <noun>` with the page suffix.
pub fn list_header(subject: &str, returned: usize, total: usize) -> String {
    format!("=== {}{}", subject, limit_count(returned, total))
}

/// Lay out a map as `key<padding>value` lines sorted by key.
///
/// Each key is padded to the longest key plus `spaces`.
pub fn pretty_tabs(values: &BTreeMap<String, String>, spaces: usize) -> String {
    let width = values.keys().map(|k| k.chars().count()).max().unwrap_or(0) + spaces;

    values
        .iter()
        .map(|(key, value)| {
            let pad = width - key.chars().count();
            format!("{}{}{}\n", key, " ".repeat(pad), value)
        })
        .collect()
}

/// Align tab-separated rows on tab stops.
///
/// Every cell except the last on a line is padded with tab characters to a
/// column width of the widest cell plus one, rounded up to a tab stop.
pub fn tab_align(text: &str) -> String {
    let rows: Vec<Vec<&str>> = text
        .lines()
        .map(|line| line.split('\t').collect())
        .collect();

    let mut widths: Vec<usize> = Vec::new();
    for row in &rows {
        for (column, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
            let width = cell.chars().count() + TAB_PADDING;
            if column >= widths.len() {
                widths.push(width);
            } else if width > widths[column] {
                widths[column] = width;
            }
        }
    }

    let mut output = String::new();
    for row in &rows {
        let last = row.len().saturating_sub(1);
        for (column, cell) in row.iter().enumerate() {
            output.push_str(cell);
            if column < last {
                let cell_width = widths[column].div_ceil(TAB_WIDTH) * TAB_WIDTH;
                let padding = cell_width - cell.chars().count();
                output.push_str(&"\t".repeat(padding.div_ceil(TAB_WIDTH)));
            }
        }
        output.push('\n');
    }
    output
}

/// Dates as `2 Jan 2006`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-d %b %Y").to_string()
}

/// The relative expiry shown after a certificate's expiry date.
///
/// Fields are compared one at a time (year, then month, then day) and the
/// first positive difference wins, so the result is a calendar reading and
/// not an elapsed duration.
pub fn expiry_suffix(expires: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    if expires < now {
        return " (expired)".to_string();
    }

    let year = expires.year() - now.year();
    let month = expires.month() as i32 - now.month() as i32;
    let day = expires.day() as i32 - now.day() as i32;

    let mut suffix = String::from(" (in");
    if year > 0 {
        suffix.push_str(&plural(year, "year"));
    } else if month > 0 {
        suffix.push_str(&plural(month, "month"));
    } else if day != 0 {
        suffix.push_str(&plural(day.abs(), "day"));
    }
    suffix.push(')');
    suffix
}

fn plural(count: i32, unit: &str) -> String {
    if count > 1 {
        format!(" {} {}s", count, unit)
    } else {
        format!(" {} {}", count, unit)
    }
}

/// `AB:CD:...` shortened to its first and last five characters.
pub fn short_fingerprint(fingerprint: &str) -> String {
    abbreviate(fingerprint, 5, 5, "[...]")
}

/// An SSH public key shortened for listing.
pub fn short_key(public: &str) -> String {
    abbreviate(public, 16, 10, "...")
}

fn abbreviate(text: &str, head: usize, tail: usize, joiner: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= head + tail {
        return text.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}{}{}", start, joiner, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn limit_count_only_for_partial_pages() {
        assert_eq!(limit_count(2, 2), "\n");
        assert_eq!(limit_count(2, 5), " (2 of 5)\n");
        assert_eq!(list_header("Apps", 1, 3), "=== Apps (1 of 3)\n");
    }

    #[test]
    fn pretty_tabs_pads_to_longest_key() {
        let mut values = BTreeMap::new();
        values.insert("TEST".to_string(), "testing".to_string());
        values.insert("NCC".to_string(), "1701".to_string());
        values.insert("FLOAT".to_string(), "12.34".to_string());
        values.insert("TRUE".to_string(), "false".to_string());

        assert_eq!(
            pretty_tabs(&values, 6),
            "FLOAT      12.34\nNCC        1701\nTEST       testing\nTRUE       false\n"
        );
    }

    #[test]
    fn pretty_tabs_of_nothing_is_empty() {
        assert_eq!(pretty_tabs(&BTreeMap::new(), 5), "");
    }

    #[test]
    fn tab_align_uses_tab_stops() {
        let text = "v2\t2014-01-01T00:00:00UTC\tjkirk added FOO\nv1\t2014-01-01T00:00:00UTC\tjkirk created initial release\n";
        assert_eq!(
            tab_align(text),
            "v2\t2014-01-01T00:00:00UTC\tjkirk added FOO\n\
             v1\t2014-01-01T00:00:00UTC\tjkirk created initial release\n"
        );
    }

    #[test]
    fn tab_align_adds_tabs_for_wide_cells() {
        assert_eq!(tab_align("ab\tx\nabcdefgh\ty\n"), "ab\t\tx\nabcdefgh\ty\n");
    }

    #[test]
    fn expiry_picks_first_positive_field() {
        let now = date(2016, 6, 15);
        assert_eq!(expiry_suffix(&date(2018, 1, 1), &now), " (in 2 years)");
        assert_eq!(expiry_suffix(&date(2017, 6, 15), &now), " (in 1 year)");
        assert_eq!(expiry_suffix(&date(2016, 9, 1), &now), " (in 3 months)");
        assert_eq!(expiry_suffix(&date(2016, 6, 16), &now), " (in 1 day)");
    }

    #[test]
    fn expiry_day_delta_is_made_positive() {
        // Next month but an earlier day: month is positive, so months win.
        let now = date(2016, 6, 28);
        assert_eq!(expiry_suffix(&date(2016, 7, 2), &now), " (in 1 month)");

        // Next year, earlier month: year wins even though months are negative.
        assert_eq!(expiry_suffix(&date(2017, 1, 2), &now), " (in 1 year)");
    }

    #[test]
    fn expiry_same_day_has_no_unit() {
        let now = Utc.with_ymd_and_hms(2016, 6, 15, 8, 0, 0).unwrap();
        assert_eq!(expiry_suffix(&date(2016, 6, 15), &now), " (in)");
        assert_eq!(expiry_suffix(&date(2016, 6, 1), &now), " (expired)");
    }

    #[test]
    fn dates_use_short_month() {
        assert_eq!(format_date(&date(2016, 1, 2)), "2 Jan 2016");
    }

    #[test]
    fn fingerprints_and_keys_are_shortened() {
        assert_eq!(
            short_fingerprint("AB:CD:EF:01:23:45:67:89"),
            "AB:CD[...]67:89"
        );
        assert_eq!(
            short_key("ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQC bob@example"),
            "ssh-rsa AAAAB3Nz...ob@example"
        );
        assert_eq!(short_fingerprint("short"), "short");
    }
}
