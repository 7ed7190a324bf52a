//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an ISO-8601 date or date-time string.
///
/// Date-only values resolve to midnight. Values carrying an offset are
/// converted to UTC so posts written in different zones still order correctly.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

/// Format a date using a date-fns style pattern
///
/// # Examples
/// ```ignore
/// format_date(&date, "LLLL d, yyyy") // -> "June 15, 2023"
/// ```
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    date.format(&pattern_to_chrono_format(pattern)).to_string()
}

/// Render an ISO date string for display, leaving unparseable input untouched
pub fn display_date(s: &str, pattern: &str) -> String {
    match parse_date(s) {
        Some(date) => format_date(&date, pattern),
        None => s.to_string(),
    }
}

/// Convert a date-fns pattern to a chrono format string.
///
/// Runs of the same letter form one token; text in single quotes is literal.
fn pattern_to_chrono_format(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let directive = match (c, run) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M' | 'L', 1) => "%-m",
            ('M' | 'L', 2) => "%m",
            ('M' | 'L', 3) => "%b",
            ('M' | 'L', _) => "%B",
            ('d', 1) => "%-d",
            ('d', _) => "%d",
            ('E', 4) => "%A",
            ('E', _) => "%a",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', 1) => "%-I",
            ('h', _) => "%I",
            ('m', 1) => "%-M",
            ('m', _) => "%M",
            ('s', 1) => "%-S",
            ('s', _) => "%S",
            ('a', _) => "%p",
            _ => "",
        };

        if directive.is_empty() {
            for _ in 0..run {
                push_literal(&mut out, c);
            }
        } else {
            out.push_str(directive);
        }
        i += run;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
