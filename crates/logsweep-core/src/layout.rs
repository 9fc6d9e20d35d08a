//! Date layouts used to parse the date embedded in a log file name.
//!
//! A layout is written either in strftime notation (`%Y%m%d`) or as the
//! reference time `Mon Jan 2 15:04:05 -0700 MST 2006` arranged in the shape
//! of the expected date (`20060102`). Any layout containing a `%` is taken
//! as strftime; everything else is translated once into strftime.

use std::fmt;

use chrono::format::{self, Fixed, Item, Numeric, Pad, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};

/// Reference-time tokens and their strftime equivalents.
///
/// Order matters: longer tokens sharing a prefix with shorter ones come first.
const REFERENCE_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("2006", "%Y"),
    ("002", "%j"),
    ("-07:00", "%:z"),
    ("-0700", "%z"),
    ("Z07:00", "%#z"),
    ("Z0700", "%#z"),
    ("15", "%H"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("_2006", "_%Y"),
    ("_2", "%e"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
];

/// A compiled date layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLayout {
    source: String,
    format: String,
}

/// Why a captured date could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutError {
    /// The substring that failed to parse.
    pub value: String,
    /// Parser diagnostic.
    pub reason: String,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse {:?}: {}", self.value, self.reason)
    }
}

impl std::error::Error for LayoutError {}

impl DateLayout {
    /// Compile a layout from either notation.
    pub fn new(layout: &str) -> Self {
        let format = if layout.contains('%') {
            layout.to_string()
        } else {
            translate_reference(layout)
        };

        Self {
            source: layout.to_string(),
            format,
        }
    }

    /// The layout as given by the user.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The layout in strftime notation.
    pub fn strftime(&self) -> &str {
        &self.format
    }

    /// Parse a captured date.
    ///
    /// Missing time-of-day means midnight; a missing offset means UTC.
    pub fn parse(&self, value: &str) -> Result<DateTime<Utc>, LayoutError> {
        let fail = |reason: String| LayoutError {
            value: value.to_string(),
            reason,
        };

        check_field_widths(&self.format, value).map_err(fail)?;

        let mut parsed = Parsed::default();
        format::parse(&mut parsed, value, StrftimeItems::new(&self.format))
            .map_err(|e| fail(e.to_string()))?;

        let date = parsed.to_naive_date().map_err(|e| fail(e.to_string()))?;
        let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
        let naive = date.and_time(time);

        match parsed.to_fixed_offset() {
            Ok(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| fail("offset out of range".to_string())),
            Err(_) => Ok(Utc.from_utc_datetime(&naive)),
        }
    }
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translate a reference-time layout into strftime notation.
fn translate_reference(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;

    'outer: while !rest.is_empty() {
        if let Some((consumed, spec)) = fractional_seconds(rest) {
            out.push_str(spec);
            rest = &rest[consumed..];
            continue;
        }

        for (token, spec) in REFERENCE_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }

        let Some(c) = rest.chars().next() else { break };
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Require every zero-padded numeric field of `value` to have its full width.
///
/// chrono reads one up to `width` digits per field, so on its own `%Y%m%d`
/// accepts `2024031`. This walks the items alongside the input and stops at
/// the first item whose length it cannot tell in advance; chrono checks the
/// rest.
fn check_field_widths(format: &str, value: &str) -> Result<(), String> {
    let mut rest = value;

    for item in StrftimeItems::new(format) {
        let consumed = match item {
            Item::Literal(lit) if rest.starts_with(lit) => lit.len(),
            Item::OwnedLiteral(ref lit) if rest.starts_with(&**lit) => lit.len(),
            Item::Space(_) | Item::OwnedSpace(_) => rest.len() - rest.trim_start().len(),
            Item::Numeric(ref numeric, Pad::Zero) => {
                let Some(width) = field_width(numeric) else {
                    return Ok(());
                };
                // Signed years may run longer than four digits
                if rest.starts_with(['+', '-']) {
                    return Ok(());
                }
                let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
                if digits < width {
                    return Err(format!("expected {width} digits at {rest:?}"));
                }
                width
            }
            Item::Fixed(Fixed::ShortMonthName | Fixed::ShortWeekdayName)
                if rest.len() >= 3 && rest.as_bytes()[..3].iter().all(u8::is_ascii_alphabetic) =>
            {
                3
            }
            Item::Fixed(Fixed::LongMonthName | Fixed::LongWeekdayName) => {
                rest.bytes().take_while(u8::is_ascii_alphabetic).count()
            }
            _ => return Ok(()),
        };
        rest = &rest[consumed..];
    }

    Ok(())
}

/// Fixed width of a numeric field, if it has one.
fn field_width(numeric: &Numeric) -> Option<usize> {
    match numeric {
        Numeric::Year | Numeric::IsoYear => Some(4),
        Numeric::Ordinal => Some(3),
        Numeric::YearDiv100
        | Numeric::YearMod100
        | Numeric::IsoYearDiv100
        | Numeric::IsoYearMod100
        | Numeric::Month
        | Numeric::Day
        | Numeric::WeekFromSun
        | Numeric::WeekFromMon
        | Numeric::IsoWeek
        | Numeric::Hour
        | Numeric::Hour12
        | Numeric::Minute
        | Numeric::Second => Some(2),
        _ => None,
    }
}

/// Match `.000`, `.000000`, `.999` and friends at the start of `s`.
fn fractional_seconds(s: &str) -> Option<(usize, &'static str)> {
    let digits = s.strip_prefix('.')?;
    let first = digits.chars().next().filter(|c| *c == '0' || *c == '9')?;
    let run = digits.chars().take_while(|c| *c == first).count();

    if digits[run..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let spec = match (first, run) {
        ('0', 3) => "%.3f",
        ('0', 6) => "%.6f",
        ('0', 9) => "%.9f",
        _ => "%.f",
    };
    Some((run + 1, spec))
}
