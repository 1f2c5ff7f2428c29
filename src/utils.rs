use crate::Date;

/// Escape a string for embedding inside a double-quoted HTML attribute.
///
/// Covers the five characters with reserved meaning in attribute values;
/// everything else passes through untouched.
pub(crate) fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Parses ISO-8601-ish date strings as journal platforms store them
/// (e.g. "2021-01-15", "2020-05-01T00:00:00Z", "2020-05-01 00:00:00", "2021")
///
/// Any time-of-day part is discarded; only the calendar date survives.
///
/// # Arguments
///
/// * `date_str` - The date string to parse
pub fn parse_iso_date(date_str: &str) -> Option<Date> {
    let date_str = date_str.trim();

    if date_str.is_empty() {
        return None;
    }

    // Keep the calendar-date part of a timestamp.
    let date_part = date_str.split(['T', ' ']).next().unwrap_or(date_str);

    let parts: Vec<&str> = date_part.split('-').collect();

    // First part should be year
    let year = parts.first()?.parse::<i32>().ok()?;

    let mut month = None;
    let mut day = None;

    // Second part should be month (if present and not empty)
    if let Some(month_str) = parts.get(1)
        && !month_str.is_empty()
            && let Ok(parsed_month) = month_str.parse::<u8>()
                && (1..=12).contains(&parsed_month) {
                    month = Some(parsed_month);
                }

    // Third part should be day (if present and not empty)
    if month.is_some()
        && let Some(day_str) = parts.get(2)
            && !day_str.is_empty()
                && let Ok(parsed_day) = day_str.parse::<u8>()
                    && (1..=31).contains(&parsed_day) {
                        day = Some(parsed_day);
                    }

    Some(Date { year, month, day })
}
