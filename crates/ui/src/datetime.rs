//! Clock line shown in the kiosk header.

use chrono::{Datelike, Timelike};

use kiosk_domain::Language;

/// Formats a wall-clock time for `language`.
///
/// - English: `M/D/YYYY, h:mm:ss AM`
/// - Arabic: `D/M/YYYY، h:mm:ss م` in Arabic-Indic digits, Gregorian calendar
#[must_use]
pub fn format_datetime<T: Datelike + Timelike>(time: &T, language: Language) -> String {
    let (pm, hour) = time.hour12();
    match language {
        Language::English => format!(
            "{}/{}/{}, {}:{:02}:{:02} {}",
            time.month(),
            time.day(),
            time.year(),
            hour,
            time.minute(),
            time.second(),
            if pm { "PM" } else { "AM" }
        ),
        Language::Arabic => to_arabic_digits(&format!(
            "{}/{}/{}، {}:{:02}:{:02} {}",
            time.day(),
            time.month(),
            time.year(),
            hour,
            time.minute(),
            time.second(),
            if pm { "م" } else { "ص" }
        )),
    }
}

/// Replaces ASCII digits with Arabic-Indic digits (U+0660..U+0669).
#[must_use]
pub fn to_arabic_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}
