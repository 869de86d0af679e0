//! Location Formatting
//!
//! Raw tokens look like `los_angeles-usa`: `_` joins words, `-` separates the
//! city from the region/country. Display names look like `Los Angeles, USA`.

/// Whole-segment corrections applied after capitalization.
const SEGMENT_CORRECTIONS: &[(&str, &str)] = &[
    ("Usa", "USA"),
    ("Uk", "UK"),
    ("Netherlands Antilles", "Curacao"),
];

pub fn format_location(raw: &str) -> String {
    raw.split('-')
        .map(|segment| {
            let segment = capitalize_words(&segment.replace('_', " "));
            SEGMENT_CORRECTIONS
                .iter()
                .find(|(from, _)| *from == segment)
                .map(|(_, to)| to.to_string())
                .unwrap_or(segment)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Uppercases the first character of every whitespace-separated word.
pub fn capitalize_words(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if at_word_start {
            result.extend(ch.to_uppercase());
        } else {
            result.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }

    result
}

/// Query-string form of a display name: `New York, USA` -> `New%20York%2CUSA`.
pub fn to_uri_component(formatted: &str) -> String {
    urlencoding::encode(&formatted.replace(", ", ",")).into_owned()
}
