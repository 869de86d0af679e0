/// Prefix the catalog puts on concert dates that are recurring or unconfirmed.
pub const RECURRING_MARKER: char = '*';

/// Reverses the order of the alphanumeric word segments in `input`.
///
/// Separator runs are kept verbatim and move with the segment boundaries, so
/// `23-08-2019` becomes `2019-08-23` and `*23-08-2019` becomes `2019-08-23*`.
/// Applying the function twice yields the original string.
pub fn reverse_words(input: &str) -> String {
    if input.chars().count() <= 1 {
        return input.to_string();
    }

    let mut segments: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut previous: Option<bool> = None;

    for (idx, ch) in input.char_indices() {
        let is_word = ch.is_ascii_alphanumeric();
        if let Some(prev) = previous
            && prev != is_word
        {
            segments.push(&input[start..idx]);
            start = idx;
        }
        previous = Some(is_word);
    }
    segments.push(&input[start..]);

    segments.into_iter().rev().collect()
}

pub fn strip_marker(raw: &str) -> String {
    raw.replace(RECURRING_MARKER, "")
}

/// Sortable key for a raw concert date: `*23-08-2019` -> `2019/08/23`.
pub fn concert_date_key(raw: &str) -> String {
    reverse_words(&strip_marker(raw).replace('-', "/"))
}
