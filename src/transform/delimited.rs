//! Ordered string lists carried on the wire as one comma-joined string.

/// Separator between list items on the wire
pub const DELIMITER: &str = ",";

/// Join list items for the wire; an empty list is an absent field.
pub fn join(items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    Some(items.join(DELIMITER))
}

/// Split a wire string back into ordered items.
///
/// Segments are trimmed and blank segments dropped, so both an absent field
/// and `""` produce an empty list.
pub fn split(joined: Option<&str>) -> Vec<String> {
    joined
        .map(|joined| {
            joined
                .split(DELIMITER)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
