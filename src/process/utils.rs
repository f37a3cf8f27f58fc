/// Trim surrounding whitespace from a sheet cell.
pub fn clean_str(raw: &str) -> &str {
    raw.trim()
}

/// Cleaned cell value, or `None` when the cell is missing or blank.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(clean_str).filter(|s| !s.is_empty())
}
