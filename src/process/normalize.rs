use crate::process::rows::RawRow;
use crate::process::status::ApprovalStatus;
use crate::process::utils::non_blank;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

pub const STATUS_HEADER: &str = "Status";
pub const NAME_HEADER: &str = "Name";
pub const AFFILIATION_HEADER: &str = "Affiliation";
pub const DESCRIPTION_HEADER: &str = "Please describe your project";

/// Spellings of the lab / student org column, highest priority first.
pub const ORGANIZATION_HEADERS: [&str; 4] = [
    "Please indicate the lab or student org you are part of. (If you are part of neither please indicate N/A)",
    "Student Org/Lab",
    "Student Organization",
    "Organization",
];

const CONTENT_HEADERS: [&str; 3] = [NAME_HEADER, AFFILIATION_HEADER, DESCRIPTION_HEADER];

pub const UNTITLED_PROJECT: &str = "Untitled Project";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NOT_SPECIFIED: &str = "Not specified";

/// A display-ready project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    /// Unique within one normalization pass only.
    pub id: String,
    pub name: String,
    pub description: String,
    pub campus: String,
    /// `None` when unknown or "N/A"; never a placeholder.
    pub organization: Option<String>,
}

/// Value of the first key whose cell is non-blank, trimmed.
pub fn first_non_empty<'a>(row: &'a RawRow, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| non_blank(row.get(key)))
}

pub fn is_approved(row: &RawRow) -> bool {
    ApprovalStatus::from_cell(row.get(STATUS_HEADER)).is_approved()
}

/// True when name, affiliation or description carries something besides whitespace.
pub fn has_content(row: &RawRow) -> bool {
    first_non_empty(row, &CONTENT_HEADERS).is_some()
}

pub fn resolve_organization(row: &RawRow) -> Option<String> {
    first_non_empty(row, &ORGANIZATION_HEADERS)
        .filter(|org| !org.eq_ignore_ascii_case("n/a"))
        .map(str::to_string)
}

fn display_or(row: &RawRow, header: &str, placeholder: &str) -> String {
    non_blank(row.get(header)).unwrap_or(placeholder).to_string()
}

/// Keep approved rows with content and map them to project cards, in input order.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<ProjectRecord> {
    normalize_rows_at(rows, Utc::now())
}

/// Same as [`normalize_rows`], stamping identifiers with `now`.
pub fn normalize_rows_at(rows: &[RawRow], now: DateTime<Utc>) -> Vec<ProjectRecord> {
    let stamp = now.timestamp_millis();
    let projects: Vec<ProjectRecord> = rows
        .iter()
        .filter(|row| is_approved(row))
        .filter(|row| has_content(row))
        .enumerate()
        .map(|(index, row)| ProjectRecord {
            id: format!("project-{}-{}", index, stamp),
            name: display_or(row, NAME_HEADER, UNTITLED_PROJECT),
            description: display_or(row, DESCRIPTION_HEADER, NO_DESCRIPTION),
            campus: display_or(row, AFFILIATION_HEADER, NOT_SPECIFIED),
            organization: resolve_organization(row),
        })
        .collect();

    debug!(input = rows.len(), kept = projects.len(), "normalized rows");
    projects
}
