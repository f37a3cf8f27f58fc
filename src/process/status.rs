/// Review status of a submitted project, as written in the `Status` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApprovalStatus {
    Approved,
    /// Anything else: pending, rejected, blank, or missing.
    Other,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Other => "other",
        }
    }

    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell.map(|s| s.to_lowercase()) {
            Some(s) if s.trim() == "approved" => ApprovalStatus::Approved,
            _ => ApprovalStatus::Other,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ApprovalStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cell() {
        for raw in ["approved", "Approved", " APPROVED ", "\tapproved\n"] {
            assert_eq!(ApprovalStatus::from_cell(Some(raw)), ApprovalStatus::Approved, "{raw:?}");
        }
        for raw in ["pending", "", "  ", "not approved", "approved!", "rejected"] {
            assert_eq!(ApprovalStatus::from_cell(Some(raw)), ApprovalStatus::Other, "{raw:?}");
        }
        assert_eq!(ApprovalStatus::from_cell(None), ApprovalStatus::Other);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(ApprovalStatus::Approved.as_str(), "approved");
        assert!(!ApprovalStatus::Other.is_approved());
    }
}
