use serde::{Deserialize, Serialize};

/// Which side of a pending email change a confirmation token belongs to.
///
/// `Old` proves control of the current address, `New` proves control of the
/// candidate address. Always dispatched through an explicit match, never a
/// computed field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailChangeSide {
    Old,
    New,
}

impl EmailChangeSide {
    pub fn other(self) -> Self {
        match self {
            Self::Old => Self::New,
            Self::New => Self::Old,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }
}

/// Result of confirming one side of a pending email change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailChangeOutcome {
    /// This was the first of the two confirmations; the change stays pending
    /// until the named side also confirms.
    Pending { awaiting: EmailChangeSide },
    /// Both sides have confirmed and the new address has been promoted.
    Completed,
}
