use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

/// Review state of a motivation. Only `Approved` motivations are visible to the
/// public; any transition is allowed, and only admins can make one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "motivation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MotivationStatus {
    Pending,
    Approved,
    Rejected,
}

impl MotivationStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl Display for MotivationStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MotivationStatus {
    type Error = String;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| format!("Invalid status: {value:?}"))
    }
}

/// The `status` query parameter of the admin listing: either every status, or
/// exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(MotivationStatus),
}

impl StatusFilter {
    /// `None` (parameter absent) means `All`
    pub fn parse(value: Option<&str>) -> Result<Self, String> {
        match value {
            None | Some("all") => Ok(Self::All),
            Some(s) => MotivationStatus::try_from(s).map(Self::Only),
        }
    }

    /// The status to filter on, if any; bound as a nullable query parameter
    pub fn status(&self) -> Option<MotivationStatus> {
        match self {
            Self::All => None,
            Self::Only(s) => Some(*s),
        }
    }
}
