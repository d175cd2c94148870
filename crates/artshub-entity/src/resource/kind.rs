//! Resource kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a bookable resource.
///
/// The kind is descriptive metadata for catalog browsing. Availability
/// and pricing behave identically across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A class or workshop slot with a leader and limited seats.
    Workshop,
    /// Loanable equipment (instruments, PA systems, lighting rigs).
    Equipment,
    /// A physical space such as a studio, gallery, or rehearsal room.
    Space,
    /// A bookable event occurrence.
    Event,
}

impl ResourceKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workshop => "workshop",
            Self::Equipment => "equipment",
            Self::Space => "space",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = artshub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workshop" => Ok(Self::Workshop),
            "equipment" => Ok(Self::Equipment),
            "space" => Ok(Self::Space),
            "event" => Ok(Self::Event),
            _ => Err(artshub_core::AppError::validation(format!(
                "Invalid resource kind: '{s}'. Expected one of: workshop, equipment, space, event"
            ))),
        }
    }
}
