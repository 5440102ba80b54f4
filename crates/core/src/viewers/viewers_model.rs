//! Viewer domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::territory::{resolve_territory, EncoderRole, Territory};

/// Role of the account requesting badge counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ViewerRole {
    Resident,
    /// Umbrella for hall staff and admins.
    BarangayStaff,
    HealthStaff,
    Encoder(EncoderRole),
    /// A role column value the engine does not know. Served with the staff view.
    Unrecognized(String),
}

impl ViewerRole {
    /// Maps the portal's role column to a role. Never fails.
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "resident" => ViewerRole::Resident,
            "barangay_staff" | "barangay_hall" | "admin" => ViewerRole::BarangayStaff,
            "health_staff" | "health_center" => ViewerRole::HealthStaff,
            other => match EncoderRole::from_role_str(other) {
                Some(encoder) => ViewerRole::Encoder(encoder),
                None => ViewerRole::Unrecognized(value.to_string()),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ViewerRole::Resident => "resident",
            ViewerRole::BarangayStaff => "barangay_staff",
            ViewerRole::HealthStaff => "health_staff",
            ViewerRole::Encoder(encoder) => encoder.as_str(),
            ViewerRole::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Which predicate table serves this role.
    pub fn view(&self) -> RoleView {
        match self {
            ViewerRole::Resident => RoleView::Resident,
            ViewerRole::HealthStaff => RoleView::HealthStaff,
            ViewerRole::BarangayStaff | ViewerRole::Encoder(_) | ViewerRole::Unrecognized(_) => {
                RoleView::BarangayStaff
            }
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ViewerRole::Unrecognized(_))
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three portal views a viewer can be served with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleView {
    Resident,
    BarangayStaff,
    HealthStaff,
}

/// Domain model representing the viewer of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub id: String,
    pub role: ViewerRole,
}

impl Viewer {
    pub fn new(id: impl Into<String>, role: ViewerRole) -> Self {
        Viewer {
            id: id.into(),
            role,
        }
    }

    pub fn territory(&self) -> Territory {
        resolve_territory(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(ViewerRole::parse("resident"), ViewerRole::Resident);
        assert_eq!(ViewerRole::parse("barangay_staff"), ViewerRole::BarangayStaff);
        assert_eq!(ViewerRole::parse("barangay_hall"), ViewerRole::BarangayStaff);
        assert_eq!(ViewerRole::parse("Admin"), ViewerRole::BarangayStaff);
        assert_eq!(ViewerRole::parse("health_center"), ViewerRole::HealthStaff);
        assert_eq!(
            ViewerRole::parse(" encoder2 "),
            ViewerRole::Encoder(EncoderRole::Encoder2)
        );
    }

    #[test]
    fn test_parse_unknown_role_keeps_raw_value() {
        let role = ViewerRole::parse("Treasurer");
        assert_eq!(role, ViewerRole::Unrecognized("Treasurer".to_string()));
        assert!(!role.is_recognized());
        assert_eq!(role.view(), RoleView::BarangayStaff);
        assert!(resolve_territory(&role).is_universal());
    }

    #[test]
    fn test_views() {
        assert_eq!(ViewerRole::Resident.view(), RoleView::Resident);
        assert_eq!(ViewerRole::HealthStaff.view(), RoleView::HealthStaff);
        assert_eq!(
            ViewerRole::Encoder(EncoderRole::Encoder3).view(),
            RoleView::BarangayStaff
        );
    }

    #[test]
    fn test_only_encoders_are_restricted() {
        let encoder = Viewer::new("7", ViewerRole::Encoder(EncoderRole::Encoder1));
        assert!(!encoder.territory().is_universal());
        let staff = Viewer::new("8", ViewerRole::BarangayStaff);
        assert!(staff.territory().is_universal());
    }
}
