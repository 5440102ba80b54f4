//! Domain record snapshots consumed by the badge engine.
//!
//! The records are owned by the surrounding portal; the engine only reads
//! statuses, timestamps and street attributes from them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::viewers::ViewerRole;

/// Lowercases and folds `-`/space separators so `In-Progress`, `in progress`
/// and `in_progress` compare equal.
fn normalize_status(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Declares a status enum backed by the portal's free-text status column.
/// Unknown values are kept in `Other` and never match a status predicate.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => [$canonical:literal $(, $alias:literal)*]),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn parse(raw: &str) -> Self {
                match normalize_status(raw).as_str() {
                    $($canonical $(| $alias)* => $name::$variant,)+
                    _ => $name::Other(raw.to_string()),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $canonical,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                $name::parse(&raw)
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> Self {
                status.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum! {
    /// Status of a barangay service application.
    ApplicationStatus {
        Pending => ["pending"],
        Processing => ["processing", "in_progress"],
        Approved => ["approved"],
        ReadyForPickup => ["ready_for_pickup"],
        Completed => ["completed"],
        Rejected => ["rejected"],
    }
}

status_enum! {
    /// Status of a community concern.
    ConcernStatus {
        Pending => ["pending"],
        Processing => ["processing", "in_progress"],
        Resolved => ["resolved"],
        Closed => ["closed"],
    }
}

status_enum! {
    /// Status of a health-center appointment.
    AppointmentStatus {
        Scheduled => ["scheduled"],
        Confirmed => ["confirmed"],
        Completed => ["completed"],
        Cancelled => ["cancelled", "canceled"],
    }
}

status_enum! {
    /// Status of a patient registration.
    RegistrationStatus {
        Pending => ["pending"],
        Approved => ["approved"],
        Rejected => ["rejected"],
    }
}

/// A service application. `street` is the applicant's street.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    pub applicant_id: String,
    pub status: ApplicationStatus,
    pub street: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub processed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernRecord {
    pub id: String,
    pub reporter_id: String,
    pub status: ConcernStatus,
    pub admin_response: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub processed_at: Option<NaiveDateTime>,
}

impl ConcernRecord {
    pub fn has_admin_response(&self) -> bool {
        self.admin_response
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty())
    }
}

/// An account row considered for the verification queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentAccountRecord {
    pub id: String,
    pub role: ViewerRole,
    pub account_verified: bool,
    pub purok_endorsement: Option<String>,
    pub valid_id: Option<String>,
    pub street: Option<String>,
    pub created_at: NaiveDateTime,
}

impl ResidentAccountRecord {
    /// Both the purok endorsement and the valid id have been uploaded.
    pub fn has_required_documents(&self) -> bool {
        let present = |doc: &Option<String>| doc.as_deref().is_some_and(|d| !d.trim().is_empty());
        present(&self.purok_endorsement) && present(&self.valid_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub id: String,
    pub patient_id: String,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRegistrationRecord {
    pub id: String,
    pub patient_id: String,
    pub status: RegistrationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Message sent to a resident when their patient registration changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationNotificationRecord {
    pub id: String,
    pub recipient_id: String,
    pub registration_id: Option<String>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

/// Snapshots handed to the aggregator. `None` means the module's source was
/// not loaded or could not be read; such a module counts as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSnapshots {
    pub applications: Option<Vec<ApplicationRecord>>,
    pub concerns: Option<Vec<ConcernRecord>>,
    pub resident_accounts: Option<Vec<ResidentAccountRecord>>,
    pub appointments: Option<Vec<AppointmentRecord>>,
    pub patient_registrations: Option<Vec<PatientRegistrationRecord>>,
    pub registration_notifications: Option<Vec<RegistrationNotificationRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!(ConcernStatus::parse("Pending"), ConcernStatus::Pending);
        assert_eq!(ConcernStatus::parse("In-Progress"), ConcernStatus::Processing);
        assert_eq!(ConcernStatus::parse("in progress"), ConcernStatus::Processing);
        assert_eq!(
            ApplicationStatus::parse("READY_FOR_PICKUP"),
            ApplicationStatus::ReadyForPickup
        );
        assert_eq!(
            AppointmentStatus::parse("canceled"),
            AppointmentStatus::Cancelled
        );
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = ApplicationStatus::parse("On Hold");
        assert_eq!(status, ApplicationStatus::Other("On Hold".to_string()));
        assert_eq!(status.as_str(), "On Hold");
    }

    #[test]
    fn test_status_serializes_as_plain_string() {
        let json = serde_json::to_string(&ApplicationStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let back: ConcernStatus = serde_json::from_str("\"Resolved\"").unwrap();
        assert_eq!(back, ConcernStatus::Resolved);
    }

    #[test]
    fn test_required_documents() {
        let mut account = ResidentAccountRecord {
            id: "1".to_string(),
            role: ViewerRole::Resident,
            account_verified: false,
            purok_endorsement: Some("endorsement.pdf".to_string()),
            valid_id: Some("   ".to_string()),
            street: None,
            created_at: chrono::NaiveDateTime::default(),
        };
        assert!(!account.has_required_documents());
        account.valid_id = Some("id.png".to_string());
        assert!(account.has_required_documents());
        account.purok_endorsement = None;
        assert!(!account.has_required_documents());
    }

    #[test]
    fn test_admin_response_must_be_non_blank() {
        let mut concern = ConcernRecord {
            id: "c1".to_string(),
            reporter_id: "r1".to_string(),
            status: ConcernStatus::Pending,
            admin_response: Some(String::new()),
            created_at: chrono::NaiveDateTime::default(),
            updated_at: None,
            processed_at: None,
        };
        assert!(!concern.has_admin_response());
        concern.admin_response = Some("We sent a crew.".to_string());
        assert!(concern.has_admin_response());
    }
}
