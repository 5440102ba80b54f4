//! Watermark domain models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// A portal page that carries a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationModule {
    Applications,
    Concerns,
    Residents,
    Appointments,
    PatientRegistrations,
}

impl NotificationModule {
    pub const ALL: [NotificationModule; 5] = [
        NotificationModule::Applications,
        NotificationModule::Concerns,
        NotificationModule::Residents,
        NotificationModule::Appointments,
        NotificationModule::PatientRegistrations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationModule::Applications => "applications",
            NotificationModule::Concerns => "concerns",
            NotificationModule::Residents => "residents",
            NotificationModule::Appointments => "appointments",
            NotificationModule::PatientRegistrations => "patient_registrations",
        }
    }

    /// Modules whose records are scoped by the viewer's territory.
    pub fn is_territory_filtered(&self) -> bool {
        matches!(
            self,
            NotificationModule::Applications | NotificationModule::Residents
        )
    }
}

impl fmt::Display for NotificationModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationModule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "applications" => Ok(NotificationModule::Applications),
            "concerns" | "community_concerns" => Ok(NotificationModule::Concerns),
            "residents" => Ok(NotificationModule::Residents),
            "appointments" => Ok(NotificationModule::Appointments),
            "patient_registrations" | "medical_records" => {
                Ok(NotificationModule::PatientRegistrations)
            }
            _ => Err(Error::Validation(ValidationError::UnknownModule(
                s.to_string(),
            ))),
        }
    }
}

/// All watermarks of one viewer. A missing module means "never viewed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkSet {
    marks: BTreeMap<NotificationModule, NaiveDateTime>,
}

impl WatermarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, module: NotificationModule) -> Option<NaiveDateTime> {
        self.marks.get(&module).copied()
    }

    /// Last write wins; no monotonicity check.
    pub fn set(&mut self, module: NotificationModule, viewed_at: NaiveDateTime) {
        self.marks.insert(module, viewed_at);
    }

    pub fn with(mut self, module: NotificationModule, viewed_at: NaiveDateTime) -> Self {
        self.set(module, viewed_at);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NotificationModule, NaiveDateTime)> + '_ {
        self.marks.iter().map(|(module, at)| (*module, *at))
    }
}

impl FromIterator<(NotificationModule, NaiveDateTime)> for WatermarkSet {
    fn from_iter<I: IntoIterator<Item = (NotificationModule, NaiveDateTime)>>(iter: I) -> Self {
        let mut set = WatermarkSet::new();
        for (module, viewed_at) in iter {
            set.set(module, viewed_at);
        }
        set
    }
}
