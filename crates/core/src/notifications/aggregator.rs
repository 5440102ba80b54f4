use chrono::NaiveDateTime;

use super::notifications_model::CountResult;
use super::predicates::{predicate_table, CountPredicate};
use crate::records::{
    ApplicationStatus, AppointmentStatus, ConcernStatus, RecordSnapshots, RegistrationStatus,
};
use crate::territory::Territory;
use crate::viewers::{Viewer, ViewerRole};
use crate::watermarks::WatermarkSet;

/// Evaluation context shared by the predicates of one module.
struct ModuleScope<'a> {
    viewer_id: &'a str,
    owner_scoped: bool,
    territory: Territory,
    watermark: Option<NaiveDateTime>,
}

impl ModuleScope<'_> {
    fn owns(&self, owner_id: &str) -> bool {
        !self.owner_scoped || owner_id == self.viewer_id
    }

    fn in_territory(&self, street: Option<&str>) -> bool {
        match self.territory {
            Territory::Universal => true,
            restricted => restricted.admits(street),
        }
    }

    /// Strictly after the watermark; everything matches when never viewed.
    fn after(&self, at: NaiveDateTime) -> bool {
        self.watermark.map_or(true, |w| at > w)
    }

    /// Either timestamp strictly after the watermark. Missing timestamps never match.
    fn changed_after(
        &self,
        processed_at: Option<NaiveDateTime>,
        updated_at: Option<NaiveDateTime>,
    ) -> bool {
        match self.watermark {
            None => true,
            Some(w) => processed_at.is_some_and(|t| t > w) || updated_at.is_some_and(|t| t > w),
        }
    }
}

/// Computes the badge counts of `viewer`.
///
/// Pure: no I/O. A module whose snapshot is `None` counts zero. Within a
/// module the predicate matches are summed, so a record satisfying two
/// predicates is counted twice.
pub fn compute_counts(
    viewer: &Viewer,
    snapshots: &RecordSnapshots,
    watermarks: &WatermarkSet,
) -> CountResult {
    let table = predicate_table(viewer.role.view());
    let territory = viewer.territory();
    let mut result = CountResult::default();

    for rule in table.rules {
        let scope = ModuleScope {
            viewer_id: &viewer.id,
            owner_scoped: table.owner_scoped,
            territory: if rule.module.is_territory_filtered() {
                territory
            } else {
                Territory::Universal
            },
            watermark: watermarks.get(rule.module),
        };

        let count = rule
            .predicates
            .iter()
            .map(|predicate| count_matches(*predicate, &scope, snapshots))
            .fold(0u64, u64::saturating_add);

        result.insert(rule.module, count);
    }

    result
}

fn count_matches(
    predicate: CountPredicate,
    scope: &ModuleScope<'_>,
    snapshots: &RecordSnapshots,
) -> u64 {
    let matched = match predicate {
        CountPredicate::NewApplication => snapshots.applications.as_deref().map(|records| {
            records
                .iter()
                .filter(|a| a.status == ApplicationStatus::Pending)
                .filter(|a| scope.owns(&a.applicant_id))
                .filter(|a| scope.in_territory(a.street.as_deref()))
                .filter(|a| scope.after(a.created_at))
                .count()
        }),
        CountPredicate::ApplicationUpdate => snapshots.applications.as_deref().map(|records| {
            records
                .iter()
                .filter(|a| {
                    matches!(
                        a.status,
                        ApplicationStatus::Processing | ApplicationStatus::Approved
                    )
                })
                .filter(|a| scope.owns(&a.applicant_id))
                .filter(|a| scope.in_territory(a.street.as_deref()))
                .filter(|a| scope.changed_after(a.processed_at, a.updated_at))
                .count()
        }),
        CountPredicate::NewConcern => snapshots.concerns.as_deref().map(|records| {
            records
                .iter()
                .filter(|c| c.status == ConcernStatus::Pending)
                .filter(|c| scope.owns(&c.reporter_id))
                .filter(|c| scope.after(c.created_at))
                .count()
        }),
        CountPredicate::ConcernUpdate => snapshots.concerns.as_deref().map(|records| {
            records
                .iter()
                .filter(|c| {
                    matches!(
                        c.status,
                        ConcernStatus::Processing | ConcernStatus::Resolved
                    )
                })
                .filter(|c| scope.owns(&c.reporter_id))
                .filter(|c| scope.changed_after(c.processed_at, c.updated_at))
                .count()
        }),
        CountPredicate::ConcernResponse => snapshots.concerns.as_deref().map(|records| {
            records
                .iter()
                .filter(|c| c.status != ConcernStatus::Pending || c.has_admin_response())
                .filter(|c| scope.owns(&c.reporter_id))
                .filter(|c| scope.after(c.created_at))
                .count()
        }),
        CountPredicate::PendingVerification => {
            snapshots.resident_accounts.as_deref().map(|records| {
                records
                    .iter()
                    .filter(|r| r.role == ViewerRole::Resident)
                    .filter(|r| !r.account_verified)
                    .filter(|r| r.has_required_documents())
                    .filter(|r| scope.in_territory(r.street.as_deref()))
                    .filter(|r| scope.after(r.created_at))
                    .count()
            })
        }
        CountPredicate::NewAppointment => snapshots.appointments.as_deref().map(|records| {
            records
                .iter()
                .filter(|a| a.status == AppointmentStatus::Scheduled)
                .filter(|a| scope.owns(&a.patient_id))
                .filter(|a| scope.after(a.created_at))
                .count()
        }),
        CountPredicate::NewPatientRegistration => {
            snapshots.patient_registrations.as_deref().map(|records| {
                records
                    .iter()
                    .filter(|r| r.status == RegistrationStatus::Pending)
                    .filter(|r| scope.owns(&r.patient_id))
                    .filter(|r| scope.after(r.created_at))
                    .count()
            })
        }
        CountPredicate::UnreadRegistrationNotice => {
            snapshots.registration_notifications.as_deref().map(|records| {
                records
                    .iter()
                    .filter(|n| !n.is_read)
                    .filter(|n| n.recipient_id == scope.viewer_id)
                    .filter(|n| scope.after(n.created_at))
                    .count()
            })
        }
    };

    matched.unwrap_or(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{
        ApplicationRecord, AppointmentRecord, ConcernRecord, PatientRegistrationRecord,
        RegistrationNotificationRecord, ResidentAccountRecord,
    };
    use crate::territory::EncoderRole;
    use crate::watermarks::NotificationModule;
    use chrono::{Duration, NaiveDate};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn application(
        id: &str,
        status: ApplicationStatus,
        street: Option<&str>,
        created_at: NaiveDateTime,
    ) -> ApplicationRecord {
        ApplicationRecord {
            id: id.to_string(),
            applicant_id: format!("applicant-{}", id),
            status,
            street: street.map(str::to_string),
            created_at,
            updated_at: None,
            processed_at: None,
        }
    }

    fn concern(id: &str, status: ConcernStatus, created_at: NaiveDateTime) -> ConcernRecord {
        ConcernRecord {
            id: id.to_string(),
            reporter_id: "resident-1".to_string(),
            status,
            admin_response: None,
            created_at,
            updated_at: None,
            processed_at: None,
        }
    }

    fn candidate(id: &str, street: &str, created_at: NaiveDateTime) -> ResidentAccountRecord {
        ResidentAccountRecord {
            id: id.to_string(),
            role: ViewerRole::Resident,
            account_verified: false,
            purok_endorsement: Some("endorsement.jpg".to_string()),
            valid_id: Some("id.jpg".to_string()),
            street: Some(street.to_string()),
            created_at,
        }
    }

    fn staff() -> Viewer {
        Viewer::new("staff-1", ViewerRole::BarangayStaff)
    }

    #[test]
    fn test_never_viewed_counts_every_pending_application() {
        let snapshots = RecordSnapshots {
            applications: Some(vec![
                application("1", ApplicationStatus::Pending, None, t0()),
                application("2", ApplicationStatus::Pending, None, t0()),
                application("3", ApplicationStatus::Pending, None, t0()),
            ]),
            concerns: Some(vec![]),
            resident_accounts: Some(vec![]),
            ..Default::default()
        };

        let result = compute_counts(&staff(), &snapshots, &WatermarkSet::new());
        assert_eq!(result.count(NotificationModule::Applications), 3);
        assert_eq!(result.count(NotificationModule::Concerns), 0);
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn test_watermark_hides_older_pending_application() {
        let snapshots = RecordSnapshots {
            applications: Some(vec![application(
                "1",
                ApplicationStatus::Pending,
                None,
                t0() - Duration::seconds(1),
            )]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Applications, t0());

        let result = compute_counts(&staff(), &snapshots, &watermarks);
        assert_eq!(result.count(NotificationModule::Applications), 0);
    }

    #[test]
    fn test_approval_after_watermark_counts_once() {
        let mut approved =
            application("1", ApplicationStatus::Approved, None, t0() - Duration::seconds(1));
        approved.processed_at = Some(t0() + Duration::seconds(1));
        let snapshots = RecordSnapshots {
            applications: Some(vec![approved]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Applications, t0());

        let result = compute_counts(&staff(), &snapshots, &watermarks);
        assert_eq!(result.count(NotificationModule::Applications), 1);
    }

    #[test]
    fn test_update_matches_on_updated_at_alone() {
        let mut processing =
            application("1", ApplicationStatus::Processing, None, t0() - Duration::hours(2));
        processing.updated_at = Some(t0() + Duration::minutes(5));
        let snapshots = RecordSnapshots {
            applications: Some(vec![processing]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Applications, t0());

        let result = compute_counts(&staff(), &snapshots, &watermarks);
        assert_eq!(result.count(NotificationModule::Applications), 1);
    }

    #[test]
    fn test_watermark_equal_to_timestamp_is_not_new() {
        let snapshots = RecordSnapshots {
            applications: Some(vec![application(
                "1",
                ApplicationStatus::Pending,
                None,
                t0(),
            )]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Applications, t0());

        let result = compute_counts(&staff(), &snapshots, &watermarks);
        assert_eq!(result.count(NotificationModule::Applications), 0);
    }

    #[test]
    fn test_never_viewed_counts_new_and_updated_predicates_together() {
        let mut processing =
            application("2", ApplicationStatus::Processing, None, t0() + Duration::hours(1));
        processing.processed_at = Some(t0() + Duration::hours(2));
        let snapshots = RecordSnapshots {
            applications: Some(vec![
                application("1", ApplicationStatus::Pending, None, t0()),
                processing,
                application("3", ApplicationStatus::Rejected, None, t0()),
            ]),
            ..Default::default()
        };

        let result = compute_counts(&staff(), &snapshots, &WatermarkSet::new());
        // one pending (new) + one processing (updated); rejected matches neither
        assert_eq!(result.count(NotificationModule::Applications), 2);
    }

    #[test]
    fn test_encoder_sees_only_own_streets() {
        let encoder = Viewer::new("enc-1", ViewerRole::Encoder(EncoderRole::Encoder1));
        let snapshots = RecordSnapshots {
            applications: Some(vec![
                application("1", ApplicationStatus::Pending, Some("Aaron"), t0()),
                application("2", ApplicationStatus::Pending, Some("Zabarte Rd"), t0()),
                application("3", ApplicationStatus::Pending, None, t0()),
            ]),
            resident_accounts: Some(vec![
                candidate("r1", "Aaron", t0()),
                candidate("r2", "Zabarte Rd", t0()),
            ]),
            concerns: Some(vec![concern("c1", ConcernStatus::Pending, t0())]),
            ..Default::default()
        };

        let result = compute_counts(&encoder, &snapshots, &WatermarkSet::new());
        assert_eq!(result.count(NotificationModule::Applications), 1);
        assert_eq!(result.count(NotificationModule::Residents), 1);
        // concerns are not territory filtered
        assert_eq!(result.count(NotificationModule::Concerns), 1);

        let result = compute_counts(&staff(), &snapshots, &WatermarkSet::new());
        assert_eq!(result.count(NotificationModule::Applications), 3);
        assert_eq!(result.count(NotificationModule::Residents), 2);
    }

    #[test]
    fn test_concern_watermark_window() {
        let t1 = t0();
        let snapshots = RecordSnapshots {
            concerns: Some(vec![
                concern("old", ConcernStatus::Pending, t1 - Duration::hours(1)),
                concern("new", ConcernStatus::Pending, t1 + Duration::hours(1)),
            ]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Concerns, t1);

        let result = compute_counts(&staff(), &snapshots, &watermarks);
        assert_eq!(result.count(NotificationModule::Concerns), 1);
    }

    #[test]
    fn test_in_progress_concern_counts_as_update() {
        let mut in_progress = concern("c1", ConcernStatus::parse("In-Progress"), t0());
        in_progress.updated_at = Some(t0() + Duration::minutes(1));
        let snapshots = RecordSnapshots {
            concerns: Some(vec![in_progress]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Concerns, t0());

        let result = compute_counts(&staff(), &snapshots, &watermarks);
        assert_eq!(result.count(NotificationModule::Concerns), 1);
    }

    #[test]
    fn test_verification_queue_requires_documents_and_unverified_residents() {
        let mut verified = candidate("r2", "Aaron", t0());
        verified.account_verified = true;
        let mut missing_id = candidate("r3", "Aaron", t0());
        missing_id.valid_id = None;
        let mut staff_account = candidate("r4", "Aaron", t0());
        staff_account.role = ViewerRole::HealthStaff;
        let snapshots = RecordSnapshots {
            resident_accounts: Some(vec![
                candidate("r1", "Aaron", t0()),
                verified,
                missing_id,
                staff_account,
            ]),
            ..Default::default()
        };

        let result = compute_counts(&staff(), &snapshots, &WatermarkSet::new());
        assert_eq!(result.count(NotificationModule::Residents), 1);
    }

    #[test]
    fn test_health_staff_view() {
        let viewer = Viewer::new("hs-1", ViewerRole::HealthStaff);
        let snapshots = RecordSnapshots {
            appointments: Some(vec![
                AppointmentRecord {
                    id: "a1".to_string(),
                    patient_id: "p1".to_string(),
                    status: AppointmentStatus::Scheduled,
                    created_at: t0(),
                    updated_at: None,
                },
                AppointmentRecord {
                    id: "a2".to_string(),
                    patient_id: "p2".to_string(),
                    status: AppointmentStatus::Completed,
                    created_at: t0(),
                    updated_at: None,
                },
            ]),
            patient_registrations: Some(vec![PatientRegistrationRecord {
                id: "pr1".to_string(),
                patient_id: "p1".to_string(),
                status: RegistrationStatus::Pending,
                created_at: t0(),
                updated_at: None,
            }]),
            applications: Some(vec![application("1", ApplicationStatus::Pending, None, t0())]),
            ..Default::default()
        };

        let result = compute_counts(&viewer, &snapshots, &WatermarkSet::new());
        assert_eq!(result.get(NotificationModule::Applications), Some(0));
        assert_eq!(result.get(NotificationModule::Concerns), Some(0));
        assert_eq!(result.get(NotificationModule::Residents), Some(0));
        assert_eq!(result.get(NotificationModule::Appointments), Some(1));
        assert_eq!(result.get(NotificationModule::PatientRegistrations), Some(1));
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn test_resident_view_counts_only_own_records() {
        let viewer = Viewer::new("resident-1", ViewerRole::Resident);
        let mut own = application("1", ApplicationStatus::Approved, None, t0());
        own.applicant_id = "resident-1".to_string();
        own.processed_at = Some(t0() + Duration::hours(1));
        let mut own_pending = application("2", ApplicationStatus::Pending, None, t0());
        own_pending.applicant_id = "resident-1".to_string();
        let mut other = application("3", ApplicationStatus::Approved, None, t0());
        other.processed_at = Some(t0() + Duration::hours(1));

        let mut answered = concern("c1", ConcernStatus::Pending, t0() + Duration::hours(1));
        answered.admin_response = Some("Scheduled for repair".to_string());
        answered.updated_at = Some(t0() + Duration::hours(3));
        let untouched = concern("c2", ConcernStatus::Pending, t0());
        let mut someone_elses = concern("c3", ConcernStatus::Resolved, t0());
        someone_elses.reporter_id = "resident-2".to_string();

        let snapshots = RecordSnapshots {
            applications: Some(vec![own, own_pending, other]),
            concerns: Some(vec![answered, untouched, someone_elses]),
            registration_notifications: Some(vec![
                RegistrationNotificationRecord {
                    id: "n1".to_string(),
                    recipient_id: "resident-1".to_string(),
                    registration_id: Some("pr1".to_string()),
                    is_read: false,
                    created_at: t0(),
                },
                RegistrationNotificationRecord {
                    id: "n2".to_string(),
                    recipient_id: "resident-1".to_string(),
                    registration_id: Some("pr1".to_string()),
                    is_read: true,
                    created_at: t0(),
                },
            ]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Concerns, t0());

        let result = compute_counts(&viewer, &snapshots, &watermarks);
        assert_eq!(result.get(NotificationModule::Applications), Some(1));
        assert_eq!(result.get(NotificationModule::Concerns), Some(1));
        assert_eq!(result.get(NotificationModule::Residents), Some(0));
        assert_eq!(result.get(NotificationModule::PatientRegistrations), Some(1));
        assert_eq!(result.get(NotificationModule::Appointments), None);
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn test_resident_concern_new_and_update_are_summed() {
        let viewer = Viewer::new("resident-1", ViewerRole::Resident);
        let w = t0();

        // Filed and resolved after the last visit: counted once per rule.
        let mut resolved = concern("c1", ConcernStatus::Resolved, w + Duration::hours(1));
        resolved.admin_response = Some("Fixed the streetlight".to_string());
        resolved.updated_at = Some(w + Duration::hours(2));

        let snapshots = RecordSnapshots {
            concerns: Some(vec![resolved]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Concerns, w);

        let result = compute_counts(&viewer, &snapshots, &watermarks);
        assert_eq!(result.count(NotificationModule::Concerns), 2);
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn test_resident_answered_old_pending_concern_is_not_new() {
        let viewer = Viewer::new("resident-1", ViewerRole::Resident);
        let w = t0();

        // Answered after the last visit, but filed before it and still pending.
        let mut answered = concern("c1", ConcernStatus::Pending, w - Duration::hours(5));
        answered.admin_response = Some("We will send someone".to_string());
        answered.updated_at = Some(w + Duration::hours(1));

        let snapshots = RecordSnapshots {
            concerns: Some(vec![answered]),
            ..Default::default()
        };
        let watermarks = WatermarkSet::new().with(NotificationModule::Concerns, w);

        let result = compute_counts(&viewer, &snapshots, &watermarks);
        assert_eq!(result.count(NotificationModule::Concerns), 0);
    }

    #[test]
    fn test_missing_snapshot_counts_zero() {
        let snapshots = RecordSnapshots {
            applications: None,
            concerns: Some(vec![concern("c1", ConcernStatus::Pending, t0())]),
            resident_accounts: None,
            ..Default::default()
        };

        let result = compute_counts(&staff(), &snapshots, &WatermarkSet::new());
        assert_eq!(result.get(NotificationModule::Applications), Some(0));
        assert_eq!(result.get(NotificationModule::Concerns), Some(1));
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn test_unrecognized_role_uses_staff_view_without_territory() {
        let viewer = Viewer::new("x", ViewerRole::Unrecognized("kagawad".to_string()));
        let snapshots = RecordSnapshots {
            applications: Some(vec![
                application("1", ApplicationStatus::Pending, Some("Aaron"), t0()),
                application("2", ApplicationStatus::Pending, Some("Zenia"), t0()),
            ]),
            ..Default::default()
        };

        let result = compute_counts(&viewer, &snapshots, &WatermarkSet::new());
        assert_eq!(result.count(NotificationModule::Applications), 2);
        assert!(result.get(NotificationModule::Residents).is_some());
    }
}
