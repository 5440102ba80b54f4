use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use log::debug;

use super::aggregator::compute_counts;
use super::diagnostics::{BadgeDiagnostic, DiagnosticSink};
use super::notifications_model::CountResult;
use super::predicates::{predicate_table, PredicateTable, RecordSource};
use crate::errors::Result;
use crate::records::{RecordScope, RecordSnapshots, RecordSourceTrait};
use crate::viewers::{Viewer, ViewerRepositoryTrait};
use crate::watermarks::{NotificationModule, WatermarkRepositoryTrait};

/// Boundary used by the page handlers.
#[async_trait]
pub trait BadgeServiceTrait: Send + Sync {
    /// Read-only; never fails. Degrades to zero counts on any storage error.
    fn get_notification_counts(&self, viewer_id: &str) -> CountResult;

    /// Sets the module's watermark to now. `false` on storage failure.
    async fn mark_as_viewed(&self, viewer_id: &str, module: NotificationModule) -> bool;

    async fn mark_as_viewed_at(
        &self,
        viewer_id: &str,
        module: NotificationModule,
        viewed_at: NaiveDateTime,
    ) -> bool;
}

pub struct BadgeService {
    viewer_repository: Arc<dyn ViewerRepositoryTrait>,
    watermark_repository: Arc<dyn WatermarkRepositoryTrait>,
    record_source: Arc<dyn RecordSourceTrait>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl BadgeService {
    pub fn new(
        viewer_repository: Arc<dyn ViewerRepositoryTrait>,
        watermark_repository: Arc<dyn WatermarkRepositoryTrait>,
        record_source: Arc<dyn RecordSourceTrait>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        BadgeService {
            viewer_repository,
            watermark_repository,
            record_source,
            diagnostics,
        }
    }

    fn load_viewer(&self, viewer_id: &str) -> Option<Viewer> {
        let reason = match self.viewer_repository.get_viewer(viewer_id) {
            Ok(Some(viewer)) => return Some(viewer),
            Ok(None) => "no such account".to_string(),
            Err(e) => e.to_string(),
        };
        self.diagnostics.report(BadgeDiagnostic::ViewerUnavailable {
            viewer_id: viewer_id.to_string(),
            reason,
        });
        None
    }

    /// Loads every source the table needs. A failed source is left as `None`
    /// and reported against the module it feeds.
    fn load_snapshots(&self, viewer: &Viewer, table: &PredicateTable) -> RecordSnapshots {
        let scope = if table.owner_scoped {
            RecordScope::OwnedBy(viewer.id.as_str())
        } else {
            RecordScope::All
        };
        let mut snapshots = RecordSnapshots::default();

        for source in table.sources() {
            match source {
                RecordSource::Applications => {
                    snapshots.applications = self.settle(
                        viewer,
                        NotificationModule::Applications,
                        self.record_source.load_applications(scope),
                    );
                }
                RecordSource::Concerns => {
                    snapshots.concerns = self.settle(
                        viewer,
                        NotificationModule::Concerns,
                        self.record_source.load_concerns(scope),
                    );
                }
                RecordSource::VerificationCandidates => {
                    snapshots.resident_accounts = self.settle(
                        viewer,
                        NotificationModule::Residents,
                        self.record_source.load_verification_candidates(),
                    );
                }
                RecordSource::Appointments => {
                    snapshots.appointments = self.settle(
                        viewer,
                        NotificationModule::Appointments,
                        self.record_source.load_appointments(scope),
                    );
                }
                RecordSource::PatientRegistrations => {
                    snapshots.patient_registrations = self.settle(
                        viewer,
                        NotificationModule::PatientRegistrations,
                        self.record_source.load_patient_registrations(scope),
                    );
                }
                RecordSource::RegistrationNotifications => {
                    snapshots.registration_notifications = self.settle(
                        viewer,
                        NotificationModule::PatientRegistrations,
                        self.record_source.load_registration_notifications(&viewer.id),
                    );
                }
            }
        }

        snapshots
    }

    fn settle<T>(
        &self,
        viewer: &Viewer,
        module: NotificationModule,
        loaded: Result<Vec<T>>,
    ) -> Option<Vec<T>> {
        match loaded {
            Ok(records) => Some(records),
            Err(e) => {
                self.diagnostics.report(BadgeDiagnostic::SourceUnavailable {
                    viewer_id: viewer.id.clone(),
                    module,
                    reason: e.to_string(),
                });
                None
            }
        }
    }
}

#[async_trait]
impl BadgeServiceTrait for BadgeService {
    fn get_notification_counts(&self, viewer_id: &str) -> CountResult {
        let Some(viewer) = self.load_viewer(viewer_id) else {
            return CountResult::degraded();
        };

        if !viewer.role.is_recognized() {
            self.diagnostics.report(BadgeDiagnostic::UnrecognizedRole {
                viewer_id: viewer.id.clone(),
                role: viewer.role.to_string(),
            });
        }

        let table = predicate_table(viewer.role.view());
        let watermarks = match self.watermark_repository.get_watermarks(&viewer.id) {
            Ok(watermarks) => watermarks,
            Err(e) => {
                self.diagnostics.report(BadgeDiagnostic::WatermarksUnavailable {
                    viewer_id: viewer.id.clone(),
                    reason: e.to_string(),
                });
                return CountResult::zeroed(table.view);
            }
        };

        let snapshots = self.load_snapshots(&viewer, table);
        let counts = compute_counts(&viewer, &snapshots, &watermarks);
        debug!(
            "Computed badge counts for viewer {} ({}): total {}",
            viewer.id,
            viewer.role,
            counts.total()
        );
        counts
    }

    async fn mark_as_viewed(&self, viewer_id: &str, module: NotificationModule) -> bool {
        self.mark_as_viewed_at(viewer_id, module, Utc::now().naive_utc())
            .await
    }

    async fn mark_as_viewed_at(
        &self,
        viewer_id: &str,
        module: NotificationModule,
        viewed_at: NaiveDateTime,
    ) -> bool {
        match self
            .watermark_repository
            .set_watermark(viewer_id, module, viewed_at)
            .await
        {
            Ok(()) => {
                debug!("Viewer {} viewed {} at {}", viewer_id, module, viewed_at);
                true
            }
            Err(e) => {
                self.diagnostics.report(BadgeDiagnostic::WatermarkWriteFailed {
                    viewer_id: viewer_id.to_string(),
                    module,
                    reason: e.to_string(),
                });
                false
            }
        }
    }
}
