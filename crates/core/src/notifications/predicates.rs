//! Role-dispatched predicate tables.
//!
//! Every view is a static table of modules, each with the list of
//! predicates whose matches are summed into the module count.

use crate::viewers::RoleView;
use crate::watermarks::NotificationModule;

/// A single counting rule. Each predicate feeds exactly one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountPredicate {
    /// Pending applications, against creation time.
    NewApplication,
    /// Processing or approved applications, against update/processed time.
    ApplicationUpdate,
    /// Pending concerns, against creation time.
    NewConcern,
    /// Processing or resolved concerns, against update/processed time.
    ConcernUpdate,
    /// Own concerns that were acted on or answered, against creation time.
    ConcernResponse,
    /// Unverified resident accounts with both documents uploaded.
    PendingVerification,
    /// Scheduled appointments, against creation time.
    NewAppointment,
    /// Pending patient registrations, against creation time.
    NewPatientRegistration,
    /// Own unread registration notifications, against creation time.
    UnreadRegistrationNotice,
}

/// The record query a predicate reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordSource {
    Applications,
    Concerns,
    VerificationCandidates,
    Appointments,
    PatientRegistrations,
    RegistrationNotifications,
}

impl CountPredicate {
    pub fn module(&self) -> NotificationModule {
        match self {
            CountPredicate::NewApplication | CountPredicate::ApplicationUpdate => {
                NotificationModule::Applications
            }
            CountPredicate::NewConcern
            | CountPredicate::ConcernUpdate
            | CountPredicate::ConcernResponse => NotificationModule::Concerns,
            CountPredicate::PendingVerification => NotificationModule::Residents,
            CountPredicate::NewAppointment => NotificationModule::Appointments,
            CountPredicate::NewPatientRegistration | CountPredicate::UnreadRegistrationNotice => {
                NotificationModule::PatientRegistrations
            }
        }
    }

    pub fn source(&self) -> RecordSource {
        match self {
            CountPredicate::NewApplication | CountPredicate::ApplicationUpdate => {
                RecordSource::Applications
            }
            CountPredicate::NewConcern
            | CountPredicate::ConcernUpdate
            | CountPredicate::ConcernResponse => RecordSource::Concerns,
            CountPredicate::PendingVerification => RecordSource::VerificationCandidates,
            CountPredicate::NewAppointment => RecordSource::Appointments,
            CountPredicate::NewPatientRegistration => RecordSource::PatientRegistrations,
            CountPredicate::UnreadRegistrationNotice => RecordSource::RegistrationNotifications,
        }
    }
}

/// One badge of a view. An empty predicate list reports a constant zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRule {
    pub module: NotificationModule,
    pub predicates: &'static [CountPredicate],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateTable {
    pub view: RoleView,
    /// Only records owned by the viewer are counted.
    pub owner_scoped: bool,
    pub rules: &'static [ModuleRule],
}

impl PredicateTable {
    /// Distinct record queries needed to evaluate this table.
    pub fn sources(&self) -> Vec<RecordSource> {
        let mut sources: Vec<RecordSource> = self
            .rules
            .iter()
            .flat_map(|rule| rule.predicates.iter().map(|p| p.source()))
            .collect();
        sources.sort();
        sources.dedup();
        sources
    }
}

static BARANGAY_STAFF_TABLE: PredicateTable = PredicateTable {
    view: RoleView::BarangayStaff,
    owner_scoped: false,
    rules: &[
        ModuleRule {
            module: NotificationModule::Applications,
            predicates: &[
                CountPredicate::NewApplication,
                CountPredicate::ApplicationUpdate,
            ],
        },
        ModuleRule {
            module: NotificationModule::Concerns,
            predicates: &[CountPredicate::NewConcern, CountPredicate::ConcernUpdate],
        },
        ModuleRule {
            module: NotificationModule::Residents,
            predicates: &[CountPredicate::PendingVerification],
        },
    ],
};

static HEALTH_STAFF_TABLE: PredicateTable = PredicateTable {
    view: RoleView::HealthStaff,
    owner_scoped: false,
    rules: &[
        ModuleRule {
            module: NotificationModule::Applications,
            predicates: &[],
        },
        ModuleRule {
            module: NotificationModule::Concerns,
            predicates: &[],
        },
        ModuleRule {
            module: NotificationModule::Residents,
            predicates: &[],
        },
        ModuleRule {
            module: NotificationModule::Appointments,
            predicates: &[CountPredicate::NewAppointment],
        },
        ModuleRule {
            module: NotificationModule::PatientRegistrations,
            predicates: &[CountPredicate::NewPatientRegistration],
        },
    ],
};

static RESIDENT_TABLE: PredicateTable = PredicateTable {
    view: RoleView::Resident,
    owner_scoped: true,
    rules: &[
        ModuleRule {
            module: NotificationModule::Applications,
            predicates: &[CountPredicate::ApplicationUpdate],
        },
        ModuleRule {
            module: NotificationModule::Concerns,
            predicates: &[
                CountPredicate::ConcernResponse,
                CountPredicate::ConcernUpdate,
            ],
        },
        ModuleRule {
            module: NotificationModule::Residents,
            predicates: &[],
        },
        ModuleRule {
            module: NotificationModule::PatientRegistrations,
            predicates: &[CountPredicate::UnreadRegistrationNotice],
        },
    ],
};

pub fn predicate_table(view: RoleView) -> &'static PredicateTable {
    match view {
        RoleView::BarangayStaff => &BARANGAY_STAFF_TABLE,
        RoleView::HealthStaff => &HEALTH_STAFF_TABLE,
        RoleView::Resident => &RESIDENT_TABLE,
    }
}
