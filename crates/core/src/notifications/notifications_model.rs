//! Count result model.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::notifications::predicates::predicate_table;
use crate::viewers::RoleView;
use crate::watermarks::NotificationModule;

/// Per-module badge counts for one viewer.
///
/// Only the modules of the viewer's view are present. `total` is always the
/// plain sum of the module counts, without deduplication across modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountResult {
    counts: BTreeMap<NotificationModule, u64>,
}

impl CountResult {
    /// All-zero result carrying the modules of `view`.
    pub fn zeroed(view: RoleView) -> Self {
        let counts = predicate_table(view)
            .rules
            .iter()
            .map(|rule| (rule.module, 0))
            .collect();
        CountResult { counts }
    }

    /// Degraded fallback used when the viewer itself cannot be resolved.
    pub fn degraded() -> Self {
        Self::zeroed(RoleView::BarangayStaff)
    }

    /// Count of a module, `None` when the module is not part of this result.
    pub fn get(&self, module: NotificationModule) -> Option<u64> {
        self.counts.get(&module).copied()
    }

    /// Count of a module, zero when absent.
    pub fn count(&self, module: NotificationModule) -> u64 {
        self.get(module).unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    pub fn modules(&self) -> impl Iterator<Item = (NotificationModule, u64)> + '_ {
        self.counts.iter().map(|(module, count)| (*module, *count))
    }

    pub(crate) fn insert(&mut self, module: NotificationModule, count: u64) {
        self.counts.insert(module, count);
    }
}

impl Serialize for CountResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len() + 1))?;
        for (module, count) in &self.counts {
            map.serialize_entry(module.as_str(), count)?;
        }
        map.serialize_entry("total", &self.total())?;
        map.end()
    }
}
