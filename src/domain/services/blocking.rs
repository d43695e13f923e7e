use crate::domain::models::event::{EventRecord, Scope};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Day-indexed view of the blocking records in one snapshot. Rebuilt per
/// operation; snapshots are small enough that no persistent index is kept.
pub struct BlockRegistry {
    by_day: HashMap<NaiveDate, Vec<Scope>>,
}

impl BlockRegistry {
    pub fn from_snapshot(snapshot: &[EventRecord]) -> Self {
        let mut by_day: HashMap<NaiveDate, Vec<Scope>> = HashMap::new();
        for record in snapshot.iter().filter(|r| r.is_marked) {
            if let Some(scope) = &record.marked_for {
                by_day.entry(record.date).or_default().push(scope.clone());
            }
        }
        Self { by_day }
    }

    /// True iff some blocking record on `date` covers `trainer`, either via
    /// the "All" wildcard or exact token membership.
    pub fn is_blocked(&self, date: NaiveDate, trainer: &str) -> bool {
        self.by_day
            .get(&date)
            .is_some_and(|scopes| scopes.iter().any(|scope| scope.includes(trainer)))
    }

    /// True iff a blocking record with this exact (date, scope) pair already
    /// exists; used for idempotent re-marking.
    pub fn has_block(&self, date: NaiveDate, scope: &Scope) -> bool {
        self.by_day
            .get(&date)
            .is_some_and(|scopes| scopes.iter().any(|existing| existing == scope))
    }
}
