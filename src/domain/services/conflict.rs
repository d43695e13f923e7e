//! Accept/reject/expand decisions for every write path. All functions here
//! are pure over an immutable snapshot: they return the records to append
//! and never touch storage themselves, so one logical operation persists as
//! a single whole-snapshot replacement.

use crate::domain::models::event::{
    new_record_id, BlockConflict, EventDraft, EventRecord, Scope, WriteStamp,
};
use crate::domain::models::settings::BlockingPolicy;
use crate::domain::services::blocking::BlockRegistry;
use crate::domain::services::{expansion, titles};
use crate::error::AppError;
use chrono::NaiveDate;

/// Strict all-or-nothing path for direct creation and editing. The draft's
/// trainer list must already be resolved (no wildcard). Any blocked
/// (day, trainer) pair rejects the whole range with the full conflict list.
pub fn plan_create(
    snapshot: &[EventRecord],
    start: NaiveDate,
    end: NaiveDate,
    draft: &EventDraft,
    stamp: &WriteStamp,
) -> Result<Vec<EventRecord>, AppError> {
    let days = expansion::day_range(start, end)?;
    let registry = BlockRegistry::from_snapshot(snapshot);

    let mut conflicts = Vec::new();
    for day in &days {
        for trainer in &draft.trainers {
            if registry.is_blocked(*day, trainer) {
                conflicts.push(BlockConflict {
                    date: *day,
                    trainer: trainer.clone(),
                });
            }
        }
    }
    if !conflicts.is_empty() {
        conflicts.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.trainer.cmp(&b.trainer)));
        conflicts.dedup();
        return Err(AppError::BlockedDates(conflicts));
    }

    Ok(days
        .into_iter()
        .map(|day| expansion::event_for_day(day, draft, stamp))
        .collect())
}

/// Outcome of a duplicate operation. `records` may be any subset of the
/// requested days, down to empty; skipped days are reported, not errors.
#[derive(Debug)]
pub struct DuplicatePlan {
    pub records: Vec<EventRecord>,
    pub skipped: Vec<NaiveDate>,
}

/// Partial-success path for single-date and range duplication. When the
/// `blocked_prevents_duplicates` toggle is on, a destination day where any
/// trainer of the source record's scope is blocked is silently omitted.
pub fn plan_duplicate(
    snapshot: &[EventRecord],
    source: &EventRecord,
    start: NaiveDate,
    end: NaiveDate,
    policy: &BlockingPolicy,
    stamp: &WriteStamp,
) -> Result<DuplicatePlan, AppError> {
    let days = expansion::day_range(start, end)?;
    let registry = BlockRegistry::from_snapshot(snapshot);

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for day in days {
        if policy.blocked_prevents_duplicates
            && source
                .trainers
                .iter()
                .any(|trainer| registry.is_blocked(day, trainer))
        {
            skipped.push(day);
            continue;
        }

        let mut copy = source.clone();
        copy.id = new_record_id();
        copy.date = day;
        copy.modified_at = stamp.at;
        copy.modified_by = stamp.actor.clone();
        copy.action = stamp.action;
        // A duplicate is always a plain event, even when the source was a
        // blocking record.
        copy.is_marked = false;
        copy.marked_for = None;
        copy.title = titles::derive_title(&copy);
        records.push(copy);
    }

    Ok(DuplicatePlan { records, skipped })
}

/// Outcome of a mark operation. Days already carrying an identical
/// (date, scope) block are no-ops, reported for display.
#[derive(Debug)]
pub struct MarkPlan {
    pub records: Vec<EventRecord>,
    pub already_marked: Vec<NaiveDate>,
}

/// Mark (create block) path. Permission is evaluated before any date logic;
/// an empty explicit trainer selection is rejected next; then one blocking
/// record is synthesized per day not already marked for the same scope.
pub fn plan_marks(
    snapshot: &[EventRecord],
    start: NaiveDate,
    end: NaiveDate,
    scope: &Scope,
    reason: Option<&str>,
    policy: &BlockingPolicy,
    caller_is_admin: bool,
    stamp: &WriteStamp,
) -> Result<MarkPlan, AppError> {
    if policy.only_admin_can_block && !caller_is_admin {
        return Err(AppError::Forbidden(
            "Only administrators may mark dates".to_string(),
        ));
    }
    if let Scope::Named(names) = scope {
        if names.is_empty() {
            return Err(AppError::InvalidScope(
                "Select at least one trainer to block".to_string(),
            ));
        }
    }

    let days = expansion::day_range(start, end)?;
    let registry = BlockRegistry::from_snapshot(snapshot);

    let mut records = Vec::new();
    let mut already_marked = Vec::new();
    for day in days {
        if registry.has_block(day, scope) {
            already_marked.push(day);
        } else {
            records.push(expansion::block_for_day(day, scope, reason, stamp));
        }
    }

    Ok(MarkPlan {
        records,
        already_marked,
    })
}
