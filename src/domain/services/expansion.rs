use crate::domain::models::event::{
    new_record_id, EventDraft, EventRecord, Scope, WriteStamp,
};
use crate::domain::services::titles;
use crate::error::AppError;
use chrono::{Days, NaiveDate};

/// Every calendar day of the inclusive range, in order. `end < start` fails
/// before anything else; a valid range yields at least one day.
pub fn day_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, AppError> {
    if end < start {
        return Err(AppError::InvalidRange);
    }
    let mut days = Vec::with_capacity((end - start).num_days() as usize + 1);
    let mut current = start;
    while current <= end {
        days.push(current);
        current = current
            .checked_add_days(Days::new(1))
            .ok_or(AppError::InvalidRange)?;
    }
    Ok(days)
}

/// Builds one plain event record for one day of an expanded request.
pub fn event_for_day(date: NaiveDate, draft: &EventDraft, stamp: &WriteStamp) -> EventRecord {
    let mut record = EventRecord {
        id: new_record_id(),
        date,
        event_type: draft.event_type.clone(),
        status: draft.status.clone(),
        source: draft.source.clone(),
        client: draft.client.clone(),
        description: draft.description.clone(),
        trainers: draft.trainers.clone(),
        medium: draft.medium.clone(),
        location: draft.location.clone(),
        billing: draft.billing.clone(),
        invoiced: draft.invoiced,
        notes: draft.notes.clone(),
        modified_at: stamp.at,
        modified_by: stamp.actor.clone(),
        action: stamp.action,
        is_marked: false,
        marked_for: None,
        title: String::new(),
    };
    record.title = titles::derive_title(&record);
    record
}

/// Builds one blocking record for one day of a mark request.
pub fn block_for_day(
    date: NaiveDate,
    scope: &Scope,
    reason: Option<&str>,
    stamp: &WriteStamp,
) -> EventRecord {
    let reason = reason.map(str::trim).filter(|r| !r.is_empty());
    let mut record = EventRecord {
        id: new_record_id(),
        date,
        event_type: "M".to_string(),
        status: "Blocked".to_string(),
        source: "Admin".to_string(),
        client: "N/A".to_string(),
        description: reason.unwrap_or(titles::DEFAULT_BLOCK_REASON).to_string(),
        trainers: Vec::new(),
        medium: "N/A".to_string(),
        location: "N/A".to_string(),
        billing: String::new(),
        invoiced: false,
        notes: reason.unwrap_or("").to_string(),
        modified_at: stamp.at,
        modified_by: stamp.actor.clone(),
        action: stamp.action,
        is_marked: true,
        marked_for: Some(scope.clone()),
        title: String::new(),
    };
    record.title = titles::derive_title(&record);
    record
}

/// Expands a (start, end, shared attributes) request into one record per
/// calendar day, identical attributes, distinct date, fresh title.
pub fn expand_range(
    start: NaiveDate,
    end: NaiveDate,
    draft: &EventDraft,
    stamp: &WriteStamp,
) -> Result<Vec<EventRecord>, AppError> {
    Ok(day_range(start, end)?
        .into_iter()
        .map(|date| event_for_day(date, draft, stamp))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::ActionKind;

    fn draft() -> EventDraft {
        EventDraft {
            event_type: "W".to_string(),
            status: "Offered".to_string(),
            source: "EQS".to_string(),
            client: "Acme".to_string(),
            description: "Workshop".to_string(),
            trainers: vec!["Dom".to_string()],
            medium: "F2F".to_string(),
            location: "Mel".to_string(),
            billing: String::new(),
            invoiced: false,
            notes: String::new(),
        }
    }

    #[test]
    fn produces_one_record_per_day_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();
        let stamp = WriteStamp::new("staff@example.com", ActionKind::Created);

        let records = expand_range(start, end, &draft(), &stamp).unwrap();
        assert_eq!(records.len(), 3);
        for (offset, record) in records.iter().enumerate() {
            assert_eq!(record.date, start + Days::new(offset as u64));
            assert_eq!(record.trainers, vec!["Dom".to_string()]);
            assert!(!record.title.is_empty());
        }
        // Per-day rows are independent records.
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn single_day_range_yields_one_record() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let stamp = WriteStamp::new("staff@example.com", ActionKind::Created);
        let records = expand_range(day, day, &draft(), &stamp).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn inverted_range_is_rejected_up_front() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let stamp = WriteStamp::new("staff@example.com", ActionKind::Created);
        let err = expand_range(start, end, &draft(), &stamp).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange));
    }
}
