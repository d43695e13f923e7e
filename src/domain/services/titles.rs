use crate::domain::models::event::EventRecord;

pub const DEFAULT_BLOCK_REASON: &str = "Marked Date";

/// Derives the one-line display title from a record's other fields. Pure
/// function; callers must re-run it after any mutation.
///
/// Plain events use the uniform field-append rule: base of
/// `{status}-{source}-{client} {description}`, then medium (parenthesized),
/// trainers, and location, each only when non-empty.
pub fn derive_title(record: &EventRecord) -> String {
    if record.is_marked {
        let scope = record
            .marked_for
            .as_ref()
            .map(|scope| scope.to_string())
            .unwrap_or_else(|| "All".to_string());
        let reason = if record.description.trim().is_empty() {
            DEFAULT_BLOCK_REASON
        } else {
            record.description.trim()
        };
        return format!("BLOCKED ({scope}) - {reason}");
    }

    let mut title = format!(
        "{}-{}-{} {}",
        record.status, record.source, record.client, record.description
    );
    if !record.medium.is_empty() {
        title.push_str(&format!(" ({})", record.medium));
    }
    if !record.trainers.is_empty() {
        title.push(' ');
        title.push_str(&record.trainers.join(", "));
    }
    if !record.location.is_empty() {
        title.push(' ');
        title.push_str(&record.location);
    }
    title.trim().to_string()
}
