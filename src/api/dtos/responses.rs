use crate::domain::models::event::EventRecord;
use crate::domain::models::user::{Role, UserAccount};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
pub struct UserProfile {
    pub email: String,
    pub role: Role,
    pub trainer_name: Option<String>,
}

impl From<&UserAccount> for UserProfile {
    fn from(user: &UserAccount) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role,
            trainer_name: user.trainer_name.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub csrf_token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub created: usize,
}

/// Duplicate outcome: skipped days are part of the success body, never an
/// error.
#[derive(Serialize)]
pub struct DuplicateResponse {
    pub created: usize,
    pub skipped: Vec<NaiveDate>,
}

#[derive(Serialize)]
pub struct MarkResponse {
    pub created: usize,
    pub already_marked: Vec<NaiveDate>,
}

/// One blocking record as the calendar shows it.
#[derive(Serialize)]
pub struct BlockBadge {
    pub id: String,
    pub scope: String,
    pub reason: String,
}

/// One day of the month grid.
#[derive(Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub events: Vec<EventRecord>,
    pub blocks: Vec<BlockBadge>,
}
