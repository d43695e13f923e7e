use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Viewer,
    Trainer,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Admins and scheduling staff may create, edit, duplicate and delete
    /// events; viewers and trainer logins are read-only.
    pub fn can_edit_events(&self) -> bool {
        matches!(self, Role::Admin | Role::Staff)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Viewer => "viewer",
            Role::Trainer => "trainer",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "staff" => Some(Role::Staff),
            "viewer" => Some(Role::Viewer),
            "trainer" => Some(Role::Trainer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAccount {
    /// Unique key, stored lowercased.
    pub email: String,
    pub role: Role,
    /// Links a trainer login to its calendar; empty for other roles.
    pub trainer_name: Option<String>,
    pub active: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
