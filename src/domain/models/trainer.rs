use serde::{Deserialize, Serialize};

/// A named individual with an availability calendar. Records reference
/// trainers by name, so a rename orphans historical rows; the API therefore
/// never offers renaming, only color and active-flag changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub name: String,
    /// Hex color used by calendar rendering.
    pub color: String,
    pub active: bool,
}
