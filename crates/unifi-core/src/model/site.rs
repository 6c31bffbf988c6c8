use serde::{Deserialize, Serialize};

/// A site on the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    /// Short name used in API paths (`default`).
    pub name: String,
    pub description: Option<String>,
    pub role: Option<String>,
}
