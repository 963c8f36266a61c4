use serde::{Deserialize, Serialize};

/// A link whose page landed somewhere other than the requested URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub link: String,
    pub target: Option<String>,
    pub recorded_at: Option<String>,
}
