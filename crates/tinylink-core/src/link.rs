use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored link binding a short code to its target URL and click metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Primary key; immutable once created.
    pub code: ShortCode,
    /// The normalized redirect target.
    pub target_url: String,
    /// Number of successful resolves.
    pub total_clicks: u64,
    /// Time of the most recent resolve, if any.
    pub last_clicked_at: Option<Timestamp>,
    /// When the link was created.
    pub created_at: Timestamp,
}

impl Link {
    /// A freshly created link with no clicks.
    pub fn new(code: ShortCode, target_url: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            code,
            target_url: target_url.into(),
            total_clicks: 0,
            last_clicked_at: None,
            created_at,
        }
    }

    /// Records one click at `at`.
    pub fn record_click(&mut self, at: Timestamp) {
        self.total_clicks += 1;
        self.last_clicked_at = Some(at);
    }
}
