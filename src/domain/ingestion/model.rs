use serde::{Deserialize, Serialize};

/// Counts for one successful feed ingestion
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResult {
    pub created: u64,
    pub updated: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Error,
    Skipped,
}

/// Per-feed line of a batch summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedOutcome {
    pub feed_id: i64,
    pub feed_url: String,
    pub status: OutcomeStatus,
    pub created: u64,
    pub updated: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of `ingest_all`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub feeds: usize,
    pub created: u64,
    pub updated: u64,
    pub errors: usize,
    pub skipped: usize,
    pub outcomes: Vec<FeedOutcome>,
}

impl IngestSummary {
    pub fn record(&mut self, outcome: FeedOutcome) {
        self.feeds += 1;
        match outcome.status {
            OutcomeStatus::Success => {
                self.created += outcome.created;
                self.updated += outcome.updated;
            }
            OutcomeStatus::Error => self.errors += 1,
            OutcomeStatus::Skipped => self.skipped += 1,
        }
        self.outcomes.push(outcome);
    }

    /// User-facing one-line summary
    pub fn message(&self) -> String {
        let mut message = format!(
            "Fetched items: {} created, {} updated",
            self.created, self.updated
        );
        if self.errors > 0 {
            message.push_str(&format!(", {} errors", self.errors));
        }
        message
    }
}

/// Response body for batch ingestion endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSummaryResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: IngestSummary,
}

impl From<IngestSummary> for IngestSummaryResponse {
    fn from(summary: IngestSummary) -> Self {
        Self {
            message: summary.message(),
            summary,
        }
    }
}
