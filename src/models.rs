//! Core data models used throughout atomlens.
//!
//! These types mirror the JSON shapes returned by the knowledge-management
//! backend's search and health endpoints. Snippet fields carry raw
//! `<mark>`-delimited text and must go through [`crate::sanitize`] before
//! being emitted as markup.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response from `GET /api/search`.
///
/// Results come back grouped by entity type; each hit carries a snippet
/// with `<mark>` delimiters around matched terms. Ranking and pagination
/// are the backend's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_results: i64,
    #[serde(default)]
    pub topics: Vec<TopicHit>,
    #[serde(default)]
    pub messages: Vec<MessageHit>,
    #[serde(default)]
    pub atoms: Vec<AtomHit>,
}

/// A topic matched by full-text search.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicHit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub message_count: i64,
    pub match_snippet: String,
}

/// A message matched by full-text search.
///
/// Classification and score are produced by the backend's signal/noise
/// pipeline; this client only displays them.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageHit {
    pub id: String,
    #[serde(default)]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub signal_score: Option<f64>,
    pub content_snippet: String,
}

/// A knowledge atom matched by full-text search.
///
/// Atoms are discrete knowledge units extracted from messages by the
/// backend's analysis agents.
#[derive(Debug, Clone, Deserialize)]
pub struct AtomHit {
    pub id: String,
    pub kind: AtomKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    pub match_snippet: String,
}

/// Backend classification of a message's importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Signal,
    Noise,
    #[default]
    Unclassified,
}

impl Classification {
    /// Short label used in CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Signal => "signal",
            Classification::Noise => "noise",
            Classification::Unclassified => "unclassified",
        }
    }
}

/// The kind of a knowledge atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomKind {
    Problem,
    Solution,
    Decision,
    Question,
    Insight,
    Pattern,
    Requirement,
}

impl AtomKind {
    pub fn label(&self) -> &'static str {
        match self {
            AtomKind::Problem => "problem",
            AtomKind::Solution => "solution",
            AtomKind::Decision => "decision",
            AtomKind::Question => "question",
            AtomKind::Insight => "insight",
            AtomKind::Pattern => "pattern",
            AtomKind::Requirement => "requirement",
        }
    }
}

/// Response from `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}
