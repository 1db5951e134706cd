//! Search contracts: request/event shapes exchanged with the search worker.
//!
//! Every type here is the wire format of the worker channel, so the serde
//! attributes are part of the contract.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug)]
pub enum SearchError {
    InvalidInput(String),
    InvalidPattern(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            SearchError::InvalidPattern(e) => write!(f, "Invalid pattern: {}", e),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::InvalidInput(_) => None,
            SearchError::InvalidPattern(e) => Some(e),
        }
    }
}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        SearchError::InvalidPattern(e)
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        SearchError::InvalidInput(format!("malformed message: {}", e))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub href: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
}

impl Chapter {
    pub fn new(href: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}

/// A search request as received from the caller.
///
/// Both fields are optional on the wire so that a missing document or query
/// is reported as an `error` event instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub chapters: Option<Vec<Chapter>>,
    #[serde(default)]
    pub query: Option<String>,
}

impl SearchRequest {
    pub fn new(chapters: Vec<Chapter>, query: impl Into<String>) -> Self {
        Self {
            chapters: Some(chapters),
            query: Some(query.into()),
        }
    }

    /// Borrow the validated document and query.
    pub fn validate(&self) -> Result<(&[Chapter], &str)> {
        let chapters = match self.chapters.as_deref() {
            Some(chapters) if !chapters.is_empty() => chapters,
            Some(_) => return Err(SearchError::InvalidInput("document has no chapters".into())),
            None => return Err(SearchError::InvalidInput("missing chapters".into())),
        };
        let query = match self.query.as_deref() {
            Some(query) if !query.is_empty() => query,
            _ => return Err(SearchError::InvalidInput("missing query".into())),
        };
        Ok((chapters, query))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelKind {
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelMessage {
    #[serde(rename = "type")]
    pub kind: CancelKind,
}

/// Caller → worker message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InboundMessage {
    Cancel(CancelMessage),
    Search(SearchRequest),
}

impl InboundMessage {
    pub fn cancel() -> Self {
        Self::Cancel(CancelMessage {
            kind: CancelKind::Cancel,
        })
    }
}

/// A zero-based match position inside one chapter.
///
/// `offset` counts characters, `start`/`end` are byte bounds into the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub offset: usize,
}

impl Match {
    pub fn new(start: usize, end: usize, offset: usize) -> Self {
        Self { start, end, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Excerpt {
    pub chapter_title: String,
    pub excerpt: String,
    pub href: String,
}

/// Worker → caller message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchEvent {
    Error { message: String },
    Progress { percent: u8, chapter: String },
    Result { results: Vec<Excerpt> },
    Done,
}

impl SearchEvent {
    pub fn error(err: &SearchError) -> Self {
        Self::Error {
            message: err.to_string(),
        }
    }

    /// `Error` and `Done` close the event stream of one request.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error { .. } | Self::Done)
    }
}
