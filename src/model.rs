//! Core data model
//!
//! Plain data types shared by the command engine, the catalog processor,
//! and the console shell. Ids are opaque UUIDs, timestamps are epoch
//! milliseconds.

use uuid::Uuid;

/// Lifecycle states of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Human-readable label used in replies and task listings
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Where a task came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSource {
    /// Added through a shell directive or form
    Manual,
    /// Added through a spoken/typed natural-language command
    Voice,
    /// Derived from catalog processing
    Catalog,
}

/// A single to-do item on the seller's board
#[derive(Debug, Clone)]
pub struct Task {
    /// Opaque unique identifier, immutable once created
    pub id: String,
    /// Set at creation, never edited afterward
    pub title: String,
    pub status: TaskStatus,
    pub source: TaskSource,
}

impl Task {
    /// Create a pending task with a fresh id
    pub fn new(title: impl Into<String>, source: TaskSource) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            status: TaskStatus::Pending,
            source,
        }
    }
}

/// Who authored a conversation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    Assistant,
    User,
    System,
}

/// One entry in the conversation log
#[derive(Debug, Clone)]
pub struct AssistantMessage {
    /// Opaque unique identifier
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Epoch milliseconds at creation
    pub timestamp: i64,
}

impl AssistantMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Shorthand for the assistant's reply messages
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}
