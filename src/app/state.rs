//! Shared application state
//!
//! The console shell is the sole owner and sole writer of this state;
//! the command engine only ever sees read-only snapshots of it.

use std::collections::VecDeque;

use crate::catalog::{CatalogRow, MarketplaceKey};
use crate::engine::CommandContext;
use crate::model::{AssistantMessage, MessageRole, Task, TaskSource, TaskStatus};

/// Most recent entries kept in the conversation log (8 retained + 1 new)
const LOG_CAPACITY: usize = 9;

/// Bounded append-only conversation log. Oldest entries are discarded
/// once the cap is reached, not archived.
#[derive(Debug, Default)]
pub struct ConversationLog {
    entries: VecDeque<AssistantMessage>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    /// Append an entry, evicting the oldest once the cap is reached
    pub fn push(&mut self, message: AssistantMessage) {
        if self.entries.len() == LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssistantMessage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the console mutates: the task board, catalog workspace,
/// marketplace selection, and conversation log
#[derive(Debug)]
pub struct AppState {
    pub tasks: Vec<Task>,
    /// Raw pasted/loaded product text, pipe or comma separated
    pub raw_catalog: String,
    /// Rows from the most recent successful generate
    pub catalog_rows: Vec<CatalogRow>,
    pub marketplace: MarketplaceKey,
    pub log: ConversationLog,
}

impl AppState {
    /// Fresh state with the starter board and the greeting seeded
    pub fn new(marketplace: MarketplaceKey) -> Self {
        let mut starter = Task::new("Reconcile Amazon apparel inventory", TaskSource::Manual);
        starter.status = TaskStatus::Pending;
        let mut in_flight = Task::new("Draft Flipkart deal of the day copy", TaskSource::Manual);
        in_flight.status = TaskStatus::InProgress;

        let mut log = ConversationLog::new();
        log.push(AssistantMessage::new(
            MessageRole::Assistant,
            "Aurora online. Ask me to capture priorities, update task status, or transform \
             your raw catalog data for Amazon, Flipkart, Meesho, or Myntra.",
        ));

        Self {
            tasks: vec![starter, in_flight],
            raw_catalog: String::new(),
            catalog_rows: Vec::new(),
            marketplace,
            log,
        }
    }

    /// Snapshot handed to the command engine
    pub fn context(&self) -> CommandContext {
        CommandContext {
            tasks: self.tasks.clone(),
            raw_catalog: self.raw_catalog.clone(),
            catalog_rows: self.catalog_rows.clone(),
            selected_marketplace: self.marketplace,
        }
    }

    /// Tasks not yet completed
    pub fn open_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Completed)
            .count()
    }

    pub fn completed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count()
    }
}
