//! App module - console shell around the command engine
//!
//! Owns all mutable state and applies engine outcomes wholesale. Every
//! mutation flows through here; the engine and catalog modules stay
//! pure.

mod state;

pub use state::{AppState, ConversationLog};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use crate::catalog::{self, MarketplaceKey};
use crate::engine::{self, Outcome};
use crate::model::{AssistantMessage, MessageRole, Task, TaskSource};

/// Three-product demo sheet in the pipe paste format
pub const SAMPLE_SHEET: &str = "\
Aurora Performance Tee | AUR-TEE-01 | 799 | Activewear | 120 | Quick dry fabric with reflective strip | sports;running;fitness
Nebula Luxe Saree | NBL-SAE-23 | 1499 | Ethnic Wear | 80 | Soft silk blend with zari border | festive;wedding;traditional
Lumos Night Lamp | LUM-LMP-09 | 1299 | Home Decor | 60 | Rechargeable, 3 brightness modes | lighting;home;gift";

/// The console shell: single writer over [`AppState`]
pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(marketplace: MarketplaceKey) -> Self {
        Self {
            state: AppState::new(marketplace),
        }
    }

    /// Run one free-text command through the engine and apply the
    /// outcome. Empty input is a no-op at this boundary and never
    /// reaches the engine.
    pub fn run_command(&mut self, input: &str) -> Option<Outcome> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let context = self.state.context();
        let outcome = engine::interpret(trimmed, &context);

        self.state.tasks = outcome.tasks.clone();
        self.state.catalog_rows = outcome.catalog_rows.clone();
        self.state
            .log
            .push(AssistantMessage::new(MessageRole::User, trimmed));
        self.state.log.push(outcome.message.clone());

        Some(outcome)
    }

    /// Manual-path task add, distinct from the engine's voice path.
    /// Returns the announcement line for the caller to render/speak.
    pub fn add_manual_task(&mut self, title: &str) -> String {
        let task = Task::new(title, TaskSource::Manual);
        let announcement = format!("Task {} added", task.title);
        log::info!("Added manual task: {}", task.title);
        self.state.tasks.push(task);
        announcement
    }

    /// Switch the active marketplace. Generated rows are always cleared
    /// so no stale cross-marketplace rows survive the switch.
    pub fn select_marketplace(&mut self, marketplace: MarketplaceKey) {
        self.state.marketplace = marketplace;
        self.state.catalog_rows.clear();
        log::info!("Marketplace switched to {}", marketplace.profile().name);
    }

    pub fn set_raw_catalog(&mut self, text: impl Into<String>) {
        self.state.raw_catalog = text.into();
    }

    /// Load raw catalog text from a file; returns the line count
    pub fn load_raw_catalog(&mut self, path: &Path) -> anyhow::Result<usize> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
        self.state.raw_catalog = text;
        log::info!("Loaded {} catalog lines from {}", lines, path.display());
        Ok(lines)
    }

    /// Load the built-in sample sheet
    pub fn load_sample(&mut self) {
        self.state.raw_catalog = SAMPLE_SHEET.to_string();
    }

    /// Reset the catalog workspace: raw text and generated rows
    pub fn clear_catalog(&mut self) {
        self.state.raw_catalog.clear();
        self.state.catalog_rows.clear();
        log::info!("Catalog workspace cleared");
    }

    /// Parse a marketplace template file and report what was detected.
    /// Inspection is informational only and never feeds generation.
    pub fn inspect_template(&self, path: &Path) -> anyhow::Result<String> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read template file {}", path.display()))?;
        match catalog::parse_catalog_sheet(&text) {
            Ok(sheet) => Ok(format!(
                "Detected {} rows with headers: {}",
                sheet.rows.len(),
                sheet.headers.join(", ")
            )),
            Err(_) => Ok("Could not parse template. Ensure it's a clean CSV.".to_string()),
        }
    }

    /// Write the generated rows to a CSV file. With no path given, the
    /// export lands in the current directory under
    /// `<marketplace>-catalog-<epoch-ms>.csv`.
    pub fn export_csv(&self, path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
        if self.state.catalog_rows.is_empty() {
            bail!("no generated rows to export; run \"generate catalog\" first");
        }

        let path = path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}-catalog-{}.csv",
                self.state.marketplace.key(),
                chrono::Utc::now().timestamp_millis()
            ))
        });

        let csv = catalog::export_to_csv(&self.state.catalog_rows);
        fs::write(&path, csv)
            .with_context(|| format!("failed to write export to {}", path.display()))?;
        log::info!(
            "Exported {} rows to {}",
            self.state.catalog_rows.len(),
            path.display()
        );
        Ok(path)
    }
}
