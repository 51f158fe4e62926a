//! CLI - reedline-based REPL interface
//!
//! Free text goes straight to the command engine. Lines starting with
//! `:` are shell directives for the pieces the engine never touches:
//! raw catalog intake, marketplace switching, previews, and exports.

use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use reedline::{
    Prompt, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal,
};

use crate::app::App;
use crate::catalog::{CatalogRow, MarketplaceKey};
use crate::engine::Outcome;

/// Custom prompt for the Aurora console
pub struct AuroraPrompt {
    /// Active marketplace key
    marketplace: MarketplaceKey,
    /// Tasks not yet completed
    open_tasks: usize,
    /// Completed tasks, shown on the right edge
    completed_tasks: usize,
}

impl AuroraPrompt {
    pub fn new(marketplace: MarketplaceKey, open_tasks: usize, completed_tasks: usize) -> Self {
        Self {
            marketplace,
            open_tasks,
            completed_tasks,
        }
    }

    /// Refresh the prompt from current shell state
    pub fn sync(&mut self, app: &App) {
        self.marketplace = app.state.marketplace;
        self.open_tasks = app.state.open_task_count();
        self.completed_tasks = app.state.completed_task_count();
    }
}

impl Prompt for AuroraPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(format!("[{}:{}]", self.marketplace.key(), self.open_tasks))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        if self.completed_tasks == 0 {
            Cow::Borrowed("")
        } else {
            Cow::Owned(format!("{} done", self.completed_tasks))
        }
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "(failed) ",
        };
        Cow::Owned(format!("(search: {}{}) ", prefix, history_search.term))
    }
}

/// Shell directive parsing result
#[derive(Debug)]
pub enum Directive {
    /// Load the built-in sample sheet: :sample
    Sample,
    /// Load raw catalog text from a file: :load <path>
    Load(String),
    /// Append one record line to the raw text: :paste <line>
    Paste(String),
    /// Show the current raw text: :raw
    ShowRaw,
    /// Switch marketplace (clears generated rows): :market <key>
    Market(MarketplaceKey),
    /// Preview generated rows: :rows
    Rows,
    /// Inspect a template file's headers and row count: :inspect <path>
    Inspect(String),
    /// Export generated rows to CSV: :export [path]
    Export(Option<String>),
    /// Reset raw text and generated rows: :clear
    Clear,
    /// Add a task through the manual path: :add <title>
    Add(String),
    /// Show directive help: :help
    Help,
    /// Quit: :quit
    Quit,
    /// Unknown directive
    Unknown(String),
}

/// Parse the text after the `:` prefix into a structured directive
pub fn parse_directive(input: &str) -> Directive {
    let input = input.trim();
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts.first().unwrap_or(&"");
    let arg = parts.get(1).map(|s| s.trim());

    match *cmd {
        "sample" => Directive::Sample,
        "load" | "open" => {
            if let Some(path) = arg {
                Directive::Load(path.to_string())
            } else {
                Directive::Unknown("load requires a path".into())
            }
        }
        "paste" => {
            if let Some(line) = arg {
                Directive::Paste(line.to_string())
            } else {
                Directive::Unknown("paste requires a record line".into())
            }
        }
        "raw" => Directive::ShowRaw,
        "market" | "m" => {
            if let Some(key) = arg {
                match MarketplaceKey::from_str(key, true) {
                    Ok(marketplace) => Directive::Market(marketplace),
                    Err(_) => Directive::Unknown(format!(
                        "unknown marketplace '{}' (expected {})",
                        key,
                        marketplace_keys()
                    )),
                }
            } else {
                Directive::Unknown(format!(
                    "market requires a marketplace key ({})",
                    marketplace_keys()
                ))
            }
        }
        "rows" | "preview" => Directive::Rows,
        "inspect" => {
            if let Some(path) = arg {
                Directive::Inspect(path.to_string())
            } else {
                Directive::Unknown("inspect requires a path".into())
            }
        }
        "export" => Directive::Export(arg.map(String::from)),
        "clear" => Directive::Clear,
        "add" => {
            if let Some(title) = arg {
                Directive::Add(title.to_string())
            } else {
                Directive::Unknown("add requires a title".into())
            }
        }
        "?" | "help" => Directive::Help,
        "q" | "quit" | "exit" => Directive::Quit,
        _ => Directive::Unknown(input.to_string()),
    }
}

/// Slash-joined marketplace keys for help and error text
fn marketplace_keys() -> String {
    MarketplaceKey::ALL
        .iter()
        .map(|m| m.key())
        .collect::<Vec<_>>()
        .join("/")
}

/// Print the directive help message
fn print_help() {
    println!("{}", "Aurora Console".bold().cyan());
    println!("{}", "═".repeat(50).cyan());

    println!("\n{}", "Talk to Aurora (free text):".bold().yellow());
    println!("  {}", "add task follow up with couriers".green());
    println!("  {}", "mark task courier as done".green());
    println!("  {}", "show my tasks".green());
    println!("  {}", "generate catalog".green());
    println!("  {}", "help".green());

    println!("\n{}", "Catalog intake:".bold().yellow());
    println!("  {}      Load the built-in sample sheet", ":sample".green());
    println!("  {}  Load raw text from a file", ":load <path>".green());
    println!("  {} Append one record line", ":paste <line>".green());
    println!("  {}         Show the current raw text", ":raw".green());
    println!("  {}       Reset raw text and generated rows", ":clear".green());

    println!("\n{}", "Listings:".bold().yellow());
    println!(
        "  {} Switch marketplace ({})",
        ":market <key>".green(),
        marketplace_keys()
    );
    println!("  {}        Preview generated rows", ":rows".green());
    println!("  {} Inspect a template file", ":inspect <path>".green());
    println!("  {} Export rows to CSV", ":export [path]".green());

    println!("\n{}", "Tasks:".bold().yellow());
    println!("  {} Add a task without the voice path", ":add <title>".green());

    println!("\n{}", "Other:".bold().yellow());
    println!("  {}        Show this help", ":help".green());
    println!("  {}        Quit Aurora", ":quit".green());
}

/// Console stand-in for the browser's speech synthesis channel
fn speak(content: &str) {
    println!("{} {}", "[~]".cyan(), content.cyan().italic());
}

/// Render an engine outcome: the reply, plus the spoken channel when
/// the outcome asks for it
fn render_outcome(outcome: &Outcome) {
    println!("{} {}", "[aurora]".bold().cyan(), outcome.message.content);
    if outcome.announce {
        speak(&outcome.message.content);
    }
}

/// Render up to `limit` rows the way the browser preview pane did
fn render_rows(rows: &[CatalogRow], limit: usize) {
    if rows.is_empty() {
        println!(
            "{}",
            "No rows yet. Paste raw data and run \"generate catalog\".".dimmed()
        );
        return;
    }

    for row in rows.iter().take(limit) {
        println!(
            "  {} {}",
            row.title.bold(),
            format!("[{}]", row.platform.key()).cyan()
        );
        println!("    {}", row.description.dimmed());
        let keywords: Vec<&str> = row.keywords.iter().take(6).map(String::as_str).collect();
        println!("    {} {}", "keywords:".dimmed(), keywords.join(", "));
    }
    if rows.len() > limit {
        println!("  {}", format!("... and {} more", rows.len() - limit).dimmed());
    }
}

/// Execute a parsed directive. Returns false when the REPL should exit.
fn execute_directive(app: &mut App, directive: Directive) -> bool {
    match directive {
        Directive::Sample => {
            app.load_sample();
            println!("[*] Sample sheet loaded (3 products)");
        }
        Directive::Load(path) => match app.load_raw_catalog(&PathBuf::from(&path)) {
            Ok(lines) => println!("[*] Loaded {} record lines from {}", lines, path),
            Err(e) => println!("{} {}", "[!]".red(), e),
        },
        Directive::Paste(line) => {
            let mut raw = app.state.raw_catalog.clone();
            if !raw.is_empty() {
                raw.push('\n');
            }
            raw.push_str(&line);
            app.set_raw_catalog(raw);
            println!("[*] Record line added");
        }
        Directive::ShowRaw => {
            if app.state.raw_catalog.trim().is_empty() {
                println!("{}", "Raw catalog is empty.".dimmed());
            } else {
                println!("{}", app.state.raw_catalog);
            }
        }
        Directive::Market(marketplace) => {
            app.select_marketplace(marketplace);
            println!(
                "[*] Marketplace set to {}. Generated rows cleared.",
                marketplace.profile().name
            );
        }
        Directive::Rows => render_rows(&app.state.catalog_rows, 5),
        Directive::Inspect(path) => match app.inspect_template(&PathBuf::from(&path)) {
            Ok(info) => println!("[*] {}", info),
            Err(e) => println!("{} {}", "[!]".red(), e),
        },
        Directive::Export(path) => match app.export_csv(path.map(PathBuf::from)) {
            Ok(written) => println!("[*] Export written to {}", written.display()),
            Err(e) => println!("{} {}", "[!]".red(), e),
        },
        Directive::Clear => {
            app.clear_catalog();
            println!("[*] Catalog workspace cleared");
        }
        Directive::Add(title) => {
            let announcement = app.add_manual_task(&title);
            speak(&announcement);
        }
        Directive::Help => print_help(),
        Directive::Quit => {
            println!("[*] Aurora signing off");
            return false;
        }
        Directive::Unknown(input) => {
            println!("{} Unknown directive: '{}'", "[!]".red(), input);
            println!("    Type ':help' for the directive list");
        }
    }
    true
}

/// Run a single command non-interactively and print the reply
pub fn run_once(app: &mut App, command: &str) {
    if let Some(outcome) = app.run_command(command) {
        render_outcome(&outcome);
    }
}

/// Run the console REPL
pub fn run_cli(app: &mut App) -> Result<()> {
    let mut line_editor = Reedline::create();
    let mut prompt = AuroraPrompt::new(
        app.state.marketplace,
        app.state.open_task_count(),
        app.state.completed_task_count(),
    );

    println!(
        "{}",
        "╔══════════════════════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║  Aurora Console - free text talks, ':help' for directives    ║".cyan()
    );
    println!(
        "{}",
        "╚══════════════════════════════════════════════════════════════╝".cyan()
    );

    // Greeting seeded into the log at boot
    if let Some(greeting) = app.state.log.iter().last() {
        println!("{} {}", "[aurora]".bold().cyan(), greeting.content);
    }

    loop {
        prompt.sync(app);
        let sig = line_editor.read_line(&prompt)?;
        match sig {
            Signal::Success(buffer) => {
                let input = buffer.trim();
                if input.is_empty() {
                    continue;
                }

                if let Some(rest) = input.strip_prefix(':') {
                    if !execute_directive(app, parse_directive(rest)) {
                        break;
                    }
                } else if let Some(outcome) = app.run_command(input) {
                    render_outcome(&outcome);
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\n[*] Interrupted");
                break;
            }
        }
    }

    Ok(())
}
