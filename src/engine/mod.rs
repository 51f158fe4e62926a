//! Command Engine
//!
//! Interprets free-text operator commands against a snapshot of the
//! console state. Matching is an ordered table of intents; the first
//! predicate that fires wins, so priority is explicit in the table
//! order. The engine is a total function: every input, however
//! malformed, resolves to an outcome carrying a reply message.


use crate::catalog::{self, CatalogRow, MarketplaceKey};
use crate::model::{AssistantMessage, Task, TaskSource, TaskStatus};

/// Read-only snapshot of console state passed in by the shell
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub tasks: Vec<Task>,
    pub raw_catalog: String,
    pub catalog_rows: Vec<CatalogRow>,
    pub selected_marketplace: MarketplaceKey,
}

/// The structured result of interpreting one command
#[derive(Debug, Clone)]
pub struct Outcome {
    pub tasks: Vec<Task>,
    pub catalog_rows: Vec<CatalogRow>,
    pub message: AssistantMessage,
    /// Whether the reply should be spoken aloud
    pub announce: bool,
}

/// One entry in the priority-ordered intent table
struct Intent {
    name: &'static str,
    matches: fn(&str) -> bool,
    handle: fn(&str, &CommandContext) -> Outcome,
}

/// Intent priority list. Order is significant: commands share
/// sub-keywords, so earlier entries shadow later ones.
const INTENTS: [Intent; 5] = [
    Intent {
        name: "help",
        matches: |input| input.contains("help"),
        handle: handle_help,
    },
    Intent {
        name: "add-task",
        matches: |input| input.contains("add task") || input.contains("create task"),
        handle: handle_add_task,
    },
    Intent {
        name: "update-status",
        matches: |input| {
            input.contains("mark task") || input.contains("update task") || input.contains("set task")
        },
        handle: handle_update_status,
    },
    Intent {
        name: "list-tasks",
        matches: |input| {
            (input.contains("show") || input.contains("list")) && input.contains("task")
        },
        handle: handle_list_tasks,
    },
    Intent {
        name: "generate-catalog",
        matches: |input| {
            input.contains("generate") && (input.contains("catalog") || input.contains("listing"))
        },
        handle: handle_generate,
    },
];

/// Interpret one trimmed, non-empty command.
///
/// Never fails: unmatched input falls through to an explanatory reply
/// with no state change.
pub fn interpret(input: &str, context: &CommandContext) -> Outcome {
    let lowered = input.to_lowercase();

    for intent in &INTENTS {
        if (intent.matches)(&lowered) {
            log::debug!("Command matched intent '{}'", intent.name);
            return (intent.handle)(input, context);
        }
    }

    log::debug!("Command matched no intent");
    reply(
        context,
        "I didn't catch that. Say \"help\" to hear what I can do.",
        true,
    )
}

/// Outcome that carries state through unchanged
fn reply(context: &CommandContext, content: &str, announce: bool) -> Outcome {
    Outcome {
        tasks: context.tasks.clone(),
        catalog_rows: context.catalog_rows.clone(),
        message: AssistantMessage::assistant(content),
        announce,
    }
}

fn handle_help(_input: &str, context: &CommandContext) -> Outcome {
    let profile = context.selected_marketplace.profile();
    let content = format!(
        "I can capture tasks (\"add task follow up with couriers\"), \
         update them (\"mark task courier as done\"), list the board \
         (\"show my tasks\"), and turn raw catalog data into {} listings \
         (\"generate catalog\").",
        profile.name
    );
    reply(context, &content, true)
}

fn handle_add_task(input: &str, context: &CommandContext) -> Outcome {
    let title = ["add task", "create task"]
        .iter()
        .find_map(|phrase| text_after_phrase(input, phrase))
        .unwrap_or("");

    if title.is_empty() {
        return reply(
            context,
            "I need a title for that. Try \"add task follow up with couriers\".",
            true,
        );
    }

    let mut tasks = context.tasks.clone();
    tasks.push(Task::new(title, TaskSource::Voice));
    log::info!("Added voice task: {}", title);

    Outcome {
        tasks,
        catalog_rows: context.catalog_rows.clone(),
        message: AssistantMessage::assistant(format!("Added \"{}\" to your board.", title)),
        announce: true,
    }
}

fn handle_update_status(input: &str, context: &CommandContext) -> Outcome {
    let remainder = ["mark task", "update task", "set task"]
        .iter()
        .find_map(|phrase| text_after_phrase(input, phrase))
        .unwrap_or("");

    let Some((fragment, status)) = split_status_clause(remainder) else {
        return reply(
            context,
            "Tell me the task and the status, like \"mark task invoice as done\".",
            true,
        );
    };

    let fragment_lower = fragment.to_lowercase();
    let mut tasks = context.tasks.clone();
    let mut updated = Vec::new();
    for task in tasks.iter_mut() {
        if task.title.to_lowercase().contains(&fragment_lower) {
            task.status = status;
            updated.push(task.title.clone());
        }
    }

    if updated.is_empty() {
        return reply(
            context,
            &format!("I couldn't find a task matching \"{}\".", fragment),
            true,
        );
    }

    log::info!("Marked {} task(s) as {}", updated.len(), status.label());
    let content = if updated.len() == 1 {
        format!("\"{}\" is now {}.", updated[0], status.label())
    } else {
        format!(
            "Updated {} tasks to {}: {}.",
            updated.len(),
            status.label(),
            updated.join(", ")
        )
    };

    Outcome {
        tasks,
        catalog_rows: context.catalog_rows.clone(),
        message: AssistantMessage::assistant(content),
        announce: true,
    }
}

// Listings never announce: the conversation log renders them instead of
// the voice channel.
fn handle_list_tasks(_input: &str, context: &CommandContext) -> Outcome {
    if context.tasks.is_empty() {
        return reply(
            context,
            "Your board is empty. Add one with \"add task ...\".",
            false,
        );
    }

    let mut lines = vec!["Here's your board:".to_string()];
    for (index, task) in context.tasks.iter().enumerate() {
        lines.push(format!("{}. {} ({})", index + 1, task.title, task.status.label()));
    }
    reply(context, &lines.join("\n"), false)
}

fn handle_generate(_input: &str, context: &CommandContext) -> Outcome {
    let marketplace = context.selected_marketplace;
    match catalog::parse_catalog_sheet(&context.raw_catalog) {
        Ok(sheet) => {
            let rows = catalog::render_for_marketplace(&sheet.rows, marketplace);
            let content = format!(
                "Generated {} optimized listings for {}. Preview them or export the CSV when ready.",
                rows.len(),
                marketplace.profile().name
            );
            Outcome {
                tasks: context.tasks.clone(),
                catalog_rows: rows,
                message: AssistantMessage::assistant(content),
                announce: true,
            }
        }
        // Prior rows survive a failed generate
        Err(err) => {
            log::info!("Catalog generation failed: {}", err);
            reply(
                context,
                "I couldn't read the raw catalog data. Paste rows like \
                 \"name | sku | price | category | stock | description | tags\" and try again.",
                true,
            )
        }
    }
}

/// Case-insensitive search for an ASCII phrase; returns the trimmed text
/// after its first occurrence
fn text_after_phrase<'a>(input: &'a str, phrase: &str) -> Option<&'a str> {
    let haystack = input.as_bytes();
    let needle = phrase.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
        .map(|i| input[i + needle.len()..].trim())
}

/// Split "invoice photos as done" into the title fragment and the target
/// status. Falls back to reading the last word as the status when the
/// "as" clause is missing.
fn split_status_clause(remainder: &str) -> Option<(&str, TaskStatus)> {
    if remainder.is_empty() {
        return None;
    }

    if let Some(pos) = rfind_ascii_ci(remainder, " as ") {
        let fragment = remainder[..pos].trim();
        let status = status_from_word(remainder[pos + 4..].trim())?;
        if fragment.is_empty() {
            return None;
        }
        return Some((fragment, status));
    }

    let last_word = remainder.rsplit(char::is_whitespace).next()?;
    let status = status_from_word(last_word)?;
    let fragment = remainder[..remainder.len() - last_word.len()].trim();
    if fragment.is_empty() {
        return None;
    }
    Some((fragment, status))
}

/// Case-insensitive search for the last occurrence of an ASCII needle
fn rfind_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len())
        .rev()
        .find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Map a spoken status word onto a task status via synonym sets
fn status_from_word(word: &str) -> Option<TaskStatus> {
    let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    match word.as_str() {
        "done" | "complete" | "completed" | "finished" => Some(TaskStatus::Completed),
        "progress" | "in progress" | "in-progress" | "started" | "working" => Some(TaskStatus::InProgress),
        "pending" | "todo" | "later" => Some(TaskStatus::Pending),
        _ => None,
    }
}
