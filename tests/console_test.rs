//! Integration Tests for the Aurora Console Shell
//!
//! Drives the public library API end to end: command interpretation,
//! outcome application, log capping, marketplace switching, and export.

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    use aurora::app::App;
    use aurora::catalog::MarketplaceKey;
    use aurora::model::{MessageRole, TaskSource, TaskStatus};

    fn booted_app() -> App {
        App::new(MarketplaceKey::Amazon)
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("aurora-{}-{}", std::process::id(), name))
    }

    #[test]
    fn boot_seeds_the_starter_board_and_greeting() {
        let app = booted_app();

        assert_eq!(app.state.tasks.len(), 2);
        assert_eq!(app.state.tasks[0].status, TaskStatus::Pending);
        assert_eq!(app.state.tasks[1].status, TaskStatus::InProgress);
        assert!(app.state.catalog_rows.is_empty());

        let greeting = app.state.log.iter().next().unwrap();
        assert_eq!(greeting.role, MessageRole::Assistant);
        assert!(greeting.content.contains("Aurora online"));
    }

    #[test]
    fn voice_command_updates_board_and_log() {
        let mut app = booted_app();
        let before = app.state.log.len();

        let outcome = app.run_command("add task follow up with PDP designers").unwrap();

        assert_eq!(app.state.tasks.len(), 3);
        let added = app.state.tasks.last().unwrap();
        assert_eq!(added.source, TaskSource::Voice);
        assert!(outcome.announce);

        // The utterance and the reply both land in the log
        assert_eq!(app.state.log.len(), before + 2);
        let entries: Vec<_> = app.state.log.iter().collect();
        assert_eq!(entries[entries.len() - 2].role, MessageRole::User);
        assert_eq!(entries[entries.len() - 1].role, MessageRole::Assistant);
    }

    #[test]
    fn empty_input_is_a_no_op_at_the_boundary() {
        let mut app = booted_app();
        let before = app.state.log.len();

        assert!(app.run_command("   ").is_none());
        assert_eq!(app.state.log.len(), before);
        assert_eq!(app.state.tasks.len(), 2);
    }

    #[test]
    fn conversation_log_caps_at_nine_entries() {
        let mut app = booted_app();

        for _ in 0..6 {
            app.run_command("show my tasks");
        }

        assert_eq!(app.state.log.len(), 9);
        // The greeting has been evicted by now
        assert!(app
            .state
            .log
            .iter()
            .all(|entry| !entry.content.contains("Aurora online")));
    }

    #[test]
    fn marketplace_switch_always_clears_generated_rows() {
        let mut app = booted_app();
        app.load_sample();
        app.run_command("generate catalog");
        assert_eq!(app.state.catalog_rows.len(), 3);

        app.select_marketplace(MarketplaceKey::Flipkart);
        assert!(app.state.catalog_rows.is_empty());

        // Re-selecting the current marketplace clears as well
        app.run_command("generate catalog");
        assert!(!app.state.catalog_rows.is_empty());
        app.select_marketplace(MarketplaceKey::Flipkart);
        assert!(app.state.catalog_rows.is_empty());
    }

    #[test]
    fn failed_generate_preserves_prior_rows() {
        let mut app = booted_app();
        app.load_sample();
        app.run_command("generate catalog");
        let prior = app.state.catalog_rows.clone();
        assert!(!prior.is_empty());

        app.set_raw_catalog("");
        app.run_command("generate catalog");
        assert_eq!(app.state.catalog_rows, prior);
    }

    #[test]
    fn clearing_the_workspace_drops_raw_text_and_rows() {
        let mut app = booted_app();
        app.load_sample();
        app.run_command("generate catalog");
        assert!(!app.state.catalog_rows.is_empty());

        app.clear_catalog();
        assert!(app.state.raw_catalog.is_empty());
        assert!(app.state.catalog_rows.is_empty());
    }

    #[test]
    fn manual_add_uses_the_manual_source() {
        let mut app = booted_app();
        let announcement = app.add_manual_task("Restock bubble wrap");

        assert_eq!(app.state.tasks.len(), 3);
        assert_eq!(app.state.tasks.last().unwrap().source, TaskSource::Manual);
        assert!(announcement.contains("Restock bubble wrap"));
    }

    #[test]
    fn generate_then_export_writes_a_csv_file() {
        let mut app = booted_app();
        app.load_sample();
        app.run_command("generate catalog");

        let path = temp_path("export.csv");
        let written = app.export_csv(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let csv = fs::read_to_string(&path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "sku,platform,title,description,keywords,price,stock"
        );
        assert_eq!(lines.count(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn export_without_rows_is_refused() {
        let app = booted_app();
        let err = app.export_csv(Some(temp_path("never.csv"))).unwrap_err();
        assert!(err.to_string().contains("no generated rows"));
    }

    #[test]
    fn template_inspection_reports_headers_and_row_count() {
        let app = booted_app();

        let path = temp_path("template.csv");
        fs::write(&path, "product,code,mrp,vertical,qty,copy\nKettle,KTL-1,999,Kitchen,10,Steel body\n").unwrap();

        let info = app.inspect_template(&path).unwrap();
        assert!(info.contains("Detected 1 rows"));
        assert!(info.contains("product, code, mrp, vertical, qty, copy"));

        // Inspection never feeds generation
        assert!(app.state.raw_catalog.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unreadable_template_gets_a_friendly_notice() {
        let app = booted_app();

        let path = temp_path("garbled.csv");
        fs::write(&path, "\n\n").unwrap();

        let info = app.inspect_template(&path).unwrap();
        assert!(info.contains("Could not parse template"));

        fs::remove_file(&path).unwrap();
    }
}
