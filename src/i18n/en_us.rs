// ============================================================================
// TsCat - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English translation content definition
// 边界:
//   - ✅ English translation strings definition
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Check command
    ("check.start", "Checking translation catalogs..."),
    ("check.found_catalogs", "Found {} catalogs"),
    ("check.catalog_clean", "No issues found"),
    ("check.catalog_counts", "{} errors, {} warnings, {} notes"),
    ("check.rule_count", "  {} {}: {}"),
    ("check.detail_hint", "  Use --detail to list every message"),
    ("check.file_failed", "Cannot process {}: {}"),
    ("check.all_good", "All {} catalogs passed ({} warnings)"),
    (
        "check.failed_summary",
        "{} catalogs failed ({} errors, {} warnings)",
    ),
    // Stats command
    ("stats.title", "Translation progress"),
    ("stats.column.catalog", "Catalog"),
    ("stats.column.language", "Lang"),
    ("stats.column.messages", "Messages"),
    ("stats.column.finished", "Finished"),
    ("stats.column.unfinished", "Unfinished"),
    ("stats.column.vanished", "Vanished"),
    ("stats.column.obsolete", "Obsolete"),
    ("stats.column.completion", "Done"),
    ("stats.all_complete", "All catalogs are fully translated"),
    (
        "stats.total",
        "{} catalogs: {} of {} active messages translated ({}%)",
    ),
    // Lookup command
    (
        "lookup.not_found",
        "No finished translation for {} :: \"{}\", falling back to source",
    ),
    // Fmt command
    ("fmt.unchanged", "Already formatted: {}"),
    ("fmt.would_reformat", "Would reformat: {}"),
    ("fmt.reformatted", "Reformatted: {}"),
    ("fmt.all_formatted", "All {} catalogs are already formatted"),
    ("fmt.check_failed", "{} catalogs are not formatted"),
    ("fmt.check_hint", "Run `tscat fmt` to rewrite them"),
    ("fmt.done", "Reformatted {} catalogs"),
    // Extract command
    ("extract.scanning", "Scanning {} source files..."),
    ("extract.context_header", "{} ({} strings)"),
    ("extract.summary", "{} translatable strings in {} contexts"),
    // Update command
    ("update.start", "Updating catalog: {}"),
    ("update.extracted", "Extracted {} strings from {} source files"),
    ("update.summary_title", "Synchronization result"),
    ("update.added", "New messages: {}"),
    ("update.kept", "Kept messages: {}"),
    ("update.relocated", "Moved messages: {}"),
    ("update.revived", "Revived messages: {}"),
    ("update.vanished", "Vanished messages: {}"),
    ("update.removed", "Removed messages: {}"),
    ("update.up_to_date", "Catalog is up to date"),
    ("update.dry_run", "Dry run, catalog not written"),
    ("update.written", "Catalog written: {}"),
    // Progress
    ("progress.update", "Progress: {}/{}"),
    // Scheduler
    (
        "scheduler.fail_fast_triggered",
        "Task {} failed, cancelling remaining tasks",
    ),
    ("scheduler.task_success", "Task {} succeeded in {}s"),
    ("scheduler.task_failed", "Task {} failed after {}s: {}"),
    ("scheduler.task_timeout", "Task {} timed out after {}s"),
    ("scheduler.task_cancelled", "Task {} cancelled"),
    ("scheduler.batch_start", "Running {} tasks"),
    ("scheduler.task_join_error", "Task join error: {}"),
    ("scheduler.batch_complete", "{} of {} tasks succeeded"),
    // Error messages
    ("error.workspace_not_exist", "Workspace path does not exist: {}"),
    ("error.path_not_exist", "Path does not exist: {}"),
    ("error.no_catalogs_found", "No translation catalogs found in {}"),
    ("error.no_sources_found", "No source files found in {}, catalog left untouched"),
    ("error.catalogs_failed", "{} catalogs could not be processed"),
    // Init command
    ("init.start", "Initializing TsCat configuration..."),
    ("init.config_exists", "Config file already exists: {}"),
    (
        "init.use_force_hint",
        "Use --force to overwrite existing config file",
    ),
    ("init.config_created", "Config file created: {}"),
    ("init.create_failed", "Failed to create config file: {}"),
    (
        "init.next_steps",
        "You can now adjust rule levels and ignore patterns in the config file",
    ),
];
