use std::fs;
use std::path::{Path, PathBuf};

use rstest::{fixture, rstest};
use tempfile::TempDir;

use tscat::core::checker::{CatalogChecker, CheckOptions};
use tscat::core::lookup::Translator;
use tscat::core::sync::{sync, SyncOptions};
use tscat::core::{extractor, parser, placeholders, scanner, statistics, writer};
use tscat::models::catalog::{Catalog, LineRef, MessageKey, TranslationStatus};
use tscat::models::config::Config;
use tscat::models::report::Severity;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[fixture]
fn catalog() -> Catalog {
    parser::parse_file(&fixture_path("dde-file-manager_tr.ts")).unwrap()
}

fn tuples(catalog: &Catalog) -> Vec<(String, String, Option<String>, Vec<String>, TranslationStatus)> {
    catalog
        .messages()
        .map(|(context, message)| {
            (
                context.name.clone(),
                message.source.clone(),
                message.comment.clone(),
                message.translation.forms().iter().map(|f| f.to_string()).collect(),
                message.status,
            )
        })
        .collect()
}

#[rstest]
fn parses_the_turkish_catalog(catalog: Catalog) {
    assert_eq!(catalog.language.as_deref(), Some("tr"));
    assert_eq!(catalog.version, "2.1");
    assert_eq!(catalog.contexts.len(), 3);
    assert_eq!(catalog.message_count(), 14);

    let dialog = catalog.context("OpenWithDialog").unwrap();
    let cancel = &dialog.messages[3];
    assert_eq!(cancel.source, "Cancel");
    assert_eq!(cancel.comment.as_deref(), Some("button"));
    assert_eq!(cancel.locations[0].line, Some(LineRef::Absolute(240)));
}

#[rstest]
fn every_message_satisfies_the_format_rules(catalog: Catalog) {
    for (_, message) in catalog.messages() {
        assert!(!message.source.is_empty());
        if message.status == TranslationStatus::Finished {
            assert!(!message.translation.is_empty(), "{}", message.source);
        }
    }
}

#[rstest]
fn lint_reports_duplicates_and_unfinished(catalog: Catalog) {
    let diagnostics = CatalogChecker::new(CheckOptions::default()).check(&catalog);

    let found: Vec<(&str, Severity, &str)> = diagnostics
        .iter()
        .map(|d| (d.rule.as_str(), d.severity, d.key.source.as_str()))
        .collect();
    assert!(found.contains(&("duplicate-message", Severity::Warning, "Search")));
    assert!(found.contains(&("unfinished", Severity::Info, "Recommended Applications")));
    assert!(!found.iter().any(|(rule, _, _)| *rule == "placeholder-mismatch"));
    assert!(!found.iter().any(|(_, severity, _)| *severity == Severity::Error));
}

#[tokio::test]
async fn batch_check_applies_strict_mode() {
    let checker = CatalogChecker::new(CheckOptions::default());
    let (reports, failures) = checker
        .check_files(vec![fixture_path("dde-file-manager_tr.ts")], 2, None, None)
        .await;

    assert!(failures.is_empty());
    assert_eq!(reports.len(), 1);
    assert!(!reports[0].is_failure(false));
    assert!(reports[0].is_failure(true));
}

#[rstest]
fn round_trip_preserves_every_tuple(catalog: Catalog) {
    let written = writer::to_string(&catalog);
    let reparsed = parser::parse_str(&written).unwrap();

    assert_eq!(tuples(&reparsed), tuples(&catalog));
    assert_eq!(writer::to_string(&reparsed), written);
}

#[rstest]
fn lookup_behaves_like_the_application(catalog: Catalog) {
    let translator = Translator::from_catalog(&catalog);

    assert_eq!(translator.tr("OpenWithDialog", "Cancel", Some("button")), "İptal");
    assert_eq!(
        translator.tr("OpenWithDialog", "Recommended Applications", None),
        "Recommended Applications"
    );
    assert_eq!(translator.tr("dfmplugin_titlebar::TitleBarWidget", "Search", None), "Ara");
    assert_eq!(translator.tr("dfmplugin_titlebar::TitleBarWidget", "Back", None), "Back");

    let template = translator.tr("ComputerController", "Copy %1 of %2", None);
    assert_eq!(
        placeholders::format_args(template, &["a.txt", "Belgeler"]),
        "Belgeler içinden a.txt kopyala"
    );
}

#[rstest]
fn statistics_count_active_messages(catalog: Catalog) {
    let stats = statistics::compute(&catalog);
    assert_eq!(stats.messages, 14);
    assert_eq!(stats.finished, 12);
    assert_eq!(stats.unfinished, 1);
    assert_eq!(stats.vanished, 1);
    assert_eq!(stats.completion, 92.3);
}

#[test]
fn update_synchronizes_with_sources() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("translations")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::copy(
        fixture_path("dde-file-manager_tr.ts"),
        root.join("translations/dde-file-manager_tr.ts"),
    )
    .unwrap();
    fs::copy(
        fixture_path("src/openwithdialog.cpp"),
        root.join("src/openwithdialog.cpp"),
    )
    .unwrap();

    let config = Config::default();
    let catalogs = scanner::collect_catalog_files(&[root.to_path_buf()], &config);
    assert_eq!(catalogs, vec![root.join("translations/dde-file-manager_tr.ts")]);

    let sources = scanner::collect_source_files(&[root.join("src")], &config);
    let extracted = extractor::extract_files(&sources).unwrap();
    assert_eq!(extracted.len(), 8);
    assert!(extracted.iter().all(|m| m.context == "OpenWithDialog"));

    let mut catalog = parser::parse_file(&catalogs[0]).unwrap();
    let report = sync(
        &mut catalog,
        &extracted,
        &SyncOptions {
            base_dir: Some(root.join("translations")),
            no_obsolete: false,
        },
    );

    assert_eq!(report.kept, 7);
    assert_eq!(
        report.added,
        vec![MessageKey::new("OpenWithDialog", "No applications found for %1", None)]
    );
    assert_eq!(report.vanished.len(), 6);
    assert!(report.removed.is_empty());

    let open_with = &catalog.context("OpenWithDialog").unwrap().messages[0];
    assert_eq!(open_with.locations[0].filename, "../src/openwithdialog.cpp");
    assert_eq!(open_with.locations[0].line, Some(LineRef::Absolute(21)));

    writer::write_file(&catalog, &catalogs[0]).unwrap();
    let reloaded = parser::parse_file(&catalogs[0]).unwrap();
    assert_eq!(tuples(&reloaded), tuples(&catalog));
}
