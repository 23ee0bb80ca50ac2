// ============================================================================
// TsCat - 结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 检查、统计、提取、同步结果的表格显示
// 边界:
//   - ✅ 诊断列表与按规则汇总
//   - ✅ 统计表格
//   - ✅ 同步结果与提取结果显示
//   - ✅ 国际化文本支持
//   - ❌ 不应包含具体业务逻辑
//   - ❌ 不应包含文件操作
//
// ============================================================================

use anyhow::Result;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::extractor::ExtractedMessage;
use crate::models::report::{CatalogReport, Diagnostic, Severity, SyncReport};
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::utils::styles::TextStyles;
use crate::{t, tf};

const SEPARATOR: &str = "───────────────────────────────────────";

// ============================================================================
// 检查结果
// ============================================================================

/// 打印检查报告
pub fn print_check_reports(reports: &[CatalogReport], detail: bool) -> Result<()> {
    for report in reports {
        Logger::info("");
        Logger::info(format!(
            "{} {}",
            icons::CATALOG,
            TextStyles::bold(&report.path.display().to_string())
        ));
        Logger::info(SEPARATOR);

        if report.diagnostics.is_empty() {
            Logger::success(t!("check.catalog_clean"));
            continue;
        }

        if detail {
            for diagnostic in &report.diagnostics {
                print_diagnostic(diagnostic);
            }
        } else {
            print_rule_counts(&report.diagnostics);
        }

        Logger::info(tf!(
            "check.catalog_counts",
            report.count(Severity::Error),
            report.count(Severity::Warning),
            report.count(Severity::Info)
        ));
    }

    let _ = io::stdout().flush();
    Ok(())
}

fn severity_icon(severity: Severity) -> String {
    match severity {
        Severity::Error => Colors::error(icons::ERROR),
        Severity::Warning => Colors::warn(icons::WARNING),
        Severity::Info => Colors::info(icons::INFO),
    }
}

/// 打印单条诊断
fn print_diagnostic(diagnostic: &Diagnostic) {
    Logger::info(format!(
        "  {} {} {}",
        severity_icon(diagnostic.severity),
        Colors::dim(&format!("[{}]", diagnostic.rule)),
        diagnostic.key
    ));
    Logger::info(format!("      {} {}", icons::ARROW, diagnostic.detail));
}

/// 按规则汇总诊断数量
fn print_rule_counts(diagnostics: &[Diagnostic]) {
    let mut counts: BTreeMap<(&str, Severity), usize> = BTreeMap::new();
    for diagnostic in diagnostics {
        *counts
            .entry((diagnostic.rule.as_str(), diagnostic.severity))
            .or_default() += 1;
    }

    for ((rule, severity), count) in counts {
        Logger::info(tf!("check.rule_count", severity_icon(severity), rule, count));
    }
    Logger::info(t!("check.detail_hint"));
}

/// 打印无法处理的文件
pub fn print_failures(failures: &[(PathBuf, String)]) {
    for (path, error) in failures {
        Logger::error(tf!("check.file_failed", path.display(), error));
    }
}

// ============================================================================
// 统计
// ============================================================================

/// 打印统计表格
pub fn print_statistics_table(reports: &[CatalogReport], _detail: bool) -> Result<()> {
    Logger::info("");
    Logger::info(format!("{} {}", icons::STATS, TextStyles::bold(&t!("stats.title"))));
    Logger::info(format!(
        "{:<40} {:>6} {:>8} {:>8} {:>10} {:>8} {:>8} {:>8}",
        t!("stats.column.catalog"),
        t!("stats.column.language"),
        t!("stats.column.messages"),
        t!("stats.column.finished"),
        t!("stats.column.unfinished"),
        t!("stats.column.vanished"),
        t!("stats.column.obsolete"),
        t!("stats.column.completion"),
    ));
    Logger::info(SEPARATOR.repeat(3));

    for report in reports {
        let stats = &report.statistics;
        let completion = format!("{:.1}%", stats.completion);
        let completion = if stats.completion >= 100.0 {
            Colors::success(&completion)
        } else {
            Colors::warn(&completion)
        };
        Logger::info(format!(
            "{:<40} {:>6} {:>8} {:>8} {:>10} {:>8} {:>8} {:>8}",
            shorten(&report.path, 40),
            stats.language.as_deref().unwrap_or("-"),
            stats.messages,
            stats.finished,
            stats.unfinished,
            stats.vanished,
            stats.obsolete,
            completion
        ));
    }

    let _ = io::stdout().flush();
    Ok(())
}

/// 截断过长路径，保留末尾
fn shorten(path: &Path, width: usize) -> String {
    let text = path.display().to_string();
    let count = text.chars().count();
    if count <= width {
        return text;
    }
    let tail: String = text.chars().skip(count - (width - 1)).collect();
    format!("…{}", tail)
}

// ============================================================================
// 提取与同步
// ============================================================================

/// 打印提取结果
pub fn print_extracted(messages: &[ExtractedMessage], detail: bool) -> Result<()> {
    let mut contexts: BTreeMap<&str, Vec<&ExtractedMessage>> = BTreeMap::new();
    for message in messages {
        contexts.entry(message.context.as_str()).or_default().push(message);
    }

    Logger::info("");
    for (context, entries) in &contexts {
        Logger::info(tf!("extract.context_header", TextStyles::bold(context), entries.len()));
        if !detail {
            continue;
        }
        for entry in entries {
            let comment = entry
                .comment
                .as_deref()
                .map(|c| format!(" ({})", c))
                .unwrap_or_default();
            Logger::info(format!(
                "  {} \"{}\"{} {}",
                icons::ARROW,
                entry.source,
                Colors::dim(&comment),
                Colors::dim(&format!("{}:{}", entry.file.display(), entry.line))
            ));
        }
    }

    Logger::info(SEPARATOR);
    Logger::info(tf!("extract.summary", messages.len(), contexts.len()));
    Ok(())
}

/// 打印同步结果
pub fn print_sync_report(report: &SyncReport, detail: bool) -> Result<()> {
    Logger::info("");
    Logger::info(TextStyles::bold(&t!("update.summary_title")));
    Logger::info(SEPARATOR);
    Logger::info(format!("{} {}", Colors::success(icons::ADDED), tf!("update.added", report.added.len())));
    Logger::info(format!("{} {}", icons::SKIP, tf!("update.kept", report.kept)));
    Logger::info(format!("{} {}", icons::ARROW, tf!("update.relocated", report.relocated.len())));
    Logger::info(format!("{} {}", icons::UPDATE, tf!("update.revived", report.revived.len())));
    Logger::info(format!("{} {}", Colors::warn(icons::WARNING), tf!("update.vanished", report.vanished.len())));
    Logger::info(format!("{} {}", Colors::error(icons::REMOVED), tf!("update.removed", report.removed.len())));

    if detail {
        let groups = [
            (icons::ADDED, &report.added),
            (icons::ARROW, &report.relocated),
            (icons::UPDATE, &report.revived),
            (icons::WARNING, &report.vanished),
            (icons::REMOVED, &report.removed),
        ];
        for (icon, keys) in groups {
            for key in keys {
                Logger::info(format!("  {} {}", icon, key));
            }
        }
    }

    let _ = io::stdout().flush();
    Ok(())
}
