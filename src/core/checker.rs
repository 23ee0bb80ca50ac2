// ============================================================================
// TsCat - 目录检查器
// ============================================================================
//
// 文件: src/core/checker.rs
// 职责: 翻译目录检查核心逻辑
// 边界:
//   - ✅ 检查规则定义与级别配置
//   - ✅ 空源字符串 / 空翻译 / 重复消息 / 占位符 / 空白检查
//   - ✅ 多目录并发检查调度
//   - ❌ 不应包含CLI参数处理
//   - ❌ 不应包含输出格式化
//   - ❌ 不应包含用户交互
//   - ❌ 不应包含国际化文本
//
// ============================================================================

use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::core::error::CatalogResult;
use crate::core::parser;
use crate::core::placeholders;
use crate::core::scheduler::{AsyncTaskScheduler, ProgressCallback, SchedulerConfig, TaskResult};
use crate::core::statistics;
use crate::models::catalog::{Catalog, Message, MessageKey, TranslationStatus};
use crate::models::config::{CheckConfig, RuleLevel};
use crate::models::report::{CatalogReport, Diagnostic, Severity};

/// 检查规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// 源字符串为空
    EmptySource,
    /// 已完成的翻译为空
    EmptyTranslation,
    /// (context, source, comment) 重复
    DuplicateMessage,
    /// 源字符串与翻译的 %N 占位符不一致
    PlaceholderMismatch,
    /// 首尾空白不一致
    WhitespaceMismatch,
    /// 翻译尚未完成
    Unfinished,
}

impl Rule {
    pub fn all() -> &'static [Rule] {
        &[
            Rule::EmptySource,
            Rule::EmptyTranslation,
            Rule::DuplicateMessage,
            Rule::PlaceholderMismatch,
            Rule::WhitespaceMismatch,
            Rule::Unfinished,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rule::EmptySource => "empty-source",
            Rule::EmptyTranslation => "empty-translation",
            Rule::DuplicateMessage => "duplicate-message",
            Rule::PlaceholderMismatch => "placeholder-mismatch",
            Rule::WhitespaceMismatch => "whitespace-mismatch",
            Rule::Unfinished => "unfinished",
        }
    }

    pub fn from_name(name: &str) -> Option<Rule> {
        Self::all().iter().copied().find(|rule| rule.name() == name)
    }

    pub fn default_level(&self) -> RuleLevel {
        match self {
            Rule::EmptySource | Rule::EmptyTranslation => RuleLevel::Error,
            Rule::DuplicateMessage | Rule::PlaceholderMismatch => RuleLevel::Warning,
            Rule::WhitespaceMismatch | Rule::Unfinished => RuleLevel::Info,
        }
    }
}

/// 检查选项
#[derive(Debug, Clone)]
pub struct CheckOptions {
    levels: HashMap<Rule, RuleLevel>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            levels: Rule::all()
                .iter()
                .map(|rule| (*rule, rule.default_level()))
                .collect(),
        }
    }
}

impl CheckOptions {
    /// 从配置构建，未知规则名会被忽略并记录日志
    pub fn from_config(config: &CheckConfig) -> Self {
        let mut options = Self::default();
        for (name, level) in &config.rules {
            match Rule::from_name(name) {
                Some(rule) => options.set_level(rule, *level),
                None => tracing::warn!("ignoring unknown rule '{}' in configuration", name),
            }
        }
        options
    }

    /// 关闭所有规则，只做解析与统计
    pub fn disabled() -> Self {
        Self {
            levels: Rule::all()
                .iter()
                .map(|rule| (*rule, RuleLevel::Off))
                .collect(),
        }
    }

    pub fn set_level(&mut self, rule: Rule, level: RuleLevel) {
        self.levels.insert(rule, level);
    }

    fn severity(&self, rule: Rule) -> Option<Severity> {
        match self.levels.get(&rule).copied().unwrap_or(rule.default_level()) {
            RuleLevel::Error => Some(Severity::Error),
            RuleLevel::Warning => Some(Severity::Warning),
            RuleLevel::Info => Some(Severity::Info),
            RuleLevel::Off => None,
        }
    }
}

/// 目录检查器
pub struct CatalogChecker {
    options: CheckOptions,
    verbose: bool,
    fail_fast: bool,
}

impl CatalogChecker {
    /// 创建新的检查器
    pub fn new(options: CheckOptions) -> Self {
        Self {
            options,
            verbose: false,
            fail_fast: false,
        }
    }

    /// 设置详细模式
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 第一个目录处理失败后取消其余目录
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// 检查内存中的目录
    pub fn check(&self, catalog: &Catalog) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (context, message) in catalog.messages() {
            let key = message.key(&context.name);
            self.check_message(&key, message, &mut diagnostics);
        }
        self.check_duplicates(catalog, &mut diagnostics);

        diagnostics
    }

    /// 解析并检查单个目录文件
    pub fn check_file(&self, path: &Path) -> CatalogResult<CatalogReport> {
        let catalog = parser::parse_file(path)?;
        let diagnostics = self.check(&catalog);
        tracing::debug!(
            "checked {:?}: {} messages, {} diagnostics",
            path,
            catalog.message_count(),
            diagnostics.len()
        );
        Ok(CatalogReport {
            path: path.to_path_buf(),
            diagnostics,
            statistics: statistics::compute(&catalog),
        })
    }

    /// 并发检查多个目录文件
    ///
    /// 返回成功的报告与失败的 (路径, 错误信息)。
    pub async fn check_files(
        &self,
        paths: Vec<PathBuf>,
        max_concurrency: usize,
        timeout: Option<Duration>,
        progress_callback: Option<ProgressCallback>,
    ) -> (Vec<CatalogReport>, Vec<(PathBuf, String)>) {
        let config = SchedulerConfig {
            max_concurrency: max_concurrency.max(1),
            timeout,
            fail_fast: self.fail_fast,
            verbose: self.verbose,
            progress_callback,
        };
        let scheduler = AsyncTaskScheduler::new(config);

        let checker = Arc::new(CatalogChecker {
            options: self.options.clone(),
            verbose: self.verbose,
            fail_fast: self.fail_fast,
        });
        let tasks = paths
            .into_iter()
            .map(|path| {
                let checker = Arc::clone(&checker);
                let task_id = path.display().to_string();
                (task_id, check_file_task(checker, path))
            })
            .collect();

        let mut reports = Vec::new();
        let mut failures = Vec::new();
        for (task_id, result) in scheduler.execute_batch(tasks).await {
            match result {
                TaskResult::Success(report) => reports.push(report),
                TaskResult::Failed(error) => failures.push((PathBuf::from(task_id), error)),
                TaskResult::Timeout => failures.push((PathBuf::from(task_id), "timeout".to_string())),
                TaskResult::Cancelled => {
                    failures.push((PathBuf::from(task_id), "cancelled".to_string()))
                }
            }
        }

        reports.sort_by(|a, b| a.path.cmp(&b.path));
        failures.sort();
        (reports, failures)
    }
}

// ============================================================================
// 单条消息规则
// ============================================================================

impl CatalogChecker {
    fn check_message(&self, key: &MessageKey, message: &Message, out: &mut Vec<Diagnostic>) {
        if message.source.is_empty() {
            self.report(out, Rule::EmptySource, key, "source string is empty".to_string());
        }

        if !message.is_active() {
            return;
        }

        match message.status {
            TranslationStatus::Finished => {
                let empty_forms = message
                    .translation
                    .forms()
                    .iter()
                    .filter(|form| form.is_empty())
                    .count();
                if message.translation.forms().is_empty() || empty_forms > 0 {
                    self.report(
                        out,
                        Rule::EmptyTranslation,
                        key,
                        "translation is empty but not marked unfinished".to_string(),
                    );
                }
            }
            TranslationStatus::Unfinished => {
                self.report(out, Rule::Unfinished, key, "translation is unfinished".to_string());
            }
            _ => {}
        }

        let expected = placeholders::positional_set(&message.source);
        for form in message.translation.forms() {
            if form.is_empty() {
                continue;
            }

            let actual = placeholders::positional_set(form);
            if actual != expected {
                self.report(
                    out,
                    Rule::PlaceholderMismatch,
                    key,
                    format!(
                        "source uses {} but translation uses {}",
                        format_set(&expected),
                        format_set(&actual)
                    ),
                );
            }

            if edge_whitespace(&message.source) != edge_whitespace(form) {
                self.report(
                    out,
                    Rule::WhitespaceMismatch,
                    key,
                    "leading or trailing whitespace differs from source".to_string(),
                );
            }
        }
    }

    fn check_duplicates(&self, catalog: &Catalog, out: &mut Vec<Diagnostic>) {
        let mut groups: BTreeMap<MessageKey, Vec<&Message>> = BTreeMap::new();
        for (context, message) in catalog.messages() {
            if message.is_active() {
                groups.entry(message.key(&context.name)).or_default().push(message);
            }
        }

        for (key, messages) in groups {
            if messages.len() < 2 {
                continue;
            }

            let mut translations: Vec<Vec<&str>> =
                messages.iter().map(|m| m.translation.forms()).collect();
            translations.sort();
            translations.dedup();

            let detail = if translations.len() > 1 {
                format!(
                    "appears {} times with {} differing translations",
                    messages.len(),
                    translations.len()
                )
            } else {
                format!("appears {} times", messages.len())
            };
            self.report(out, Rule::DuplicateMessage, &key, detail);
        }
    }

    fn report(&self, out: &mut Vec<Diagnostic>, rule: Rule, key: &MessageKey, detail: String) {
        if let Some(severity) = self.options.severity(rule) {
            out.push(Diagnostic {
                rule: rule.name().to_string(),
                severity,
                key: key.clone(),
                detail,
            });
        }
    }
}

// ============================================================================
// 辅助函数
// ============================================================================

/// 检查任务
async fn check_file_task(checker: Arc<CatalogChecker>, path: PathBuf) -> Result<CatalogReport> {
    let report = tokio::task::spawn_blocking(move || checker.check_file(&path)).await??;
    Ok(report)
}

/// 首尾空白特征
fn edge_whitespace(text: &str) -> (bool, bool) {
    (
        text.starts_with(char::is_whitespace),
        text.ends_with(char::is_whitespace),
    )
}

fn format_set(set: &std::collections::BTreeSet<u8>) -> String {
    if set.is_empty() {
        return "no placeholders".to_string();
    }
    set.iter()
        .map(|n| format!("%{}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_str;
    use tempfile::TempDir;

    fn catalog(messages: &str) -> Catalog {
        let xml = format!(
            r#"<TS version="2.1" language="tr"><context><name>DialogManager</name>{}</context></TS>"#,
            messages
        );
        parse_str(&xml).unwrap()
    }

    fn rules(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.rule.as_str()).collect()
    }

    #[test]
    fn clean_catalog_has_no_diagnostics() {
        let catalog = catalog(
            "<message><source>Copy %1</source><translation>%1 kopyala</translation></message>",
        );
        let checker = CatalogChecker::new(CheckOptions::default());
        assert!(checker.check(&catalog).is_empty());
    }

    #[test]
    fn empty_finished_translation_is_an_error() {
        let catalog = catalog("<message><source>Rename</source><translation></translation></message>");
        let diagnostics = CatalogChecker::new(CheckOptions::default()).check(&catalog);
        assert_eq!(rules(&diagnostics), vec!["empty-translation"]);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn empty_unfinished_translation_is_only_info() {
        let catalog = catalog(
            r#"<message><source>Rename</source><translation type="unfinished"></translation></message>"#,
        );
        let diagnostics = CatalogChecker::new(CheckOptions::default()).check(&catalog);
        assert_eq!(rules(&diagnostics), vec!["unfinished"]);
        assert_eq!(diagnostics[0].severity, Severity::Info);
    }

    #[test]
    fn disabled_options_report_nothing() {
        let catalog = catalog(
            "<message><source>Rename</source><translation></translation></message>\
             <message><source>Rename</source><translation></translation></message>",
        );
        assert!(CatalogChecker::new(CheckOptions::disabled()).check(&catalog).is_empty());
    }

    #[test]
    fn empty_source_is_an_error() {
        let catalog = catalog("<message><source></source><translation>x</translation></message>");
        let diagnostics = CatalogChecker::new(CheckOptions::default()).check(&catalog);
        assert!(rules(&diagnostics).contains(&"empty-source"));
    }

    #[test]
    fn placeholder_mismatch_is_a_warning() {
        let catalog = catalog(
            "<message><source>%1 of %2 copied</source><translation>%1 kopyalandı</translation></message>",
        );
        let diagnostics = CatalogChecker::new(CheckOptions::default()).check(&catalog);
        assert_eq!(rules(&diagnostics), vec!["placeholder-mismatch"]);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].detail.contains("%1, %2"));
    }

    #[test]
    fn reordered_placeholders_are_fine() {
        let catalog = catalog(
            "<message><source>%1 of %2</source><translation>%2 içinde %1</translation></message>",
        );
        assert!(CatalogChecker::new(CheckOptions::default()).check(&catalog).is_empty());
    }

    #[test]
    fn duplicates_are_reported_once_per_key() {
        let catalog = catalog(
            "<message><source>Cancel</source><comment>button</comment><translation>İptal</translation></message>\
             <message><source>Cancel</source><comment>button</comment><translation>Vazgeç</translation></message>\
             <message><source>Cancel</source><translation>İptal</translation></message>",
        );
        let diagnostics = CatalogChecker::new(CheckOptions::default()).check(&catalog);
        assert_eq!(rules(&diagnostics), vec!["duplicate-message"]);
        assert_eq!(diagnostics[0].key.comment.as_deref(), Some("button"));
        assert!(diagnostics[0].detail.contains("2 differing"));
    }

    #[test]
    fn vanished_messages_are_not_checked_for_translation() {
        let catalog = catalog(
            r#"<message><source>%1 gone</source><translation type="vanished">yok</translation></message>"#,
        );
        assert!(CatalogChecker::new(CheckOptions::default()).check(&catalog).is_empty());
    }

    #[test]
    fn whitespace_mismatch_is_reported_as_info() {
        let catalog = catalog("<message><source>Name: </source><translation>Ad:</translation></message>");
        let diagnostics = CatalogChecker::new(CheckOptions::default()).check(&catalog);
        assert_eq!(rules(&diagnostics), vec!["whitespace-mismatch"]);
    }

    #[test]
    fn rules_can_be_turned_off_or_escalated() {
        let mut config = CheckConfig::default();
        config.rules.insert("unfinished".to_string(), RuleLevel::Off);
        config.rules.insert("placeholder-mismatch".to_string(), RuleLevel::Error);
        config.rules.insert("no-such-rule".to_string(), RuleLevel::Error);
        let checker = CatalogChecker::new(CheckOptions::from_config(&config));

        let catalog = catalog(
            r#"<message><source>a</source><translation type="unfinished"></translation></message>
               <message><source>%1</source><translation>x</translation></message>"#,
        );
        let diagnostics = checker.check(&catalog);
        assert_eq!(rules(&diagnostics), vec!["placeholder-mismatch"]);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn numerus_forms_are_each_checked() {
        let catalog = catalog(
            r#"<message numerus="yes"><source>%n files in %1</source><translation><numerusform>%1 içinde %n dosya</numerusform><numerusform></numerusform></translation></message>"#,
        );
        let diagnostics = CatalogChecker::new(CheckOptions::default()).check(&catalog);
        assert_eq!(rules(&diagnostics), vec!["empty-translation"]);
    }

    #[tokio::test]
    async fn checks_many_files_concurrently() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good_tr.ts");
        let bad = temp_dir.path().join("bad_tr.ts");
        std::fs::write(
            &good,
            r#"<TS version="2.1"><context><name>C</name><message><source>a</source><translation>b</translation></message></context></TS>"#,
        )
        .unwrap();
        std::fs::write(&bad, "<TS><context>").unwrap();

        let checker = CatalogChecker::new(CheckOptions::default());
        let (reports, failures) = checker
            .check_files(vec![good.clone(), bad.clone()], 2, None, None)
            .await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].path, good);
        assert_eq!(reports[0].statistics.finished, 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, bad);
    }
}
