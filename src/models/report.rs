// ============================================================================
// TsCat - 报告数据模型
// ============================================================================
//
// 文件: src/models/report.rs
// 职责: 检查结果、统计信息、同步结果的数据结构定义
// 边界:
//   - ✅ 诊断信息与严重级别
//   - ✅ 单个目录的检查报告与统计
//   - ✅ 数据序列化（JSON 输出）
//   - ❌ 不应包含检查规则实现
//   - ❌ 不应包含输出格式化
//
// ============================================================================

use serde::Serialize;
use std::path::PathBuf;

use crate::models::catalog::MessageKey;

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// 单条诊断
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// 规则名
    pub rule: String,
    /// 严重级别
    pub severity: Severity,
    /// 相关消息
    pub key: MessageKey,
    /// 说明
    pub detail: String,
}

/// 单个目录的检查报告
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    /// 目录文件路径
    pub path: PathBuf,
    /// 诊断列表
    pub diagnostics: Vec<Diagnostic>,
    /// 统计信息
    pub statistics: CatalogStatistics,
}

/// 目录统计信息
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStatistics {
    /// 目标语言
    pub language: Option<String>,
    /// 上下文数
    pub contexts: usize,
    /// 消息总数
    pub messages: usize,
    /// 已完成
    pub finished: usize,
    /// 未完成
    pub unfinished: usize,
    /// 已消失
    pub vanished: usize,
    /// 已废弃
    pub obsolete: usize,
    /// 完成百分比（已完成 / 活跃消息）
    pub completion: f64,
}

/// 同步结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// 新增的消息
    pub added: Vec<MessageKey>,
    /// 保留的消息数
    pub kept: usize,
    /// 保留但位置变化的消息
    pub relocated: Vec<MessageKey>,
    /// 重新出现的消息
    pub revived: Vec<MessageKey>,
    /// 标记为消失的消息
    pub vanished: Vec<MessageKey>,
    /// 删除的消息
    pub removed: Vec<MessageKey>,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl CatalogReport {
    /// 指定级别的诊断数量
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// 是否应判定为失败
    pub fn is_failure(&self, strict: bool) -> bool {
        self.count(Severity::Error) > 0 || (strict && self.count(Severity::Warning) > 0)
    }
}

impl SyncReport {
    /// 是否有任何变化
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty()
            && self.relocated.is_empty()
            && self.revived.is_empty()
            && self.vanished.is_empty()
            && self.removed.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(severity: Severity) -> Diagnostic {
        Diagnostic {
            rule: "test".to_string(),
            severity,
            key: MessageKey::new("C", "s", None),
            detail: String::new(),
        }
    }

    #[test]
    fn warnings_fail_only_in_strict_mode() {
        let report = CatalogReport {
            path: PathBuf::from("a_tr.ts"),
            diagnostics: vec![diagnostic(Severity::Warning), diagnostic(Severity::Info)],
            statistics: CatalogStatistics::default(),
        };
        assert!(!report.is_failure(false));
        assert!(report.is_failure(true));
    }

    #[test]
    fn errors_always_fail() {
        let report = CatalogReport {
            path: PathBuf::from("a_tr.ts"),
            diagnostics: vec![diagnostic(Severity::Error)],
            statistics: CatalogStatistics::default(),
        };
        assert!(report.is_failure(false));
        assert_eq!(report.count(Severity::Error), 1);
    }
}
