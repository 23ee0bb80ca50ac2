// ============================================================================
// TsCat - 目录统计
// ============================================================================
//
// 文件: src/core/statistics.rs
// 职责: 翻译目录完成度统计
// 边界:
//   - ✅ 按状态计数
//   - ✅ 完成百分比计算
//   - ❌ 不应包含输出格式化
//
// ============================================================================

use crate::models::catalog::{Catalog, TranslationStatus};
use crate::models::report::CatalogStatistics;

/// 计算目录统计信息
pub fn compute(catalog: &Catalog) -> CatalogStatistics {
    let mut stats = CatalogStatistics {
        language: catalog.language.clone(),
        contexts: catalog.contexts.len(),
        ..Default::default()
    };

    for (_, message) in catalog.messages() {
        stats.messages += 1;
        match message.status {
            TranslationStatus::Finished => stats.finished += 1,
            TranslationStatus::Unfinished => stats.unfinished += 1,
            TranslationStatus::Vanished => stats.vanished += 1,
            TranslationStatus::Obsolete => stats.obsolete += 1,
        }
    }

    let active = stats.finished + stats.unfinished;
    stats.completion = if active == 0 {
        100.0
    } else {
        (stats.finished as f64 / active as f64 * 1000.0).round() / 10.0
    };

    stats
}
