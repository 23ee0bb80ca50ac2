// ============================================================================
// TsCat - 数据模型模块
// ============================================================================
//
// 文件: src/models/mod.rs
// 职责: 数据模型入口
// 边界:
//   - ✅ 目录、配置、报告模型
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod catalog;
pub mod config;
pub mod report;

pub use catalog::{Catalog, Context, Location, Message, MessageKey, Translation, TranslationStatus};
