// ============================================================================
// TsCat - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心业务逻辑模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含 UI 相关逻辑
//
// ============================================================================

pub mod checker;
pub mod error;
pub mod extractor;
pub mod lookup;
pub mod parser;
pub mod placeholders;
pub mod scanner;
pub mod scheduler;
pub mod statistics;
pub mod sync;
pub mod writer;

// 重新导出常用类型
pub use checker::{CatalogChecker, CheckOptions, Rule};
pub use error::{CatalogError, CatalogResult};
pub use extractor::ExtractedMessage;
pub use lookup::{PluralFamily, Translator};
pub use scheduler::{AsyncTaskScheduler, SchedulerConfig, TaskResult as SchedulerTaskResult};
pub use sync::SyncOptions;
