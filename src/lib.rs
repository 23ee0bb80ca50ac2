// ============================================================================
// TsCat - 库入口
// ============================================================================
//
// 文件: src/lib.rs
// 职责: 对外导出目录模型、解析、序列化、检查与查找
// 边界:
//   - ✅ 模块声明
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod cli;
pub mod core;
pub mod i18n;
pub mod models;
pub mod ui;
pub mod utils;
