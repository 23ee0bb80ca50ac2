// ============================================================================
// TsCat - 工具模块
// ============================================================================
//
// 文件: src/utils/mod.rs
// 职责: 通用工具函数入口
// 边界:
//   - ✅ 日志、颜色、样式、常量
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod colors;
pub mod constants;
pub mod logger;
pub mod styles;
