// ============================================================================
// TsCat - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用名称
//   - ✅ 像素图标字符
//   - ✅ 进度条字符
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "TSCAT";

/// 像素风格图标
pub mod icons {
    /// 错误图标
    pub const ERROR: &str = "✗";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 信息图标
    pub const INFO: &str = "i";
    /// 目录文件图标
    pub const CATALOG: &str = "●";
    /// 检查图标
    pub const CHECK: &str = "◆";
    /// 统计图标
    pub const STATS: &str = "◇";
    /// 更新图标
    pub const UPDATE: &str = "▲";
    /// 初始化图标
    pub const INIT: &str = "◈";
    /// 箭头图标
    pub const ARROW: &str = "→";
    /// 新增图标
    pub const ADDED: &str = "+";
    /// 删除图标
    pub const REMOVED: &str = "-";
    /// 跳过图标
    pub const SKIP: &str = "○";
}

/// 进度条字符
pub mod progress_chars {
    /// 进度条填充字符（已完成、当前、未完成）
    pub const BAR: &str = "█▓░";
    /// spinner 帧
    pub const SPINNER: &str = "⠋⠙⠹⠸⠼⠴⠦⠧ ";
}
