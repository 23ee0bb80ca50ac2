// ============================================================================
// TsCat - 日志工具
// ============================================================================
//
// 文件: src/utils/logger.rs
// 职责: 用户可见输出与诊断日志初始化
// 边界:
//   - ✅ 带前缀的彩色控制台输出
//   - ✅ tracing 订阅器初始化（输出到 stderr）
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含文件日志写入
//
// ============================================================================

use tracing_subscriber::EnvFilter;

use super::colors::Colors;
use super::constants::APP_NAME;

/// 诊断日志过滤环境变量
pub const LOG_ENV: &str = "TSCAT_LOG";

/// 简单的日志工具
pub struct Logger;

impl Logger {
    pub fn info<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::info(&format!("[{}]", APP_NAME)), msg.as_ref());
    }

    pub fn warn<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::warn("[WARN]"), msg.as_ref());
    }

    pub fn error<S: AsRef<str>>(msg: S) {
        eprintln!("{} {}", Colors::error("[ERROR]"), msg.as_ref());
    }

    pub fn success<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::success(&format!("[{}]", APP_NAME)), msg.as_ref());
    }
}

/// 初始化 tracing 诊断日志
///
/// `TSCAT_LOG` 优先；未设置时详细模式为 `tscat=debug`，否则只输出警告。
/// 重复初始化会被忽略。
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "tscat=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
