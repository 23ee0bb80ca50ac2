// ============================================================================
// TsCat - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: 初始化全局配置并启动 CLI
// 边界:
//   - ✅ 配置初始化
//   - ✅ 顶层错误输出与退出码
//   - ❌ 不应包含命令实现
//
// ============================================================================

use tscat::cli::run_cli;
use tscat::models::config::Config;
use tscat::utils::logger::Logger;

#[tokio::main]
async fn main() {
    if let Err(e) = Config::initialize() {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }

    if let Err(e) = run_cli().await {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
