// ============================================================================
// TsCat - CLI Check 命令
// ============================================================================
//
// 文件: src/cli/check.rs
// 职责: 目录检查命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 调用核心检查器执行检查
//   - ✅ 检查结果格式化输出
//   - ✅ 进度显示和退出码
//   - ❌ 不应包含具体检查逻辑
//   - ❌ 不应包含规则定义
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::{find_catalogs, output_results, OutputFormat};
use crate::core::checker::{CatalogChecker, CheckOptions};
use crate::models::config::Config;
use crate::models::report::Severity;
use crate::ui::progress::BatchProgress;
use crate::ui::summary;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 检查翻译目录
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// 目录文件或要扫描的目录（默认为工作区根目录）
    pub paths: Vec<PathBuf>,

    /// 输出格式
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// 显示每条诊断
    #[arg(short = 'd', long)]
    pub detail: bool,

    /// 警告也视为失败
    #[arg(long)]
    pub strict: bool,

    /// 第一个目录无法处理时取消其余目录
    #[arg(long)]
    pub fail_fast: bool,
}

pub async fn handle_check(args: CheckArgs) -> Result<()> {
    let config = Config::snapshot();
    let verbose = config.output.verbose;
    let strict = args.strict || config.check.strict;

    if args.format == OutputFormat::Table {
        Logger::info(format!("{} {}", icons::CHECK, t!("check.start")));
    }

    let catalogs = find_catalogs(&args.paths, &config)?;
    if verbose {
        Logger::info(tf!("check.found_catalogs", catalogs.len()));
    }

    let checker = CatalogChecker::new(CheckOptions::from_config(&config.check))
        .with_verbose(verbose)
        .with_fail_fast(args.fail_fast);
    let progress = BatchProgress::new(
        catalogs.len(),
        config.output.show_progress && args.format == OutputFormat::Table,
        verbose,
    );
    let (reports, failures) = checker
        .check_files(
            catalogs,
            Config::get_max_concurrency(),
            config.execution.timeout(),
            progress.callback(),
        )
        .await;
    progress.finish();

    output_results(
        args.format,
        reports.as_slice(),
        args.detail,
        summary::print_check_reports,
    )?;
    summary::print_failures(&failures);

    let failed = reports.iter().filter(|r| r.is_failure(strict)).count();
    if args.format == OutputFormat::Table {
        let errors: usize = reports.iter().map(|r| r.count(Severity::Error)).sum();
        let warnings: usize = reports.iter().map(|r| r.count(Severity::Warning)).sum();
        Logger::info("");
        if failed == 0 && failures.is_empty() {
            Logger::success(tf!("check.all_good", reports.len(), warnings));
        } else {
            Logger::error(tf!("check.failed_summary", failed + failures.len(), errors, warnings));
        }
    }

    if failed > 0 || !failures.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
