// ============================================================================
// TsCat - CLI Stats 命令
// ============================================================================
//
// 文件: src/cli/stats.rs
// 职责: 翻译完成度统计命令
// 边界:
//   - ✅ 命令行参数定义
//   - ✅ 批量统计与表格 / JSON 输出
//   - ❌ 不应包含统计计算逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::{find_catalogs, output_results, OutputFormat};
use crate::core::checker::{CatalogChecker, CheckOptions};
use crate::models::config::Config;
use crate::models::report::{CatalogReport, CatalogStatistics};
use crate::ui::progress::BatchProgress;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 显示翻译完成度
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// 目录文件或要扫描的目录（默认为工作区根目录）
    pub paths: Vec<PathBuf>,

    /// 输出格式
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// JSON 输出行
#[derive(Debug, Serialize)]
struct StatisticsRow<'a> {
    path: &'a PathBuf,
    #[serde(flatten)]
    statistics: &'a CatalogStatistics,
}

pub async fn handle_stats(args: StatsArgs) -> Result<()> {
    let config = Config::snapshot();
    let verbose = config.output.verbose;

    let catalogs = find_catalogs(&args.paths, &config)?;
    let progress = BatchProgress::new(
        catalogs.len(),
        config.output.show_progress && args.format == OutputFormat::Table,
        verbose,
    );

    // 统计复用检查流水线，规则全部关闭
    let checker = CatalogChecker::new(CheckOptions::disabled()).with_verbose(verbose);
    let (reports, failures) = checker
        .check_files(
            catalogs,
            Config::get_max_concurrency(),
            config.execution.timeout(),
            progress.callback(),
        )
        .await;
    progress.finish();

    match args.format {
        OutputFormat::Json => {
            let rows: Vec<StatisticsRow> = reports
                .iter()
                .map(|report| StatisticsRow {
                    path: &report.path,
                    statistics: &report.statistics,
                })
                .collect();
            output_results(args.format, &rows, false, |_, _| Ok(()))?;
        }
        OutputFormat::Table => {
            summary::print_statistics_table(&reports, false)?;
            print_totals(&reports);
        }
    }
    summary::print_failures(&failures);

    if !failures.is_empty() {
        anyhow::bail!(tf!("error.catalogs_failed", failures.len()));
    }
    Ok(())
}

fn print_totals(reports: &[CatalogReport]) {
    let finished: usize = reports.iter().map(|r| r.statistics.finished).sum();
    let unfinished: usize = reports.iter().map(|r| r.statistics.unfinished).sum();
    let active = finished + unfinished;
    let completion = if active == 0 {
        100.0
    } else {
        (finished as f64 / active as f64 * 1000.0).round() / 10.0
    };

    Logger::info("");
    if unfinished == 0 {
        Logger::success(t!("stats.all_complete"));
    } else {
        Logger::info(tf!("stats.total", reports.len(), finished, active, completion));
    }
}
