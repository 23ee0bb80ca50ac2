// ============================================================================
// TsCat - CLI Extract 命令
// ============================================================================
//
// 文件: src/cli/extract.rs
// 职责: 列出 C++ 源代码中的可翻译字符串
// 边界:
//   - ✅ 命令行参数定义
//   - ✅ 源文件收集与提取结果输出
//   - ❌ 不应包含 C++ 解析逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::{output_results, resolve_roots, OutputFormat};
use crate::core::{extractor, scanner};
use crate::models::config::Config;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::tf;

/// 提取可翻译字符串
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// 源文件或要扫描的目录（默认为工作区根目录）
    pub paths: Vec<PathBuf>,

    /// 输出格式
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// 显示每条字符串及其位置
    #[arg(short = 'd', long)]
    pub detail: bool,
}

pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let config = Config::snapshot();
    let roots = resolve_roots(&args.paths, &config)?;
    let sources = scanner::collect_source_files(&roots, &config);

    if args.format == OutputFormat::Table {
        Logger::info(tf!("extract.scanning", sources.len()));
    }

    let messages = extractor::extract_files(&sources)?;
    output_results(
        args.format,
        messages.as_slice(),
        args.detail,
        summary::print_extracted,
    )
}
