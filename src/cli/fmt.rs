// ============================================================================
// TsCat - CLI Fmt 命令
// ============================================================================
//
// 文件: src/cli/fmt.rs
// 职责: 以规范布局重写翻译目录
// 边界:
//   - ✅ 命令行参数定义
//   - ✅ 解析后重新序列化并比较
//   - ✅ --check 模式只报告不写入
//   - ❌ 不应包含序列化细节
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::find_catalogs;
use crate::core::error::CatalogError;
use crate::core::{parser, writer};
use crate::models::config::Config;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 格式化翻译目录
#[derive(Debug, Args)]
pub struct FmtArgs {
    /// 目录文件或要扫描的目录（默认为工作区根目录）
    pub paths: Vec<PathBuf>,

    /// 只检查是否已是规范布局，不写入
    #[arg(long)]
    pub check: bool,
}

pub fn handle_fmt(args: FmtArgs) -> Result<()> {
    let config = Config::snapshot();
    let verbose = config.output.verbose;
    let catalogs = find_catalogs(&args.paths, &config)?;

    let mut changed = Vec::new();
    for path in &catalogs {
        let original = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let catalog = parser::parse_str(&original)?;
        let formatted = writer::to_string(&catalog);

        if formatted == original {
            if verbose {
                Logger::info(tf!("fmt.unchanged", path.display()));
            }
            continue;
        }

        if args.check {
            Logger::warn(tf!("fmt.would_reformat", path.display()));
        } else {
            writer::write_file(&catalog, path)?;
            Logger::info(tf!("fmt.reformatted", path.display()));
        }
        changed.push(path.clone());
    }

    if changed.is_empty() {
        Logger::success(tf!("fmt.all_formatted", catalogs.len()));
    } else if args.check {
        Logger::error(tf!("fmt.check_failed", changed.len()));
        Logger::info(t!("fmt.check_hint"));
        std::process::exit(1);
    } else {
        Logger::success(tf!("fmt.done", changed.len()));
    }

    Ok(())
}
