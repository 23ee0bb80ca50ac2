// ============================================================================
// TsCat - CLI Update 命令
// ============================================================================
//
// 文件: src/cli/update.rs
// 职责: 用 C++ 源代码中的字符串同步翻译目录
// 边界:
//   - ✅ 命令行参数定义
//   - ✅ 提取 → 合并 → 写回 流程编排
//   - ✅ --dry-run 只报告不写入
//   - ❌ 不应包含合并规则
//
// ============================================================================

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use super::{display_roots, resolve_roots};
use crate::core::sync::{self, SyncOptions};
use crate::core::{extractor, parser, scanner, writer};
use crate::models::config::Config;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 同步翻译目录
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// 目录文件
    pub catalog: PathBuf,

    /// 源代码目录（可重复，默认为工作区根目录）
    #[arg(short = 's', long = "sources")]
    pub sources: Vec<PathBuf>,

    /// 删除不再出现的消息，而不是标记为 vanished
    #[arg(long)]
    pub no_obsolete: bool,

    /// 只显示变化，不写入
    #[arg(long)]
    pub dry_run: bool,

    /// 列出每条变化的消息
    #[arg(short = 'd', long)]
    pub detail: bool,
}

pub fn handle_update(args: UpdateArgs) -> Result<()> {
    let config = Config::snapshot();
    let workspace_root = config.workspace_root();
    let catalog_path = if args.catalog.is_absolute() {
        args.catalog.clone()
    } else {
        workspace_root.join(&args.catalog)
    };

    Logger::info(tf!("update.start", catalog_path.display()));
    let mut catalog = parser::parse_file(&catalog_path)?;

    let roots = resolve_roots(&args.sources, &config)?;
    let sources = collect_sources(&roots, &config)?;
    let extracted = extractor::extract_files(&sources)?;
    Logger::info(tf!("update.extracted", extracted.len(), sources.len()));

    let options = SyncOptions {
        base_dir: catalog_path.parent().map(|dir| dir.to_path_buf()),
        no_obsolete: args.no_obsolete,
    };
    let report = sync::sync(&mut catalog, &extracted, &options);
    summary::print_sync_report(&report, args.detail)?;

    if !report.has_changes() {
        Logger::success(t!("update.up_to_date"));
        return Ok(());
    }

    if args.dry_run {
        Logger::info(t!("update.dry_run"));
        return Ok(());
    }

    writer::write_file(&catalog, &catalog_path)?;
    Logger::success(tf!("update.written", catalog_path.display()));
    Ok(())
}

/// 收集源文件，一个都没有时报错
///
/// 空的提取结果会让同步把所有消息标记为消失或删除。
fn collect_sources(roots: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let sources = scanner::collect_source_files(roots, config);
    if sources.is_empty() {
        bail!(tf!("error.no_sources_found", display_roots(roots)));
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_source_tree_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let roots = vec![temp_dir.path().to_path_buf()];
        assert!(collect_sources(&roots, &Config::default()).is_err());

        std::fs::write(temp_dir.path().join("dialog.cpp"), "").unwrap();
        let sources = collect_sources(&roots, &Config::default()).unwrap();
        assert_eq!(sources, vec![temp_dir.path().join("dialog.cpp")]);
    }
}
