// ============================================================================
// TsCat - CLI Lookup 命令
// ============================================================================
//
// 文件: src/cli/lookup.rs
// 职责: 按应用运行时的方式查询一条翻译
// 边界:
//   - ✅ 命令行参数定义
//   - ✅ 调用查找表并填充占位符
//   - ❌ 不应包含查找逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::core::lookup::Translator;
use crate::core::{parser, placeholders};
use crate::models::config::Config;
use crate::utils::logger::Logger;
use crate::tf;

/// 查询翻译
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// 目录文件
    pub catalog: PathBuf,

    /// 上下文名
    #[arg(short = 'c', long)]
    pub context: String,

    /// 源字符串
    #[arg(short = 's', long)]
    pub source: String,

    /// 消歧注释
    #[arg(long)]
    pub comment: Option<String>,

    /// 复数计数（替换 %n）
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// 依次替换 %1、%2 ... 的参数
    #[arg(short = 'a', long = "arg")]
    pub args: Vec<String>,
}

pub fn handle_lookup(args: LookupArgs) -> Result<()> {
    let verbose = Config::get_verbose();
    let path = if args.catalog.is_absolute() {
        args.catalog.clone()
    } else {
        Config::get_workspace_root().join(&args.catalog)
    };

    let catalog = parser::parse_file(&path)?;
    let translator = Translator::from_catalog(&catalog);
    let comment = args.comment.as_deref();

    let found = translator.translate(&args.context, &args.source, comment).is_some();
    if verbose && !found {
        Logger::warn(tf!("lookup.not_found", &args.context, &args.source));
    }

    let text = match args.count {
        Some(n) => translator.tr_n(&args.context, &args.source, comment, n),
        None => translator.tr(&args.context, &args.source, comment).to_string(),
    };
    let text = if args.args.is_empty() {
        text
    } else {
        placeholders::format_args(&text, &args.args)
    };

    // 结果直接输出，便于脚本使用
    println!("{}", text);
    Ok(())
}
