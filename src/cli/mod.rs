// ============================================================================
// TsCat - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 命令行参数解析配置
//   - ✅ 命令路由分发
//   - ✅ 通用输出格式选择
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

pub mod check;
pub mod extract;
pub mod fmt;
pub mod init;
pub mod lookup;
pub mod stats;
pub mod update;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::scanner;
use crate::models::config::{Config, RuntimeArgs};
use crate::tf;
use check::{handle_check, CheckArgs};
use extract::{handle_extract, ExtractArgs};
use fmt::{handle_fmt, FmtArgs};
use init::{handle_init, InitArgs};
use lookup::{handle_lookup, LookupArgs};
use stats::{handle_stats, StatsArgs};
use update::{handle_update, UpdateArgs};

/// TsCat - Qt Linguist translation catalog tool
#[derive(Debug, Parser)]
#[command(name = "tscat")]
#[command(about = "Parse, lint, query and update Qt Linguist .ts translation catalogs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language (zh_cn, en_us)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Workspace root directory
    #[arg(short = 'C', long, global = true)]
    pub workspace_root: Option<String>,

    /// Maximum concurrency
    #[arg(short = 'j', long, global = true)]
    pub max_concurrency: Option<usize>,

    /// Per-catalog timeout (seconds)
    #[arg(long, global = true)]
    pub timeout: Option<u32>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lint translation catalogs
    Check(CheckArgs),
    /// Show translation progress per catalog
    Stats(StatsArgs),
    /// Look up a translation the way the application would
    Lookup(LookupArgs),
    /// Rewrite catalogs in canonical layout
    Fmt(FmtArgs),
    /// List translatable strings found in C++ sources
    Extract(ExtractArgs),
    /// Synchronize a catalog with the C++ sources
    Update(UpdateArgs),
    /// Initialize configuration file
    Init(InitArgs),
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Build runtime args to override config
    let runtime_args = build_runtime_args(&cli);
    // Merge runtime args to global config
    Config::merge_runtime_args(runtime_args)?;

    crate::utils::colors::Colors::configure(Config::get_colored());
    crate::utils::logger::init_tracing(Config::get_verbose());

    match cli.command {
        Commands::Check(args) => handle_check(args).await,
        Commands::Stats(args) => handle_stats(args).await,
        Commands::Lookup(args) => handle_lookup(args),
        Commands::Fmt(args) => handle_fmt(args),
        Commands::Extract(args) => handle_extract(args),
        Commands::Update(args) => handle_update(args),
        Commands::Init(args) => handle_init(args),
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        show_progress: if cli.no_progress { Some(false) } else { None },
        max_concurrency: cli.max_concurrency,
        task_timeout: cli.timeout,
        workspace_root: cli.workspace_root.clone(),
        language: cli.language.clone(),
        strict: None,
    }
}

/// 通用结果输出函数
pub(crate) fn output_results<T, F>(format: OutputFormat, data: &T, detail: bool, print_table: F) -> Result<()>
where
    T: serde::Serialize + ?Sized,
    F: FnOnce(&T, bool) -> Result<()>,
{
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Table => {
            print_table(data, detail)?;
        }
    }
    Ok(())
}

/// 解析命令行给出的路径（相对于工作区根目录），未给出时使用工作区根目录
pub(crate) fn resolve_roots(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let workspace_root = config.workspace_root();
    if paths.is_empty() {
        if !workspace_root.exists() {
            anyhow::bail!(tf!("error.workspace_not_exist", workspace_root.display()));
        }
        return Ok(vec![workspace_root]);
    }

    let mut roots = Vec::new();
    for path in paths {
        let resolved = if path.is_absolute() {
            path.clone()
        } else {
            workspace_root.join(path)
        };
        if !resolved.exists() {
            anyhow::bail!(tf!("error.path_not_exist", resolved.display()));
        }
        roots.push(resolved);
    }
    Ok(roots)
}

/// 查找目录文件，找不到时报错
pub(crate) fn find_catalogs(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let roots = resolve_roots(paths, config)?;
    let catalogs = scanner::collect_catalog_files(&roots, config);
    if catalogs.is_empty() {
        anyhow::bail!(tf!("error.no_catalogs_found", display_roots(&roots)));
    }
    Ok(catalogs)
}

fn display_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|root| root.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
