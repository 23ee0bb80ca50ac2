// ============================================================================
// TsCat - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置验证和默认值
//   - ✅ 配置文件读写操作
//   - ✅ 配置项默认数据
//   - ❌ 不应包含配置应用逻辑
//   - ❌ 不应包含检查规则实现
//   - ❌ 不应包含 CLI 参数处理
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "tscat.toml";

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// TsCat 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 工作空间配置
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// 检查配置
    #[serde(default)]
    pub check: CheckConfig,
    /// 执行配置
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
    /// 国际化配置
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// 工作空间配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// 工作区根目录
    pub root: String,
    /// 排除扫描的目录或文件模式
    pub ignore: Vec<String>,
    /// 提取翻译字符串时扫描的源文件扩展名
    pub source_extensions: Vec<String>,
}

/// 检查配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// 警告也视为失败
    pub strict: bool,
    /// 规则级别覆盖 (规则名 -> 级别)
    pub rules: BTreeMap<String, RuleLevel>,
}

/// 执行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// 最大并发数
    pub max_concurrency: usize,
    /// 单个目录处理超时时间（秒），0 表示不限制
    pub task_timeout: u32,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 是否显示进度条
    pub show_progress: bool,
    /// 是否详细输出
    pub verbose: bool,
    /// 是否彩色输出
    pub colored: bool,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// 界面语言
    pub language: String,
}

/// 规则级别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Error,
    Warning,
    Info,
    Off,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub show_progress: Option<bool>,
    pub max_concurrency: Option<usize>,
    pub task_timeout: Option<u32>,
    pub workspace_root: Option<String>,
    pub language: Option<String>,
    pub strict: Option<bool>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    /// 获取默认工作区根目录
    fn default_workspace_root() -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// 获取默认忽略模式
    fn default_ignore_patterns() -> Vec<String> {
        vec![
            ".git".to_string(),
            "build".to_string(),
            "node_modules".to_string(),
        ]
    }

    /// 获取默认源文件扩展名
    fn default_source_extensions() -> Vec<String> {
        ["cpp", "h", "hpp", "cc", "cxx"]
            .iter()
            .map(|ext| ext.to_string())
            .collect()
    }

    /// 获取默认最大并发数
    fn default_max_concurrency() -> usize {
        num_cpus::get()
    }

    /// 获取默认超时时间
    fn default_task_timeout() -> u32 {
        0
    }

    /// 获取默认是否显示进度条
    fn default_show_progress() -> bool {
        true
    }

    /// 获取默认是否详细输出
    fn default_verbose() -> bool {
        false
    }

    /// 获取默认是否彩色输出
    fn default_colored() -> bool {
        true
    }

    /// 获取默认语言
    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    pub fn initialize() -> anyhow::Result<()> {
        let config = Self::load_from(Path::new(CONFIG_FILE_NAME))?;
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 加载配置文件，文件不存在时使用默认配置
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            tracing::debug!("loading configuration from {:?}", config_path);
            let content = std::fs::read_to_string(config_path)?;
            let config = toml::from_str(&content)?;
            Ok(config)
        } else {
            tracing::debug!("configuration file not found: {:?}", config_path);
            Ok(Self::default())
        }
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply(args);
        Ok(())
    }

    /// 将运行时参数应用到配置
    pub fn apply(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(show_progress) = args.show_progress {
            self.output.show_progress = show_progress;
        }
        if let Some(max_concurrency) = args.max_concurrency {
            self.execution.max_concurrency = max_concurrency;
        }
        if let Some(task_timeout) = args.task_timeout {
            self.execution.task_timeout = task_timeout;
        }
        if let Some(workspace_root) = args.workspace_root {
            self.workspace.root = workspace_root;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
        if let Some(strict) = args.strict {
            self.check.strict = strict;
        }
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板
    pub fn generate_default_template() -> Self {
        let mut config = Self::default();
        config.check.rules = crate::core::checker::Rule::all()
            .iter()
            .map(|rule| (rule.name().to_string(), rule.default_level()))
            .collect();
        config
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::generate_default_template().save_to_file(config_path)
    }

    /// 读取全局配置快照
    pub fn snapshot() -> Self {
        Self::with_global(Clone::clone).unwrap_or_default()
    }

    /// 在全局配置读锁内执行
    fn with_global<T>(f: impl FnOnce(&Config) -> T) -> anyhow::Result<T> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(f(&config))
    }

    /// 获取工作区根目录（带默认值）
    pub fn get_workspace_root() -> PathBuf {
        match Self::with_global(|config| config.workspace_root()) {
            Ok(root) => root,
            _ => Self::default_workspace_root(),
        }
    }

    /// 解析工作区根目录
    pub fn workspace_root(&self) -> PathBuf {
        let root = &self.workspace.root;
        if root.is_empty() || root == "." {
            Self::default_workspace_root()
        } else {
            PathBuf::from(root)
        }
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        Self::with_global(|config| config.i18n.language.clone())
    }

    /// 获取详细输出设置（带默认值）
    pub fn get_verbose() -> bool {
        Self::with_global(|config| config.output.verbose).unwrap_or_else(|_| Self::default_verbose())
    }

    /// 获取是否彩色输出（带默认值）
    pub fn get_colored() -> bool {
        Self::with_global(|config| config.output.colored).unwrap_or_else(|_| Self::default_colored())
    }

    /// 获取是否显示进度条（带默认值）
    pub fn get_show_progress() -> bool {
        Self::with_global(|config| config.output.show_progress)
            .unwrap_or_else(|_| Self::default_show_progress())
    }

    /// 获取最大并发数（带默认值）
    pub fn get_max_concurrency() -> usize {
        match Self::with_global(|config| config.execution.max_concurrency) {
            Ok(concurrency) if concurrency > 0 => concurrency,
            _ => Self::default_max_concurrency(),
        }
    }

    /// 检查路径是否应该被忽略
    pub fn should_ignore_path(&self, path: &str) -> bool {
        for pattern in &self.workspace.ignore {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                // 直接匹配
                if glob_pattern.matches(path) {
                    return true;
                }
            }
            // 任一路径段与模式相同
            if path
                .split(['/', '\\'])
                .any(|segment| segment == pattern.as_str())
            {
                return true;
            }
        }
        false
    }
}

impl ExecutionConfig {
    /// 单个目录的处理时限，0 表示不限制
    pub fn timeout(&self) -> Option<Duration> {
        (self.task_timeout > 0).then(|| Duration::from_secs(u64::from(self.task_timeout)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig::default(),
            check: CheckConfig::default(),
            execution: ExecutionConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            ignore: Config::default_ignore_patterns(),
            source_extensions: Config::default_source_extensions(),
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            strict: false,
            rules: BTreeMap::new(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_concurrency: Config::default_max_concurrency(),
            task_timeout: Config::default_task_timeout(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: Config::default_show_progress(),
            verbose: Config::default_verbose(),
            colored: Config::default_colored(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}
