// ============================================================================
// TsCat - 翻译目录数据模型
// ============================================================================
//
// 文件: src/models/catalog.rs
// 职责: TS 翻译目录的数据结构定义
// 边界:
//   - ✅ 目录、上下文、消息、位置的数据结构
//   - ✅ 翻译状态和复数形式
//   - ✅ 基础查询与遍历方法
//   - ❌ 不应包含 XML 解析或序列化
//   - ❌ 不应包含检查规则
//   - ❌ 不应包含 CLI 相关逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 翻译目录（一个 .ts 文件）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// TS 格式版本，例如 "2.1"
    pub version: String,
    /// 目标语言，例如 "tr"
    pub language: Option<String>,
    /// 源语言
    pub source_language: Option<String>,
    /// 按出现顺序排列的上下文
    pub contexts: Vec<Context>,
}

/// 上下文：按来源类名分组的消息集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// 上下文名称（通常是类名）
    pub name: String,
    /// 消息列表
    pub messages: Vec<Message>,
}

/// 翻译单元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// 可选的消息 ID
    pub id: Option<String>,
    /// 源字符串（查找键）
    pub source: String,
    /// 消歧义注释
    pub comment: Option<String>,
    /// 旧的源字符串
    pub old_source: Option<String>,
    /// 开发者附加注释
    pub extra_comment: Option<String>,
    /// 译者注释
    pub translator_comment: Option<String>,
    /// 翻译内容
    pub translation: Translation,
    /// 翻译状态
    pub status: TranslationStatus,
    /// 来源位置
    pub locations: Vec<Location>,
}

/// 翻译内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Translation {
    /// 单一翻译文本
    Single(String),
    /// 复数形式列表 (numerus="yes")
    Numerus(Vec<String>),
}

/// 翻译状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// 已完成（无 type 属性）
    Finished,
    /// 未完成 (type="unfinished")
    Unfinished,
    /// 源代码中已消失 (type="vanished")
    Vanished,
    /// 已废弃 (type="obsolete")
    Obsolete,
}

/// 来源位置（仅供译者参考）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// 文件路径，空字符串表示沿用上一个位置的文件
    pub filename: String,
    /// 行号引用
    pub line: Option<LineRef>,
}

/// 行号引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LineRef {
    /// 绝对行号，例如 line="208"
    Absolute(u32),
    /// 相对行号，例如 line="+3"
    Relative(i32),
}

/// 消息键 (context, source, comment)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
}

impl Catalog {
    /// 创建空目录
    pub fn new(language: Option<String>) -> Self {
        Self {
            version: "2.1".to_string(),
            language,
            source_language: None,
            contexts: Vec::new(),
        }
    }

    /// 查找上下文
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// 获取上下文（不存在时创建）
    pub fn context_mut_or_insert(&mut self, name: &str) -> &mut Context {
        let index = match self.contexts.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.contexts.push(Context::new(name));
                self.contexts.len() - 1
            }
        };
        &mut self.contexts[index]
    }

    /// 遍历所有 (上下文, 消息)
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|context| context.messages.iter().map(move |m| (context, m)))
    }

    /// 消息总数
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// 目标语言的主语言代码，例如 "pt_BR" -> "pt"
    pub fn primary_language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(|lang| lang.split(['_', '-']).next().unwrap_or(lang))
            .filter(|lang| !lang.is_empty())
    }
}

impl Context {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            messages: Vec::new(),
        }
    }
}

impl Message {
    /// 创建未完成的空翻译消息
    pub fn new(source: &str, comment: Option<&str>) -> Self {
        Self {
            id: None,
            source: source.to_string(),
            comment: comment.map(str::to_string),
            old_source: None,
            extra_comment: None,
            translator_comment: None,
            translation: Translation::Single(String::new()),
            status: TranslationStatus::Unfinished,
            locations: Vec::new(),
        }
    }

    /// 构造消息键
    pub fn key(&self, context: &str) -> MessageKey {
        MessageKey::new(context, &self.source, self.comment.as_deref())
    }

    /// 是否为复数消息
    pub fn is_numerus(&self) -> bool {
        matches!(self.translation, Translation::Numerus(_))
    }

    /// 是否仍存在于源代码中
    pub fn is_active(&self) -> bool {
        !matches!(
            self.status,
            TranslationStatus::Vanished | TranslationStatus::Obsolete
        )
    }
}

impl Translation {
    /// 所有翻译文本
    pub fn forms(&self) -> Vec<&str> {
        match self {
            Translation::Single(text) => vec![text.as_str()],
            Translation::Numerus(forms) => forms.iter().map(String::as_str).collect(),
        }
    }

    /// 第一个翻译文本
    pub fn first(&self) -> &str {
        match self {
            Translation::Single(text) => text,
            Translation::Numerus(forms) => forms.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// 是否没有任何非空文本
    pub fn is_empty(&self) -> bool {
        self.forms().iter().all(|form| form.is_empty())
    }
}

impl TranslationStatus {
    /// TS 中的 type 属性值
    pub fn as_attr(&self) -> Option<&'static str> {
        match self {
            TranslationStatus::Finished => None,
            TranslationStatus::Unfinished => Some("unfinished"),
            TranslationStatus::Vanished => Some("vanished"),
            TranslationStatus::Obsolete => Some("obsolete"),
        }
    }

    /// 从 type 属性解析
    pub fn from_attr(value: Option<&str>) -> Result<Self, String> {
        match value {
            None | Some("") => Ok(TranslationStatus::Finished),
            Some("unfinished") => Ok(TranslationStatus::Unfinished),
            Some("vanished") => Ok(TranslationStatus::Vanished),
            Some("obsolete") => Ok(TranslationStatus::Obsolete),
            Some(other) => Err(other.to_string()),
        }
    }
}

impl LineRef {
    /// 解析 line 属性
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('+') || value.starts_with('-') {
            value.parse::<i32>().ok().map(LineRef::Relative)
        } else {
            value.parse::<u32>().ok().map(LineRef::Absolute)
        }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Absolute(line) => write!(f, "{}", line),
            LineRef::Relative(delta) => write!(f, "{:+}", delta),
        }
    }
}

impl Location {
    pub fn new(filename: &str, line: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line: Some(LineRef::Absolute(line)),
        }
    }
}

/// 将相对位置解析为绝对位置
///
/// lupdate 的 relative 模式下，空文件名表示沿用上一个文件，`+N` 相对于
/// 同一文件内上一个行号。解析状态跨消息延续。
pub fn resolve_locations(catalog: &Catalog) -> Vec<(MessageKey, Vec<(String, Option<u32>)>)> {
    let mut last_file = String::new();
    let mut last_line: i64 = 0;
    let mut resolved = Vec::new();

    for (context, message) in catalog.messages() {
        let mut positions = Vec::new();
        for location in &message.locations {
            if !location.filename.is_empty() && location.filename != last_file {
                last_file = location.filename.clone();
                last_line = 0;
            }
            let line = match location.line {
                Some(LineRef::Absolute(line)) => {
                    last_line = i64::from(line);
                    Some(line)
                }
                Some(LineRef::Relative(delta)) => {
                    last_line += i64::from(delta);
                    u32::try_from(last_line).ok()
                }
                None => None,
            };
            positions.push((last_file.clone(), line));
        }
        resolved.push((message.key(&context.name), positions));
    }

    resolved
}

impl MessageKey {
    pub fn new(context: &str, source: &str, comment: Option<&str>) -> Self {
        Self {
            context: context.to_string(),
            source: source.to_string(),
            comment: comment.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.comment {
            Some(comment) => write!(f, "{} :: \"{}\" ({})", self.context, self.source, comment),
            None => write!(f, "{} :: \"{}\"", self.context, self.source),
        }
    }
}
