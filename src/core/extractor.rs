// ============================================================================
// TsCat - 翻译字符串提取器
// ============================================================================
//
// 文件: src/core/extractor.rs
// 职责: 从 C++ 源代码中提取 tr() 等可翻译字符串
// 边界:
//   - ✅ C++ 词法切分（注释、字符串、预处理行）
//   - ✅ 命名空间 / 类 / 成员函数作用域跟踪
//   - ✅ tr / translate / QT_*_NOOP 调用识别
//   - ❌ 不应修改翻译目录
//   - ❌ 不应包含输出格式化
//
// ============================================================================

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::error::{CatalogError, CatalogResult};
use crate::models::catalog::MessageKey;

/// 从源代码提取的一条可翻译字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedMessage {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
    pub numerus: bool,
    pub file: PathBuf,
    pub line: u32,
}

impl ExtractedMessage {
    pub fn key(&self) -> MessageKey {
        MessageKey::new(&self.context, &self.source, self.comment.as_deref())
    }
}

/// 单个源文件的提取结果
struct SourceUnit {
    messages: Vec<ExtractedMessage>,
    /// 文件中声明的类（带命名空间的全名）
    classes: Vec<String>,
    /// `using namespace X;` 引入的命名空间
    usings: Vec<String>,
}

/// 读取并提取多个源文件
///
/// 类名在所有文件的类声明中解析，因此 `.cpp` 中的 `Class::method` 能拿到
/// 头文件里 `namespace` 块给出的完整上下文名。
pub fn extract_files(paths: &[PathBuf]) -> CatalogResult<Vec<ExtractedMessage>> {
    let mut units = Vec::new();
    for path in paths {
        let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;
        let content = String::from_utf8_lossy(&bytes);
        let unit = extract_unit(&content, path);
        tracing::debug!("{:?}: {} translatable strings", path, unit.messages.len());
        units.push(unit);
    }

    let classes: HashSet<&str> = units
        .iter()
        .flat_map(|unit| unit.classes.iter().map(String::as_str))
        .collect();
    let mut messages = Vec::new();
    for unit in &units {
        for message in &unit.messages {
            let mut message = message.clone();
            message.context = qualify_context(&message.context, &classes, &unit.usings);
            messages.push(message);
        }
    }
    Ok(messages)
}

/// 从源代码字符串提取
pub fn extract_str(content: &str, file: &Path) -> Vec<ExtractedMessage> {
    let unit = extract_unit(content, file);
    let classes: HashSet<&str> = unit.classes.iter().map(String::as_str).collect();
    unit.messages
        .into_iter()
        .map(|mut message| {
            message.context = qualify_context(&message.context, &classes, &unit.usings);
            message
        })
        .collect()
}

fn extract_unit(content: &str, file: &Path) -> SourceUnit {
    let tokens = Lexer::new(content).tokenize();
    Extractor::new(&tokens, file).run()
}

/// 把未限定的类名补全为已声明的带命名空间类名
///
/// 已声明的同名类优先；否则在 `using` 引入的命名空间中找，再否则取唯一的
/// `*::Name` 声明。有歧义时保持原样。
fn qualify_context(context: &str, classes: &HashSet<&str>, usings: &[String]) -> String {
    if classes.contains(context) {
        return context.to_string();
    }

    let suffix = format!("::{}", context);
    let mut candidates: Vec<&str> = classes
        .iter()
        .copied()
        .filter(|class| class.ends_with(&suffix))
        .collect();
    candidates.sort_unstable();

    let via_using: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|class| usings.iter().any(|ns| *class == format!("{}{}", ns, suffix)))
        .collect();

    match (via_using.as_slice(), candidates.as_slice()) {
        ([only], _) | ([], [only]) => only.to_string(),
        _ => context.to_string(),
    }
}

// ============================================================================
// 词法切分
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    Str(String),
    /// ::
    Scope,
    /// ->
    Arrow,
    Punct(char),
}

#[derive(Debug, Clone)]
struct Token {
    tok: Tok,
    line: u32,
}

/// 字符串字面量前缀
const STRING_PREFIXES: &[&str] = &["L", "u", "U", "u8", "R", "LR", "uR", "UR", "u8R"];

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    at_line_start: bool,
}

impl Lexer {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
            line: 1,
            at_line_start: true,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.at_line_start = true;
        }
        Some(ch)
    }

    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek(0) {
            if ch.is_whitespace() {
                self.bump();
                continue;
            }
            if ch == '#' && self.at_line_start {
                self.skip_preprocessor();
                continue;
            }
            self.at_line_start = false;

            let line = self.line;
            match ch {
                '/' if self.peek(1) == Some('/') => self.skip_until_newline(),
                '/' if self.peek(1) == Some('*') => self.skip_block_comment(),
                '"' => {
                    self.bump();
                    let text = self.read_string();
                    tokens.push(Token { tok: Tok::Str(text), line });
                }
                '\'' => self.skip_char_literal(),
                c if c.is_alphabetic() || c == '_' => {
                    let ident = self.read_ident();
                    if self.peek(0) == Some('"') && STRING_PREFIXES.contains(&ident.as_str()) {
                        self.bump();
                        let text = if ident.ends_with('R') {
                            self.read_raw_string()
                        } else {
                            self.read_string()
                        };
                        tokens.push(Token { tok: Tok::Str(text), line });
                    } else {
                        tokens.push(Token { tok: Tok::Ident(ident), line });
                    }
                }
                c if c.is_ascii_digit() => {
                    while self
                        .peek(0)
                        .is_some_and(|c| c.is_alphanumeric() || c == '.' || c == '_')
                    {
                        self.bump();
                    }
                }
                ':' if self.peek(1) == Some(':') => {
                    self.bump();
                    self.bump();
                    tokens.push(Token { tok: Tok::Scope, line });
                }
                '-' if self.peek(1) == Some('>') => {
                    self.bump();
                    self.bump();
                    tokens.push(Token { tok: Tok::Arrow, line });
                }
                c => {
                    self.bump();
                    tokens.push(Token { tok: Tok::Punct(c), line });
                }
            }
        }

        tokens
    }

    fn skip_until_newline(&mut self) {
        while let Some(ch) = self.peek(0) {
            if ch == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) {
        self.bump();
        self.bump();
        while let Some(ch) = self.bump() {
            if ch == '*' && self.peek(0) == Some('/') {
                self.bump();
                break;
            }
        }
        self.at_line_start = false;
    }

    /// 跳过预处理行（支持行尾续行符）
    fn skip_preprocessor(&mut self) {
        while let Some(ch) = self.peek(0) {
            if ch == '\\' && self.peek(1) == Some('\n') {
                self.bump();
                self.bump();
                continue;
            }
            if ch == '/' && self.peek(1) == Some('*') {
                self.skip_block_comment();
                continue;
            }
            if ch == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_char_literal(&mut self) {
        self.bump();
        while let Some(ch) = self.bump() {
            match ch {
                '\\' => {
                    self.bump();
                }
                '\'' | '\n' => break,
                _ => {}
            }
        }
    }

    fn read_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some(ch) = self.peek(0) {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        ident
    }

    /// 读取普通字符串字面量（开头引号已消费）
    fn read_string(&mut self) -> String {
        let mut text = String::new();
        while let Some(ch) = self.bump() {
            match ch {
                '"' | '\n' => break,
                '\\' => self.read_escape(&mut text),
                c => text.push(c),
            }
        }
        text
    }

    fn read_escape(&mut self, text: &mut String) {
        let Some(ch) = self.bump() else {
            return;
        };
        match ch {
            'n' => text.push('\n'),
            't' => text.push('\t'),
            'r' => text.push('\r'),
            'a' => text.push('\u{7}'),
            'b' => text.push('\u{8}'),
            'f' => text.push('\u{c}'),
            'v' => text.push('\u{b}'),
            '\n' => {}
            'x' => {
                let mut code = 0u32;
                while let Some(d) = self.peek(0).and_then(|c| c.to_digit(16)) {
                    code = code.saturating_mul(16).saturating_add(d);
                    self.bump();
                }
                text.extend(char::from_u32(code));
            }
            'u' | 'U' => {
                let width = if ch == 'u' { 4 } else { 8 };
                let mut code = 0u32;
                for _ in 0..width {
                    match self.peek(0).and_then(|c| c.to_digit(16)) {
                        Some(d) => {
                            code = code * 16 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                text.extend(char::from_u32(code));
            }
            '0'..='7' => {
                let mut code = ch.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek(0).and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                text.extend(char::from_u32(code));
            }
            other => text.push(other),
        }
    }

    /// 读取原始字符串 R"delim(...)delim"（开头引号已消费）
    fn read_raw_string(&mut self) -> String {
        let mut delimiter = String::new();
        while let Some(ch) = self.bump() {
            if ch == '(' {
                break;
            }
            delimiter.push(ch);
        }
        let terminator: Vec<char> = format!("){}\"", delimiter).chars().collect();

        let mut text = String::new();
        loop {
            if self.chars[self.pos..].starts_with(&terminator) {
                for _ in 0..terminator.len() {
                    self.bump();
                }
                break;
            }
            match self.bump() {
                Some(ch) => text.push(ch),
                None => break,
            }
        }
        text
    }
}

// ============================================================================
// 作用域跟踪与调用识别
// ============================================================================

#[derive(Debug, Clone)]
enum Frame {
    Namespace(String),
    Class(String),
    /// 成员函数体，携带类限定名
    Function(String),
    Block,
}

/// 调用参数
#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    Literal(String),
    Other,
}

struct Extractor<'a> {
    tokens: &'a [Token],
    file: &'a Path,
    frames: Vec<Frame>,
    pending: Option<Frame>,
    messages: Vec<ExtractedMessage>,
    classes: Vec<String>,
    usings: Vec<String>,
}

impl<'a> Extractor<'a> {
    fn new(tokens: &'a [Token], file: &'a Path) -> Self {
        Self {
            tokens,
            file,
            frames: Vec::new(),
            pending: None,
            messages: Vec::new(),
            classes: Vec::new(),
            usings: Vec::new(),
        }
    }

    fn tok(&self, index: usize) -> Option<&Tok> {
        self.tokens.get(index).map(|t| &t.tok)
    }

    fn ident(&self, index: usize) -> Option<&str> {
        match self.tok(index) {
            Some(Tok::Ident(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn run(mut self) -> SourceUnit {
        let tokens = self.tokens;
        let mut i = 0;
        while i < tokens.len() {
            match &tokens[i].tok {
                Tok::Punct('{') => {
                    let frame = self.pending.take().unwrap_or(Frame::Block);
                    if let Frame::Class(name) = &frame {
                        let declared = self.scope_path(name);
                        self.classes.push(declared);
                    }
                    self.frames.push(frame);
                }
                Tok::Punct('}') => {
                    self.frames.pop();
                    self.pending = None;
                }
                Tok::Punct(';') => self.pending = None,
                Tok::Ident(name) => {
                    let name = name.clone();
                    if let Some(next) = self.handle_ident(i, &name) {
                        i = next;
                        continue;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        SourceUnit {
            messages: self.messages,
            classes: self.classes,
            usings: self.usings,
        }
    }

    /// 当前命名空间与类作用域下的全名
    fn scope_path(&self, name: &str) -> String {
        self.frames
            .iter()
            .filter_map(|frame| match frame {
                Frame::Namespace(ns) => Some(ns.as_str()),
                Frame::Class(class) => Some(class.as_str()),
                _ => None,
            })
            .chain(std::iter::once(name))
            .collect::<Vec<_>>()
            .join("::")
    }

    /// 处理标识符；若消费了多个 token，返回下一个位置
    fn handle_ident(&mut self, i: usize, name: &str) -> Option<usize> {
        match name {
            "using" if self.ident(i + 1) == Some("namespace") => {
                let (qualified, end) = self.read_qualified(i + 2);
                if !qualified.is_empty() {
                    self.usings.push(qualified.trim_start_matches("::").to_string());
                }
                Some(end)
            }
            "namespace" => {
                let (qualified, end) = self.read_qualified(i + 1);
                if self.tok(end) == Some(&Tok::Punct('{')) {
                    self.pending = Some(if qualified.is_empty() {
                        Frame::Block
                    } else {
                        Frame::Namespace(qualified)
                    });
                }
                None
            }
            "class" | "struct" => {
                if i > 0 && self.ident(i - 1) == Some("enum") {
                    return None;
                }
                let mut j = i + 1;
                let mut last = None;
                while let Some(ident) = self.ident(j) {
                    if ident != "final" {
                        last = Some(ident.to_string());
                    }
                    j += 1;
                }
                if let (Some(class), Some(Tok::Punct(':' | '{'))) = (last, self.tok(j)) {
                    self.pending = Some(Frame::Class(class));
                }
                None
            }
            _ if self.tok(i + 1) == Some(&Tok::Punct('(')) => {
                self.note_function_definition(i);
                self.handle_call(i, name)
            }
            _ => None,
        }
    }

    /// 读取 A::B::C 形式的限定名
    fn read_qualified(&self, mut j: usize) -> (String, usize) {
        let mut parts = Vec::new();
        while let Some(ident) = self.ident(j) {
            parts.push(ident.to_string());
            j += 1;
            if self.tok(j) == Some(&Tok::Scope) {
                j += 1;
            } else {
                break;
            }
        }
        (parts.join("::"), j)
    }

    /// 在命名空间层级遇到 `Class::method(` 时记录待定的函数体作用域
    fn note_function_definition(&mut self, i: usize) {
        let at_namespace_level = self
            .frames
            .iter()
            .all(|frame| matches!(frame, Frame::Namespace(_)));
        if !at_namespace_level || self.pending.is_some() {
            return;
        }

        // 向前收集限定链，允许析构函数的 ~
        let mut j = i;
        if j >= 1 && self.tok(j - 1) == Some(&Tok::Punct('~')) {
            j -= 1;
        }
        let mut qualifiers = Vec::new();
        while j >= 2 && self.tok(j - 1) == Some(&Tok::Scope) {
            match self.ident(j - 2) {
                Some(ident) => {
                    qualifiers.push(ident.to_string());
                    j -= 2;
                }
                None => break,
            }
        }
        if qualifiers.is_empty() {
            return;
        }
        qualifiers.reverse();
        self.pending = Some(Frame::Function(qualifiers.join("::")));
    }

    fn handle_call(&mut self, i: usize, name: &str) -> Option<usize> {
        let line = self.tokens[i].line;
        let (args, next) = self.read_args(i + 1);
        let literal = |index: usize| match args.get(index) {
            Some(Arg::Literal(text)) => Some(text.clone()),
            _ => None,
        };

        let preceded_by_member = matches!(
            i.checked_sub(1).and_then(|p| self.tok(p)),
            Some(Tok::Arrow | Tok::Punct('.'))
        );
        let explicit_class = if i >= 2 && self.tok(i - 1) == Some(&Tok::Scope) {
            let mut j = i - 1;
            let mut parts = Vec::new();
            while j >= 1 && self.tok(j) == Some(&Tok::Scope) {
                match self.ident(j - 1) {
                    Some(ident) => parts.push(ident.to_string()),
                    None => break,
                }
                if j < 2 {
                    break;
                }
                j -= 2;
            }
            parts.reverse();
            Some(parts.join("::")).filter(|class| !class.is_empty())
        } else {
            None
        };

        let found = match name {
            "tr" | "trUtf8" if !preceded_by_member => literal(0).map(|source| {
                let context = explicit_class.clone().or_else(|| self.current_context());
                (context, source, literal(1), args.len() >= 3)
            }),
            "translate" if explicit_class.is_some() || preceded_by_member => {
                match (literal(0), literal(1)) {
                    (Some(context), Some(source)) => {
                        Some((Some(context), source, literal(2), args.len() >= 4))
                    }
                    _ => None,
                }
            }
            "QT_TR_NOOP" | "QT_TR_NOOP_UTF8" | "QT_TR_N_NOOP" => literal(0)
                .map(|source| (self.current_context(), source, None, name == "QT_TR_N_NOOP")),
            "QT_TRANSLATE_NOOP" | "QT_TRANSLATE_NOOP_UTF8" | "QT_TRANSLATE_NOOP3"
            | "QT_TRANSLATE_N_NOOP" => match (literal(0), literal(1)) {
                (Some(context), Some(source)) => {
                    let comment = if name == "QT_TRANSLATE_NOOP3" {
                        literal(2)
                    } else {
                        None
                    };
                    Some((Some(context), source, comment, name == "QT_TRANSLATE_N_NOOP"))
                }
                _ => None,
            },
            _ => return None,
        };

        match found {
            Some((Some(context), source, comment, numerus)) => {
                self.messages.push(ExtractedMessage {
                    context,
                    source,
                    comment: comment.filter(|c| !c.is_empty()),
                    numerus,
                    file: self.file.to_path_buf(),
                    line,
                });
            }
            Some((None, source, _, _)) => {
                tracing::warn!(
                    "{}:{}: cannot determine context for \"{}\"",
                    self.file.display(),
                    line,
                    source
                );
            }
            None => {}
        }

        // 参数内的 tr 调用无需再扫描，跳过整个参数列表
        if args.iter().all(|arg| matches!(arg, Arg::Literal(_))) {
            Some(next)
        } else {
            None
        }
    }

    /// 读取括号内的参数（i 指向左括号），返回参数与右括号之后的位置
    fn read_args(&self, open: usize) -> (Vec<Arg>, usize) {
        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut current: Option<String> = None;
        let mut literal_only = true;
        let mut j = open;

        while let Some(tok) = self.tok(j) {
            match tok {
                Tok::Punct('(' | '[' | '{') => {
                    depth += 1;
                    if depth > 1 {
                        literal_only = false;
                    }
                }
                Tok::Punct(')' | ']' | '}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        push_arg(&mut args, current.take(), literal_only);
                        return (args, j + 1);
                    }
                }
                Tok::Punct(',') if depth == 1 => {
                    push_arg(&mut args, current.take(), literal_only);
                    literal_only = true;
                }
                Tok::Str(text) if depth == 1 => {
                    current.get_or_insert_with(String::new).push_str(text);
                }
                _ => literal_only = false,
            }
            j += 1;
        }

        (args, j)
    }

    /// 当前作用域对应的上下文名
    fn current_context(&self) -> Option<String> {
        let mut class_parts: Vec<String> = Vec::new();
        let mut namespaces: Vec<String> = Vec::new();
        let mut found_function = false;

        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Function(qualifier) if !found_function && class_parts.is_empty() => {
                    class_parts.push(qualifier.clone());
                    found_function = true;
                }
                Frame::Class(name) if !found_function => class_parts.push(name.clone()),
                Frame::Namespace(name) => namespaces.push(name.clone()),
                _ => {}
            }
        }

        if class_parts.is_empty() {
            return None;
        }
        let parts: Vec<String> = namespaces
            .into_iter()
            .rev()
            .chain(class_parts.into_iter().rev())
            .collect();
        Some(parts.join("::"))
    }
}

fn push_arg(args: &mut Vec<Arg>, literal: Option<String>, literal_only: bool) {
    match literal {
        Some(text) if literal_only => args.push(Arg::Literal(text)),
        _ => args.push(Arg::Other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> Vec<(String, String, Option<String>, bool, u32)> {
        extract_str(src, Path::new("dialog.cpp"))
            .into_iter()
            .map(|m| (m.context, m.source, m.comment, m.numerus, m.line))
            .collect()
    }

    #[test]
    fn member_function_definitions_give_context() {
        let src = r#"
#include "openwithdialog.h"

void OpenWithDialog::initUI()
{
    setTitle(tr("Open with"));
    cancelButton = new QPushButton(tr("Cancel", "button"));
}
"#;
        assert_eq!(
            extract(src),
            vec![
                ("OpenWithDialog".to_string(), "Open with".to_string(), None, false, 6),
                (
                    "OpenWithDialog".to_string(),
                    "Cancel".to_string(),
                    Some("button".to_string()),
                    false,
                    7
                ),
            ]
        );
    }

    #[test]
    fn nested_calls_inside_statements_keep_function_context() {
        let src = r#"
void ComputerController::mountDevice(quint64 winId, const QString &id)
{
    if (ComputerUtils::isLocked(id)) {
        ComputerUtils::dlgServIns()->showErrorDialog(tr("Unlock device failed"), tr("Wrong password is inputed"));
    }
}
"#;
        let found = extract(src);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.0 == "ComputerController"));
        assert_eq!(found[1].1, "Wrong password is inputed");
    }

    #[test]
    fn namespaces_prefix_the_context() {
        let src = r#"
namespace dfmplugin_titlebar {
class TitleBarHelper : public QObject
{
    Q_OBJECT
public:
    QString name() const { return tr("Title"); }
};
void TitleBarHelper::show() { tr("Shown"); }
}
"#;
        let found = extract(src);
        assert_eq!(found[0].0, "dfmplugin_titlebar::TitleBarHelper");
        assert_eq!(found[1].0, "dfmplugin_titlebar::TitleBarHelper");
    }

    #[test]
    fn explicit_class_and_translate_calls() {
        let src = r#"
TEST_F(UT_BookmarkManager, addPluginItem)
{
    const QString &displayName = QObject::tr("Recent");
    auto a = QCoreApplication::translate("DeviceView", "Eject", "menu");
    auto b = qApp->translate("DeviceView", "%n disk(s)", nullptr, count);
}
"#;
        assert_eq!(
            extract(src),
            vec![
                ("QObject".to_string(), "Recent".to_string(), None, false, 4),
                (
                    "DeviceView".to_string(),
                    "Eject".to_string(),
                    Some("menu".to_string()),
                    false,
                    5
                ),
                ("DeviceView".to_string(), "%n disk(s)".to_string(), None, true, 6),
            ]
        );
    }

    #[test]
    fn noop_macros_are_recognised() {
        let src = r#"
static const char *names[] = {
    QT_TRANSLATE_NOOP("Sidebar", "Computer"),
    QT_TRANSLATE_NOOP3("Sidebar", "Trash", "sidebar item"),
};
"#;
        let found = extract(src);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].2.as_deref(), Some("sidebar item"));
    }

    #[test]
    fn comments_and_strings_do_not_match() {
        let src = r#"
void Foo::bar()
{
    // tr("commented out")
    /* tr("block") */
    qDebug() << "tr(\"inside string\")";
    auto c = 'x';
}
"#;
        assert!(extract(src).is_empty());
    }

    #[test]
    fn adjacent_literals_and_escapes_are_joined() {
        let src = "void Foo::bar()\n{\n    tr(\"Line one\\n\"\n       \"line \\\"two\\\"\");\n}\n";
        let found = extract(src);
        assert_eq!(found[0].1, "Line one\nline \"two\"");
        assert_eq!(found[0].4, 3);
    }

    #[test]
    fn free_functions_without_class_are_skipped() {
        let src = "int main() { return tr(\"orphan\").size(); }";
        assert!(extract(src).is_empty());
    }

    #[test]
    fn member_access_tr_is_ignored() {
        let src = "void Foo::bar() { other->tr(\"x\"); }";
        assert!(extract(src).is_empty());
    }

    #[test]
    fn raw_strings_are_read() {
        let src = "void Foo::bar() { tr(R\"(say \"hi\")\"); }";
        assert_eq!(extract(src)[0].1, "say \"hi\"");
    }

    #[test]
    fn constructor_initializer_lists_keep_owner() {
        let src = r#"
ComputerController::ComputerController(QObject *parent)
    : QObject(parent), d(new Private)
{
    setObjectName(tr("Computer"));
}
"#;
        assert_eq!(extract(src)[0].0, "ComputerController");
    }

    #[test]
    fn headers_supply_the_namespace_of_out_of_line_definitions() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let header = temp_dir.path().join("computercontroller.h");
        let source = temp_dir.path().join("computercontroller.cpp");
        std::fs::write(
            &header,
            "namespace dfmplugin_computer {\nclass ComputerController : public QObject\n{\n    Q_OBJECT\n};\n}\n",
        )
        .unwrap();
        std::fs::write(
            &source,
            "DPCOMPUTER_USE_NAMESPACE\n\nvoid ComputerController::actUnmount()\n{\n    tr(\"Unmount\");\n}\n",
        )
        .unwrap();

        let found = extract_files(&[header, source]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].context, "dfmplugin_computer::ComputerController");
        assert_eq!(found[0].line, 5);
    }

    #[test]
    fn using_namespace_picks_between_same_named_classes() {
        let src = r#"
namespace dfmplugin_search { class Dialog { }; }
namespace dfmplugin_titlebar { class Dialog { }; }
using namespace dfmplugin_titlebar;
void Dialog::show() { tr("Shown"); }
"#;
        assert_eq!(extract(src)[0].0, "dfmplugin_titlebar::Dialog");
    }

    #[test]
    fn ambiguous_class_names_stay_unqualified() {
        let classes: HashSet<&str> = ["a::Dialog", "b::Dialog"].into_iter().collect();
        assert_eq!(qualify_context("Dialog", &classes, &[]), "Dialog");
        assert_eq!(qualify_context("Dialog", &classes, &["b".to_string()]), "b::Dialog");

        let with_global: HashSet<&str> = ["Dialog", "a::Dialog"].into_iter().collect();
        assert_eq!(qualify_context("Dialog", &with_global, &[]), "Dialog");
    }
}
