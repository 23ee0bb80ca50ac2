// ============================================================================
// TsCat - 占位符工具
// ============================================================================
//
// 文件: src/core/placeholders.rs
// 职责: Qt 风格 %N / %n 占位符的提取与替换
// 边界:
//   - ✅ 位置参数 %1..%99 与本地化变体 %L1
//   - ✅ 复数计数 %n / %Ln
//   - ✅ QString::arg 多参数替换语义
//   - ❌ 不应包含目录查找逻辑
//
// ============================================================================

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// %1..%99 与 %L1..%L99
static POSITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%L?([1-9][0-9]?)").expect("valid placeholder regex"));

/// %n 与 %Ln
static COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%L?n").expect("valid count regex"));

/// 提取位置参数编号集合
pub fn positional_set(text: &str) -> BTreeSet<u8> {
    POSITIONAL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok()))
        .collect()
}

/// 是否包含 %n 计数占位符
pub fn has_count(text: &str) -> bool {
    COUNT.is_match(text)
}

/// 按 QString::arg 多参数语义替换
///
/// 最小编号的占位符接收第一个参数，依此类推；参数不足时剩余占位符保持原样。
pub fn format_args<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let numbers: Vec<u8> = positional_set(template).into_iter().collect();

    POSITIONAL
        .replace_all(template, |caps: &Captures<'_>| {
            let number = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<u8>().ok())
                .unwrap_or(0);
            numbers
                .iter()
                .position(|&n| n == number)
                .and_then(|index| args.get(index))
                .map(|arg| arg.as_ref().to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// 替换 %n / %Ln 为计数值
pub fn format_count(template: &str, n: i64) -> String {
    COUNT.replace_all(template, n.to_string().as_str()).into_owned()
}
