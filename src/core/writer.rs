// ============================================================================
// TsCat - TS 目录序列化
// ============================================================================
//
// 文件: src/core/writer.rs
// 职责: 将目录数据模型写回 TS XML
// 边界:
//   - ✅ lupdate 风格的 XML 布局
//   - ✅ 文本转义与控制字符编码
//   - ✅ 文件写入
//   - ❌ 不应包含解析逻辑
//   - ❌ 不应修改目录内容
//
// ============================================================================

use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::path::Path;

use crate::core::error::{CatalogError, CatalogResult};
use crate::models::catalog::{Catalog, Message, Translation};

const INDENT: &str = "    ";

/// 序列化目录为 TS XML 字符串
pub fn to_string(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");

    let _ = write!(out, "<TS version=\"{}\"", escape(catalog.version.as_str()));
    if let Some(language) = &catalog.language {
        let _ = write!(out, " language=\"{}\"", escape(language.as_str()));
    }
    if let Some(source_language) = &catalog.source_language {
        let _ = write!(out, " sourcelanguage=\"{}\"", escape(source_language.as_str()));
    }
    out.push_str(">\n");

    for context in &catalog.contexts {
        out.push_str("<context>\n");
        let _ = writeln!(out, "{}<name>{}</name>", INDENT, protect(&context.name));
        for message in &context.messages {
            write_message(&mut out, message);
        }
        out.push_str("</context>\n");
    }

    out.push_str("</TS>\n");
    out
}

/// 写入文件
pub fn write_file(catalog: &Catalog, path: &Path) -> CatalogResult<()> {
    tracing::debug!("writing catalog {:?}", path);
    std::fs::write(path, to_string(catalog)).map_err(|e| CatalogError::io(path, e))
}

fn write_message(out: &mut String, message: &Message) {
    let indent2 = INDENT.repeat(2);

    out.push_str(INDENT);
    out.push_str("<message");
    if let Some(id) = &message.id {
        let _ = write!(out, " id=\"{}\"", escape(id.as_str()));
    }
    if message.is_numerus() {
        out.push_str(" numerus=\"yes\"");
    }
    out.push_str(">\n");

    for location in &message.locations {
        let _ = write!(
            out,
            "{}<location filename=\"{}\"",
            indent2,
            escape(location.filename.as_str())
        );
        if let Some(line) = location.line {
            let _ = write!(out, " line=\"{}\"", line);
        }
        out.push_str("/>\n");
    }

    write_element(out, "source", &message.source);
    if let Some(old_source) = &message.old_source {
        write_element(out, "oldsource", old_source);
    }
    if let Some(comment) = &message.comment {
        write_element(out, "comment", comment);
    }
    if let Some(extra) = &message.extra_comment {
        write_element(out, "extracomment", extra);
    }
    if let Some(translator) = &message.translator_comment {
        write_element(out, "translatorcomment", translator);
    }

    let type_attr = message
        .status
        .as_attr()
        .map(|kind| format!(" type=\"{}\"", kind))
        .unwrap_or_default();

    match &message.translation {
        Translation::Single(text) => {
            let _ = writeln!(
                out,
                "{}<translation{}>{}</translation>",
                indent2,
                type_attr,
                protect(text)
            );
        }
        Translation::Numerus(forms) => {
            let _ = writeln!(out, "{}<translation{}>", indent2, type_attr);
            for form in forms {
                let _ = writeln!(
                    out,
                    "{}{}<numerusform>{}</numerusform>",
                    indent2,
                    INDENT,
                    protect(form)
                );
            }
            let _ = writeln!(out, "{}</translation>", indent2);
        }
    }

    out.push_str(INDENT);
    out.push_str("</message>\n");
}

fn write_element(out: &mut String, tag: &str, text: &str) {
    let _ = writeln!(out, "{}{}<{}>{}</{}>", INDENT, INDENT, tag, protect(text), tag);
}

/// 转义文本；XML 不允许的控制字符写为 <byte value="xNN"/>
fn protect(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut plain_start = 0;

    for (index, ch) in text.char_indices() {
        if (ch as u32) < 0x20 && !matches!(ch, '\n' | '\r' | '\t') {
            out.push_str(&escape(&text[plain_start..index]));
            let _ = write!(out, "<byte value=\"x{:x}\"/>", ch as u32);
            plain_start = index + ch.len_utf8();
        }
    }
    out.push_str(&escape(&text[plain_start..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_str;
    use crate::models::catalog::{LineRef, Location, TranslationStatus};

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new(Some("tr".to_string()));
        let context = catalog.context_mut_or_insert("OpenWithDialog");

        let mut open = Message::new("Open with", None);
        open.translation = Translation::Single("Birlikte aç".to_string());
        open.status = TranslationStatus::Finished;
        open.locations.push(Location::new("../openwithdialog.cpp", 208));
        open.locations.push(Location {
            filename: String::new(),
            line: Some(LineRef::Relative(25)),
        });

        let mut cancel = Message::new("Cancel", Some("button"));
        cancel.translation = Translation::Single("İptal".to_string());
        cancel.status = TranslationStatus::Finished;

        let mut quoted = Message::new("Can't open \"%1\" <dir> & more\u{1b}", None);
        quoted.extra_comment = Some("shown in a dialog".to_string());

        let mut items = Message::new("%n item(s)", None);
        items.translation = Translation::Numerus(vec!["%n öge".to_string()]);
        items.status = TranslationStatus::Vanished;

        context.messages.extend([open, cancel, quoted, items]);
        catalog
    }

    #[test]
    fn output_follows_lupdate_layout() {
        let xml = to_string(&sample_catalog());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n"));
        assert!(xml.contains("<TS version=\"2.1\" language=\"tr\">"));
        assert!(xml.contains(
            "        <location filename=\"../openwithdialog.cpp\" line=\"208\"/>\n"
        ));
        assert!(xml.contains("        <location filename=\"\" line=\"+25\"/>\n"));
        assert!(xml.contains("        <comment>button</comment>\n"));
        assert!(xml.contains("<translation type=\"unfinished\"></translation>"));
        assert!(xml.contains("<message numerus=\"yes\">"));
    }

    #[test]
    fn special_characters_are_escaped() {
        let xml = to_string(&sample_catalog());
        assert!(xml.contains(
            "<source>Can&apos;t open &quot;%1&quot; &lt;dir&gt; &amp; more<byte value=\"x1b\"/></source>"
        ));
    }

    #[test]
    fn round_trip_preserves_catalog() {
        let catalog = sample_catalog();
        let reparsed = parse_str(&to_string(&catalog)).unwrap();
        assert_eq!(reparsed, catalog);
    }
}
