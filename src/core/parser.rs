// ============================================================================
// TsCat - TS 目录解析器
// ============================================================================
//
// 文件: src/core/parser.rs
// 职责: 将 Qt Linguist TS XML 解析为目录数据模型
// 边界:
//   - ✅ XML 事件流解析
//   - ✅ 实体与 <byte> 字符解码
//   - ✅ 解析错误定位
//   - ❌ 不应包含检查规则
//   - ❌ 不应包含输出格式化
//   - ❌ 不应包含国际化文本
//
// ============================================================================

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

use crate::core::error::{CatalogError, CatalogResult};
use crate::models::catalog::{
    Catalog, Context, LineRef, Location, Message, Translation, TranslationStatus,
};

/// 从文件解析目录
pub fn parse_file(path: &Path) -> CatalogResult<Catalog> {
    tracing::debug!("parsing catalog {:?}", path);
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    parse_str(&content)
}

/// 从字符串解析目录
pub fn parse_str(content: &str) -> CatalogResult<Catalog> {
    let mut reader = Reader::from_str(content);
    let mut parser = TsParser::default();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|source| CatalogError::Xml { position, source })?;

        match event {
            Event::Start(e) => parser.start(&e, position)?,
            Event::Empty(e) => {
                parser.start(&e, position)?;
                parser.end(e.name().as_ref())?;
            }
            Event::End(e) => parser.end(e.name().as_ref())?,
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|source| CatalogError::Xml { position, source })?;
                parser.text(&text);
            }
            Event::CData(e) => parser.text(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

/// 判断内容是否为 TS 文档（用于区分 TypeScript 等同扩展名文件）
pub fn looks_like_catalog(head: &str) -> bool {
    let head = head.trim_start_matches('\u{feff}').trim_start();
    (head.starts_with("<?xml") || head.starts_with("<!DOCTYPE") || head.starts_with("<TS"))
        && head.contains("<TS")
}

/// 正在构建的消息
#[derive(Debug)]
struct MessageBuilder {
    message: Message,
    numerus: bool,
    forms: Vec<String>,
    has_source: bool,
}

/// 解析状态
#[derive(Debug, Default)]
struct TsParser {
    catalog: Option<Catalog>,
    stack: Vec<String>,
    context: Option<Context>,
    message: Option<MessageBuilder>,
    text: String,
}

impl TsParser {
    fn start(&mut self, e: &BytesStart<'_>, position: u64) -> CatalogResult<()> {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

        if self.stack.is_empty() {
            if name != "TS" {
                return Err(CatalogError::NotACatalog(name));
            }
            self.catalog = Some(Catalog {
                version: attribute(e, b"version", position)?.unwrap_or_else(|| "2.1".to_string()),
                language: attribute(e, b"language", position)?,
                source_language: attribute(e, b"sourcelanguage", position)?,
                contexts: Vec::new(),
            });
            self.stack.push(name);
            return Ok(());
        }

        match name.as_str() {
            "context" => self.context = Some(Context::new("")),
            "message" => {
                let numerus = attribute(e, b"numerus", position)?.as_deref() == Some("yes");
                let mut message = Message::new("", None);
                message.id = attribute(e, b"id", position)?;
                self.message = Some(MessageBuilder {
                    message,
                    numerus,
                    forms: Vec::new(),
                    has_source: false,
                });
            }
            "location" => {
                if let Some(builder) = self.message.as_mut() {
                    let filename = attribute(e, b"filename", position)?.unwrap_or_default();
                    let line = attribute(e, b"line", position)?;
                    builder.message.locations.push(Location {
                        filename,
                        line: line.as_deref().and_then(LineRef::parse),
                    });
                }
            }
            "translation" => {
                let kind = attribute(e, b"type", position)?;
                let status = TranslationStatus::from_attr(kind.as_deref()).map_err(|value| {
                    CatalogError::InvalidAttribute {
                        attribute: "type".to_string(),
                        value,
                    }
                })?;
                if let Some(builder) = self.message.as_mut() {
                    builder.message.status = status;
                }
                self.text.clear();
            }
            "byte" => {
                let value = attribute(e, b"value", position)?.unwrap_or_default();
                let ch = decode_byte(&value).ok_or_else(|| CatalogError::InvalidAttribute {
                    attribute: "value".to_string(),
                    value: value.clone(),
                })?;
                self.text.push(ch);
            }
            "name" | "source" | "comment" | "oldsource" | "extracomment"
            | "translatorcomment" | "numerusform" => self.text.clear(),
            _ => {}
        }

        self.stack.push(name);
        Ok(())
    }

    fn end(&mut self, name: &[u8]) -> CatalogResult<()> {
        self.stack.pop();
        // <byte> 已在开始时写入文本缓冲
        if name == b"byte" {
            return Ok(());
        }
        let parent = self.stack.last().map(String::as_str);
        let text = std::mem::take(&mut self.text);

        match (name, parent) {
            (b"name", Some("context")) => {
                if let Some(context) = self.context.as_mut() {
                    context.name = text;
                }
            }
            (b"context", _) => {
                if let (Some(context), Some(catalog)) = (self.context.take(), self.catalog.as_mut())
                {
                    catalog.contexts.push(context);
                }
            }
            (b"message", _) => {
                if let Some(builder) = self.message.take() {
                    let context = self.context.as_mut();
                    if !builder.has_source {
                        return Err(CatalogError::MissingSource {
                            context: context.map(|c| c.name.clone()).unwrap_or_default(),
                        });
                    }
                    if let Some(context) = context {
                        context.messages.push(builder.message);
                    }
                }
            }
            (tag, Some("message")) => {
                if let Some(builder) = self.message.as_mut() {
                    builder.finish_field(tag, text);
                }
            }
            (b"numerusform", Some("translation")) => {
                if let Some(builder) = self.message.as_mut() {
                    builder.forms.push(text);
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.message.is_some() || self.context.is_some() {
            self.text.push_str(text);
        }
    }

    fn finish(self) -> CatalogResult<Catalog> {
        if let Some(open) = self.stack.last() {
            return Err(CatalogError::UnexpectedEof(open.clone()));
        }
        self.catalog
            .ok_or_else(|| CatalogError::NotACatalog("(empty document)".to_string()))
    }
}

impl MessageBuilder {
    fn finish_field(&mut self, tag: &[u8], text: String) {
        let message = &mut self.message;
        match tag {
            b"source" => {
                message.source = text;
                self.has_source = true;
            }
            b"comment" => message.comment = non_empty(text),
            b"oldsource" => message.old_source = Some(text),
            b"extracomment" => message.extra_comment = Some(text),
            b"translatorcomment" => message.translator_comment = Some(text),
            b"translation" => {
                message.translation = if self.numerus {
                    Translation::Numerus(std::mem::take(&mut self.forms))
                } else {
                    Translation::Single(text)
                };
            }
            _ => {}
        }
    }
}

/// 读取属性值
fn attribute(e: &BytesStart<'_>, key: &[u8], position: u64) -> CatalogResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|source| CatalogError::Attribute { position, source })?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|source| CatalogError::Xml { position, source })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// 解码 <byte value="x1b"/> 或 <byte value="27"/>
fn decode_byte(value: &str) -> Option<char> {
    let code = match value.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => value.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="tr">
<context>
    <name>OpenWithDialog</name>
    <message>
        <location filename="../src/services/common/openwith/private/openwithdialog.cpp" line="208"/>
        <source>Open with</source>
        <translation>Birlikte aç</translation>
    </message>
    <message>
        <location filename="../src/services/common/openwith/private/openwithdialog.cpp" line="233"/>
        <source>Cancel</source>
        <comment>button</comment>
        <translation>İptal</translation>
    </message>
    <message>
        <source>Recommended Applications</source>
        <translation type="unfinished"></translation>
    </message>
</context>
<context>
    <name>dfmplugin_computer::ComputerController</name>
    <message numerus="yes">
        <source>%n item(s) selected</source>
        <translation>
            <numerusform>%n öge seçildi</numerusform>
        </translation>
    </message>
    <message>
        <source>Can&apos;t find &quot;%1&quot; &amp; more</source>
        <translation>&quot;%1&quot; bulunamıyor</translation>
    </message>
</context>
</TS>
"#;

    #[test]
    fn parses_contexts_and_messages() {
        let catalog = parse_str(SAMPLE).unwrap();
        assert_eq!(catalog.version, "2.1");
        assert_eq!(catalog.language.as_deref(), Some("tr"));
        assert_eq!(catalog.contexts.len(), 2);
        assert_eq!(catalog.message_count(), 5);

        let dialog = catalog.context("OpenWithDialog").unwrap();
        let cancel = &dialog.messages[1];
        assert_eq!(cancel.source, "Cancel");
        assert_eq!(cancel.comment.as_deref(), Some("button"));
        assert_eq!(cancel.translation, Translation::Single("İptal".to_string()));
        assert_eq!(cancel.status, TranslationStatus::Finished);
        assert_eq!(cancel.locations[0].line, Some(LineRef::Absolute(233)));
    }

    #[test]
    fn unfinished_status_is_read_from_type_attribute() {
        let catalog = parse_str(SAMPLE).unwrap();
        let message = &catalog.context("OpenWithDialog").unwrap().messages[2];
        assert_eq!(message.status, TranslationStatus::Unfinished);
        assert!(message.translation.is_empty());
    }

    #[test]
    fn numerus_forms_and_entities_are_decoded() {
        let catalog = parse_str(SAMPLE).unwrap();
        let context = catalog
            .context("dfmplugin_computer::ComputerController")
            .unwrap();
        assert_eq!(
            context.messages[0].translation,
            Translation::Numerus(vec!["%n öge seçildi".to_string()])
        );
        assert_eq!(context.messages[1].source, "Can't find \"%1\" & more");
    }

    #[test]
    fn whitespace_inside_text_is_preserved() {
        let xml = r#"<TS version="2.1"><context><name>C</name><message><source>  Name: </source><translation> Ad: </translation></message></context></TS>"#;
        let catalog = parse_str(xml).unwrap();
        let message = &catalog.contexts[0].messages[0];
        assert_eq!(message.source, "  Name: ");
        assert_eq!(message.translation.first(), " Ad: ");
    }

    #[test]
    fn byte_elements_become_characters() {
        let xml = r#"<TS><context><name>C</name><message><source>a<byte value="x9"/>b</source><translation>c</translation></message></context></TS>"#;
        let catalog = parse_str(xml).unwrap();
        assert_eq!(catalog.contexts[0].messages[0].source, "a\tb");
    }

    #[rstest]
    #[case("<html></html>")]
    #[case("")]
    fn rejects_documents_that_are_not_catalogs(#[case] xml: &str) {
        assert!(matches!(parse_str(xml), Err(CatalogError::NotACatalog(_))));
    }

    #[test]
    fn message_without_source_is_an_error() {
        let xml = r#"<TS><context><name>C</name><message><translation>x</translation></message></context></TS>"#;
        assert!(matches!(
            parse_str(xml),
            Err(CatalogError::MissingSource { context }) if context == "C"
        ));
    }

    #[test]
    fn malformed_xml_is_reported() {
        let xml = "<TS><context><name>C</name></wrong></TS>";
        assert!(matches!(parse_str(xml), Err(CatalogError::Xml { .. })));
    }

    #[test]
    fn unknown_translation_type_is_rejected() {
        let xml = r#"<TS><context><name>C</name><message><source>a</source><translation type="weird">b</translation></message></context></TS>"#;
        assert!(matches!(
            parse_str(xml),
            Err(CatalogError::InvalidAttribute { .. })
        ));
    }

    #[rstest]
    #[case("<?xml version=\"1.0\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\">", true)]
    #[case("import { foo } from './bar';", false)]
    #[case("\u{feff}<TS version=\"2.0\">", true)]
    fn sniffs_catalog_headers(#[case] head: &str, #[case] expected: bool) {
        assert_eq!(looks_like_catalog(head), expected);
    }
}
