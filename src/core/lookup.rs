// ============================================================================
// TsCat - 运行时翻译查找表
// ============================================================================
//
// 文件: src/core/lookup.rs
// 职责: 从目录构建只读查找表，提供翻译查询
// 边界:
//   - ✅ (context, source, comment) 精确查找与无注释回退
//   - ✅ 未翻译时回退到源字符串
//   - ✅ 按语言复数规则选择复数形式
//   - ❌ 不应包含文件读写
//   - ❌ 不应修改目录
//
// ============================================================================

use std::collections::HashMap;

use crate::core::placeholders;
use crate::models::catalog::{Catalog, MessageKey, Translation, TranslationStatus};

/// 语言的复数规则族
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralFamily {
    /// 只有一种形式（日语、中文、土耳其语等）
    Single,
    /// n == 1 为单数（英语、德语等）
    English,
    /// n <= 1 为单数（法语、巴西葡萄牙语）
    French,
    /// 俄语、乌克兰语等三种形式
    Slavic,
    /// 波兰语三种形式
    Polish,
    /// 捷克语、斯洛伐克语三种形式
    Czech,
}

impl PluralFamily {
    /// 根据语言代码确定复数规则族
    pub fn for_language(language: Option<&str>) -> Self {
        let Some(language) = language else {
            return PluralFamily::English;
        };
        let normalized = language.replace('-', "_");
        let primary = normalized.split('_').next().unwrap_or_default();

        match (primary, normalized.as_str()) {
            (_, "pt_BR") => PluralFamily::French,
            ("ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "hu" | "fa" | "bo" | "dz"
            | "jv" | "su" | "tt" | "yo" | "za", _) => PluralFamily::Single,
            ("fr" | "oc" | "ln" | "ti" | "fil" | "tl", _) => PluralFamily::French,
            ("ru" | "uk" | "be" | "sr" | "hr" | "bs", _) => PluralFamily::Slavic,
            ("pl", _) => PluralFamily::Polish,
            ("cs" | "sk", _) => PluralFamily::Czech,
            _ => PluralFamily::English,
        }
    }

    /// 复数形式个数
    pub fn form_count(&self) -> usize {
        match self {
            PluralFamily::Single => 1,
            PluralFamily::English | PluralFamily::French => 2,
            PluralFamily::Slavic | PluralFamily::Polish | PluralFamily::Czech => 3,
        }
    }

    /// 计数 n 应选用的形式下标
    pub fn form_index(&self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let (n10, n100) = (n % 10, n % 100);
        match self {
            PluralFamily::Single => 0,
            PluralFamily::English => usize::from(n != 1),
            PluralFamily::French => usize::from(n > 1),
            PluralFamily::Slavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralFamily::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralFamily::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
        }
    }
}

/// 只读翻译查找表
#[derive(Debug, Clone)]
pub struct Translator {
    language: Option<String>,
    family: PluralFamily,
    entries: HashMap<MessageKey, Translation>,
}

impl Translator {
    /// 从目录构建查找表
    ///
    /// 只收录已完成且非空的翻译；重复键以第一次出现为准。
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut entries = HashMap::new();
        for (context, message) in catalog.messages() {
            if message.status != TranslationStatus::Finished || message.translation.is_empty() {
                continue;
            }
            entries
                .entry(message.key(&context.name))
                .or_insert_with(|| message.translation.clone());
        }

        tracing::debug!(
            "loaded {} translations for {:?}",
            entries.len(),
            catalog.language
        );

        Self {
            language: catalog.language.clone(),
            family: PluralFamily::for_language(catalog.language.as_deref()),
            entries,
        }
    }

    /// 目标语言
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// 已加载的翻译数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Translation> {
        self.entries
            .get(&MessageKey::new(context, source, comment))
            .or_else(|| match comment {
                Some(c) if !c.is_empty() => self.entries.get(&MessageKey::new(context, source, None)),
                _ => None,
            })
    }

    /// 查找翻译，找不到时返回 None
    pub fn translate(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        self.entry(context, source, comment).map(Translation::first)
    }

    /// 查找翻译，找不到时回退到源字符串
    pub fn tr<'a>(&'a self, context: &str, source: &'a str, comment: Option<&str>) -> &'a str {
        self.translate(context, source, comment).unwrap_or(source)
    }

    /// 复数查找：按 n 选择形式并替换 %n
    pub fn tr_n(&self, context: &str, source: &str, comment: Option<&str>, n: i64) -> String {
        let form = match self.entry(context, source, comment) {
            Some(Translation::Numerus(forms)) if !forms.is_empty() => {
                let index = self.family.form_index(n).min(forms.len() - 1);
                forms[index].as_str()
            }
            Some(Translation::Single(text)) => text.as_str(),
            _ => source,
        };
        placeholders::format_count(form, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_str;
    use rstest::rstest;

    fn translator() -> Translator {
        let catalog = parse_str(
            r#"<TS version="2.1" language="tr">
<context>
    <name>OpenWithDialog</name>
    <message><source>Open with</source><translation>Birlikte aç</translation></message>
    <message><source>Cancel</source><comment>button</comment><translation>İptal</translation></message>
    <message><source>Cancel</source><translation>Vazgeç</translation></message>
    <message><source>Cancel</source><translation>Sonra</translation></message>
    <message><source>Confirm</source><comment>button</comment><translation>Onayla</translation></message>
    <message><source>Recommended Applications</source><translation type="unfinished">Önerilen</translation></message>
    <message><source>Other Applications</source><translation type="vanished">Diğer</translation></message>
</context>
<context>
    <name>FileView</name>
    <message numerus="yes"><source>%n item(s)</source><translation><numerusform>%n öge</numerusform></translation></message>
</context>
</TS>"#,
        )
        .unwrap();
        Translator::from_catalog(&catalog)
    }

    #[test]
    fn finds_finished_translations() {
        let t = translator();
        assert_eq!(t.translate("OpenWithDialog", "Open with", None), Some("Birlikte aç"));
        assert_eq!(t.language(), Some("tr"));
    }

    #[test]
    fn comment_disambiguates() {
        let t = translator();
        assert_eq!(t.translate("OpenWithDialog", "Cancel", Some("button")), Some("İptal"));
        assert_eq!(t.translate("OpenWithDialog", "Cancel", None), Some("Vazgeç"));
    }

    #[test]
    fn unknown_comment_falls_back_to_plain_entry() {
        let t = translator();
        assert_eq!(t.translate("OpenWithDialog", "Cancel", Some("menu")), Some("Vazgeç"));
        assert_eq!(t.translate("OpenWithDialog", "Confirm", None), None);
    }

    #[test]
    fn unfinished_and_vanished_fall_back_to_source() {
        let t = translator();
        assert_eq!(
            t.tr("OpenWithDialog", "Recommended Applications", None),
            "Recommended Applications"
        );
        assert_eq!(t.tr("OpenWithDialog", "Other Applications", None), "Other Applications");
        assert_eq!(t.tr("Missing", "Anything", None), "Anything");
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn context_is_part_of_the_key() {
        let t = translator();
        assert_eq!(t.translate("FileView", "Open with", None), None);
    }

    #[test]
    fn numerus_lookup_substitutes_count() {
        let t = translator();
        assert_eq!(t.tr_n("FileView", "%n item(s)", None, 5), "5 öge");
        assert_eq!(t.tr_n("FileView", "%n folder(s)", None, 2), "2 folder(s)");
    }

    #[rstest]
    #[case(Some("tr"), PluralFamily::Single)]
    #[case(Some("en_US"), PluralFamily::English)]
    #[case(Some("pt_BR"), PluralFamily::French)]
    #[case(Some("pt"), PluralFamily::English)]
    #[case(Some("ru"), PluralFamily::Slavic)]
    #[case(Some("zh-CN"), PluralFamily::Single)]
    #[case(None, PluralFamily::English)]
    fn picks_plural_family(#[case] language: Option<&str>, #[case] expected: PluralFamily) {
        assert_eq!(PluralFamily::for_language(language), expected);
    }

    #[rstest]
    #[case(PluralFamily::English, 1, 0)]
    #[case(PluralFamily::English, 0, 1)]
    #[case(PluralFamily::French, 0, 0)]
    #[case(PluralFamily::French, 2, 1)]
    #[case(PluralFamily::Slavic, 21, 0)]
    #[case(PluralFamily::Slavic, 11, 2)]
    #[case(PluralFamily::Slavic, 23, 1)]
    #[case(PluralFamily::Polish, 22, 1)]
    #[case(PluralFamily::Polish, 21, 2)]
    #[case(PluralFamily::Czech, 3, 1)]
    #[case(PluralFamily::Single, 7, 0)]
    fn selects_form_index(#[case] family: PluralFamily, #[case] n: i64, #[case] expected: usize) {
        assert_eq!(family.form_index(n), expected);
    }
}
