// ============================================================================
// TsCat - 目录同步
// ============================================================================
//
// 文件: src/core/sync.rs
// 职责: 将提取结果合并进翻译目录
// 边界:
//   - ✅ 新增 / 保留 / 恢复 / 标记消失 / 删除
//   - ✅ 位置信息更新（相对目录文件所在目录）
//   - ❌ 不应包含源代码扫描
//   - ❌ 不应包含文件读写
//
// ============================================================================

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use crate::core::extractor::ExtractedMessage;
use crate::core::lookup::PluralFamily;
use crate::models::catalog::{Catalog, Location, Message, MessageKey, Translation, TranslationStatus};
use crate::models::report::SyncReport;

/// 同步选项
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// 位置文件名相对于此目录（通常是目录文件所在目录）
    pub base_dir: Option<PathBuf>,
    /// 删除所有不再出现的消息，而不是标记为 vanished
    pub no_obsolete: bool,
}

/// 合并提取结果
pub fn sync(catalog: &mut Catalog, extracted: &[ExtractedMessage], options: &SyncOptions) -> SyncReport {
    let mut report = SyncReport::default();

    // 按键分组，保持首次出现顺序
    let mut order: Vec<MessageKey> = Vec::new();
    let mut groups: HashMap<MessageKey, Vec<&ExtractedMessage>> = HashMap::new();
    for message in extracted {
        let key = message.key();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(message);
    }

    let locations_for = |key: &MessageKey| -> Vec<Location> {
        groups
            .get(key)
            .map(|hits| {
                hits.iter()
                    .map(|hit| {
                        let filename = relative_path(&hit.file, options.base_dir.as_deref());
                        Location::new(&filename, hit.line)
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    let mut present: HashSet<MessageKey> = HashSet::new();
    for context in &mut catalog.contexts {
        let messages = std::mem::take(&mut context.messages);
        for mut message in messages {
            let key = message.key(&context.name);

            if groups.contains_key(&key) {
                let locations = locations_for(&key);
                if !message.is_active() {
                    message.status = TranslationStatus::Unfinished;
                    report.revived.push(key.clone());
                } else {
                    report.kept += 1;
                    if message.locations != locations {
                        report.relocated.push(key.clone());
                    }
                }
                message.locations = locations;
                present.insert(key);
                context.messages.push(message);
                continue;
            }

            if options.no_obsolete {
                report.removed.push(key);
                continue;
            }

            if message.is_active() {
                if message.translation.is_empty() {
                    report.removed.push(key);
                    continue;
                }
                message.status = TranslationStatus::Vanished;
                report.vanished.push(key);
            }
            context.messages.push(message);
        }
    }

    let forms = PluralFamily::for_language(catalog.language.as_deref()).form_count();
    for key in order {
        if present.contains(&key) {
            continue;
        }
        let numerus = groups
            .get(&key)
            .is_some_and(|hits| hits.iter().any(|hit| hit.numerus));

        let mut message = Message::new(&key.source, key.comment.as_deref());
        if numerus {
            message.translation = Translation::Numerus(vec![String::new(); forms]);
        }
        message.locations = locations_for(&key);
        catalog.context_mut_or_insert(&key.context).messages.push(message);
        report.added.push(key);
    }

    catalog.contexts.retain(|context| !context.messages.is_empty());

    tracing::debug!(
        "sync: {} added, {} kept ({} moved), {} revived, {} vanished, {} removed",
        report.added.len(),
        report.kept,
        report.relocated.len(),
        report.revived.len(),
        report.vanished.len(),
        report.removed.len()
    );

    report
}

/// 计算 path 相对于 base 的路径（使用 / 分隔）
fn relative_path(path: &Path, base: Option<&Path>) -> String {
    let Some(base) = base else {
        return to_slash(path);
    };
    if let Ok(stripped) = path.strip_prefix(base) {
        return to_slash(stripped);
    }

    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return to_slash(path);
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    to_slash(&relative)
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
        .replacen("//", "/", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_str;
    use crate::models::catalog::LineRef;

    fn hit(context: &str, source: &str, file: &str, line: u32) -> ExtractedMessage {
        ExtractedMessage {
            context: context.to_string(),
            source: source.to_string(),
            comment: None,
            numerus: false,
            file: PathBuf::from(file),
            line,
        }
    }

    fn catalog() -> Catalog {
        parse_str(
            r#"<TS version="2.1" language="tr">
<context>
    <name>OpenWithDialog</name>
    <message><location filename="../src/openwithdialog.cpp" line="10"/><source>Open with</source><translation>Birlikte aç</translation></message>
    <message><source>Add other programs</source><translation>Diğer programları ekle</translation></message>
    <message><source>Set as default</source><translation type="unfinished"></translation></message>
    <message><source>Cancel</source><translation type="vanished">İptal</translation></message>
</context>
</TS>"#,
        )
        .unwrap()
    }

    fn options() -> SyncOptions {
        SyncOptions {
            base_dir: Some(PathBuf::from("/project/translations")),
            no_obsolete: false,
        }
    }

    #[test]
    fn merges_extracted_messages() {
        let mut catalog = catalog();
        let extracted = vec![
            hit("OpenWithDialog", "Open with", "/project/src/openwithdialog.cpp", 42),
            hit("OpenWithDialog", "Cancel", "/project/src/openwithdialog.cpp", 50),
            hit("ComputerController", "Unmount", "/project/src/computercontroller.cpp", 7),
        ];

        let report = sync(&mut catalog, &extracted, &options());

        assert_eq!(report.kept, 1);
        assert_eq!(report.revived, vec![MessageKey::new("OpenWithDialog", "Cancel", None)]);
        assert_eq!(
            report.vanished,
            vec![MessageKey::new("OpenWithDialog", "Add other programs", None)]
        );
        assert_eq!(
            report.removed,
            vec![MessageKey::new("OpenWithDialog", "Set as default", None)]
        );
        assert_eq!(
            report.added,
            vec![MessageKey::new("ComputerController", "Unmount", None)]
        );
        assert!(report.has_changes());

        let dialog = catalog.context("OpenWithDialog").unwrap();
        let open_with = &dialog.messages[0];
        assert_eq!(open_with.locations[0].filename, "../src/openwithdialog.cpp");
        assert_eq!(open_with.locations[0].line, Some(LineRef::Absolute(42)));
        assert_eq!(open_with.status, TranslationStatus::Finished);

        let cancel = dialog.messages.iter().find(|m| m.source == "Cancel").unwrap();
        assert_eq!(cancel.status, TranslationStatus::Unfinished);
        assert_eq!(cancel.translation.first(), "İptal");

        let added = &catalog.context("ComputerController").unwrap().messages[0];
        assert_eq!(added.status, TranslationStatus::Unfinished);
        assert!(added.translation.is_empty());
    }

    #[test]
    fn no_obsolete_drops_everything_missing() {
        let mut catalog = catalog();
        let extracted = vec![hit("OpenWithDialog", "Open with", "/project/src/openwithdialog.cpp", 42)];

        let report = sync(
            &mut catalog,
            &extracted,
            &SyncOptions {
                no_obsolete: true,
                ..options()
            },
        );

        assert_eq!(report.removed.len(), 3);
        assert_eq!(catalog.message_count(), 1);
    }

    #[test]
    fn empty_contexts_are_dropped() {
        let mut catalog = catalog();
        let report = sync(
            &mut catalog,
            &[],
            &SyncOptions {
                no_obsolete: true,
                ..options()
            },
        );
        assert_eq!(report.removed.len(), 4);
        assert!(catalog.contexts.is_empty());
    }

    #[test]
    fn unchanged_sync_reports_no_changes() {
        let mut catalog = catalog();
        let extracted = vec![
            hit("OpenWithDialog", "Open with", "/project/src/openwithdialog.cpp", 10),
            hit("OpenWithDialog", "Add other programs", "/project/src/openwithdialog.cpp", 20),
            hit("OpenWithDialog", "Set as default", "/project/src/openwithdialog.cpp", 30),
        ];
        sync(&mut catalog, &extracted, &options());

        // 第二次同步时位置已与源代码一致
        let report = sync(&mut catalog, &extracted, &options());
        assert_eq!(report.kept, 3);
        assert!(report.relocated.is_empty());
        assert!(!report.has_changes());
    }

    #[test]
    fn moved_line_is_a_change() {
        let mut catalog = catalog();
        let extracted = vec![
            hit("OpenWithDialog", "Open with", "/project/src/openwithdialog.cpp", 42),
            hit("OpenWithDialog", "Add other programs", "/project/src/openwithdialog.cpp", 20),
            hit("OpenWithDialog", "Set as default", "/project/src/openwithdialog.cpp", 30),
        ];
        sync(&mut catalog, &extracted, &options());

        let mut moved = extracted.clone();
        moved[0].line = 57;
        let report = sync(&mut catalog, &moved, &options());

        assert_eq!(
            report.relocated,
            vec![MessageKey::new("OpenWithDialog", "Open with", None)]
        );
        assert!(report.added.is_empty() && report.vanished.is_empty() && report.removed.is_empty());
        assert!(report.has_changes());

        let open_with = &catalog.context("OpenWithDialog").unwrap().messages[0];
        assert_eq!(open_with.locations[0].line, Some(LineRef::Absolute(57)));
    }

    #[test]
    fn numerus_messages_get_plural_slots() {
        let mut catalog = Catalog::new(Some("ru".to_string()));
        let mut extracted = hit("FileView", "%n item(s)", "/project/src/fileview.cpp", 3);
        extracted.numerus = true;

        sync(&mut catalog, &[extracted], &SyncOptions::default());

        let message = &catalog.contexts[0].messages[0];
        assert_eq!(message.translation, Translation::Numerus(vec![String::new(); 3]));
        assert_eq!(message.locations[0].filename, "/project/src/fileview.cpp");
    }

    #[test]
    fn repeated_hits_collect_all_locations() {
        let mut catalog = Catalog::new(Some("tr".to_string()));
        let extracted = vec![
            hit("Dialog", "OK", "/project/src/a.cpp", 3),
            hit("Dialog", "OK", "/project/src/b.cpp", 9),
        ];
        let report = sync(&mut catalog, &extracted, &options());
        assert_eq!(report.added.len(), 1);
        assert_eq!(catalog.contexts[0].messages[0].locations.len(), 2);
    }
}
