// ============================================================================
// TsCat - 文件扫描
// ============================================================================
//
// 文件: src/core/scanner.rs
// 职责: 在目录中查找翻译目录文件与 C++ 源文件
// 边界:
//   - ✅ 目录遍历与忽略模式
//   - ✅ .ts 文件内容嗅探（区分 TypeScript）
//   - ❌ 不应包含文件解析
//   - ❌ 不应包含 CLI 参数处理
//
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::parser::looks_like_catalog;
use crate::models::config::Config;

/// 嗅探文件头时读取的字节数
const SNIFF_BYTES: u64 = 1024;

/// 收集翻译目录文件
///
/// 显式给出的文件总是收录；目录中只收录内容为 TS 文档的 `*.ts` 文件。
pub fn collect_catalog_files(roots: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    collect(roots, config, |path| {
        has_extension(path, &["ts"]) && is_catalog_file(path)
    })
}

/// 收集 C++ 源文件
pub fn collect_source_files(roots: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let extensions: Vec<&str> = config
        .workspace
        .source_extensions
        .iter()
        .map(String::as_str)
        .collect();
    collect(roots, config, |path| has_extension(path, &extensions))
}

fn collect(roots: &[PathBuf], config: &Config, accept: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        // 使用 walkdir 遍历目录
        let walker = WalkDir::new(root).follow_links(false).into_iter();
        for entry in walker.filter_entry(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .to_string();
            relative.is_empty() || !config.should_ignore_path(&relative)
        }) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && accept(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// 读取文件头判断是否为 TS 翻译目录
fn is_catalog_file(path: &Path) -> bool {
    let mut head = Vec::new();
    let read = File::open(path).and_then(|file| file.take(SNIFF_BYTES).read_to_end(&mut head));
    match read {
        Ok(_) => {
            let accepted = looks_like_catalog(&String::from_utf8_lossy(&head));
            if !accepted {
                tracing::debug!("skipping {:?}: not a Qt Linguist catalog", path);
            }
            accepted
        }
        Err(e) => {
            tracing::warn!("cannot read {:?}: {}", path, e);
            false
        }
    }
}
