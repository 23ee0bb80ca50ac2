// ============================================================================
// TsCat - 目录错误类型
// ============================================================================
//
// 文件: src/core/error.rs
// 职责: 目录读写过程中的错误定义
// 边界:
//   - ✅ 解析、I/O、格式错误的类型定义
//   - ❌ 不应包含错误展示逻辑
//   - ❌ 不应包含国际化文本
//
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// 目录读写错误
#[derive(Error, Debug)]
pub enum CatalogError {
    /// 读写文件失败
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML 语法错误
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// 属性语法错误
    #[error("malformed attribute at byte {position}: {source}")]
    Attribute {
        position: u64,
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },

    /// 根元素不是 <TS>
    #[error("document root is <{0}>, expected <TS>")]
    NotACatalog(String),

    /// <message> 缺少 <source>
    #[error("message in context '{context}' has no <source> element")]
    MissingSource { context: String },

    /// 属性值无法识别
    #[error("invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute { attribute: String, value: String },

    /// 文件提前结束
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),
}

impl CatalogError {
    /// 附加文件路径的 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
