// crates/ib_io/src/error.rs
//! IO 错误类型定义
//!
//! 文本与 JSON 文件读写的错误枚举，可转换为 IbError 以跨层传递。

use std::path::{Path, PathBuf};

use ib_foundation::IbError;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 文件路径
        path: PathBuf,
    },

    /// 底层读写失败
    #[error("读写失败: {path}: {source}")]
    Access {
        /// 文件路径
        path: PathBuf,
        /// 底层错误
        #[source]
        source: std::io::Error,
    },

    /// 解析错误
    #[error("文件解析错误: {file}:{line} - {message}")]
    ParseError {
        /// 文件名，字符串输入时为 `<string>`
        file: String,
        /// 行号（从 1 开始）
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 文件中没有有效数据
    #[error("没有有效数据: {file}")]
    NoData {
        /// 文件名
        file: String,
    },

    /// 待写出的列长度不一致
    #[error("列长度不一致: 列 {column} 有 {actual} 行, 期望 {expected} 行")]
    ColumnLength {
        /// 列名
        column: String,
        /// 期望行数
        expected: usize,
        /// 实际行数
        actual: usize,
    },

    /// JSON 序列化/反序列化错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 基础层错误转换
    #[error("基础层错误: {0}")]
    Foundation(#[from] IbError),
}

impl IoError {
    /// 包装打开/读写文件时的 IO 错误
    pub fn access(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Access {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// 解析错误
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

impl From<IoError> for IbError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::FileNotFound { path } => IbError::file_not_found(path),
            IoError::Access { path, source } => {
                IbError::io_with_source(format!("{}", path.display()), source)
            }
            IoError::ParseError {
                file,
                line,
                message,
            } => IbError::parse(file, line, message),
            IoError::NoData { file } => IbError::invalid_input(format!("没有有效数据: {file}")),
            IoError::ColumnLength {
                column,
                expected,
                actual,
            } => IbError::invalid_input(format!(
                "列 {column} 长度 {actual} 与期望 {expected} 不一致"
            )),
            IoError::Json(e) => IbError::invalid_input(format!("JSON 错误: {e}")),
            IoError::Foundation(e) => e,
        }
    }
}

/// 读取整个文本文件
pub(crate) fn read_text(path: &Path) -> IoResult<String> {
    std::fs::read_to_string(path).map_err(|e| IoError::access(path, e))
}

/// 用于错误信息的文件名
pub(crate) fn display_name(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<string>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mapping() {
        let err = IoError::access(
            Path::new("missing.body"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, IoError::FileNotFound { .. }));
        let ib: IbError = err.into();
        assert!(matches!(ib, IbError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_error_into_ib() {
        let ib: IbError = IoError::parse("forces.txt", 3, "bad").into();
        assert!(ib.to_string().contains("forces.txt"));
    }

    #[test]
    fn test_foundation_roundtrip() {
        let io: IoError = IbError::degenerate_interval(0, 1.0).into();
        let ib: IbError = io.into();
        assert!(ib.is_degenerate_interval());
    }
}
