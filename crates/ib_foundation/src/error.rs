// crates/ib_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `IbError` 枚举和 `IbResult` 类型别名，用于整个项目的错误处理。
//!
//! # 错误分类
//!
//! - 输入无效：`InvalidInput`、`SizeMismatch`（长度不匹配也属于输入无效）
//! - 退化区间：`DegenerateInterval`（坐标轴上相邻两点重合）
//! - 越界查询：`OutOfRange`（仅在边界策略为 `Error` 时出现）
//! - 文件相关：`Io`、`FileNotFound`、`Parse`
//!
//! # 示例
//!
//! ```
//! use ib_foundation::error::{IbError, IbResult};
//!
//! fn check_axis(axis: &[f64]) -> IbResult<()> {
//!     if axis.len() < 2 {
//!         return Err(IbError::invalid_input("坐标轴至少需要两个点"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_axis(&[0.0]).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type IbResult<T> = Result<T, IbError>;

/// IBFlow 错误类型
#[derive(Error, Debug)]
pub enum IbError {
    // ========================================================================
    // 输入数据错误
    // ========================================================================

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 零宽度区间
    #[error("退化区间: 坐标轴第 {index} 个区间宽度为零 (重合值 {value})")]
    DegenerateInterval {
        /// 区间左端点索引
        index: usize,
        /// 重合的坐标值
        value: f64,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    // ========================================================================
    // 文件相关错误
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    Parse {
        /// 文件路径
        file: PathBuf,
        /// 行号
        line: usize,
        /// 错误信息
        message: String,
    },

    // ========================================================================
    // 其他
    // ========================================================================

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 资源未找到
    #[error("资源未找到: {resource}")]
    NotFound {
        /// 资源名称
        resource: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl IbError {
    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 零宽度区间
    pub fn degenerate_interval(index: usize, value: f64) -> Self {
        Self::DegenerateInterval { index, value }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// IO 错误（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 资源未找到
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// 是否属于输入无效类错误
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::SizeMismatch { .. })
    }

    /// 是否为退化区间错误
    pub fn is_degenerate_interval(&self) -> bool {
        matches!(self, Self::DegenerateInterval { .. })
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl IbError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> IbResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查值是否在范围内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> IbResult<()> {
        if value < min || value > max {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for IbError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 宏
// ========================================================================

/// 条件不满足时提前返回错误
///
/// ```
/// use ib_foundation::{ensure, IbError, IbResult};
///
/// fn positive(v: f64) -> IbResult<f64> {
///     ensure!(v > 0.0, IbError::invalid_input("必须为正"));
///     Ok(v)
/// }
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return ::core::result::Result::Err(::core::convert::From::from($err));
        }
    };
}

/// 解包 `Option`，为 `None` 时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr $(,)?) => {
        match $opt {
            ::core::option::Option::Some(v) => v,
            ::core::option::Option::None => {
                return ::core::result::Result::Err(::core::convert::From::from($err))
            }
        }
    };
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IbError::invalid_input("坐标轴太短");
        assert!(err.to_string().contains("坐标轴太短"));
    }

    #[test]
    fn test_degenerate_display() {
        let err = IbError::degenerate_interval(3, 1.5);
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_invalid_input_family() {
        assert!(IbError::invalid_input("x").is_invalid_input());
        assert!(IbError::size_mismatch("values", 3, 2).is_invalid_input());
        assert!(!IbError::degenerate_interval(0, 1.0).is_invalid_input());
        assert!(IbError::degenerate_interval(0, 1.0).is_degenerate_interval());
    }

    #[test]
    fn test_check_size() {
        assert!(IbError::check_size("test", 10, 10).is_ok());
        assert!(IbError::check_size("test", 10, 5).is_err());
    }

    #[test]
    fn test_check_range() {
        assert!(IbError::check_range("value", 5.0, 0.0, 10.0).is_ok());
        assert!(IbError::check_range("value", -1.0, 0.0, 10.0).is_err());
        assert!(IbError::check_range("value", 11.0, 0.0, 10.0).is_err());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: IbError = io_err.into();
        assert!(matches!(err, IbError::Io { .. }));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: i32) -> IbResult<()> {
            ensure!(value > 0, IbError::invalid_input("value must be positive"));
            Ok(())
        }

        assert!(check(1).is_ok());
        assert!(check(-1).is_err());
    }

    #[test]
    fn test_require_macro() {
        fn get_value(opt: Option<i32>) -> IbResult<i32> {
            let v = require!(opt, IbError::not_found("value"));
            Ok(v)
        }

        assert_eq!(get_value(Some(42)).unwrap(), 42);
        assert!(get_value(None).is_err());
    }
}
