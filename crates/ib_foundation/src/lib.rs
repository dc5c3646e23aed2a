// crates/ib_foundation/src/lib.rs

//! IBFlow Foundation Layer
//!
//! 基础层，提供整个工作区共享的错误类型。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与 `ensure!` / `require!` 宏

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

// 重导出常用类型
pub use error::{IbError, IbResult};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{IbError, IbResult};
    pub use crate::{ensure, require};
}
