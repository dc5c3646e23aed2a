// crates/ib_io/src/lib.rs

//! IBFlow IO 模块
//!
//! 提供后处理所需的文件读写。
//!
//! # 模块
//!
//! - [`body`]: 物体标记点文件
//! - [`forces`]: 求解器力历史
//! - [`csv`]: 分隔列数据（文献对比数据）
//! - [`snapshot`]: 结构化场 JSON 快照
//! - [`output`]: 列数据输出
//! - [`error`]: IO 错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod body;
pub mod csv;
pub mod error;
pub mod forces;
pub mod output;
pub mod snapshot;

// 重导出常用类型
pub use body::{read_body, write_body};
pub use csv::{load_columns, parse_columns, CsvConfig};
pub use error::{IoError, IoResult};
pub use forces::{read_forces, read_forces_with_dim, ForceHistory};
pub use output::write_columns;
pub use snapshot::{read_field_snapshot, write_field_snapshot, FieldSnapshot};
