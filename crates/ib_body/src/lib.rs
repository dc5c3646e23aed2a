// crates/ib_body/src/lib.rs

//! IBFlow 浸入物体
//!
//! # 模块
//!
//! - [`markers`]: 圆柱、球面的拉格朗日标记点生成
//! - [`kinematics`]: 静止、平移、振荡三类指定运动

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kinematics;
pub mod markers;

// 重导出常用类型
pub use kinematics::Motion;
pub use markers::{circle, circle_count_for_spacing, sphere, MarkerSet};
