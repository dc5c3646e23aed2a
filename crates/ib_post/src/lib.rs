// crates/ib_post/src/lib.rs

//! IBFlow 后处理
//!
//! 浸入边界算例的标准分析：力系数、表面压力、尾迹指标和收敛性。
//!
//! # 模块
//!
//! - [`coefficients`]: 力系数、附加质量修正、时间平均
//! - [`surface`]: 圆柱表面压力系数
//! - [`drag`]: 球体压差阻力
//! - [`wake`]: 回流区长度与速度剖面
//! - [`convergence`]: L2 / L∞ 误差与观测收敛阶

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coefficients;
pub mod convergence;
pub mod drag;
pub mod surface;
pub mod wake;

// 重导出常用类型
pub use coefficients::{
    added_mass_correction, force_coefficients, time_average, ForceCoefficients, ReferenceScales,
};
pub use convergence::{convergence_errors, error_norms, observed_order, ErrorNorms};
pub use drag::{oscillating_drag_scale, pressure_drag};
pub use surface::{AngularProfile, SurfaceCp, SurfacePressure};
pub use wake::{horizontal_profile, recirculation_length, velocity_profile};
