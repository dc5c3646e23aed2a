// crates/ib_post/src/surface.rs

//! 圆柱表面压力系数
//!
//! 浸入边界上的压力受正则化 delta 函数支撑区影响，因此在物体外侧
//! 几个网格处的同心圆上取样：半径 `R + offset·dx`，点数与物体标记点相同。
//! 二维压力场的坐标轴顺序为 `[y, x]`。

use ib_body::{circle, MarkerSet};
use ib_foundation::error::{IbError, IbResult};
use ib_interp::{BoundaryPolicy, ChainedSampler, StructuredField};
use tracing::debug;

use crate::coefficients::ReferenceScales;

/// 表面压力取样环
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePressure {
    /// 圆心
    pub center: (f64, f64),
    /// 取样环半径
    pub radius: f64,
    /// 取样点数
    pub n_markers: usize,
}

impl SurfacePressure {
    /// 在物体外侧 `offset_cells` 个网格处建立取样环
    pub fn outside_body(
        center: (f64, f64),
        body_radius: f64,
        n_markers: usize,
        grid_spacing: f64,
        offset_cells: f64,
    ) -> IbResult<Self> {
        if !(grid_spacing > 0.0 && offset_cells >= 0.0) {
            return Err(IbError::invalid_input(format!(
                "网格间距必须为正且偏移不能为负: dx={grid_spacing}, offset={offset_cells}"
            )));
        }
        if n_markers < 4 || n_markers % 2 != 0 {
            return Err(IbError::invalid_input(format!(
                "取样点数必须为不小于 4 的偶数, 实际 {n_markers}"
            )));
        }
        Ok(Self {
            center,
            radius: body_radius + offset_cells * grid_spacing,
            n_markers,
        })
    }

    /// 取样点
    pub fn ring(&self) -> IbResult<MarkerSet> {
        circle(self.center, self.radius, self.n_markers)
    }

    /// 在取样环上插值压力
    pub fn sample(&self, pressure: &StructuredField, policy: BoundaryPolicy) -> IbResult<Vec<f64>> {
        if pressure.ndim() != 2 {
            return Err(IbError::invalid_input(format!(
                "表面压力需要二维场, 实际 {} 维",
                pressure.ndim()
            )));
        }
        let ring = self.ring()?;
        let points: Vec<[f64; 2]> = ring.x.iter().zip(&ring.y).map(|(&x, &y)| [y, x]).collect();
        ChainedSampler::new(pressure)
            .with_policy(policy)
            .sample_points(&points)
    }

    /// 表面压力系数 `cp = (p - p∞)/(½ρU²)`
    pub fn coefficients(
        &self,
        pressure: &StructuredField,
        scales: &ReferenceScales,
        far_pressure: f64,
        policy: BoundaryPolicy,
    ) -> IbResult<SurfaceCp> {
        scales.validate()?;
        let q = scales.dynamic_pressure();
        let cp: Vec<f64> = self
            .sample(pressure, policy)?
            .into_iter()
            .map(|p| (p - far_pressure) / q)
            .collect();
        let theta = (0..self.n_markers)
            .map(|k| 2.0 * std::f64::consts::PI * k as f64 / self.n_markers as f64)
            .collect();

        debug!(
            "surface cp on ring R = {} ({} points)",
            self.radius, self.n_markers
        );
        Ok(SurfaceCp { theta, cp })
    }
}

/// 沿圆周的压力系数，`theta` 为弧度，从 +x 方向逆时针
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceCp {
    /// 角度（弧度）
    pub theta: Vec<f64>,
    /// 压力系数
    pub cp: Vec<f64>,
}

/// 半个圆周上的分布，角度从前驻点（θ = π）量起，单位为度
#[derive(Debug, Clone, PartialEq)]
pub struct AngularProfile {
    /// 角度（度），0 到 180 等分
    pub theta_deg: Vec<f64>,
    /// 压力系数
    pub cp: Vec<f64>,
}

impl SurfaceCp {
    /// 拆分为下表面和上表面
    ///
    /// 两者都从前驻点 (0°) 走到后驻点 (180°)，各 `n/2 + 1` 个点。
    pub fn split(&self) -> IbResult<(AngularProfile, AngularProfile)> {
        let n = self.cp.len();
        if n < 4 || n % 2 != 0 {
            return Err(IbError::invalid_input(format!(
                "拆分上下表面需要不小于 4 的偶数个点, 实际 {n}"
            )));
        }
        let half = n / 2;

        let mut lower = self.cp[half..].to_vec();
        lower.push(self.cp[0]);
        let upper: Vec<f64> = self.cp[..=half].iter().rev().copied().collect();

        Ok((
            AngularProfile {
                theta_deg: degrees_0_180(lower.len()),
                cp: lower,
            },
            AngularProfile {
                theta_deg: degrees_0_180(upper.len()),
                cp: upper,
            },
        ))
    }
}

fn degrees_0_180(n: usize) -> Vec<f64> {
    (0..n).map(|i| 180.0 * i as f64 / (n - 1) as f64).collect()
}
