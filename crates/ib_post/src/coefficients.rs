// crates/ib_post/src/coefficients.rs

//! 力系数与时间平均
//!
//! 力系数 `C = F / (½ρU²L)`，二维时 L 为直径，三维时为迎风面积。
//! 振荡物体的阻力需要加回附加质量项 `ρVa`，才能与文献中
//! 固定坐标系下的结果对比。

use ib_body::Motion;
use ib_foundation::error::{IbError, IbResult};
use ib_io::ForceHistory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 无量纲化参考量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceScales {
    /// 流体密度 ρ
    pub density: f64,
    /// 参考速度 U
    pub velocity: f64,
    /// 参考长度（或面积）L
    pub length: f64,
}

impl Default for ReferenceScales {
    fn default() -> Self {
        Self {
            density: 1.0,
            velocity: 1.0,
            length: 1.0,
        }
    }
}

impl ReferenceScales {
    /// 创建并校验参考量
    pub fn new(density: f64, velocity: f64, length: f64) -> IbResult<Self> {
        let scales = Self {
            density,
            velocity,
            length,
        };
        scales.validate()?;
        Ok(scales)
    }

    /// 校验参考量均为正
    pub fn validate(&self) -> IbResult<()> {
        for (name, v) in [
            ("density", self.density),
            ("velocity", self.velocity),
            ("length", self.length),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(IbError::invalid_input(format!("参考量 {name} 必须为正, 实际 {v}")));
            }
        }
        Ok(())
    }

    /// 动压 ½ρU²
    #[inline]
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * self.density * self.velocity * self.velocity
    }

    /// 力系数换算因子 1/(½ρU²L)
    #[inline]
    pub fn force_factor(&self) -> f64 {
        1.0 / (self.dynamic_pressure() * self.length)
    }
}

/// 力系数历史
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForceCoefficients {
    /// 时间
    pub times: Vec<f64>,
    /// 阻力系数
    pub cd: Vec<f64>,
    /// 升力系数（y 方向）
    pub cl: Vec<f64>,
    /// z 方向系数（仅三维）
    pub cz: Option<Vec<f64>>,
}

/// 力历史换算为力系数
pub fn force_coefficients(history: &ForceHistory, factor: f64) -> ForceCoefficients {
    let scale = |v: &[f64]| v.iter().map(|f| f * factor).collect::<Vec<_>>();
    ForceCoefficients {
        times: history.times.clone(),
        cd: scale(&history.fx),
        cl: scale(&history.fy),
        cz: history.fz.as_deref().map(scale),
    }
}

/// 加回附加质量力：`fx += ρ V a_x(t)`
///
/// `volume` 为物体体积（二维为截面积）。
pub fn added_mass_correction(
    fx: &mut [f64],
    times: &[f64],
    density: f64,
    volume: f64,
    motion: &Motion,
) -> IbResult<()> {
    IbError::check_size("force times", fx.len(), times.len())?;
    for (f, &t) in fx.iter_mut().zip(times) {
        *f += density * volume * motion.acceleration(t)[0];
    }
    debug!(
        "applied added-mass correction ({}, ρV = {})",
        motion.name(),
        density * volume
    );
    Ok(())
}

/// `[start, end]` 时间窗内的算术平均
///
/// # 错误
///
/// 时间窗内没有记录时返回 `InvalidInput`。
pub fn time_average(times: &[f64], values: &[f64], window: (f64, f64)) -> IbResult<f64> {
    IbError::check_size("values", times.len(), values.len())?;
    let (start, end) = window;
    if start.is_nan() || end.is_nan() || start > end {
        return Err(IbError::invalid_input(format!(
            "时间窗起点 {start} 大于终点 {end}"
        )));
    }

    let (sum, count) = times
        .iter()
        .zip(values)
        .filter(|&(&t, _)| t >= start && t <= end)
        .fold((0.0, 0usize), |(s, n), (_, &v)| (s + v, n + 1));

    if count == 0 {
        return Err(IbError::invalid_input(format!(
            "时间窗 [{start}, {end}] 内没有数据"
        )));
    }
    Ok(sum / count as f64)
}

/// 平均力系数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanCoefficients {
    /// 平均阻力系数
    pub cd: f64,
    /// 平均升力系数
    pub cl: f64,
}

impl ForceCoefficients {
    /// 记录数
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// 时间窗内的平均系数
    pub fn mean(&self, window: (f64, f64)) -> IbResult<MeanCoefficients> {
        Ok(MeanCoefficients {
            cd: time_average(&self.times, &self.cd, window)?,
            cl: time_average(&self.times, &self.cl, window)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn history() -> ForceHistory {
        ForceHistory {
            times: vec![0.0, 1.0, 2.0, 3.0],
            fx: vec![2.0, 3.0, 4.0, 5.0],
            fy: vec![0.0, 1.0, 0.0, -1.0],
            fz: None,
        }
    }

    #[test]
    fn test_force_factor() {
        let scales = ReferenceScales::new(1.0, 2.0, 0.5).unwrap();
        assert!((scales.dynamic_pressure() - 2.0).abs() < 1e-12);
        assert!((scales.force_factor() - 1.0).abs() < 1e-12);
        assert!(ReferenceScales::new(0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_coefficients() {
        let coeffs = force_coefficients(&history(), ReferenceScales::default().force_factor());
        assert_eq!(coeffs.cd, vec![4.0, 6.0, 8.0, 10.0]);
        assert_eq!(coeffs.cl, vec![0.0, 2.0, 0.0, -2.0]);
        assert!(coeffs.cz.is_none());
    }

    #[test]
    fn test_time_average_window() {
        let h = history();
        assert!((time_average(&h.times, &h.fx, (1.0, 3.0)).unwrap() - 4.0).abs() < 1e-12);
        assert!((time_average(&h.times, &h.fx, (0.0, 10.0)).unwrap() - 3.5).abs() < 1e-12);

        let err = time_average(&h.times, &h.fx, (5.0, 6.0)).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(time_average(&h.times, &h.fx, (2.0, 1.0)).is_err());
    }

    #[test]
    fn test_mean_coefficients() {
        let coeffs = force_coefficients(&history(), 1.0);
        let mean = coeffs.mean((0.0, 3.0)).unwrap();
        assert!((mean.cd - 3.5).abs() < 1e-12);
        assert!(mean.cl.abs() < 1e-12);
    }

    #[test]
    fn test_added_mass_for_oscillating_cylinder() {
        // KC = 5, f = 0.2, 位移 x = -A sin(wt)，加速度 a = w²A sin(wt)
        let motion = Motion::from_keulegan_carpenter(1.0, 5.0, 0.2, -1.0).unwrap();
        let w = 2.0 * PI * 0.2;
        let amp = 5.0 / (2.0 * PI);
        let volume = PI / 4.0;
        let times = vec![0.0, 1.25, 2.5];
        let mut fx = vec![0.0; 3];

        added_mass_correction(&mut fx, &times, 1.0, volume, &motion).unwrap();

        for (f, t) in fx.iter().zip(&times) {
            let expected = volume * w * w * amp * (w * t).sin();
            assert!((f - expected).abs() < 1e-12);
        }
        assert!(added_mass_correction(&mut fx, &[0.0], 1.0, volume, &motion).is_err());
    }
}
