// crates/ib_body/src/markers.rs

//! 拉格朗日标记点
//!
//! 浸入边界由一组离散标记点表示。二维圆柱沿圆周等角分布，
//! 三维球面按纬度环分布，每个环上的点数使弧长间距接近网格间距。

use std::f64::consts::PI;

use ib_foundation::error::{IbError, IbResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 标记点集合
///
/// 二维物体 `z` 为 `None`。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerSet {
    /// x 坐标
    pub x: Vec<f64>,
    /// y 坐标
    pub y: Vec<f64>,
    /// z 坐标（仅三维）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<f64>>,
}

impl MarkerSet {
    /// 二维标记点
    pub fn new_2d(x: Vec<f64>, y: Vec<f64>) -> IbResult<Self> {
        IbError::check_size("marker y", x.len(), y.len())?;
        Ok(Self { x, y, z: None })
    }

    /// 三维标记点
    pub fn new_3d(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> IbResult<Self> {
        IbError::check_size("marker y", x.len(), y.len())?;
        IbError::check_size("marker z", x.len(), z.len())?;
        Ok(Self { x, y, z: Some(z) })
    }

    /// 空间维数
    #[inline]
    pub fn dim(&self) -> usize {
        if self.z.is_some() {
            3
        } else {
            2
        }
    }

    /// 标记点数
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// 第 `i` 个点的坐标，二维时 z 为 0
    pub fn point(&self, i: usize) -> Option<[f64; 3]> {
        let x = *self.x.get(i)?;
        let y = *self.y.get(i)?;
        let z = match &self.z {
            Some(z) => *z.get(i)?,
            None => 0.0,
        };
        Some([x, y, z])
    }

    /// 遍历全部点
    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }

    /// 形心
    pub fn centroid(&self) -> Option<[f64; 3]> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let mean = |v: &[f64]| v.iter().sum::<f64>() / n;
        Some([
            mean(&self.x),
            mean(&self.y),
            self.z.as_deref().map(mean).unwrap_or(0.0),
        ])
    }

    /// 整体平移
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            x: self.x.iter().map(|v| v + dx).collect(),
            y: self.y.iter().map(|v| v + dy).collect(),
            z: self.z.as_ref().map(|z| z.iter().map(|v| v + dz).collect()),
        }
    }
}

/// 按弧长间距确定圆周标记点数
///
/// `floor(2πR/ds) + 1`，为奇数时再加一，保证上下表面对称。
pub fn circle_count_for_spacing(radius: f64, ds: f64) -> IbResult<usize> {
    check_positive("radius", radius)?;
    check_positive("spacing", ds)?;
    let mut n = (2.0 * PI * radius / ds).floor() as usize + 1;
    if n % 2 != 0 {
        n += 1;
    }
    Ok(n)
}

/// 圆周上 `n` 个等角标记点，`θ_k = 2πk/n`
pub fn circle(center: (f64, f64), radius: f64, n: usize) -> IbResult<MarkerSet> {
    check_positive("radius", radius)?;
    if n < 3 {
        return Err(IbError::invalid_input(format!(
            "圆周至少需要 3 个标记点, 实际 {n}"
        )));
    }

    let (xc, yc) = center;
    let (x, y) = (0..n)
        .map(|k| {
            let theta = 2.0 * PI * k as f64 / n as f64;
            (xc + radius * theta.cos(), yc + radius * theta.sin())
        })
        .unzip();

    debug!("circle: {} markers, R = {}", n, radius);
    MarkerSet::new_2d(x, y)
}

/// 球面标记点（纬度环分布）
///
/// 北极点，`linspace(0, π, ceil(πR/δ))` 去掉两极后的各纬度环，
/// 每环 `ceil(2πR sinφ/δ)` 个等角点，最后是南极点。
pub fn sphere(center: (f64, f64, f64), radius: f64, delta: f64) -> IbResult<MarkerSet> {
    check_positive("radius", radius)?;
    check_positive("delta", delta)?;

    let (xc, yc, zc) = center;
    let mut x = vec![xc];
    let mut y = vec![yc];
    let mut z = vec![zc + radius];

    let n_phi = (PI * radius / delta).ceil() as usize;
    for j in 1..n_phi.saturating_sub(1) {
        let phi = PI * j as f64 / (n_phi - 1) as f64;
        let r_sin = radius * phi.sin();
        let r_cos = radius * phi.cos();
        let n_theta = (2.0 * PI * r_sin / delta).ceil() as usize;
        for k in 0..n_theta {
            let theta = 2.0 * PI * k as f64 / n_theta as f64;
            x.push(xc + r_sin * theta.cos());
            y.push(yc + r_sin * theta.sin());
            z.push(zc + r_cos);
        }
    }

    x.push(xc);
    y.push(yc);
    z.push(zc - radius);

    debug!(
        "sphere: {} markers on {} rings, R = {}",
        x.len(),
        n_phi.saturating_sub(2),
        radius
    );
    MarkerSet::new_3d(x, y, z)
}

fn check_positive(field: &'static str, value: f64) -> IbResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(IbError::invalid_input(format!("{field} 必须为正数, 实际 {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_count_even() {
        // R = 0.5, ds = 1.5/90: floor(188.49..) + 1 = 189 -> 190
        assert_eq!(circle_count_for_spacing(0.5, 1.5 / 90.0).unwrap(), 190);
        assert_eq!(circle_count_for_spacing(1.0, 2.0 * PI / 9.5).unwrap() % 2, 0);
        assert!(circle_count_for_spacing(0.0, 0.1).is_err());
    }

    #[test]
    fn test_circle_on_radius() {
        let body = circle((1.0, -2.0), 0.5, 64).unwrap();
        assert_eq!(body.len(), 64);
        assert_eq!(body.dim(), 2);
        for p in body.points() {
            let r = ((p[0] - 1.0).powi(2) + (p[1] + 2.0).powi(2)).sqrt();
            assert!((r - 0.5).abs() < 1e-12);
        }
        // 第一个点在 θ = 0
        assert!((body.x[0] - 1.5).abs() < 1e-12);
        assert!((body.y[0] + 2.0).abs() < 1e-12);
        // 偶数点数时 n/2 在 θ = π
        assert!((body.x[32] - 0.5).abs() < 1e-12);

        let c = body.centroid().unwrap();
        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_layout() {
        let body = sphere((0.0, 0.0, 0.0), 0.5, 0.1).unwrap();
        assert_eq!(body.dim(), 3);

        let z = body.z.as_ref().unwrap();
        assert_eq!(z[0], 0.5);
        assert_eq!(z[body.len() - 1], -0.5);

        // n_phi = ceil(5π) = 16, 去掉两极后 14 个纬度环
        let n_phi = 16;
        let expected: usize = (1..n_phi - 1)
            .map(|j| {
                let phi = PI * j as f64 / (n_phi - 1) as f64;
                (2.0 * PI * 0.5 * phi.sin() / 0.1).ceil() as usize
            })
            .sum::<usize>()
            + 2;
        assert_eq!(body.len(), expected);

        for p in body.points() {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_translated() {
        let body = circle((0.0, 0.0), 1.0, 4).unwrap().translated(2.0, 1.0, 5.0);
        assert!((body.x[0] - 3.0).abs() < 1e-12);
        assert!((body.y[0] - 1.0).abs() < 1e-12);
        assert!(body.z.is_none());
    }

    #[test]
    fn test_size_mismatch() {
        assert!(MarkerSet::new_2d(vec![0.0, 1.0], vec![0.0]).is_err());
        assert!(MarkerSet::new_3d(vec![0.0], vec![0.0], vec![]).is_err());
    }
}
