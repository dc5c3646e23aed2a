// crates/ib_post/src/drag.rs

//! 球体压差阻力
//!
//! 在半径略大于球体的同心球面上布点（纬度环分布，间距约为网格间距），
//! 对三维压力场插值后按 `-Σ p n_x dA` 积分，`dA = δ²`。
//! 三维场的坐标轴顺序为 `[z, y, x]`。

use ib_body::sphere;
use ib_foundation::error::{IbError, IbResult};
use ib_interp::{BoundaryPolicy, ChainedSampler, StructuredField};
use tracing::debug;

/// 压差阻力（x 方向）
pub fn pressure_drag(
    pressure: &StructuredField,
    center: [f64; 3],
    radius: f64,
    delta: f64,
    policy: BoundaryPolicy,
) -> IbResult<f64> {
    if pressure.ndim() != 3 {
        return Err(IbError::invalid_input(format!(
            "压差阻力需要三维场, 实际 {} 维",
            pressure.ndim()
        )));
    }

    let markers = sphere((center[0], center[1], center[2]), radius, delta)?;
    let points: Vec<[f64; 3]> = markers.points().map(|p| [p[2], p[1], p[0]]).collect();
    let p = ChainedSampler::new(pressure)
        .with_policy(policy)
        .sample_points(&points)?;

    let d_area = delta * delta;
    let drag: f64 = markers
        .points()
        .zip(&p)
        .map(|(m, &pi)| {
            let dx = m[0] - center[0];
            let dy = m[1] - center[1];
            let dz = m[2] - center[2];
            let nx = dx / (dx * dx + dy * dy + dz * dz).sqrt();
            -pi * nx * d_area
        })
        .sum();

    debug!(
        "pressure drag {} from {} surface points (R = {})",
        drag,
        markers.len(),
        radius
    );
    Ok(drag)
}

/// 振荡球的压差阻力无量纲化尺度 `½ρD³f²`
pub fn oscillating_drag_scale(density: f64, diameter: f64, frequency: f64) -> f64 {
    0.5 * density * diameter.powi(3) * frequency * frequency
}

#[cfg(test)]
mod tests {
    use super::*;
    use ib_interp::SampleAxis;

    fn cube_axis() -> SampleAxis {
        SampleAxis::uniform(-1.0, 1.0, 21).unwrap()
    }

    #[test]
    fn test_uniform_pressure_has_no_drag_bias() {
        // 均匀压力在对称布点上积分接近零
        let field = StructuredField::constant(vec![cube_axis(), cube_axis(), cube_axis()], 3.0)
            .unwrap();
        let drag = pressure_drag(&field, [0.0; 3], 0.5, 0.05, BoundaryPolicy::Error).unwrap();
        assert!(drag.abs() < 1e-10);
    }

    #[test]
    fn test_linear_pressure_gradient() {
        // p = -x: 阻力 ≈ Σ x n_x δ² = R Σ n_x² δ² ≈ R·(4πR²/3)
        let field = StructuredField::from_fn(vec![cube_axis(), cube_axis(), cube_axis()], |c| -c[2])
            .unwrap();
        let r = 0.5;
        let drag = pressure_drag(&field, [0.0; 3], r, 0.02, BoundaryPolicy::Error).unwrap();
        let exact = 4.0 * std::f64::consts::PI * r.powi(3) / 3.0;
        assert!(drag > 0.0);
        assert!((drag - exact).abs() / exact < 0.1, "drag {drag}, exact {exact}");
    }

    #[test]
    fn test_requires_3d() {
        let field = StructuredField::constant(vec![cube_axis(), cube_axis()], 0.0).unwrap();
        assert!(pressure_drag(&field, [0.0; 3], 0.5, 0.1, BoundaryPolicy::Clamp).is_err());
    }

    #[test]
    fn test_drag_scale() {
        assert!((oscillating_drag_scale(1.0, 1.0, 2.0) - 2.0).abs() < 1e-12);
    }
}
