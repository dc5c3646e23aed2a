// crates/ib_post/src/wake.rs

//! 尾迹分析：回流区长度与速度剖面
//!
//! 二维速度场坐标轴顺序为 `[y, x]`。物体以 x 方向速度 `v_x` 运动
//! （静止时为 0，来流沿 +x）。在物体坐标系中，尾迹位于运动方向的
//! 反侧：`v_x ≤ 0` 时在 `x > xc + R`，`v_x > 0` 时在 `x < xc - R`。
//! 回流区是尾迹中相对流速 `u - v_x` 指向物体的区域。

use ib_foundation::error::{IbError, IbResult};
use ib_interp::{interpolate, BoundaryPolicy, FieldSlice, SampleAxis, StructuredField};
use tracing::debug;

/// 回流区长度
///
/// 沿下游方向把相对流速记为 `w = s·(u - v_x)`，`s = -sign(v_x)`
/// （静止物体 `s = 1`）。找到尾迹中离物体后缘超过 `buffer` 的最后一个
/// `w ≤ 0` 的网格点，在它与下游相邻点之间反插值出 `w = 0` 的位置 `xp`，
/// 返回 `|xp - x_rear|`。
///
/// # 错误
///
/// - `x` 非升序或与 `u_line` 长度不一致：`InvalidInput`
/// - 尾迹中没有回流：`NotFound`
/// - 回流区延伸到计算域边界：`InvalidInput`
pub fn recirculation_length(
    x: &[f64],
    u_line: &[f64],
    center_x: f64,
    radius: f64,
    body_velocity: f64,
    buffer: f64,
) -> IbResult<f64> {
    IbError::check_size("u_line", x.len(), u_line.len())?;
    let axis = SampleAxis::from_slice(x)?;
    if !axis.is_ascending() {
        return Err(IbError::invalid_input("回流区长度要求 x 坐标升序"));
    }

    // 把尾迹统一转到 +x 一侧：下游坐标 ξ = s·x 升序排列
    let s = if body_velocity > 0.0 { -1.0 } else { 1.0 };
    let (xi, w): (Vec<f64>, Vec<f64>) = if s > 0.0 {
        x.iter()
            .zip(u_line)
            .map(|(&xk, &uk)| (xk, uk - body_velocity))
            .unzip()
    } else {
        x.iter()
            .zip(u_line)
            .rev()
            .map(|(&xk, &uk)| (-xk, body_velocity - uk))
            .unzip()
    };

    let rear = s * center_x + radius;
    let idx = (0..xi.len())
        .rev()
        .find(|&i| w[i] <= 0.0 && xi[i] > rear + buffer)
        .ok_or_else(|| {
            IbError::not_found(format!(
                "物体后缘 {} 以外 {} 处的回流区",
                s * rear,
                buffer
            ))
        })?;

    if idx + 1 >= xi.len() {
        return Err(IbError::invalid_input("回流区延伸到计算域末端，无法确定终点"));
    }

    let xp = interpolate(&w[idx..idx + 2], &xi[idx..idx + 2], 0.0)?;
    let length = (xp - rear).abs();

    debug!(
        "recirculation zone ends at x = {} (length {}, v_x = {})",
        s * xp,
        length,
        body_velocity
    );
    Ok(length)
}

/// 水平线 `y = y0` 上的速度分布 `u(x)`
pub fn horizontal_profile(
    field: &StructuredField,
    y0: f64,
    policy: BoundaryPolicy,
) -> IbResult<FieldSlice> {
    require_2d(field)?;
    field.reduce_axis(0, y0, policy)?.into_slice()
}

/// 竖直截面 `x = x0` 上的速度分布 `u(y)`
pub fn velocity_profile(
    field: &StructuredField,
    x0: f64,
    policy: BoundaryPolicy,
) -> IbResult<FieldSlice> {
    require_2d(field)?;
    field.reduce_axis(1, x0, policy)?.into_slice()
}

fn require_2d(field: &StructuredField) -> IbResult<()> {
    if field.ndim() == 2 {
        Ok(())
    } else {
        Err(IbError::invalid_input(format!(
            "剖面提取需要二维场, 实际 {} 维",
            field.ndim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recirculation_length_linear_recovery() {
        // u + U = x - 2，零点在 x = 2；物体后缘在 x = 0.5
        let x: Vec<f64> = (0..=8).map(|i| 0.5 * i as f64).collect();
        let speed = 1.0;
        let u: Vec<f64> = x.iter().map(|&xi| xi - 2.0 - speed).collect();
        // x = 2.0 处 u + U = 0，仍算作回流；终点在 2.0 与 2.5 之间反插值
        let length = recirculation_length(&x, &u, 0.0, 0.5, -speed, 0.01).unwrap();
        assert!((length - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_recirculation_between_nodes() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let u = [0.0, -2.0, -1.5, -0.5, 0.5]; // U = 1: u+U = [1, -1, -0.5, 0.5, 1.5]
        let length = recirculation_length(&x, &u, 0.0, 0.5, -1.0, 0.01).unwrap();
        // 零点在 2 与 3 之间的 x = 2.5
        assert!((length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_recirculation() {
        let x = [0.0, 1.0, 2.0];
        let u = [0.0, 0.0, 0.0];
        let err = recirculation_length(&x, &u, 0.0, 0.5, -1.0, 0.01).unwrap_err();
        assert!(matches!(err, IbError::NotFound { .. }));
    }

    #[test]
    fn test_recirculation_hits_domain_end() {
        let x = [0.0, 1.0, 2.0];
        let u = [0.0, -2.0, -2.0];
        assert!(recirculation_length(&x, &u, 0.0, 0.5, -1.0, 0.01).is_err());
    }

    #[test]
    fn test_body_moving_in_positive_x() {
        // 上一算例的镜像: x -> -x, u -> -u, v_x = +1，尾迹在物体左侧
        let x = [-4.0, -3.0, -2.0, -1.0, 0.0];
        let u = [-0.5, 0.5, 1.5, 2.0, 0.0];
        let length = recirculation_length(&x, &u, 0.0, 0.5, 1.0, 0.01).unwrap();
        assert!((length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mirrored_translation_matches() {
        let x: Vec<f64> = (0..=40).map(|i| -2.0 + 0.1 * i as f64).collect();
        // 向 -x 平移，中心在 x = -0.5：回流区 u + 1 <= 0 延伸到 x = 0.7
        let u_minus: Vec<f64> = x.iter().map(|&xk| 0.5 * (xk - 0.7) - 1.0).collect();
        let l_minus = recirculation_length(&x, &u_minus, -0.5, 0.5, -1.0, 0.01).unwrap();

        // 镜像：向 +x 平移，中心在 x = 0.5
        let x_plus: Vec<f64> = x.iter().rev().map(|&xk| -xk).collect();
        let u_plus: Vec<f64> = u_minus.iter().rev().map(|&uk| -uk).collect();
        let l_plus = recirculation_length(&x_plus, &u_plus, 0.5, 0.5, 1.0, 0.01).unwrap();

        assert!((l_minus - 0.7).abs() < 1e-9);
        assert!((l_plus - l_minus).abs() < 1e-12);
    }

    #[test]
    fn test_stationary_body_uses_absolute_velocity() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let u = [1.0, -1.0, -0.5, 0.5];
        let length = recirculation_length(&x, &u, 0.0, 0.5, 0.0, 0.01).unwrap();
        assert!((length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_descending_x_rejected() {
        let err = recirculation_length(&[2.0, 1.0], &[0.0, 0.0], 0.0, 0.5, 1.0, 0.0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_profiles() {
        let field = StructuredField::from_fn(
            vec![
                SampleAxis::from_slice(&[-1.0, 0.0, 1.0]).unwrap(),
                SampleAxis::from_slice(&[0.0, 1.0, 2.0, 3.0]).unwrap(),
            ],
            |c| c[1] + 10.0 * c[0],
        )
        .unwrap();

        let line = horizontal_profile(&field, 0.0, BoundaryPolicy::Error).unwrap();
        assert_eq!(line.values(), &[0.0, 1.0, 2.0, 3.0]);

        let section = velocity_profile(&field, 1.5, BoundaryPolicy::Error).unwrap();
        assert_eq!(section.axis().values(), &[-1.0, 0.0, 1.0]);
        assert_eq!(section.values(), &[-8.5, 1.5, 11.5]);
    }
}
