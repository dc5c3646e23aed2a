// crates/ib_post/src/convergence.rs

//! 网格/时间步收敛性
//!
//! 以最细的解为参考，计算其余解的 L2 与 L∞ 误差。空间收敛时
//! 各解网格不同，先全部重采样到最粗网格（第一个解的坐标轴）上再比较。

use ib_foundation::error::{IbError, IbResult};
use ib_interp::{BoundaryPolicy, StructuredField};
use serde::{Deserialize, Serialize};
use tracing::info;

/// 误差范数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorNorms {
    /// `sqrt(Σ (u - ref)²)`
    pub l2: f64,
    /// `max |u - ref|`
    pub linf: f64,
}

/// 两组等长数据之间的误差
pub fn error_norms(solution: &[f64], reference: &[f64]) -> IbResult<ErrorNorms> {
    IbError::check_size("reference", solution.len(), reference.len())?;
    let (sum_sq, linf) = solution
        .iter()
        .zip(reference)
        .map(|(a, b)| (a - b).abs())
        .fold((0.0, 0.0_f64), |(s, m), d| (s + d * d, m.max(d)));
    Ok(ErrorNorms {
        l2: sum_sq.sqrt(),
        linf,
    })
}

/// 一组解相对于参考解的误差
///
/// `solutions` 按网格由粗到细排列；所有解与参考解都重采样到
/// `solutions[0]` 的网格上。返回值与 `solutions` 一一对应。
pub fn convergence_errors(
    solutions: &[StructuredField],
    reference: &StructuredField,
    policy: BoundaryPolicy,
) -> IbResult<Vec<ErrorNorms>> {
    let coarsest = solutions
        .first()
        .ok_or_else(|| IbError::invalid_input("收敛性分析至少需要一个解"))?;
    let grid = coarsest.axes();

    let reference = reference.resample(grid, policy)?;
    let errors = solutions
        .iter()
        .map(|s| {
            let resampled = s.resample(grid, policy)?;
            error_norms(resampled.values(), reference.values())
        })
        .collect::<IbResult<Vec<_>>>()?;

    info!("convergence errors on {:?} grid: {:?}", coarsest.shape(), errors);
    Ok(errors)
}

/// 观测收敛阶 `ln(e_coarse / e_fine) / ln(ratio)`
pub fn observed_order(e_coarse: f64, e_fine: f64, ratio: f64) -> IbResult<f64> {
    if !(e_coarse > 0.0 && e_fine > 0.0) {
        return Err(IbError::invalid_input(format!(
            "误差必须为正: e_coarse={e_coarse}, e_fine={e_fine}"
        )));
    }
    if ratio.is_nan() || ratio <= 1.0 {
        return Err(IbError::invalid_input(format!("加密比必须大于 1, 实际 {ratio}")));
    }
    Ok((e_coarse / e_fine).ln() / ratio.ln())
}
