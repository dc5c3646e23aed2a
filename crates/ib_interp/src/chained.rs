// crates/ib_interp/src/chained.rs

//! 逐轴链式采样
//!
//! 多维结构化场上的点采样：先沿最内层坐标轴插值消去该维，
//! 得到的低维场再沿下一层坐标轴插值，直到只剩一个数。
//! 二维时等价于双线性插值，三维时为三级链式插值。
//!
//! # 示例
//!
//! ```
//! use ib_interp::chained::sample_point;
//!
//! // 外层 y = [0, 1]，内层 x = [0, 1]
//! let field = [0.0, 1.0, 2.0, 3.0];
//! let v = sample_point(&field, &[0.0, 1.0], &[0.0, 1.0], (0.5, 0.5)).unwrap();
//! assert_eq!(v, 1.5);
//! ```

use ib_foundation::error::{IbError, IbResult};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::axis::{BoundaryPolicy, Bracket, SampleAxis};
use crate::field::{remap_axis, StructuredField};

/// 批量采样的并行阈值
pub const PARALLEL_THRESHOLD: usize = 2000;

/// 链式采样器
///
/// 借用场数据，只读，可在多线程间共享。
#[derive(Debug, Clone, Copy)]
pub struct ChainedSampler<'a> {
    field: &'a StructuredField,
    policy: BoundaryPolicy,
}

impl<'a> ChainedSampler<'a> {
    /// 创建采样器（默认线性外推）
    pub fn new(field: &'a StructuredField) -> Self {
        debug!("chained sampler over field of shape {:?}", field.shape());
        Self {
            field,
            policy: BoundaryPolicy::default(),
        }
    }

    /// 设置边界策略
    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 被采样的场
    #[inline]
    pub fn field(&self) -> &'a StructuredField {
        self.field
    }

    /// 边界策略
    #[inline]
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// 在一个点上采样
    ///
    /// `point` 的分量顺序与坐标轴顺序一致（外层在前）。
    pub fn sample(&self, point: &[f64]) -> IbResult<f64> {
        let (value, far) = self.sample_quiet(point)?;
        if far {
            warn!("采样点 {:?} 远距离外推，精度未经验证", point);
        }
        Ok(value)
    }

    /// 采样并返回是否有坐标轴远距离外推
    fn sample_quiet(&self, point: &[f64]) -> IbResult<(f64, bool)> {
        let axes = self.field.axes();
        IbError::check_size("point dimensions", axes.len(), point.len())?;

        let brackets = axes
            .iter()
            .zip(point)
            .map(|(axis, &q)| axis.locate_quiet(q, self.policy))
            .collect::<IbResult<Vec<Bracket>>>()?;
        let far = brackets.iter().any(Bracket::is_far_extrapolation);

        let value = reduce_innermost_first(self.field.values(), &self.field.shape(), &brackets);
        Ok((value, far))
    }

    /// 批量采样，附带远距离外推点数
    ///
    /// 点数达到 [`PARALLEL_THRESHOLD`] 时使用 rayon 并行。
    pub fn sample_batch<P>(&self, points: &[P]) -> IbResult<BatchSamples>
    where
        P: AsRef<[f64]> + Sync,
    {
        let results: Vec<(f64, bool)> = if points.len() >= PARALLEL_THRESHOLD {
            points
                .par_iter()
                .map(|p| self.sample_quiet(p.as_ref()))
                .collect::<IbResult<_>>()?
        } else {
            points
                .iter()
                .map(|p| self.sample_quiet(p.as_ref()))
                .collect::<IbResult<_>>()?
        };

        let far_extrapolated = results.iter().filter(|(_, far)| *far).count();
        let values = results.into_iter().map(|(v, _)| v).collect();
        Ok(BatchSamples {
            values,
            far_extrapolated,
        })
    }

    /// 批量采样，结果顺序与输入一致
    ///
    /// 远距离外推的点只汇总记一条 `warn!`。
    pub fn sample_points<P>(&self, points: &[P]) -> IbResult<Vec<f64>>
    where
        P: AsRef<[f64]> + Sync,
    {
        let batch = self.sample_batch(points)?;
        if batch.far_extrapolated > 0 {
            warn!(
                "{} / {} 个采样点超出场范围一个网格以上，外推精度未经验证",
                batch.far_extrapolated,
                points.len()
            );
        }
        Ok(batch.values)
    }
}

/// 批量采样结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchSamples {
    /// 采样值，顺序与输入一致
    pub values: Vec<f64>,
    /// 至少一个坐标超出场范围一个区间宽度以上的点数
    pub far_extrapolated: usize,
}

/// 从最后一维开始逐级消去
fn reduce_innermost_first(values: &[f64], shape: &[usize], brackets: &[Bracket]) -> f64 {
    let ndim = shape.len();
    let mut current = remap_axis(values, shape, ndim - 1, &brackets[ndim - 1..]);
    for k in (0..ndim - 1).rev() {
        current = remap_axis(&current, &shape[..=k], k, &brackets[k..=k]);
    }
    current[0]
}

/// 二维场点采样
///
/// `field` 按行主序存储，第 `i` 行对应 `outer[i]`，长度为
/// `outer.len() * inner.len()`。先对每一行沿内层坐标插值，
/// 再对得到的列沿外层坐标插值；越界时线性外推。
pub fn sample_point(field: &[f64], outer: &[f64], inner: &[f64], point: (f64, f64)) -> IbResult<f64> {
    let outer = SampleAxis::from_slice(outer)?;
    let inner = SampleAxis::from_slice(inner)?;
    IbError::check_size("field", outer.len() * inner.len(), field.len())?;

    let (outer_query, inner_query) = point;
    let bi = inner.locate(inner_query, BoundaryPolicy::Extrapolate)?;
    let column: Vec<f64> = field.chunks_exact(inner.len()).map(|row| bi.apply(row)).collect();
    let bo = outer.locate(outer_query, BoundaryPolicy::Extrapolate)?;
    Ok(bo.apply(&column))
}
