// crates/ib_interp/src/field.rs

//! 结构化场
//!
//! 张量积网格上的标量场（1~3 维），按行主序存储：第一个坐标轴变化最慢。
//! 求解器输出的二维场形状为 `(ny, nx)`，对应 `axes = [y, x]`。

use ib_foundation::error::{IbError, IbResult};
use ib_foundation::{ensure, require};
use tracing::{debug, warn};

use crate::axis::{BoundaryPolicy, Bracket, FieldSlice, SampleAxis};

/// 支持的最大维数
pub const MAX_DIMS: usize = 3;

/// 结构化网格上的标量场
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredField {
    axes: Vec<SampleAxis>,
    values: Vec<f64>,
}

impl StructuredField {
    /// 创建场
    ///
    /// `values.len()` 必须等于各坐标轴点数之积。
    pub fn new(axes: Vec<SampleAxis>, values: Vec<f64>) -> IbResult<Self> {
        ensure!(
            !axes.is_empty() && axes.len() <= MAX_DIMS,
            IbError::invalid_input(format!(
                "场维数必须在 1..={MAX_DIMS} 之间, 实际 {}",
                axes.len()
            ))
        );
        let expected: usize = axes.iter().map(SampleAxis::len).product();
        IbError::check_size("field values", expected, values.len())?;
        Ok(Self { axes, values })
    }

    /// 由二维数组逐行创建：`rows[i]` 对应外层坐标 `outer[i]`
    pub fn from_rows(outer: SampleAxis, inner: SampleAxis, rows: &[Vec<f64>]) -> IbResult<Self> {
        IbError::check_size("field rows", outer.len(), rows.len())?;
        let mut values = Vec::with_capacity(outer.len() * inner.len());
        for row in rows {
            IbError::check_size("field row", inner.len(), row.len())?;
            values.extend_from_slice(row);
        }
        Self::new(vec![outer, inner], values)
    }

    /// 常数场
    pub fn constant(axes: Vec<SampleAxis>, value: f64) -> IbResult<Self> {
        let n: usize = axes.iter().map(SampleAxis::len).product();
        Self::new(axes, vec![value; n])
    }

    /// 由坐标函数生成场
    pub fn from_fn<F>(axes: Vec<SampleAxis>, f: F) -> IbResult<Self>
    where
        F: Fn(&[f64]) -> f64,
    {
        let shape: Vec<usize> = axes.iter().map(SampleAxis::len).collect();
        let n: usize = shape.iter().product();
        let mut values = Vec::with_capacity(n);
        let mut coords = vec![0.0; axes.len()];
        for flat in 0..n {
            let mut rem = flat;
            for k in (0..axes.len()).rev() {
                coords[k] = axes[k].values()[rem % shape[k]];
                rem /= shape[k];
            }
            values.push(f(&coords));
        }
        Self::new(axes, values)
    }

    /// 维数
    #[inline]
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// 各维点数
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(SampleAxis::len).collect()
    }

    /// 总点数
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 全部坐标轴
    #[inline]
    pub fn axes(&self) -> &[SampleAxis] {
        &self.axes
    }

    /// 第 `k` 个坐标轴
    #[inline]
    pub fn axis(&self, k: usize) -> Option<&SampleAxis> {
        self.axes.get(k)
    }

    /// 行主序数据
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 按多维索引取值
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.ndim() {
            return None;
        }
        let mut flat = 0;
        for (k, (&i, axis)) in index.iter().zip(&self.axes).enumerate() {
            if i >= axis.len() {
                return None;
            }
            flat = if k == 0 { i } else { flat * axis.len() + i };
        }
        self.values.get(flat).copied()
    }

    /// 一维场转为切片
    pub fn into_slice(self) -> IbResult<FieldSlice> {
        if self.ndim() != 1 {
            return Err(IbError::invalid_input(format!(
                "只有一维场可以转为切片, 实际 {} 维",
                self.ndim()
            )));
        }
        let Self { mut axes, values } = self;
        FieldSlice::new(axes.remove(0), values)
    }

    /// 沿第 `k` 个坐标轴在 `query` 处插值，消去该维
    ///
    /// 例如二维速度场 `u(y, x)` 在 `y = yc` 处得到沿 x 的一维剖面。
    pub fn reduce_axis(&self, k: usize, query: f64, policy: BoundaryPolicy) -> IbResult<Self> {
        ensure!(
            self.ndim() >= 2,
            IbError::invalid_input("一维场无法再消去坐标轴，请直接插值")
        );
        let axis = require!(
            self.axes.get(k),
            IbError::invalid_input(format!("坐标轴索引 {k} 越界"))
        );
        let bracket = axis.locate(query, policy)?;
        let values = remap_axis(&self.values, &self.shape(), k, &[bracket]);

        let axes = self
            .axes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != k)
            .map(|(_, a)| a.clone())
            .collect();
        Self::new(axes, values)
    }

    /// 重采样到另一组坐标轴上（张量积线性插值）
    pub fn resample(&self, targets: &[SampleAxis], policy: BoundaryPolicy) -> IbResult<Self> {
        IbError::check_size("target axes", self.ndim(), targets.len())?;

        let mut shape = self.shape();
        let mut values = self.values.clone();
        let mut far = 0;
        for (k, target) in targets.iter().enumerate() {
            let brackets = target
                .values()
                .iter()
                .map(|&q| self.axes[k].locate_quiet(q, policy))
                .collect::<IbResult<Vec<Bracket>>>()?;
            far += brackets.iter().filter(|b| b.is_far_extrapolation()).count();
            values = remap_axis(&values, &shape, k, &brackets);
            shape[k] = target.len();
        }
        if far > 0 {
            warn!("重采样有 {} 个目标坐标远距离外推", far);
        }

        debug!(
            "resampled field {:?} -> {:?}",
            self.shape(),
            shape
        );
        Self::new(targets.to_vec(), values)
    }
}

/// 沿第 `k` 维把数据映射到一组定位结果上
///
/// 输出形状为把 `shape[k]` 替换成 `brackets.len()`。
pub(crate) fn remap_axis(values: &[f64], shape: &[usize], k: usize, brackets: &[Bracket]) -> Vec<f64> {
    let outer: usize = shape[..k].iter().product();
    let len_k = shape[k];
    let inner: usize = shape[k + 1..].iter().product();

    let mut out = Vec::with_capacity(outer * brackets.len() * inner);
    for o in 0..outer {
        let base = o * len_k * inner;
        for b in brackets {
            let lo = &values[base + b.lo * inner..base + (b.lo + 1) * inner];
            let hi = &values[base + b.hi * inner..base + (b.hi + 1) * inner];
            out.extend(lo.iter().zip(hi).map(|(&a, &c)| b.blend(a, c)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(v: &[f64]) -> SampleAxis {
        SampleAxis::from_slice(v).unwrap()
    }

    #[test]
    fn test_shape_and_get() {
        let field = StructuredField::new(
            vec![axis(&[0.0, 1.0]), axis(&[0.0, 1.0, 2.0])],
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap();
        assert_eq!(field.shape(), vec![2, 3]);
        assert_eq!(field.get(&[1, 2]), Some(5.0));
        assert_eq!(field.get(&[0, 1]), Some(1.0));
        assert_eq!(field.get(&[2, 0]), None);
    }

    #[test]
    fn test_size_mismatch() {
        let err = StructuredField::new(vec![axis(&[0.0, 1.0]), axis(&[0.0, 1.0])], vec![0.0; 3])
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_fn_layout() {
        let field = StructuredField::from_fn(
            vec![axis(&[0.0, 10.0]), axis(&[0.0, 1.0, 2.0])],
            |c| c[0] + c[1],
        )
        .unwrap();
        assert_eq!(field.values(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_reduce_axis_line() {
        // u(y, x) = x + 10 y，在 y = 0.5 处取沿 x 的剖面
        let field = StructuredField::from_fn(
            vec![axis(&[0.0, 1.0]), axis(&[0.0, 1.0, 2.0])],
            |c| c[1] + 10.0 * c[0],
        )
        .unwrap();
        let line = field
            .reduce_axis(0, 0.5, BoundaryPolicy::Extrapolate)
            .unwrap()
            .into_slice()
            .unwrap();
        assert_eq!(line.axis().values(), &[0.0, 1.0, 2.0]);
        assert_eq!(line.values(), &[5.0, 6.0, 7.0]);

        let column = field
            .reduce_axis(1, 1.5, BoundaryPolicy::Extrapolate)
            .unwrap()
            .into_slice()
            .unwrap();
        assert_eq!(column.values(), &[1.5, 11.5]);
    }

    #[test]
    fn test_resample_bilinear_exact() {
        let f = |c: &[f64]| 2.0 * c[0] - 3.0 * c[1] + 1.0;
        let field = StructuredField::from_fn(
            vec![axis(&[0.0, 0.5, 2.0]), axis(&[-1.0, 0.0, 1.0, 3.0])],
            f,
        )
        .unwrap();
        let targets = vec![
            SampleAxis::uniform(0.0, 2.0, 5).unwrap(),
            SampleAxis::uniform(-1.0, 3.0, 7).unwrap(),
        ];
        let resampled = field.resample(&targets, BoundaryPolicy::Error).unwrap();
        let exact = StructuredField::from_fn(targets, f).unwrap();
        for (a, b) in resampled.values().iter().zip(exact.values()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_into_slice_requires_1d() {
        let field = StructuredField::constant(vec![axis(&[0.0, 1.0]), axis(&[0.0, 1.0])], 1.0)
            .unwrap();
        assert!(field.into_slice().is_err());
    }
}
