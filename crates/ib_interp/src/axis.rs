// crates/ib_interp/src/axis.rs

//! 一维坐标轴线性插值
//!
//! 在单调坐标轴（升序或降序）上对采样值做分段线性插值。
//! 查询点超出坐标范围时按 [`BoundaryPolicy`] 处理，默认使用
//! 边界区间的斜率线性外推。
//!
//! # 示例
//!
//! ```
//! use ib_interp::axis::interpolate;
//!
//! let a = [0.0, 1.0, 2.0];
//! let v = [10.0, 20.0, 30.0];
//! assert_eq!(interpolate(&a, &v, 0.5).unwrap(), 15.0);
//! assert_eq!(interpolate(&a, &v, 2.5).unwrap(), 35.0); // 外推
//! ```

use ib_foundation::error::{IbError, IbResult};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// 远距离外推阈值（以区间宽度计）
pub const FAR_EXTRAPOLATION: f64 = 1.0;

/// 越界查询处理策略
///
/// 定义查询坐标落在 `[min(axis), max(axis)]` 之外时的行为。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// 线性外推：沿用最近边界区间的斜率
    ///
    /// 常用于在物理边界外几个网格处取样。
    #[default]
    Extrapolate,

    /// 截断：返回边界值
    Clamp,

    /// 报错：返回 `OutOfRange`
    Error,
}

impl BoundaryPolicy {
    /// 获取策略名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Extrapolate => "extrapolate",
            Self::Clamp => "clamp",
            Self::Error => "error",
        }
    }
}

impl std::str::FromStr for BoundaryPolicy {
    type Err = IbError;

    fn from_str(s: &str) -> IbResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "extrapolate" | "linear" => Ok(Self::Extrapolate),
            "clamp" => Ok(Self::Clamp),
            "error" | "strict" => Ok(Self::Error),
            other => Err(IbError::invalid_input(format!(
                "未知的边界策略 '{other}' (可选: extrapolate, clamp, error)"
            ))),
        }
    }
}

/// 定位结果：查询点所在（或最近）的区间
///
/// `lo`/`hi` 为原始数组中的索引，并保证 `axis[lo] < axis[hi]`，
/// 因此升序和降序坐标轴得到完全相同的计算结果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// 坐标较小端点的索引
    pub lo: usize,
    /// 坐标较大端点的索引
    pub hi: usize,
    /// 区间内相对位置，外推时落在 [0, 1] 之外
    pub t: f64,
}

impl Bracket {
    /// 是否为外推
    #[inline]
    pub fn is_extrapolated(&self) -> bool {
        self.t < 0.0 || self.t > 1.0
    }

    /// 超出区间的距离（以区间宽度计）
    #[inline]
    pub fn overshoot(&self) -> f64 {
        if self.t < 0.0 {
            -self.t
        } else if self.t > 1.0 {
            self.t - 1.0
        } else {
            0.0
        }
    }

    /// 是否为远距离外推（超出一个区间宽度以上）
    #[inline]
    pub fn is_far_extrapolation(&self) -> bool {
        self.overshoot() > FAR_EXTRAPOLATION
    }

    /// 按权重混合两个端点值
    ///
    /// 查询点恰好落在采样点上时原样返回该采样值。
    #[inline]
    pub fn blend(&self, v_lo: f64, v_hi: f64) -> f64 {
        if self.t == 0.0 {
            v_lo
        } else if self.t == 1.0 {
            v_hi
        } else {
            v_lo + self.t * (v_hi - v_lo)
        }
    }

    /// 对与坐标轴对齐的数组求值
    #[inline]
    pub fn apply(&self, values: &[f64]) -> f64 {
        self.blend(values[self.lo], values[self.hi])
    }
}

/// 采样坐标轴
///
/// # 约束
///
/// - 至少 2 个点，全部为有限值
/// - 严格单调（升序或降序）
/// - 相邻点不重合（零宽度区间无定义）
#[derive(Debug, Clone, PartialEq)]
pub struct SampleAxis {
    values: Vec<f64>,
    ascending: bool,
}

impl SampleAxis {
    /// 从坐标数组创建坐标轴
    ///
    /// # 错误
    ///
    /// - 点数少于 2、含非有限值或非单调：`InvalidInput`
    /// - 相邻点重合：`DegenerateInterval`
    pub fn new(values: Vec<f64>) -> IbResult<Self> {
        let n = values.len();
        if n < 2 {
            return Err(IbError::invalid_input(format!(
                "坐标轴至少需要 2 个点, 实际 {n} 个"
            )));
        }

        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(IbError::invalid_input(format!(
                "坐标轴第 {i} 个值非有限: {}",
                values[i]
            )));
        }

        if let Some(i) = values.windows(2).position(|w| w[0] == w[1]) {
            return Err(IbError::degenerate_interval(i, values[i]));
        }

        let ascending = values[1] > values[0];
        let monotonic = values
            .windows(2)
            .all(|w| if ascending { w[1] > w[0] } else { w[1] < w[0] });
        if !monotonic {
            return Err(IbError::invalid_input("坐标轴必须严格单调"));
        }

        Ok(Self { values, ascending })
    }

    /// 从切片创建（复制数据）
    pub fn from_slice(values: &[f64]) -> IbResult<Self> {
        Self::new(values.to_vec())
    }

    /// 均匀坐标轴，`n` 个点覆盖 `[start, end]`
    pub fn uniform(start: f64, end: f64, n: usize) -> IbResult<Self> {
        if n < 2 {
            return Err(IbError::invalid_input(format!(
                "坐标轴至少需要 2 个点, 实际 {n} 个"
            )));
        }
        let step = (end - start) / (n - 1) as f64;
        let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
        values[n - 1] = end;
        Self::new(values)
    }

    /// 点数
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空（构造后恒为 false）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 坐标数组
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 是否升序
    #[inline]
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// 坐标范围 `(min, max)`
    pub fn bounds(&self) -> (f64, f64) {
        let first = self.values[0];
        let last = self.values[self.values.len() - 1];
        if self.ascending {
            (first, last)
        } else {
            (last, first)
        }
    }

    /// 查询点是否在坐标范围内（含端点）
    pub fn contains(&self, query: f64) -> bool {
        let (min, max) = self.bounds();
        query >= min && query <= max
    }

    /// 定位查询点所在区间
    ///
    /// 范围外的查询落在最近的边界区间上，`t` 超出 [0, 1]。
    pub fn bracket(&self, query: f64) -> Bracket {
        let n = self.values.len();
        let count = if self.ascending {
            self.values.partition_point(|&a| a <= query)
        } else {
            self.values.partition_point(|&a| a >= query)
        };
        let seg = count.saturating_sub(1).min(n - 2);
        let (lo, hi) = if self.ascending {
            (seg, seg + 1)
        } else {
            (seg + 1, seg)
        };

        let (a_lo, a_hi) = (self.values[lo], self.values[hi]);
        Bracket {
            lo,
            hi,
            t: (query - a_lo) / (a_hi - a_lo),
        }
    }

    /// 按边界策略定位查询点
    ///
    /// 超出坐标范围一个区间宽度以上的外推记一条 `warn!`。
    /// 批量查询应使用 [`SampleAxis::locate_quiet`] 并自行汇总。
    pub fn locate(&self, query: f64, policy: BoundaryPolicy) -> IbResult<Bracket> {
        let bracket = self.locate_quiet(query, policy)?;
        if bracket.is_far_extrapolation() {
            let (min, max) = self.bounds();
            warn!(
                "查询点 {} 超出坐标范围 [{}, {}] 达 {:.2} 个区间宽度，外推精度未经验证",
                query,
                min,
                max,
                bracket.overshoot()
            );
        }
        Ok(bracket)
    }

    /// 按边界策略定位查询点，外推只记 trace 日志
    pub fn locate_quiet(&self, query: f64, policy: BoundaryPolicy) -> IbResult<Bracket> {
        if !query.is_finite() {
            return Err(IbError::invalid_input(format!("查询坐标非有限: {query}")));
        }

        let mut bracket = self.bracket(query);
        if bracket.is_extrapolated() {
            match policy {
                BoundaryPolicy::Extrapolate => {
                    trace!("extrapolating at {} (overshoot {:.3})", query, bracket.overshoot())
                }
                BoundaryPolicy::Clamp => bracket.t = bracket.t.clamp(0.0, 1.0),
                BoundaryPolicy::Error => {
                    let (min, max) = self.bounds();
                    return Err(IbError::out_of_range("query", query, min, max));
                }
            }
        }
        Ok(bracket)
    }
}

/// 一维场切片：与坐标轴一一对应的物理量
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSlice {
    axis: SampleAxis,
    values: Vec<f64>,
}

impl FieldSlice {
    /// 创建切片
    pub fn new(axis: SampleAxis, values: Vec<f64>) -> IbResult<Self> {
        IbError::check_size("slice values", axis.len(), values.len())?;
        Ok(Self { axis, values })
    }

    /// 坐标轴
    pub fn axis(&self) -> &SampleAxis {
        &self.axis
    }

    /// 物理量数组
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 拆分为 `(坐标, 值)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.axis.values, self.values)
    }

    /// 在查询点插值
    pub fn interpolate(&self, query: f64, policy: BoundaryPolicy) -> IbResult<f64> {
        Ok(self.axis.locate(query, policy)?.apply(&self.values))
    }
}

/// 一维线性插值器
///
/// 预先校验坐标轴，可重复用于多组与之对齐的值数组。
#[derive(Debug, Clone)]
pub struct AxisInterpolator {
    axis: SampleAxis,
    policy: BoundaryPolicy,
}

impl AxisInterpolator {
    /// 创建插值器（默认线性外推）
    pub fn new(axis: SampleAxis) -> Self {
        Self {
            axis,
            policy: BoundaryPolicy::default(),
        }
    }

    /// 设置边界策略
    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 坐标轴
    #[inline]
    pub fn axis(&self) -> &SampleAxis {
        &self.axis
    }

    /// 边界策略
    #[inline]
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// 定位查询点
    #[inline]
    pub fn locate(&self, query: f64) -> IbResult<Bracket> {
        self.axis.locate(query, self.policy)
    }

    /// 在查询点插值
    ///
    /// `values` 必须与坐标轴等长且顺序一致。
    pub fn interpolate(&self, values: &[f64], query: f64) -> IbResult<f64> {
        IbError::check_size("values", self.axis.len(), values.len())?;
        Ok(self.locate(query)?.apply(values))
    }

    /// 批量查询
    ///
    /// 远距离外推只汇总记一条 `warn!`。
    pub fn interpolate_many(&self, values: &[f64], queries: &[f64]) -> IbResult<Vec<f64>> {
        IbError::check_size("values", self.axis.len(), values.len())?;
        let mut far = 0;
        let out = queries
            .iter()
            .map(|&q| {
                let bracket = self.axis.locate_quiet(q, self.policy)?;
                far += usize::from(bracket.is_far_extrapolation());
                Ok(bracket.apply(values))
            })
            .collect::<IbResult<Vec<f64>>>()?;
        if far > 0 {
            warn!("{} / {} 个查询点远距离外推", far, queries.len());
        }
        Ok(out)
    }
}

/// 在单调坐标轴上线性插值（越界时线性外推）
///
/// # 错误
///
/// - `axis` 少于 2 个点或 `values` 长度不一致：输入无效
/// - 相邻坐标重合：`DegenerateInterval`
/// - 坐标轴非单调：`InvalidInput`
pub fn interpolate(axis: &[f64], values: &[f64], query: f64) -> IbResult<f64> {
    if axis.len() < 2 {
        return Err(IbError::invalid_input(format!(
            "坐标轴至少需要 2 个点, 实际 {} 个",
            axis.len()
        )));
    }
    IbError::check_size("values", axis.len(), values.len())?;
    AxisInterpolator::new(SampleAxis::from_slice(axis)?).interpolate(values, query)
}
