// crates/ib_config/src/monitor.rs

//! 体积监测区配置
//!
//! 求解器在矩形（或长方体）区域内累计场量并按 `n_sum` 步输出到 HDF5。
//! 配置文件为 YAML，顶层键 `probes`：
//!
//! ```yaml
//! probes:
//! - name: probe-p
//!   type: VOLUME
//!   field: p
//!   viewer: hdf5
//!   path: solution/probe-p.h5
//!   n_sum: 1000
//!   box:
//!     x: [-0.75, 0.75]
//!     y: [-0.75, 0.75]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// 求解器监测区文件
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProbesFile {
    /// 监测区列表
    pub probes: Vec<VolumeMonitor>,
}

/// 监测区类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonitorKind {
    /// 体积监测
    #[default]
    #[serde(rename = "VOLUME")]
    Volume,
}

/// 单个体积监测区
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMonitor {
    /// 名称，同时决定输出文件名
    pub name: String,
    /// 类型
    #[serde(rename = "type")]
    pub kind: MonitorKind,
    /// 场名（p, u, v, w）
    pub field: String,
    /// 输出格式
    pub viewer: String,
    /// 输出路径（相对算例目录）
    pub path: String,
    /// 累计步数
    pub n_sum: usize,
    /// 监测区域
    #[serde(rename = "box")]
    pub region: MonitorBox,
}

/// 监测区域 `[lo, hi]`，二维算例没有 `z`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitorBox {
    /// x 范围
    pub x: [f64; 2],
    /// y 范围
    pub y: [f64; 2],
    /// z 范围
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<[f64; 2]>,
}

impl MonitorBox {
    /// 以 `center` 为中心、半宽 `half_width` 的正方形（`dim = 3` 时为立方体）
    pub fn around(center: [f64; 3], half_width: f64, dim: usize) -> Self {
        let span = |c: f64| [c - half_width, c + half_width];
        Self {
            x: span(center[0]),
            y: span(center[1]),
            z: (dim == 3).then(|| span(center[2])),
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let key = format!("{name}.box");
        for [lo, hi] in [Some(self.x), Some(self.y), self.z].into_iter().flatten() {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(ConfigError::invalid(&key, format!("[{lo}, {hi}]"), "需要有限且 lo < hi"));
            }
        }
        Ok(())
    }
}

impl VolumeMonitor {
    /// 按求解器约定命名的体积监测区：`probe-<field>`，输出到 `solution/`
    pub fn volume(field: &str, region: MonitorBox, n_sum: usize) -> Self {
        let name = format!("probe-{field}");
        Self {
            path: format!("solution/{name}.h5"),
            name,
            kind: MonitorKind::Volume,
            field: field.to_string(),
            viewer: "hdf5".to_string(),
            n_sum,
            region,
        }
    }

    /// 校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("name", &self.name),
            ("field", &self.field),
            ("viewer", &self.viewer),
            ("path", &self.path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(key, value, "不能为空"));
            }
        }
        if self.n_sum == 0 {
            return Err(ConfigError::invalid("n_sum", self.n_sum, "必须为正"));
        }
        self.region.validate(&self.name)
    }
}

impl ProbesFile {
    /// 校验所有监测区，名称不能重复
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, monitor) in self.probes.iter().enumerate() {
            monitor.validate()?;
            if self.probes[..i].iter().any(|m| m.name == monitor.name) {
                return Err(ConfigError::invalid("name", &monitor.name, "监测区名称重复"));
            }
        }
        Ok(())
    }

    /// 从 YAML 字符串解析
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 转换为 YAML 字符串
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// 加载并校验
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = Self::from_yaml(&std::fs::read_to_string(path)?)?;
        file.validate()?;
        Ok(file)
    }

    /// 校验后写出 YAML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        self.validate()?;
        std::fs::write(path, self.to_yaml()?)?;
        info!("wrote {} volume monitors to {}", self.probes.len(), path.display());
        Ok(())
    }
}
