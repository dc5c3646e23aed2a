// crates/ib_config/src/case_config.rs

//! CaseConfig - 后处理算例配置
//!
//! 描述一个浸入边界算例的流体参考量、物体几何、运动与取样参数。
//! `.yaml` / `.yml` 按 YAML 读写，其他扩展名按 JSON。
//!
//! ```yaml
//! fluid:
//!   density: 1.0
//!   velocity: 1.0
//!   length: 1.0
//! body:
//!   shape: circle
//!   center: [0.0, 0.0]
//!   radius: 0.5
//! motion:
//!   type: stationary
//! sampling:
//!   grid_spacing: 0.0166667
//!   offset_cells: 3
//! averaging: [50.0, 100.0]
//! monitors:
//!   fields: [p]
//!   half_width: 0.75
//! ```

use std::path::Path;

use ib_body::{circle, circle_count_for_spacing, sphere, MarkerSet, Motion};
use ib_interp::BoundaryPolicy;
use ib_post::ReferenceScales;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::monitor::{MonitorBox, ProbesFile, VolumeMonitor};

/// 算例配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// 流体参考量
    #[serde(default)]
    pub fluid: FluidConfig,

    /// 物体几何
    pub body: BodyConfig,

    /// 物体运动
    #[serde(default)]
    pub motion: Motion,

    /// 取样参数
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// 时间平均窗口 `[start, end]`
    #[serde(default)]
    pub averaging: Option<(f64, f64)>,

    /// 求解器体积监测区
    #[serde(default)]
    pub monitors: MonitorSettings,
}

/// 体积监测区设置
///
/// 每个场生成一个以物体中心为中心的监测区。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// 监测的场
    #[serde(default = "default_monitor_fields")]
    pub fields: Vec<String>,
    /// 累计步数
    #[serde(default = "default_n_sum")]
    pub n_sum: usize,
    /// 区域半宽
    #[serde(default = "default_half_width")]
    pub half_width: f64,
}

fn default_monitor_fields() -> Vec<String> {
    vec!["p".to_string()]
}
fn default_n_sum() -> usize {
    1000
}
fn default_half_width() -> f64 {
    0.75
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            fields: default_monitor_fields(),
            n_sum: default_n_sum(),
            half_width: default_half_width(),
        }
    }
}

/// 流体参考量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidConfig {
    /// 密度 ρ
    #[serde(default = "default_one")]
    pub density: f64,
    /// 参考速度 U
    #[serde(default = "default_one")]
    pub velocity: f64,
    /// 参考长度 L（通常为直径）
    #[serde(default = "default_one")]
    pub length: f64,
    /// 远场压力 p∞
    #[serde(default)]
    pub far_pressure: f64,
}

fn default_one() -> f64 {
    1.0
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            density: default_one(),
            velocity: default_one(),
            length: default_one(),
            far_pressure: 0.0,
        }
    }
}

impl FluidConfig {
    /// 无量纲化参考量
    pub fn scales(&self) -> ReferenceScales {
        ReferenceScales {
            density: self.density,
            velocity: self.velocity,
            length: self.length,
        }
    }
}

/// 物体形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyShape {
    /// 二维圆柱
    #[default]
    Circle,
    /// 三维球
    Sphere,
}

/// 物体几何
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// 形状
    #[serde(default)]
    pub shape: BodyShape,
    /// 中心，圆柱可只给两个分量
    pub center: Vec<f64>,
    /// 半径
    pub radius: f64,
    /// 标记点数（仅圆柱，优先于 `spacing`）
    #[serde(default)]
    pub markers: Option<usize>,
    /// 标记点间距，缺省时取 `sampling.grid_spacing`
    #[serde(default)]
    pub spacing: Option<f64>,
}

impl BodyConfig {
    /// 中心坐标，缺失分量补 0
    pub fn center3(&self) -> [f64; 3] {
        let mut c = [0.0; 3];
        for (dst, src) in c.iter_mut().zip(&self.center) {
            *dst = *src;
        }
        c
    }

    /// 物体直径
    #[inline]
    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    /// 物体体积（圆柱为截面积）
    pub fn volume(&self) -> f64 {
        match self.shape {
            BodyShape::Circle => std::f64::consts::PI * self.radius * self.radius,
            BodyShape::Sphere => 4.0 / 3.0 * std::f64::consts::PI * self.radius.powi(3),
        }
    }
}

/// 取样参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// 均匀区网格间距
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f64,
    /// 取样面在物体外侧的网格数
    #[serde(default = "default_offset_cells")]
    pub offset_cells: f64,
    /// 越界查询策略
    #[serde(default)]
    pub boundary_policy: BoundaryPolicy,
}

fn default_grid_spacing() -> f64 {
    1.5 / 90.0
}
fn default_offset_cells() -> f64 {
    3.0
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            grid_spacing: default_grid_spacing(),
            offset_cells: default_offset_cells(),
            boundary_policy: BoundaryPolicy::default(),
        }
    }
}

impl CaseConfig {
    /// 单位圆柱算例
    pub fn cylinder(radius: f64) -> Self {
        Self {
            fluid: FluidConfig {
                length: 2.0 * radius,
                ..Default::default()
            },
            body: BodyConfig {
                shape: BodyShape::Circle,
                center: vec![0.0, 0.0],
                radius,
                markers: None,
                spacing: None,
            },
            motion: Motion::default(),
            sampling: SamplingConfig::default(),
            averaging: None,
            monitors: MonitorSettings::default(),
        }
    }

    /// 从文件加载并校验（按扩展名区分 YAML / JSON）
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::read(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// 只解析不校验
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            Self::from_json(&content)?
        };
        debug!("read case config from {}", path.display());
        Ok(config)
    }

    /// 保存到文件（按扩展名区分 YAML / JSON）
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            self.to_json()?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 从JSON字符串解析
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 转换为JSON字符串
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, v) in [
            ("fluid.density", self.fluid.density),
            ("fluid.velocity", self.fluid.velocity),
            ("fluid.length", self.fluid.length),
            ("body.radius", self.body.radius),
            ("sampling.grid_spacing", self.sampling.grid_spacing),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(ConfigError::invalid(key, v, "必须为正"));
            }
        }

        if !(self.sampling.offset_cells.is_finite() && self.sampling.offset_cells >= 0.0) {
            return Err(ConfigError::invalid(
                "sampling.offset_cells",
                self.sampling.offset_cells,
                "不能为负",
            ));
        }

        let expected_dim = match self.body.shape {
            BodyShape::Circle => 2..=3,
            BodyShape::Sphere => 3..=3,
        };
        if !expected_dim.contains(&self.body.center.len()) {
            return Err(ConfigError::invalid(
                "body.center",
                format!("{:?}", self.body.center),
                "圆柱中心需要 2 个分量，球心需要 3 个分量",
            ));
        }

        if let Some(n) = self.body.markers {
            if self.body.shape == BodyShape::Sphere {
                return Err(ConfigError::invalid("body.markers", n, "球面只能通过 spacing 指定"));
            }
            if n < 4 || n % 2 != 0 {
                return Err(ConfigError::invalid("body.markers", n, "必须为不小于 4 的偶数"));
            }
        }
        if let Some(ds) = self.body.spacing {
            if !(ds.is_finite() && ds > 0.0) {
                return Err(ConfigError::invalid("body.spacing", ds, "必须为正"));
            }
        }

        if let Motion::Oscillating {
            amplitude,
            frequency,
            ..
        } = self.motion
        {
            if !(amplitude >= 0.0 && frequency > 0.0) {
                return Err(ConfigError::invalid(
                    "motion",
                    format!("A={amplitude}, f={frequency}"),
                    "振幅不能为负且频率必须为正",
                ));
            }
        }

        if let Some((start, end)) = self.averaging {
            if start.is_nan() || end.is_nan() || start > end {
                return Err(ConfigError::invalid(
                    "averaging",
                    format!("[{start}, {end}]"),
                    "起点不能大于终点",
                ));
            }
        }

        if self.monitors.fields.is_empty() {
            return Err(ConfigError::invalid("monitors.fields", "[]", "至少需要一个场"));
        }
        if !(self.monitors.half_width.is_finite() && self.monitors.half_width > 0.0) {
            return Err(ConfigError::invalid(
                "monitors.half_width",
                self.monitors.half_width,
                "必须为正",
            ));
        }

        Ok(())
    }

    /// 物体标记点间距
    pub fn marker_spacing(&self) -> f64 {
        self.body.spacing.unwrap_or(self.sampling.grid_spacing)
    }

    /// 圆柱标记点数
    pub fn marker_count(&self) -> Result<usize, ConfigError> {
        match self.body.markers {
            Some(n) => Ok(n),
            None => circle_count_for_spacing(self.body.radius, self.marker_spacing())
                .map_err(|e| ConfigError::invalid("body", self.body.radius, &e.to_string())),
        }
    }

    /// 生成物体标记点
    pub fn build_markers(&self) -> Result<MarkerSet, ConfigError> {
        let c = self.body.center3();
        let markers = match self.body.shape {
            BodyShape::Circle => circle((c[0], c[1]), self.body.radius, self.marker_count()?),
            BodyShape::Sphere => sphere((c[0], c[1], c[2]), self.body.radius, self.marker_spacing()),
        };
        markers.map_err(|e| ConfigError::invalid("body", self.body.radius, &e.to_string()))
    }

    /// 取样面半径
    pub fn sampling_radius(&self) -> f64 {
        self.body.radius + self.sampling.offset_cells * self.sampling.grid_spacing
    }

    /// 求解器体积监测区文件，区域以物体初始中心为中心
    pub fn monitor_file(&self) -> Result<ProbesFile, ConfigError> {
        let dim = match self.body.shape {
            BodyShape::Circle => 2,
            BodyShape::Sphere => 3,
        };
        let region = MonitorBox::around(self.body.center3(), self.monitors.half_width, dim);
        let file = ProbesFile {
            probes: self
                .monitors
                .fields
                .iter()
                .map(|f| VolumeMonitor::volume(f, region, self.monitors.n_sum))
                .collect(),
        };
        file.validate()?;
        Ok(file)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cylinder() {
        let config = CaseConfig::cylinder(0.5);
        assert!(config.validate().is_ok());
        assert_eq!(config.marker_count().unwrap(), 190);
        assert_eq!(config.build_markers().unwrap().len(), 190);
        assert!((config.sampling_radius() - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = CaseConfig::cylinder(0.5);
        config.fluid.density = -1.0;
        assert!(config.validate().is_err());

        let mut config = CaseConfig::cylinder(0.5);
        config.body.markers = Some(7);
        assert!(config.validate().is_err());

        let mut config = CaseConfig::cylinder(0.5);
        config.body.shape = BodyShape::Sphere;
        assert!(config.validate().is_err());

        let mut config = CaseConfig::cylinder(0.5);
        config.averaging = Some((10.0, 5.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_with_defaults() {
        let yaml = r#"
body:
  shape: sphere
  center: [0.0, 0.0, 0.0]
  radius: 0.5
  spacing: 0.1
motion:
  type: oscillating
  amplitude: 0.125
  frequency: 1.2732
sampling:
  boundary_policy: clamp
"#;
        let config: CaseConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.fluid.density, 1.0);
        assert_eq!(config.sampling.boundary_policy, BoundaryPolicy::Clamp);
        assert_eq!(config.build_markers().unwrap().dim(), 3);
        assert!(matches!(config.motion, Motion::Oscillating { .. }));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CaseConfig::cylinder(0.5);
        config.averaging = Some((50.0, 100.0));
        config.motion = Motion::Translating {
            u0: -1.0,
            v0: 0.0,
            w0: 0.0,
        };

        for name in ["case.yaml", "case.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            let loaded = CaseConfig::load(&path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_monitor_file_from_case() {
        let config = CaseConfig::cylinder(0.5);
        let file = config.monitor_file().unwrap();
        assert_eq!(file.probes.len(), 1);
        let m = &file.probes[0];
        assert_eq!(m.name, "probe-p");
        assert_eq!(m.n_sum, 1000);
        assert_eq!(m.region.x, [-0.75, 0.75]);
        assert_eq!(m.region.y, [-0.75, 0.75]);
        assert_eq!(m.region.z, None);

        let yaml = r#"
body:
  shape: sphere
  center: [1.0, 0.0, 0.0]
  radius: 0.5
  spacing: 0.1
monitors:
  fields: [p, u]
  half_width: 1.0
"#;
        let config: CaseConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        let file = config.monitor_file().unwrap();
        assert_eq!(file.probes.len(), 2);
        assert_eq!(file.probes[1].field, "u");
        assert_eq!(file.probes[1].region.x, [0.0, 2.0]);
        assert_eq!(file.probes[1].region.z, Some([-1.0, 1.0]));
    }

    #[test]
    fn test_invalid_monitor_settings() {
        let mut config = CaseConfig::cylinder(0.5);
        config.monitors.fields.clear();
        assert!(config.validate().is_err());

        let mut config = CaseConfig::cylinder(0.5);
        config.monitors.half_width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            CaseConfig::from_json("{ body: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
