// crates/ib_body/src/kinematics.rs

//! 物体的指定运动
//!
//! 浸入边界方法中物体运动由外部给定。这里覆盖算例中出现的三类：
//! 静止、匀速平移、沿 x 方向的正弦振荡。振荡幅值可由
//! Keulegan-Carpenter 数换算：`A = D·KC/(2π)`。

use std::f64::consts::PI;

use ib_foundation::error::{IbError, IbResult};
use serde::{Deserialize, Serialize};

use crate::markers::MarkerSet;

/// 物体运动
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Motion {
    /// 静止
    #[default]
    Stationary,

    /// 匀速平移：`x = x0 + U t`
    Translating {
        /// x 方向速度
        u0: f64,
        /// y 方向速度
        #[serde(default)]
        v0: f64,
        /// z 方向速度
        #[serde(default)]
        w0: f64,
    },

    /// 沿 x 方向正弦振荡：`x = s·A sin(2πft)`
    Oscillating {
        /// 振幅 A
        amplitude: f64,
        /// 频率 f
        frequency: f64,
        /// 方向符号 s（圆柱算例为 -1，球算例为 +1）
        #[serde(default = "default_sign")]
        direction_sign: f64,
    },
}

fn default_sign() -> f64 {
    1.0
}

impl Motion {
    /// 由 Keulegan-Carpenter 数构造振荡运动
    pub fn from_keulegan_carpenter(
        diameter: f64,
        kc: f64,
        frequency: f64,
        direction_sign: f64,
    ) -> IbResult<Self> {
        if !(diameter > 0.0 && kc > 0.0 && frequency > 0.0) {
            return Err(IbError::invalid_input(format!(
                "直径、KC 数和频率必须为正: D={diameter}, KC={kc}, f={frequency}"
            )));
        }
        Ok(Self::Oscillating {
            amplitude: diameter * kc / (2.0 * PI),
            frequency,
            direction_sign: direction_sign.signum(),
        })
    }

    /// 运动名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stationary => "stationary",
            Self::Translating { .. } => "translating",
            Self::Oscillating { .. } => "oscillating",
        }
    }

    /// 最大速度
    pub fn max_velocity(&self) -> f64 {
        match *self {
            Self::Stationary => 0.0,
            Self::Translating { u0, v0, w0 } => (u0 * u0 + v0 * v0 + w0 * w0).sqrt(),
            Self::Oscillating {
                amplitude,
                frequency,
                ..
            } => 2.0 * PI * frequency * amplitude,
        }
    }

    /// 振荡周期，非振荡运动返回 `None`
    pub fn period(&self) -> Option<f64> {
        match *self {
            Self::Oscillating { frequency, .. } if frequency > 0.0 => Some(1.0 / frequency),
            _ => None,
        }
    }

    /// t 时刻相对初始位置的位移
    pub fn displacement(&self, t: f64) -> [f64; 3] {
        match *self {
            Self::Stationary => [0.0; 3],
            Self::Translating { u0, v0, w0 } => [u0 * t, v0 * t, w0 * t],
            Self::Oscillating {
                amplitude,
                frequency,
                direction_sign,
            } => {
                let w = 2.0 * PI * frequency;
                [direction_sign * amplitude * (w * t).sin(), 0.0, 0.0]
            }
        }
    }

    /// t 时刻速度
    pub fn velocity(&self, t: f64) -> [f64; 3] {
        match *self {
            Self::Stationary => [0.0; 3],
            Self::Translating { u0, v0, w0 } => [u0, v0, w0],
            Self::Oscillating {
                amplitude,
                frequency,
                direction_sign,
            } => {
                let w = 2.0 * PI * frequency;
                [direction_sign * w * amplitude * (w * t).cos(), 0.0, 0.0]
            }
        }
    }

    /// t 时刻加速度
    pub fn acceleration(&self, t: f64) -> [f64; 3] {
        match *self {
            Self::Stationary | Self::Translating { .. } => [0.0; 3],
            Self::Oscillating {
                amplitude,
                frequency,
                direction_sign,
            } => {
                let w = 2.0 * PI * frequency;
                [-direction_sign * w * w * amplitude * (w * t).sin(), 0.0, 0.0]
            }
        }
    }

    /// t 时刻的物体中心
    pub fn center_at(&self, center0: [f64; 3], t: f64) -> [f64; 3] {
        let d = self.displacement(t);
        [center0[0] + d[0], center0[1] + d[1], center0[2] + d[2]]
    }

    /// t 时刻的标记点位置
    pub fn move_markers(&self, markers: &MarkerSet, t: f64) -> MarkerSet {
        let d = self.displacement(t);
        markers.translated(d[0], d[1], d[2])
    }
}
