// crates/ib_io/src/snapshot.rs

//! 场快照
//!
//! 结构化场的 JSON 交换格式，由求解器输出转换而来：
//!
//! ```json
//! { "name": "p", "time": 50.0, "axes": [[...y...], [...x...]], "values": [...] }
//! ```
//!
//! `values` 按行主序展平，第一个坐标轴变化最慢。

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ib_foundation::error::IbResult;
use ib_interp::{SampleAxis, StructuredField};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// 场快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// 物理量名称（如 `p`、`u`）
    pub name: String,
    /// 时刻
    #[serde(default)]
    pub time: f64,
    /// 坐标轴，外层在前
    pub axes: Vec<Vec<f64>>,
    /// 行主序数据
    pub values: Vec<f64>,
}

impl FieldSnapshot {
    /// 由结构化场构造
    pub fn from_field(name: impl Into<String>, time: f64, field: &StructuredField) -> Self {
        Self {
            name: name.into(),
            time,
            axes: field.axes().iter().map(|a| a.values().to_vec()).collect(),
            values: field.values().to_vec(),
        }
    }

    /// 转换为结构化场（校验坐标轴与数据长度）
    pub fn to_field(&self) -> IbResult<StructuredField> {
        let axes = self
            .axes
            .iter()
            .map(|a| SampleAxis::from_slice(a))
            .collect::<IbResult<Vec<_>>>()?;
        StructuredField::new(axes, self.values.clone())
    }

    /// 消耗快照转换为结构化场
    pub fn into_field(self) -> IbResult<StructuredField> {
        let axes = self
            .axes
            .into_iter()
            .map(SampleAxis::new)
            .collect::<IbResult<Vec<_>>>()?;
        StructuredField::new(axes, self.values)
    }
}

/// 读取场快照
pub fn read_field_snapshot(path: &Path) -> IoResult<FieldSnapshot> {
    let file = File::open(path).map_err(|e| IoError::access(path, e))?;
    let snapshot: FieldSnapshot = serde_json::from_reader(BufReader::new(file))?;
    debug!(
        "read field '{}' at t = {} ({} values) from {}",
        snapshot.name,
        snapshot.time,
        snapshot.values.len(),
        path.display()
    );
    Ok(snapshot)
}

/// 写出场快照
pub fn write_field_snapshot(path: &Path, snapshot: &FieldSnapshot) -> IoResult<()> {
    let file = File::create(path).map_err(|e| IoError::access(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, snapshot)?;
    writer.flush().map_err(|e| IoError::access(path, e))?;
    debug!("wrote field '{}' to {}", snapshot.name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");

        let field = StructuredField::from_fn(
            vec![
                SampleAxis::from_slice(&[0.0, 1.0]).unwrap(),
                SampleAxis::from_slice(&[0.0, 0.5, 1.0]).unwrap(),
            ],
            |c| c[0] - c[1],
        )
        .unwrap();
        let snapshot = FieldSnapshot::from_field("p", 12.5, &field);
        write_field_snapshot(&path, &snapshot).unwrap();

        let loaded = read_field_snapshot(&path).unwrap();
        assert_eq!(loaded.name, "p");
        assert_eq!(loaded.time, 12.5);
        assert_eq!(loaded.into_field().unwrap(), field);
    }

    #[test]
    fn test_invalid_snapshot_shape() {
        let snapshot: FieldSnapshot =
            serde_json::from_str(r#"{"name":"u","axes":[[0,1],[0,1]],"values":[1,2,3]}"#).unwrap();
        assert_eq!(snapshot.time, 0.0);
        assert!(snapshot.to_field().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_degenerate_axis_rejected() {
        let snapshot: FieldSnapshot =
            serde_json::from_str(r#"{"name":"u","axes":[[0,0]],"values":[1,2]}"#).unwrap();
        assert!(snapshot.to_field().unwrap_err().is_degenerate_interval());
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_field_snapshot(&path), Err(IoError::Json(_))));
    }
}
