// crates/ib_io/src/forces.rs

//! 求解器力历史文件
//!
//! 每行 `t fx fy [fz]`，空白分隔，`#` 开头为注释。
//! 多物体输出时每个物体额外占 2（或 3）列，这里只读第一个物体。
//! 维数由列数推断，列数有歧义时由调用方给出。

use std::path::Path;

use ib_foundation::error::{IbError, IbResult};
use tracing::{debug, warn};

use crate::error::{display_name, read_text, IoError, IoResult};

/// 力历史
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForceHistory {
    /// 时间
    pub times: Vec<f64>,
    /// x 方向力（阻力）
    pub fx: Vec<f64>,
    /// y 方向力（二维为升力）
    pub fy: Vec<f64>,
    /// z 方向力（仅三维）
    pub fz: Option<Vec<f64>>,
}

impl ForceHistory {
    /// 记录数
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// 空间维数
    pub fn dim(&self) -> usize {
        if self.fz.is_some() {
            3
        } else {
            2
        }
    }

    /// 按分量取力（0 = x, 1 = y, 2 = z）
    pub fn component(&self, axis: usize) -> IbResult<&[f64]> {
        match axis {
            0 => Ok(&self.fx),
            1 => Ok(&self.fy),
            2 => self
                .fz
                .as_deref()
                .ok_or_else(|| IbError::not_found("fz (二维力历史没有 z 分量)")),
            _ => Err(IbError::invalid_input(format!("力分量索引越界: {axis}"))),
        }
    }

    /// 截取 `[start, end]` 时间窗内的记录
    pub fn window(&self, start: f64, end: f64) -> Self {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&i| self.times[i] >= start && self.times[i] <= end)
            .collect();
        let pick = |v: &[f64]| keep.iter().map(|&i| v[i]).collect::<Vec<_>>();
        Self {
            times: pick(&self.times),
            fx: pick(&self.fx),
            fy: pick(&self.fy),
            fz: self.fz.as_deref().map(pick),
        }
    }
}

/// 读取力历史文件，按列数推断维数
///
/// 单物体为 `1 + dim` 列，多物体为 `1 + dim·k` 列。列数同时符合
/// 二维和三维（7、13、...）时无法推断，需改用 [`read_forces_with_dim`]。
pub fn read_forces(path: &Path) -> IoResult<ForceHistory> {
    read_forces_file(path, None)
}

/// 读取力历史文件，显式指定维数（2 或 3）
pub fn read_forces_with_dim(path: &Path, dim: usize) -> IoResult<ForceHistory> {
    read_forces_file(path, Some(dim))
}

fn read_forces_file(path: &Path, dim: Option<usize>) -> IoResult<ForceHistory> {
    let content = read_text(path)?;
    let history = parse_forces(&content, Some(path), dim)?;
    debug!(
        "read {} force records ({}D) from {}",
        history.len(),
        history.dim(),
        path.display()
    );
    Ok(history)
}

/// 从字符串解析力历史
pub fn parse_forces_string(content: &str) -> IoResult<ForceHistory> {
    parse_forces(content, None, None)
}

/// 从字符串解析力历史，显式指定维数
pub fn parse_forces_string_with_dim(content: &str, dim: usize) -> IoResult<ForceHistory> {
    parse_forces(content, None, Some(dim))
}

/// 由首个数据行的列数确定维数
fn detect_dim(width: usize, dim: Option<usize>, file: &str, line: usize) -> IoResult<usize> {
    let per_body = width.saturating_sub(1);
    let fits = |d: usize| per_body >= d && per_body % d == 0;

    match dim {
        Some(d @ (2 | 3)) if fits(d) => Ok(d),
        Some(d @ (2 | 3)) => Err(IoError::parse(
            file,
            line,
            format!("{width} 列不是 {d} 维力历史 (应为 1 + {d}k 列)"),
        )),
        Some(d) => Err(IoError::parse(file, line, format!("力历史维数只能是 2 或 3, 实际 {d}"))),
        None => match (fits(2), fits(3)) {
            (true, false) => Ok(2),
            (false, true) => Ok(3),
            (true, true) => Err(IoError::parse(
                file,
                line,
                format!("{width} 列同时符合二维和三维多物体输出，请显式指定维数"),
            )),
            (false, false) => Err(IoError::parse(
                file,
                line,
                format!("{width} 列既不是 1 + 2k 也不是 1 + 3k (t fx fy [fz] ...)"),
            )),
        },
    }
}

fn parse_forces(content: &str, path: Option<&Path>, dim: Option<usize>) -> IoResult<ForceHistory> {
    let file = display_name(path);
    let mut history = ForceHistory::default();
    let mut n_cols = 0;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = trimmed
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IoError::parse(&file, line_num + 1, e.to_string()))?;

        if n_cols == 0 {
            let d = detect_dim(row.len(), dim, &file, line_num + 1)?;
            if row.len() > d + 1 {
                warn!(
                    "{}: 检测到 {} 个物体的 {}D 力历史，只读取第一个物体",
                    file,
                    (row.len() - 1) / d,
                    d
                );
            }
            if d == 3 {
                history.fz = Some(Vec::new());
            }
            n_cols = row.len();
        } else if row.len() != n_cols {
            return Err(IoError::parse(
                &file,
                line_num + 1,
                format!("列数不一致: 期望 {n_cols}, 实际 {}", row.len()),
            ));
        }

        history.times.push(row[0]);
        history.fx.push(row[1]);
        history.fy.push(row[2]);
        if let Some(fz) = history.fz.as_mut() {
            fz.push(row[3]);
        }
    }

    if history.is_empty() {
        return Err(IoError::NoData { file });
    }
    Ok(history)
}
