// crates/ib_io/src/body.rs

//! 物体标记点文件
//!
//! 格式：首行为标记点数，其后每行一个点，2 或 3 个空白分隔的坐标。
//!
//! ```text
//! 4
//! 5.0000000000000000e-01	0.0000000000000000e+00
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ib_body::MarkerSet;
use tracing::debug;

use crate::error::{display_name, read_text, IoError, IoResult};

/// 读取物体文件
pub fn read_body(path: &Path) -> IoResult<MarkerSet> {
    let content = read_text(path)?;
    let body = parse_body(&content, Some(path))?;
    debug!("read {} markers from {}", body.len(), path.display());
    Ok(body)
}

/// 从字符串解析物体文件
pub fn parse_body_string(content: &str) -> IoResult<MarkerSet> {
    parse_body(content, None)
}

fn parse_body(content: &str, path: Option<&Path>) -> IoResult<MarkerSet> {
    let file = display_name(path);
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line_no, header) = lines.next().ok_or_else(|| IoError::NoData { file: file.clone() })?;
    let declared: usize = header
        .parse()
        .map_err(|_| IoError::parse(&file, line_no, format!("首行应为标记点数, 实际 '{header}'")))?;

    let mut columns: Vec<Vec<f64>> = Vec::new();
    for (line_no, line) in lines {
        let row = line
            .split_whitespace()
            .map(|s| s.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IoError::parse(&file, line_no, e.to_string()))?;

        if columns.is_empty() {
            if !(2..=3).contains(&row.len()) {
                return Err(IoError::parse(
                    &file,
                    line_no,
                    format!("每行应有 2 或 3 个坐标, 实际 {}", row.len()),
                ));
            }
            columns = vec![Vec::with_capacity(declared); row.len()];
        } else if row.len() != columns.len() {
            return Err(IoError::parse(
                &file,
                line_no,
                format!("坐标数不一致: 期望 {}, 实际 {}", columns.len(), row.len()),
            ));
        }

        for (col, v) in columns.iter_mut().zip(row) {
            col.push(v);
        }
    }

    let found = columns.first().map_or(0, Vec::len);
    if found != declared {
        return Err(IoError::parse(
            &file,
            1,
            format!("首行声明 {declared} 个标记点, 实际读到 {found} 个"),
        ));
    }
    if found == 0 {
        return Err(IoError::NoData { file });
    }

    let mut columns = columns.into_iter();
    let x = columns.next().unwrap_or_default();
    let y = columns.next().unwrap_or_default();
    let body = match columns.next() {
        Some(z) => MarkerSet::new_3d(x, y, z)?,
        None => MarkerSet::new_2d(x, y)?,
    };
    Ok(body)
}

/// 写出物体文件
pub fn write_body(path: &Path, body: &MarkerSet) -> IoResult<()> {
    let file = File::create(path).map_err(|e| IoError::access(path, e))?;
    let mut writer = BufWriter::new(file);
    let io = |e: std::io::Error| IoError::access(path, e);

    writeln!(writer, "{}", body.len()).map_err(io)?;
    for i in 0..body.len() {
        let written = match &body.z {
            Some(z) => writeln!(writer, "{:.16e}\t{:.16e}\t{:.16e}", body.x[i], body.y[i], z[i]),
            None => writeln!(writer, "{:.16e}\t{:.16e}", body.x[i], body.y[i]),
        };
        written.map_err(io)?;
    }
    writer.flush().map_err(io)?;

    debug!("wrote {} markers to {}", body.len(), path.display());
    Ok(())
}
