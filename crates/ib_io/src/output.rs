// crates/ib_io/src/output.rs

//! 列数据输出
//!
//! 把若干等长的列写成逗号分隔文本，首行为列名。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{IoError, IoResult};

/// 写出列数据
pub fn write_columns(path: &Path, headers: &[&str], columns: &[Vec<f64>]) -> IoResult<()> {
    let file = File::create(path).map_err(|e| IoError::access(path, e))?;
    let mut writer = BufWriter::new(file);
    write_columns_to(&mut writer, headers, columns).map_err(|e| match e {
        WriteError::Shape(err) => err,
        WriteError::Io(source) => IoError::access(path, source),
    })?;
    info!("wrote {} columns to {}", columns.len(), path.display());
    Ok(())
}

enum WriteError {
    Shape(IoError),
    Io(std::io::Error),
}

impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

fn write_columns_to<W: Write>(
    writer: &mut W,
    headers: &[&str],
    columns: &[Vec<f64>],
) -> Result<(), WriteError> {
    if headers.len() != columns.len() {
        return Err(WriteError::Shape(IoError::ColumnLength {
            column: "<headers>".to_string(),
            expected: columns.len(),
            actual: headers.len(),
        }));
    }
    let rows = columns.first().map_or(0, Vec::len);
    for (name, col) in headers.iter().zip(columns) {
        if col.len() != rows {
            return Err(WriteError::Shape(IoError::ColumnLength {
                column: (*name).to_string(),
                expected: rows,
                actual: col.len(),
            }));
        }
    }

    writeln!(writer, "{}", headers.join(","))?;
    for i in 0..rows {
        let line: Vec<String> = columns.iter().map(|c| c[i].to_string()).collect();
        writeln!(writer, "{}", line.join(","))?;
    }
    writer.flush()?;
    Ok(())
}
