// crates/ib_io/src/csv.rs

//! 分隔列数据导入
//!
//! 用于加载文献中数字化的对比数据（例如 `theta,cp` 两列），支持：
//! - 可选表头与注释行
//! - 任意单字符分隔符，空格表示按任意空白分割
//! - 错误行跳过或严格模式
//!
//! # 使用示例
//!
//! ```
//! use ib_io::csv::{parse_columns, CsvConfig};
//!
//! let content = "0.0,1.2\n90.0,-1.1\n180.0,0.5";
//! let columns = parse_columns(content, &CsvConfig::no_header()).unwrap();
//! assert_eq!(columns[0], vec![0.0, 90.0, 180.0]);
//! ```

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{display_name, read_text, IoError, IoResult};

/// 列数据加载配置
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// 是否有表头行
    pub has_header: bool,
    /// 分隔符（`' '` 表示任意空白）
    pub delimiter: char,
    /// 是否跳过无效行
    pub skip_invalid: bool,
    /// 只保留的列（从 0 开始），`None` 表示全部
    pub columns: Option<Vec<usize>>,
    /// 注释行前缀（以此开头的行将被跳过）
    pub comment_prefix: Option<char>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: ',',
            skip_invalid: true,
            columns: None,
            comment_prefix: Some('#'),
        }
    }
}

impl CsvConfig {
    /// 创建不带表头的配置
    pub fn no_header() -> Self {
        Self {
            has_header: false,
            ..Default::default()
        }
    }

    /// 空白分隔、无表头
    pub fn whitespace() -> Self {
        Self {
            has_header: false,
            delimiter: ' ',
            ..Default::default()
        }
    }

    /// 设置保留的列
    pub fn with_columns(mut self, columns: Vec<usize>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// 严格模式：遇到无效行直接报错
    pub fn strict(mut self) -> Self {
        self.skip_invalid = false;
        self
    }
}

/// 从文件加载列数据
///
/// 返回按列组织的数据，`columns[j][i]` 为第 `i` 个有效行的第 `j` 列。
pub fn load_columns(path: &Path, config: &CsvConfig) -> IoResult<Vec<Vec<f64>>> {
    let content = read_text(path)?;
    let columns = parse_columns_content(&content, config, Some(path))?;
    debug!(
        "loaded {} columns x {} rows from {}",
        columns.len(),
        columns.first().map_or(0, Vec::len),
        path.display()
    );
    Ok(columns)
}

/// 从字符串解析列数据
pub fn parse_columns(content: &str, config: &CsvConfig) -> IoResult<Vec<Vec<f64>>> {
    parse_columns_content(content, config, None)
}

fn parse_columns_content(
    content: &str,
    config: &CsvConfig,
    path: Option<&Path>,
) -> IoResult<Vec<Vec<f64>>> {
    let file = display_name(path);
    let mut columns: Vec<Vec<f64>> = Vec::new();
    let mut skipped = Vec::new();
    let mut header_pending = config.has_header;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(prefix) = config.comment_prefix {
            if trimmed.starts_with(prefix) {
                continue;
            }
        }
        // 表头为第一个非注释行
        if header_pending {
            header_pending = false;
            continue;
        }

        let parts: Vec<&str> = if config.delimiter == ' ' {
            trimmed.split_whitespace().collect()
        } else {
            trimmed.split(config.delimiter).map(str::trim).collect()
        };

        let selected: Vec<&str> = match &config.columns {
            Some(cols) => match cols
                .iter()
                .map(|&c| parts.get(c).copied())
                .collect::<Option<Vec<&str>>>()
            {
                Some(v) => v,
                None => {
                    reject(config, &file, line_num, "列数不足", &mut skipped)?;
                    continue;
                }
            },
            None => parts,
        };

        let row: Option<Vec<f64>> = selected
            .iter()
            .map(|s| s.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect();
        let row = match row {
            Some(row) => row,
            None => {
                reject(config, &file, line_num, "无法解析为数值", &mut skipped)?;
                continue;
            }
        };

        if columns.is_empty() {
            columns = vec![Vec::new(); row.len()];
        } else if row.len() != columns.len() {
            reject(config, &file, line_num, "列数与首行不一致", &mut skipped)?;
            continue;
        }
        for (col, v) in columns.iter_mut().zip(row) {
            col.push(v);
        }
    }

    if !skipped.is_empty() {
        let preview: Vec<_> = skipped.iter().take(5).collect();
        warn!(
            "{}: 跳过 {} 个无效行 (前几个: {:?}{})",
            file,
            skipped.len(),
            preview,
            if skipped.len() > 5 { "..." } else { "" }
        );
    }

    if columns.first().map_or(true, Vec::is_empty) {
        return Err(IoError::NoData { file });
    }
    Ok(columns)
}

fn reject(
    config: &CsvConfig,
    file: &str,
    line_num: usize,
    message: &str,
    skipped: &mut Vec<usize>,
) -> IoResult<()> {
    if config.skip_invalid {
        skipped.push(line_num + 1);
        Ok(())
    } else {
        Err(IoError::parse(file, line_num + 1, message))
    }
}
