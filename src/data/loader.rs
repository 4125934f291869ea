//! Upload Loader Module
//! Decodes an uploaded CSV or XLSX file into a Polars DataFrame.

use crate::error::DecodeError;
use calamine::{Data, Reader, Xlsx};
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

/// A file picked by the user, held in memory until it is ingested.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Read a file from disk, keeping only its file name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(name, content))
    }

    /// Lower-cased extension without the dot, empty when there is none.
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
    }
}

/// Decodes uploads by extension.
pub struct DataLoader {
    infer_schema_length: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(10000)
    }
}

impl DataLoader {
    pub fn new(infer_schema_length: usize) -> Self {
        Self {
            infer_schema_length,
        }
    }

    /// Decode an uploaded file. Dispatch is on the extension only.
    pub fn load(&self, file: &UploadedFile) -> Result<DataFrame, DecodeError> {
        let ext = file.extension();
        if ext != "csv" && ext != "xlsx" {
            return Err(DecodeError::UnsupportedExtension(file.name.clone()));
        }
        if file.content.is_empty() {
            return Err(DecodeError::EmptyFile(file.name.clone()));
        }

        debug!("Decoding {} ({} bytes) as {}", file.name, file.content.len(), ext);
        let df = match ext.as_str() {
            "csv" => self.load_csv(&file.content)?,
            _ => Self::load_xlsx(&file.content)?,
        };

        info!(
            "Loaded {}: {} rows, {} columns",
            file.name,
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Read comma-separated text with a header row. The header must be
    /// valid UTF-8.
    fn load_csv(&self, content: &[u8]) -> Result<DataFrame, DecodeError> {
        let header_end = content
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(content.len());
        std::str::from_utf8(&content[..header_end])?;

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .into_reader_with_file_handle(Cursor::new(content.to_vec()))
            .finish()
            .map_err(DecodeError::Csv)
    }

    /// Read the first worksheet; its first row is the header.
    fn load_xlsx(content: &[u8]) -> Result<DataFrame, DecodeError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(DecodeError::NoSheet)??;

        let mut rows = range.rows();
        let header = rows.next().ok_or(DecodeError::NoHeader)?;
        let names = unique_headers(
            header
                .iter()
                .enumerate()
                .map(|(i, cell)| match cell {
                    Data::Empty => format!("Unnamed: {}", i),
                    Data::String(s) if s.trim().is_empty() => format!("Unnamed: {}", i),
                    Data::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        );

        let body: Vec<&[Data]> = rows.collect();
        let columns = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let cells: Vec<&Data> = body.iter().map(|row| &row[i]).collect();
                build_column(name, &cells)
            })
            .collect();

        DataFrame::new(columns).map_err(DecodeError::Table)
    }
}

/// Suffix repeated header names with `.1`, `.2`, ...
fn unique_headers(names: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|name| {
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{}.{}", name, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

/// Narrowest column type that holds every non-empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Empty,
    Int,
    Float,
    Bool,
    Text,
}

fn cell_kind(cell: &Data) -> CellKind {
    match cell {
        Data::Empty => CellKind::Empty,
        Data::Int(_) => CellKind::Int,
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => CellKind::Int,
        Data::Float(_) => CellKind::Float,
        Data::Bool(_) => CellKind::Bool,
        _ => CellKind::Text,
    }
}

fn column_kind(cells: &[&Data]) -> CellKind {
    cells
        .iter()
        .map(|c| cell_kind(c))
        .fold(CellKind::Empty, |acc, kind| match (acc, kind) {
            (acc, CellKind::Empty) => acc,
            (CellKind::Empty, kind) => kind,
            (a, b) if a == b => a,
            (CellKind::Int, CellKind::Float) | (CellKind::Float, CellKind::Int) => CellKind::Float,
            _ => CellKind::Text,
        })
}

fn build_column(name: &str, cells: &[&Data]) -> Column {
    match column_kind(cells) {
        CellKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|c| match c {
                    Data::Int(i) => Some(*i),
                    Data::Float(f) => Some(*f as i64),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|c| match c {
                    Data::Int(i) => Some(*i as f64),
                    Data::Float(f) => Some(*f),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|c| match c {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Empty | CellKind::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|c| match c {
                    Data::Empty => None,
                    Data::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            Column::new(name.into(), values)
        }
    }
}

/// Column names in table order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}
