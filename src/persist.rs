use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::error::{KboError, Result};
use crate::model::{SeasonTable, TableName};

/// Destination for the finished standings tables of one run.
pub trait TableSink {
    /// Persist every table or none of them.
    fn persist(&mut self, tables: &[(TableName, SeasonTable)]) -> Result<()>;
}

/// Writes each table to `{root}/{year}/{metric}_{orientation}_{year}.csv`.
///
/// Tables are first written next to their destination with a `.tmp`
/// suffix and only renamed into place once all of them were written.
#[derive(Debug, Clone)]
pub struct CsvSink {
    root: PathBuf,
}

impl CsvSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &TableName) -> PathBuf {
        self.root
            .join(name.year.to_string())
            .join(format!("{}.csv", name.file_stem()))
    }
}

impl TableSink for CsvSink {
    #[instrument(skip_all, fields(tables = tables.len()))]
    fn persist(&mut self, tables: &[(TableName, SeasonTable)]) -> Result<()> {
        let mut staged: Vec<(PathBuf, PathBuf)> = vec![];
        for (name, table) in tables {
            let path = self.path_for(name);
            let tmp = path.with_extension("csv.tmp");
            if let Err(e) = write_table(&tmp, table) {
                remove_all(staged.iter().map(|(tmp, _)| tmp.as_path()).chain([tmp.as_path()]));
                return Err(e);
            }
            staged.push((tmp, path));
        }

        for (i, (tmp, path)) in staged.iter().enumerate() {
            if let Err(source) = fs::rename(tmp, path) {
                remove_all(staged[..i].iter().map(|(_, path)| path.as_path()));
                remove_all(staged[i..].iter().map(|(tmp, _)| tmp.as_path()));
                return Err(KboError::Io {
                    path: path.clone(),
                    source,
                });
            }
            info!(path = %path.display(), "wrote table");
        }
        Ok(())
    }
}

fn write_table(path: &Path, table: &SeasonTable) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| KboError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let csv_err = |source| KboError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(table.header()).map_err(csv_err)?;
    for row in &table.rows {
        writer
            .write_record(std::iter::once(&row.key).chain(&row.cells))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| KboError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn remove_all<'a>(paths: impl IntoIterator<Item = &'a Path>) {
    for path in paths {
        if path.is_file() {
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "failed to remove partial output");
            }
        }
    }
}

/// Keeps tables in memory, in the order they were persisted.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub tables: Vec<(TableName, SeasonTable)>,
}

impl TableSink for MemorySink {
    fn persist(&mut self, tables: &[(TableName, SeasonTable)]) -> Result<()> {
        self.tables.extend_from_slice(tables);
        Ok(())
    }
}
