use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use super::{DataKind, Provider};
use crate::error::Result;

/// Reads rates documents from local files.
///
/// Paths ending in `.gz` are decompressed transparently.
pub struct FsProvider {
    path_latest: PathBuf,
    path_time_series: PathBuf,
    path_time_series_last_90_days: PathBuf,
}

impl FsProvider {
    pub fn new<P: AsRef<Path>>(
        path_latest: P,
        path_time_series: P,
        path_time_series_last_90_days: P,
    ) -> Self {
        Self {
            path_latest: path_latest.as_ref().to_path_buf(),
            path_time_series: path_time_series.as_ref().to_path_buf(),
            path_time_series_last_90_days: path_time_series_last_90_days.as_ref().to_path_buf(),
        }
    }

    /// Provider reading the ECB file names from one directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(DataKind::Latest.file_name()),
            dir.join(DataKind::TimeSeries.file_name()),
            dir.join(DataKind::TimeSeriesLast90Days.file_name()),
        )
    }

    pub fn path(&self, kind: DataKind) -> &Path {
        match kind {
            DataKind::Latest => &self.path_latest,
            DataKind::TimeSeries => &self.path_time_series,
            DataKind::TimeSeriesLast90Days => &self.path_time_series_last_90_days,
        }
    }
}

impl Provider for FsProvider {
    fn fetch(&self, kind: DataKind) -> Result<Vec<u8>> {
        let path = self.path(kind);
        log::debug!("reading {} rates from {}", kind, path.display());

        if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let file = fs::File::open(path)?;
            let mut decoder = GzDecoder::new(BufReader::new(file));
            let mut contents = Vec::new();
            decoder.read_to_end(&mut contents)?;
            Ok(contents)
        } else {
            Ok(fs::read(path)?)
        }
    }
}
