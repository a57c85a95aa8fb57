//! CSV fixture I/O.
//!
//! Files are parsed eagerly so a malformed row surfaces as an error before
//! any pipeline starts; the parsed rows are then replayed as a stream.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::helper::{from_vec, Stream};

/// Errors from reading or writing CSV files.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads every row of a CSV file into a stream of `T`.
///
/// With `has_header == false` rows are deserialized by column position.
pub fn read_from_csv_file<T>(path: impl AsRef<Path>, has_header: bool) -> Result<Stream<T>, AssetError>
where
    T: DeserializeOwned + Send + 'static,
{
    let path = path.as_ref();
    let reader = ::csv::ReaderBuilder::new()
        .has_headers(has_header)
        .from_path(path)
        .map_err(|source| AssetError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let rows = collect_rows(reader, path)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded CSV file");
    Ok(from_vec(rows))
}

/// Reads CSV rows from any reader, e.g. an in-memory fixture.
pub fn read_from_csv_reader<T, R>(reader: R, has_header: bool) -> Result<Stream<T>, AssetError>
where
    T: DeserializeOwned + Send + 'static,
    R: std::io::Read,
{
    let reader = ::csv::ReaderBuilder::new()
        .has_headers(has_header)
        .from_reader(reader);
    let rows = collect_rows(reader, Path::new("<reader>"))?;
    Ok(from_vec(rows))
}

fn collect_rows<T, R>(mut reader: ::csv::Reader<R>, path: &Path) -> Result<Vec<T>, AssetError>
where
    T: DeserializeOwned,
    R: std::io::Read,
{
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| {
            warn!(path = %path.display(), error = %source, "malformed CSV row");
            AssetError::Csv {
                path: path.to_path_buf(),
                source,
            }
        })
}

/// Writes `records` to `path` with a header row derived from `T`.
pub fn write_to_csv_file<T, I>(path: impl AsRef<Path>, records: I) -> Result<(), AssetError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let path = path.as_ref();
    let csv_err = |source| AssetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = ::csv::Writer::from_path(path).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}
