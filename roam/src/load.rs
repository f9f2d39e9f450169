use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::Export;
use crate::error::Error;
use crate::page::Page;

/// Decode an export (a JSON array of pages) from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Export, Error> {
    let pages: Vec<Page> = serde_json::from_reader(reader)?;
    Ok(Export { pages })
}

/// Decode an export from a JSON string.
pub fn from_str(source: &str) -> Result<Export, Error> {
    let pages: Vec<Page> = serde_json::from_str(source)?;
    Ok(Export { pages })
}

/// Open and decode an export file.
pub fn from_path(path: &Path) -> Result<Export, Error> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(BufReader::new(file))
}
