use std::path::PathBuf;

use crate::error::ConvertError;

/// Validated settings for one conversion run.
#[derive(Debug, Clone)]
pub struct Config {
    /// The JSON export to read.
    pub input: PathBuf,
    /// Root of the generated markdown tree.
    pub out_dir: PathBuf,
}

impl Config {
    /// Build a config, defaulting the output directory to the current working
    /// directory.
    pub fn new(input: PathBuf, out_dir: Option<PathBuf>) -> Result<Self, ConvertError> {
        if input.as_os_str().is_empty() {
            return Err(ConvertError::Config("input is blank".to_string()));
        }

        let out_dir = match out_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => std::env::current_dir().map_err(|e| {
                ConvertError::Config(format!("cannot determine working directory: {}", e))
            })?,
        };

        Ok(Config { input, out_dir })
    }
}
