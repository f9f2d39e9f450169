use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::convert::Pass;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid config: {0}")]
    Config(String),

    #[error("load JSON: {0}")]
    Load(#[source] roam::Error),

    #[error("{pass}: {source}")]
    Pass {
        pass: Pass,
        #[source]
        source: roam::Error,
    },

    #[error("cannot create directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub(crate) fn in_pass(pass: Pass) -> impl FnOnce(roam::Error) -> Self {
        move |source| ConvertError::Pass { pass, source }
    }
}
