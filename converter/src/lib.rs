pub mod config;
pub mod convert;
pub mod diagnostic;
pub mod error;
pub mod index;
pub mod render;
pub mod resolve;
pub mod writer;

pub use config::Config;
pub use convert::{NoProgress, Pass, Progress, Summary, convert, run};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::ConvertError;
pub use index::BlockIndex;
pub use writer::{DirectoryWriter, MemoryWriter, PageWriter};
