pub mod date;
pub mod error;
pub mod load;
pub mod markup;
pub mod page;

pub use error::Error;

use crate::page::Page;

/// A decoded graph export: every page, in the order the export lists them.
#[derive(Debug, Clone, Default)]
pub struct Export {
    pub pages: Vec<Page>,
}
