use std::collections::HashMap;

use roam::page::{Block, Page};
use tracing::debug;

/// A block found through the index, together with the page that owns it.
#[derive(Debug, Clone, Copy)]
pub struct IndexedBlock<'a> {
    pub block: &'a Block,
    pub page: &'a Page,
}

#[derive(Debug, Clone, Copy)]
struct Entry<'a> {
    block: &'a Block,
    /// Position of the owning page in the export.
    page: usize,
}

/// Every block of the export, keyed by uid.
///
/// Built once after titles have been normalized; read-only afterwards.
/// Blocks record their page by position, and the title is looked up only when
/// a link is generated, so links always carry the normalized title.
pub struct BlockIndex<'a> {
    pages: &'a [Page],
    blocks: HashMap<&'a str, Entry<'a>>,
    duplicates: usize,
}

impl<'a> BlockIndex<'a> {
    pub fn build(pages: &'a [Page]) -> Self {
        let mut index = BlockIndex {
            pages,
            blocks: HashMap::new(),
            duplicates: 0,
        };
        for (position, page) in pages.iter().enumerate() {
            for block in &page.children {
                index.register(block, position);
            }
        }
        index
    }

    fn register(&mut self, block: &'a Block, page: usize) {
        // Last write wins on duplicate uids.
        if let Some(previous) = self.blocks.insert(block.uid.as_str(), Entry { block, page }) {
            self.duplicates += 1;
            debug!(
                uid = %block.uid,
                previous_page = %self.pages[previous.page].title,
                page = %self.pages[page].title,
                "duplicate block uid, keeping the later one"
            );
        }
        for child in &block.children {
            self.register(child, page);
        }
    }

    pub fn get(&self, uid: &str) -> Option<IndexedBlock<'a>> {
        self.blocks.get(uid).map(|entry| IndexedBlock {
            block: entry.block,
            page: &self.pages[entry.page],
        })
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.blocks.contains_key(uid)
    }

    pub fn pages(&self) -> &'a [Page] {
        self.pages
    }

    /// Number of distinct uids.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// How many blocks were shadowed by a later block with the same uid.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
