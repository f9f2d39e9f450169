//! The three conversion passes.
//!
//! Whether a block needs an anchor depends on references from anywhere in the
//! export, so a page cannot be written until every page has been looked at:
//!
//! 1. Indexing: normalize daily titles, then index every block by uid.
//! 2. Discovery: resolve every page without writing anything, collecting the
//!    set of referenced uids (and the diagnostics).
//! 3. Rendering: resolve every page again, now anchoring referenced blocks,
//!    and hand each page to the writer.

use std::fmt;
use std::path::{Path, PathBuf};

use roam::page::Page;
use tracing::{debug, info};

use crate::config::Config;
use crate::diagnostic::Diagnostics;
use crate::error::ConvertError;
use crate::index::BlockIndex;
use crate::render::TreeRenderer;
use crate::resolve::{Discard, Discovery, ReferencedSet, Resolver};
use crate::writer::{DirectoryWriter, PageWriter};

/// Subdirectory that daily pages are written to.
pub const DAILY_DIR: &str = "daily";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Indexing,
    Discovery,
    Rendering,
}

impl Pass {
    pub fn number(self) -> u8 {
        match self {
            Pass::Indexing => 1,
            Pass::Discovery => 2,
            Pass::Rendering => 3,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Pass::Indexing => "scan all pages",
            Pass::Discovery => "track block references",
            Pass::Rendering => "write pages",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pass {}", self.number())
    }
}

/// Observes a run: per-page progress, plus the diagnostics of pass 2 as soon
/// as that pass ends, so they are seen even if pass 3 fails.
pub trait Progress {
    fn start(&mut self, pass: Pass, total: usize);
    fn advance(&mut self);
    fn finish(&mut self);
    fn discovered(&mut self, _diagnostics: &Diagnostics) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _pass: Pass, _total: usize) {}
    fn advance(&mut self) {}
    fn finish(&mut self) {}
}

/// What a finished run did.
#[derive(Debug, Default)]
pub struct Summary {
    pub pages: usize,
    pub daily_pages: usize,
    pub pages_written: usize,
    pub blocks: usize,
    pub duplicate_uids: usize,
    pub referenced_blocks: usize,
    pub diagnostics: Diagnostics,
}

/// Load the configured export and write it out as markdown.
pub fn run(config: &Config, progress: &mut dyn Progress) -> Result<Summary, ConvertError> {
    let mut export = roam::load::from_path(&config.input).map_err(ConvertError::Load)?;
    info!(
        pages = export.pages.len(),
        input = %config.input.display(),
        "loaded export"
    );

    let mut writer = DirectoryWriter::new(&config.out_dir);
    convert(&mut export.pages, &mut writer, progress)
}

/// Run all three passes over `pages`.
///
/// Errors in passes 1 and 2 abort before anything is written. An error in
/// pass 3 aborts the run but leaves already written pages in place.
pub fn convert(
    pages: &mut [Page],
    writer: &mut dyn PageWriter,
    progress: &mut dyn Progress,
) -> Result<Summary, ConvertError> {
    normalize_titles(pages, progress)?;

    let pages: &[Page] = pages;
    let index = BlockIndex::build(pages);
    info!(
        blocks = index.len(),
        duplicates = index.duplicates(),
        "indexed blocks"
    );

    let discovery = discover(&index, progress)?;
    progress.discovered(&discovery.diagnostics);
    let pages_written = render(&index, &discovery.referenced, writer, progress)?;

    Ok(Summary {
        pages: pages.len(),
        daily_pages: pages.iter().filter(|p| p.is_daily).count(),
        pages_written,
        blocks: index.len(),
        duplicate_uids: index.duplicates(),
        referenced_blocks: discovery.referenced.len(),
        diagnostics: discovery.diagnostics,
    })
}

/// Pass 1, first half: rewrite daily titles in place.
pub fn normalize_titles(
    pages: &mut [Page],
    progress: &mut dyn Progress,
) -> Result<(), ConvertError> {
    begin(Pass::Indexing, pages.len(), progress);
    for page in pages.iter_mut() {
        page.normalize_title()
            .map_err(ConvertError::in_pass(Pass::Indexing))?;
        progress.advance();
    }
    progress.finish();
    Ok(())
}

/// Pass 2: resolve every page, keeping only what resolution reports.
pub fn discover(
    index: &BlockIndex<'_>,
    progress: &mut dyn Progress,
) -> Result<Discovery, ConvertError> {
    let resolver = Resolver::new(index);
    let renderer = TreeRenderer::new(&resolver, None);
    let mut discovery = Discovery::default();

    begin(Pass::Discovery, index.pages().len(), progress);
    for page in index.pages() {
        renderer
            .render_page(page, &mut discovery)
            .map_err(ConvertError::in_pass(Pass::Discovery))?;
        progress.advance();
    }
    progress.finish();

    info!(
        referenced = discovery.referenced.len(),
        unresolved = discovery.diagnostics.len(),
        "tracked block references"
    );
    Ok(discovery)
}

/// Pass 3: render every titled page with anchors and write it. Returns the
/// number of pages written.
pub fn render(
    index: &BlockIndex<'_>,
    referenced: &ReferencedSet,
    writer: &mut dyn PageWriter,
    progress: &mut dyn Progress,
) -> Result<usize, ConvertError> {
    let resolver = Resolver::new(index);
    let renderer = TreeRenderer::new(&resolver, Some(referenced));
    let mut written = 0;

    begin(Pass::Rendering, index.pages().len(), progress);
    for page in index.pages() {
        let Some(path) = page_path(page) else {
            debug!(blocks = page.block_count(), "skipping untitled page");
            progress.advance();
            continue;
        };

        let lines = renderer
            .render_page(page, &mut Discard)
            .map_err(ConvertError::in_pass(Pass::Rendering))?;
        writer.write_page(&path, &lines.join("\n"))?;
        written += 1;
        progress.advance();
    }
    progress.finish();

    info!(pages = written, "wrote pages");
    Ok(written)
}

/// Where `page` is written, relative to the output root. Untitled pages are
/// not written.
pub fn page_path(page: &Page) -> Option<PathBuf> {
    if page.title.is_empty() {
        return None;
    }
    let file = format!("{}.md", page.title);
    if page.is_daily {
        Some(Path::new(DAILY_DIR).join(file))
    } else {
        Some(PathBuf::from(file))
    }
}

fn begin(pass: Pass, total: usize, progress: &mut dyn Progress) {
    info!("{}: {}", pass, pass.describe());
    progress.start(pass, total);
}
