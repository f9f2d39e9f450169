use roam::page::{Block, Page};

use crate::resolve::{ReferenceSink, ReferencedSet, Resolver};

/// Spaces per nesting level.
pub const INDENT_WIDTH: usize = 4;

/// Flattens a page's block tree into markdown lines.
///
/// Top-level blocks render flush left. Nested blocks are indented by
/// [`INDENT_WIDTH`] spaces per level, and nested blocks that have children of
/// their own become `* ` list items. Headings put their `#` marks in front of
/// the indentation.
pub struct TreeRenderer<'r, 'i, 'a> {
    resolver: &'r Resolver<'i, 'a>,
    /// Blocks to mark with a ` ^uid` anchor. `None` while anchors are still
    /// being discovered.
    anchors: Option<&'r ReferencedSet>,
}

impl<'r, 'i, 'a> TreeRenderer<'r, 'i, 'a> {
    pub fn new(resolver: &'r Resolver<'i, 'a>, anchors: Option<&'r ReferencedSet>) -> Self {
        TreeRenderer { resolver, anchors }
    }

    /// Render every block of `page`, depth-first, in document order.
    pub fn render_page(
        &self,
        page: &Page,
        sink: &mut dyn ReferenceSink,
    ) -> Result<Vec<String>, roam::Error> {
        let mut lines = Vec::with_capacity(page.block_count());
        self.render_children(page, &page.children, 0, sink, &mut lines)?;
        Ok(lines)
    }

    /// Render `children` at nesting `level` and everything below them.
    pub fn render_children(
        &self,
        page: &Page,
        children: &[Block],
        level: usize,
        sink: &mut dyn ReferenceSink,
        lines: &mut Vec<String>,
    ) -> Result<(), roam::Error> {
        for block in children {
            lines.push(self.render_block(page, block, level, sink)?);
            self.render_children(page, &block.children, level + 1, sink, lines)?;
        }
        Ok(())
    }

    /// Render one block's own line (its children are not included).
    pub fn render_block(
        &self,
        page: &Page,
        block: &Block,
        level: usize,
        sink: &mut dyn ReferenceSink,
    ) -> Result<String, roam::Error> {
        let prefix = line_prefix(block, level);
        let text = self.resolver.resolve(page, block, sink)?;

        let mut line = format!("{}{}", prefix, text);
        if self.anchors.is_some_and(|anchors| anchors.contains(&block.uid)) {
            line.push_str(&format!(" ^{}", block.uid));
        }

        // Keep multi-line blocks under one indentation, followed by a blank line.
        if line.contains('\n') {
            line = line.replace('\n', &format!("\n{}", prefix));
            line.push('\n');
        }
        Ok(line)
    }
}

fn line_prefix(block: &Block, level: usize) -> String {
    let mut prefix = String::new();
    if block.heading > 0 {
        prefix.push_str(&"#".repeat(usize::from(block.heading)));
        prefix.push(' ');
    }
    if level > 0 {
        prefix.push_str(&" ".repeat(INDENT_WIDTH * level));
        if block.has_children() {
            prefix.push_str("* ");
        }
    }
    prefix
}
