use std::collections::HashSet;

use roam::date;
use roam::markup::{self, BlockRef, Segment};
use roam::page::{Block, Page};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::index::BlockIndex;

/// Maximum number of nested expansions below the block being resolved.
pub const MAX_DEPTH: usize = 64;

/// Uids that are the target of at least one resolved reference.
#[derive(Debug, Clone, Default)]
pub struct ReferencedSet {
    uids: HashSet<String>,
}

impl ReferencedSet {
    pub fn insert(&mut self, uid: &str) -> bool {
        if self.uids.contains(uid) {
            return false;
        }
        self.uids.insert(uid.to_string())
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.uids.contains(uid)
    }

    pub fn len(&self) -> usize {
        self.uids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }
}

/// Receives the side effects of resolution.
pub trait ReferenceSink {
    /// `uid` was the target of a resolved reference.
    fn referenced(&mut self, uid: &str);
    /// A reference was left as written.
    fn unresolved(&mut self, diagnostic: Diagnostic);
}

/// Sink for the discovery pass: remembers every target and every diagnostic.
#[derive(Debug, Default)]
pub struct Discovery {
    pub referenced: ReferencedSet,
    pub diagnostics: Diagnostics,
}

impl ReferenceSink for Discovery {
    fn referenced(&mut self, uid: &str) {
        self.referenced.insert(uid);
    }

    fn unresolved(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Sink for the rendering pass, which learns nothing discovery did not.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl ReferenceSink for Discard {
    fn referenced(&mut self, _uid: &str) {}

    fn unresolved(&mut self, _diagnostic: Diagnostic) {}
}

/// Rewrites block references in block text against a [`BlockIndex`].
///
/// A resolved reference becomes `<target text> [[<target page>#^<target uid>]]`.
/// The target text is itself resolved first, recursively. A reference back to
/// a block that is already being expanded, or one nested deeper than
/// [`MAX_DEPTH`], is left as written and reported like an unknown uid.
pub struct Resolver<'i, 'a> {
    index: &'i BlockIndex<'a>,
}

impl<'i, 'a> Resolver<'i, 'a> {
    pub fn new(index: &'i BlockIndex<'a>) -> Self {
        Resolver { index }
    }

    /// Resolve the text of `block`, which lives on `page`, then rewrite its
    /// daily links.
    pub fn resolve(
        &self,
        page: &Page,
        block: &Block,
        sink: &mut dyn ReferenceSink,
    ) -> Result<String, roam::Error> {
        let mut chain = vec![block.uid.as_str()];
        let expanded = self.expand(page, block, &mut chain, sink);
        Ok(date::rewrite_day_links(&expanded)?.into_owned())
    }

    /// `chain` holds the uids being expanded, outermost first.
    fn expand<'b>(
        &self,
        page: &'b Page,
        block: &'b Block,
        chain: &mut Vec<&'b str>,
        sink: &mut dyn ReferenceSink,
    ) -> String
    where
        'a: 'b,
    {
        let mut out = String::with_capacity(block.text.len());

        for segment in markup::segments(&block.text) {
            let reference = match segment {
                Segment::Text(text) => {
                    out.push_str(text);
                    continue;
                }
                Segment::Ref(reference) => reference,
            };

            let Some(target) = self.index.get(reference.uid) else {
                let kind = DiagnosticKind::UnknownTarget;
                sink.unresolved(unresolved(kind, page, block, &reference));
                out.push_str(reference.markup);
                continue;
            };

            if chain.contains(&reference.uid) {
                let kind = DiagnosticKind::Cycle;
                sink.unresolved(unresolved(kind, page, block, &reference));
                out.push_str(reference.markup);
                continue;
            }
            if chain.len() > MAX_DEPTH {
                let kind = DiagnosticKind::TooDeep;
                sink.unresolved(unresolved(kind, page, block, &reference));
                out.push_str(reference.markup);
                continue;
            }

            sink.referenced(&target.block.uid);
            chain.push(target.block.uid.as_str());
            let text = self.expand(target.page, target.block, chain, sink);
            chain.pop();

            out.push_str(&format!(
                "{} [[{}#^{}]]",
                text, target.page.title, target.block.uid
            ));
        }

        out
    }
}

fn unresolved(
    kind: DiagnosticKind,
    page: &Page,
    block: &Block,
    reference: &BlockRef<'_>,
) -> Diagnostic {
    Diagnostic {
        kind,
        page: page.title.clone(),
        block: block.uid.clone(),
        text: block.text.clone(),
        span: reference.span.clone(),
        target: reference.uid.to_string(),
    }
}
