use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic as Report, Label};

/// Why a reference was left unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The uid is not in the export.
    UnknownTarget,
    /// The target is already being expanded further up the chain.
    Cycle,
    /// Expansion went deeper than the resolver allows.
    TooDeep,
}

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::UnknownTarget => "unknown-uid",
            DiagnosticKind::Cycle => "reference-cycle",
            DiagnosticKind::TooDeep => "reference-depth",
        }
    }
}

/// A reference that could not be resolved. The markup is kept as written and
/// the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Title of the page holding the offending block.
    pub page: String,
    /// Uid of the block whose text holds the markup.
    pub block: String,
    /// That block's raw text, for source snippets.
    pub text: String,
    /// Byte range of the markup in `text`.
    pub span: Range<usize>,
    /// The uid the markup points at.
    pub target: String,
}

impl Diagnostic {
    pub fn message(&self) -> String {
        match self.kind {
            DiagnosticKind::UnknownTarget => format!("did not find uid '{}'", self.target),
            DiagnosticKind::Cycle => {
                format!("reference to '{}' loops back on itself", self.target)
            }
            DiagnosticKind::TooDeep => {
                format!("reference to '{}' is nested too deeply", self.target)
            }
        }
    }

    /// Name under which the block's text is registered for source snippets.
    pub fn file_name(&self) -> String {
        format!("{}/{}", self.page, self.block)
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Report<usize> {
        Report::warning()
            .with_message(self.message())
            .with_code(self.kind.code())
            .with_labels(vec![Label::primary(file_id, self.span.clone())])
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_name(), self.message())
    }
}

/// Diagnostics collected over a run, one per markup occurrence.
///
/// A block's text is resolved once for its own line and again wherever another
/// block embeds it, so the same occurrence can be reported many times; repeats
/// are dropped.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    seen: HashSet<(String, usize, DiagnosticKind)>,
}

impl Diagnostics {
    /// Record a diagnostic. Returns false if the occurrence was already seen.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        let key = (
            diagnostic.block.clone(),
            diagnostic.span.start,
            diagnostic.kind,
        );
        if !self.seen.insert(key) {
            return false;
        }
        self.items.push(diagnostic);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}
