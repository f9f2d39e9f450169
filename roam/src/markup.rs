//! Block-reference markup inside block text.
//!
//! Three forms point at another block by uid:
//!
//! - embed: `{{embed: ((uid))}}`
//! - mention: `{{mentions: ((uid))}}`
//! - plain reference: `((uid))`
//!
//! Uids are exactly nine characters. When several forms could start at the
//! same position the earlier one in this list wins, so an embed is never read
//! as a plain reference wrapped in braces.

use std::fmt;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a block uid, in characters.
pub const UID_LEN: usize = 9;

static BLOCK_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\{{\{{embed: \(\((?P<embed>.{{{n}}})\)\)\}}\}}|\{{\{{mentions: \(\((?P<mention>.{{{n}}})\)\)\}}\}}|\(\((?P<reference>.{{{n}}})\)\)",
        n = UID_LEN
    ))
    .expect("block reference pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Embed,
    Mention,
    Reference,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Embed => write!(f, "embed"),
            RefKind::Mention => write!(f, "mention"),
            RefKind::Reference => write!(f, "reference"),
        }
    }
}

/// One reference found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRef<'a> {
    pub kind: RefKind,
    /// The referenced uid.
    pub uid: &'a str,
    /// The whole markup, wrapper included, exactly as written.
    pub markup: &'a str,
    /// Byte range of `markup` in the scanned text.
    pub span: Range<usize>,
}

/// A piece of scanned text: either plain text or a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Ref(BlockRef<'a>),
}

/// Split `text` into plain text and references, left to right, in a single
/// scan. Concatenating the segments' source text gives back `text`.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for caps in BLOCK_REF.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let (kind, uid) = if let Some(m) = caps.name("embed") {
            (RefKind::Embed, m.as_str())
        } else if let Some(m) = caps.name("mention") {
            (RefKind::Mention, m.as_str())
        } else if let Some(m) = caps.name("reference") {
            (RefKind::Reference, m.as_str())
        } else {
            continue;
        };

        if whole.start() > cursor {
            out.push(Segment::Text(&text[cursor..whole.start()]));
        }
        out.push(Segment::Ref(BlockRef {
            kind,
            uid,
            markup: whole.as_str(),
            span: whole.range(),
        }));
        cursor = whole.end();
    }

    if cursor < text.len() {
        out.push(Segment::Text(&text[cursor..]));
    }
    out
}
