//! Selector AST nodes and their canonical stringification.
//!
//! Stringification is the primary correctness contract of the selector
//! parser: concatenating the `Display` form of every node of a selector
//! list, joined by `,`, reproduces the original source exactly, including
//! all comments and whitespace.

use core::fmt::{Display, Formatter};
use itertools::Itertools;
use serde::Serialize;

/// A comma-joined forest of selectors.
pub type SelectorList = Vec<Selector>;

/// One selector of a selector list: an ordered sequence of compound-selector
/// nodes and combinators, plus the leading/trailing combinator whitespace
/// that was trimmed out of `nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    pub nodes: Vec<SelectorNode>,
    /// Leading whitespace trimmed off a bare descendant combinator.
    pub before: String,
    /// Trailing whitespace trimmed off a bare descendant combinator.
    pub after: String,
    pub start: usize,
    pub end: usize,
}

impl Selector {
    pub(crate) fn empty(start: usize) -> Self {
        Self {
            nodes: Vec::new(),
            before: String::new(),
            after: String::new(),
            start,
            end: start,
        }
    }
}

/// A node in a selector tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorNode {
    pub kind: Box<SelectorKind>,
    pub start: usize,
    pub end: usize,
}

impl SelectorNode {
    pub(crate) fn new(kind: SelectorKind, start: usize, end: usize) -> Self {
        Self {
            kind: Box::new(kind),
            start,
            end,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(&*self.kind, SelectorKind::Invalid { .. })
    }

    pub fn is_comment(&self) -> bool {
        matches!(&*self.kind, SelectorKind::Comment { .. })
    }

    pub fn is_combinator(&self) -> bool {
        matches!(&*self.kind, SelectorKind::Combinator { .. })
    }

    /// The nested selector list attached to this node, when it carries one.
    pub fn nested_nodes(&self) -> Option<&SelectorList> {
        match &*self.kind {
            SelectorKind::Element { nodes, .. }
            | SelectorKind::Star { nodes, .. }
            | SelectorKind::Id { nodes, .. }
            | SelectorKind::Class { nodes, .. }
            | SelectorKind::Attribute { nodes, .. }
            | SelectorKind::PseudoClass { nodes, .. }
            | SelectorKind::PseudoElement { nodes, .. } => nodes.as_ref(),
            _ => None,
        }
    }

    /// True when a parenthesized group is already attached.
    pub fn has_nested(&self) -> bool {
        self.nested_nodes().is_some()
    }

    pub(crate) fn attach_nested(&mut self, list: SelectorList) {
        match &mut *self.kind {
            SelectorKind::Element { nodes, .. }
            | SelectorKind::Star { nodes, .. }
            | SelectorKind::Id { nodes, .. }
            | SelectorKind::Class { nodes, .. }
            | SelectorKind::Attribute { nodes, .. }
            | SelectorKind::PseudoClass { nodes, .. }
            | SelectorKind::PseudoElement { nodes, .. } => *nodes = Some(list),
            _ => {}
        }
    }
}

/// Relationship operator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombinatorKind {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
    /// `~`
    Sibling,
    /// `+`
    Adjacent,
}

/// The closed set of selector node kinds.
///
/// Containers (everything except combinators, comments and invalid nodes)
/// may own a nested [`SelectorList`] when followed by a parenthesized group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectorKind {
    /// A type selector, optionally namespaced (`ns|div`).
    Element {
        value: String,
        namespace: Option<String>,
        nodes: Option<SelectorList>,
    },
    /// The universal selector `*`.
    Star {
        value: String,
        namespace: Option<String>,
        nodes: Option<SelectorList>,
    },
    /// `#id`
    Id {
        value: String,
        nodes: Option<SelectorList>,
    },
    /// `.class`, with any comments between the dot and the name.
    Class {
        value: String,
        dot_comments: Vec<SelectorNode>,
        nodes: Option<SelectorList>,
    },
    /// `[...]` with the raw bracket-interior text.
    Attribute {
        value: String,
        nodes: Option<SelectorList>,
    },
    /// `:name`, with any comments after the colon.
    PseudoClass {
        value: String,
        colon_comments: Vec<SelectorNode>,
        nodes: Option<SelectorList>,
    },
    /// `::name`, with comment slots for each of the two colons.
    PseudoElement {
        value: String,
        first_comments: Vec<SelectorNode>,
        second_comments: Vec<SelectorNode>,
        nodes: Option<SelectorList>,
    },
    /// A combinator with the whitespace that was collapsed around it.
    Combinator {
        kind: CombinatorKind,
        value: String,
        before: String,
        after: String,
    },
    /// A comment, kept in place.
    Comment { value: String },
    /// Raw text of a construct the parser could not make sense of.
    Invalid { value: String },
}

fn fmt_comments(f: &mut Formatter<'_>, comments: &[SelectorNode]) -> std::fmt::Result {
    for comment in comments {
        write!(f, "{}", comment)?;
    }
    Ok(())
}

fn fmt_nested(f: &mut Formatter<'_>, nodes: &Option<SelectorList>) -> std::fmt::Result {
    match nodes {
        Some(list) => write!(f, "({})", stringify_selector_list(list)),
        None => Ok(()),
    }
}

impl Display for SelectorNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &*self.kind {
            SelectorKind::Element {
                value,
                namespace,
                nodes,
            } => {
                if let Some(namespace) = namespace {
                    write!(f, "{}|", namespace)?;
                }
                write!(f, "{}", value)?;
                fmt_nested(f, nodes)
            }
            SelectorKind::Star {
                value,
                namespace,
                nodes,
            } => {
                write!(f, "{}", value)?;
                if let Some(namespace) = namespace {
                    write!(f, "|{}", namespace)?;
                }
                fmt_nested(f, nodes)
            }
            SelectorKind::Id { value, nodes } => {
                write!(f, "#{}", value)?;
                fmt_nested(f, nodes)
            }
            SelectorKind::Class {
                value,
                dot_comments,
                nodes,
            } => {
                write!(f, ".")?;
                fmt_comments(f, dot_comments)?;
                write!(f, "{}", value)?;
                fmt_nested(f, nodes)
            }
            SelectorKind::Attribute { value, nodes } => {
                write!(f, "[{}]", value)?;
                fmt_nested(f, nodes)
            }
            SelectorKind::PseudoClass {
                value,
                colon_comments,
                nodes,
            } => {
                write!(f, ":")?;
                fmt_comments(f, colon_comments)?;
                write!(f, "{}", value)?;
                fmt_nested(f, nodes)
            }
            SelectorKind::PseudoElement {
                value,
                first_comments,
                second_comments,
                nodes,
            } => {
                write!(f, ":")?;
                fmt_comments(f, first_comments)?;
                write!(f, ":")?;
                fmt_comments(f, second_comments)?;
                write!(f, "{}", value)?;
                fmt_nested(f, nodes)
            }
            SelectorKind::Combinator {
                value,
                before,
                after,
                ..
            } => write!(f, "{}{}{}", before, value, after),
            SelectorKind::Comment { value } | SelectorKind::Invalid { value } => {
                write!(f, "{}", value)
            }
        }
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.before)?;
        for node in &self.nodes {
            write!(f, "{}", node)?;
        }
        write!(f, "{}", self.after)
    }
}

/// Stringifies a selector list back to source form, selectors joined by `,`.
pub fn stringify_selector_list(selectors: &[Selector]) -> String {
    selectors.iter().join(",")
}
