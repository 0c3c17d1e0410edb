//! Error-tolerant CSS selector parser.
//!
//! Tokens are dispatched one at a time; malformed constructs (unclosed
//! brackets, dangling `|`, misplaced groups) become `invalid` nodes carrying
//! their raw text and parsing continues, matching CSS's error-recovery model.
//! The only fatal condition is the nesting-depth bound on parenthesized
//! groups.

use crate::grammar::tokenize_selector;
use crate::node::{
    CombinatorKind, Selector, SelectorKind, SelectorList, SelectorNode,
};
use microgram_shared::cursor::Cursor;
use microgram_shared::errors::{ParseError, ParseResult};
use microgram_shared::tokenizer::{text_between, Token, TokenKind};

/// Bound on `(...)` nesting, so pathological input errors out instead of
/// growing the stack without limit.
const MAX_NESTING_DEPTH: usize = 128;

/// Parser configuration.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// When true, `//` comments are recognised in addition to `/* */`.
    pub parse_line_comments: bool,
}

/// Parses a selector list with the default configuration.
pub fn parse_selector_list(source: &str) -> ParseResult<SelectorList> {
    parse_selector_list_with(source, &ParserConfig::default())
}

/// Parses a selector list.
///
/// Always succeeds with a result for any tokenizable input — inspect
/// `invalid` nodes for problems — except when the nesting-depth bound is
/// exceeded.
pub fn parse_selector_list_with(source: &str, config: &ParserConfig) -> ParseResult<SelectorList> {
    let tokens = tokenize_selector(source, config.parse_line_comments);
    let mut cursor = Cursor::new(&tokens);
    let mut parser = SelectorParser { source, depth: 0 };

    cursor.try_run(
        |token, selectors, cursor| {
            parser.handle_token(token, selectors, cursor)?;
            Ok(true)
        },
        SelectorList::new(),
    )
}

struct SelectorParser<'src> {
    source: &'src str,
    depth: usize,
}

impl SelectorParser<'_> {
    fn handle_token(
        &mut self,
        token: Token,
        selectors: &mut SelectorList,
        s: &mut Cursor,
    ) -> ParseResult<()> {
        ensure_selector(selectors, &token);

        match token.kind {
            TokenKind::Delim('.') => {
                let node = parse_class(token, s);
                push_node(selectors, node);
            }
            TokenKind::Delim(':') => {
                let node = parse_pseudo(token, s);
                push_node(selectors, node);
            }
            TokenKind::Delim('[') => {
                let node = self.parse_attribute(token, s);
                push_node(selectors, node);
            }
            TokenKind::Delim('#') => {
                let name = s.take(TokenKind::Text);
                let end = name.as_ref().map_or(token.end, |t| t.end);
                let node = SelectorNode::new(
                    SelectorKind::Id {
                        value: name.map(|t| t.value).unwrap_or_default(),
                        nodes: None,
                    },
                    token.start,
                    end,
                );
                push_node(selectors, node);
            }
            TokenKind::Delim('*') => {
                let node = SelectorNode::new(
                    SelectorKind::Star {
                        value: token.value,
                        namespace: None,
                        nodes: None,
                    },
                    token.start,
                    token.end,
                );
                push_node(selectors, node);
            }
            TokenKind::Delim('|') => self.parse_namespace(token, selectors, s),
            TokenKind::Delim('(') => self.parse_group(token, selectors, s)?,
            TokenKind::Delim(',') => {
                if let Some(selector) = selectors.last_mut() {
                    selector.end = token.start;
                    trim_combinators(selector);
                }
                let start = if s.done() {
                    token.end
                } else {
                    s.peek().map_or(token.end, |t| t.start)
                };
                selectors.push(Selector::empty(start));
            }
            TokenKind::Space
            | TokenKind::Delim('>')
            | TokenKind::Delim('~')
            | TokenKind::Delim('+') => {
                let node = parse_combinator(token, s);
                push_node(selectors, node);
            }
            TokenKind::Text => {
                let node = SelectorNode::new(
                    SelectorKind::Element {
                        value: token.value,
                        namespace: None,
                        nodes: None,
                    },
                    token.start,
                    token.end,
                );
                push_node(selectors, node);
            }
            kind if kind.is_comment() => {
                let node = SelectorNode::new(
                    SelectorKind::Comment { value: token.value },
                    token.start,
                    token.end,
                );
                push_node(selectors, node);
            }
            _ => {
                let node = SelectorNode::new(
                    SelectorKind::Invalid { value: token.value },
                    token.start,
                    token.end,
                );
                push_node(selectors, node);
            }
        }

        if s.done() {
            if let Some(selector) = selectors.last_mut() {
                selector.end = selector.nodes.last().map_or(selector.start, |n| n.end);
                trim_combinators(selector);
            }
        }

        Ok(())
    }

    /// `[...]`: scan token-by-token until `]` or end of input. A closed block
    /// keeps its raw interior text; an unclosed one becomes `invalid`.
    fn parse_attribute(&mut self, token: Token, s: &mut Cursor) -> SelectorNode {
        log::trace!("parse_attribute");

        let start = token.start;
        let block = s.run(
            |token, block: &mut Vec<Token>, _| {
                let closing = token.kind == TokenKind::Delim(']');
                block.push(token);
                !closing
            },
            vec![token],
        );

        let end = block.last().map_or(start, |t| t.end);
        let closed = block.last().map_or(false, |t| t.kind == TokenKind::Delim(']'));
        if closed {
            let value = if block.len() > 2 {
                text_between(&block, 1, block.len() - 1, self.source)
            } else {
                String::new()
            };
            SelectorNode::new(SelectorKind::Attribute { value, nodes: None }, start, end)
        } else {
            SelectorNode::new(
                SelectorKind::Invalid {
                    value: text_between(&block, 0, block.len(), self.source),
                },
                start,
                end,
            )
        }
    }

    /// `|`: reassign the preceding element/star's value as its namespace and
    /// take the following name as the new value; anything else is invalid.
    fn parse_namespace(&mut self, token: Token, selectors: &mut SelectorList, s: &mut Cursor) {
        log::trace!("parse_namespace");

        let name = match s.next() {
            Some(t) if t.kind == TokenKind::Text => Some(t),
            _ => {
                s.back();
                None
            }
        };

        let Some(selector) = selectors.last_mut() else {
            return;
        };

        let fuses = name.is_some() && selector.nodes.last().map_or(false, can_take_namespace);
        if fuses {
            if let (Some(name), Some(prev)) = (name, selector.nodes.last_mut()) {
                let namespace = match &mut *prev.kind {
                    SelectorKind::Element { value, .. } | SelectorKind::Star { value, .. } => {
                        std::mem::take(value)
                    }
                    _ => String::new(),
                };
                prev.end = name.end;
                *prev.kind = SelectorKind::Element {
                    value: name.value,
                    namespace: Some(namespace),
                    nodes: None,
                };
            }
        } else {
            let end = name.as_ref().map_or(token.end, |t| t.end);
            let mut value = token.value;
            if let Some(name) = name {
                value.push_str(&name.value);
            }
            selector
                .nodes
                .push(SelectorNode::new(SelectorKind::Invalid { value }, token.start, end));
        }
    }

    /// `(...)`: recursively parse a nested selector list and attach it to the
    /// preceding node, or degrade the whole span to `invalid`.
    fn parse_group(
        &mut self,
        token: Token,
        selectors: &mut SelectorList,
        s: &mut Cursor,
    ) -> ParseResult<()> {
        log::trace!("parse_group");

        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::with_offset(
                "selector group nesting is too deep",
                token.start,
            ));
        }

        let mut nested = s.try_run(
            |token, nested: &mut SelectorList, cursor| {
                if token.kind == TokenKind::Delim(')') {
                    if let Some(selector) = nested.last_mut() {
                        selector.end = selector.nodes.last().map_or(selector.start, |n| n.end);
                    }
                    return Ok(false);
                }
                self.handle_token(token, nested, cursor)?;
                Ok(true)
            },
            SelectorList::new(),
        )?;
        self.depth -= 1;

        // The nested run stops either on the closing `)` (the current token)
        // or by exhausting the input, in which case the whole rest of the
        // source belongs to the unclosed group.
        let ended = s.current().cloned();
        let closed = ended
            .as_ref()
            .map_or(false, |t| t.kind == TokenKind::Delim(')'));
        let end = match &ended {
            Some(t) if closed => t.end,
            _ => self.source.len(),
        };

        let Some(selector) = selectors.last_mut() else {
            return Ok(());
        };

        let attachable = selector.nodes.last().map_or(false, |prev| {
            !prev.has_nested() && !prev.is_invalid() && !prev.is_combinator() && !prev.is_comment()
        });

        if closed && attachable {
            if let Some(last) = nested.last_mut() {
                trim_combinators(last);
            }
            if let Some(prev) = selector.nodes.last_mut() {
                prev.attach_nested(nested);
                prev.end = end;
            }
        } else {
            let value = self.source.get(token.start..end).unwrap_or("").to_string();
            selector
                .nodes
                .push(SelectorNode::new(SelectorKind::Invalid { value }, token.start, end));
        }

        Ok(())
    }
}

/// `.`: any adjacent comments are preserved, then an optional name; a
/// missing name yields an empty-value class.
fn parse_class(token: Token, s: &mut Cursor) -> SelectorNode {
    log::trace!("parse_class");

    let comments = take_comments(s);
    let name = s.take(TokenKind::Text);
    let end = name
        .as_ref()
        .map(|t| t.end)
        .or_else(|| comments.last().map(|c| c.end))
        .unwrap_or(token.end);

    SelectorNode::new(
        SelectorKind::Class {
            value: name.map(|t| t.value).unwrap_or_default(),
            dot_comments: comments,
            nodes: None,
        },
        token.start,
        end,
    )
}

/// `:`/`::`: comments may sit between the colons and before the name.
fn parse_pseudo(token: Token, s: &mut Cursor) -> SelectorNode {
    log::trace!("parse_pseudo");

    let first_comments = take_comments(s);
    let second_colon = s.take(TokenKind::Delim(':'));

    match second_colon {
        None => {
            let name = s.take(TokenKind::Text);
            let end = name
                .as_ref()
                .map(|t| t.end)
                .or_else(|| first_comments.last().map(|c| c.end))
                .unwrap_or(token.end);
            SelectorNode::new(
                SelectorKind::PseudoClass {
                    value: name.map(|t| t.value).unwrap_or_default(),
                    colon_comments: first_comments,
                    nodes: None,
                },
                token.start,
                end,
            )
        }
        Some(colon) => {
            let second_comments = take_comments(s);
            let name = s.take(TokenKind::Text);
            let end = name
                .as_ref()
                .map(|t| t.end)
                .or_else(|| second_comments.last().map(|c| c.end))
                .unwrap_or(colon.end);
            SelectorNode::new(
                SelectorKind::PseudoElement {
                    value: name.map(|t| t.value).unwrap_or_default(),
                    first_comments,
                    second_comments,
                    nodes: None,
                },
                token.start,
                end,
            )
        }
    }
}

/// Collapses at most one leading whitespace run, one symbolic combinator and
/// one trailing whitespace run into a single combinator node. Two adjacent
/// symbolic combinators are never merged.
fn parse_combinator(token: Token, s: &mut Cursor) -> SelectorNode {
    log::trace!("parse_combinator");

    let mut before_token: Option<Token> = None;
    let mut after_token: Option<Token> = None;
    let mut current = token;

    match s.next() {
        Some(t) if current.kind == TokenKind::Space && is_combinator_token(&t) => {
            before_token = Some(std::mem::replace(&mut current, t));
            match s.next() {
                Some(t) if t.kind == TokenKind::Space => after_token = Some(t),
                _ => s.back(),
            }
        }
        _ => s.back(),
    }

    let start = before_token.as_ref().map_or(current.start, |t| t.start);
    let end = after_token.as_ref().map_or(current.end, |t| t.end);
    let mut before = before_token.map(|t| t.value).unwrap_or_default();
    let after = after_token.map(|t| t.value).unwrap_or_default();

    let (kind, value) = match current.kind {
        TokenKind::Space => {
            // Only the final whitespace character is the combinator itself;
            // the rest of the run is formatting.
            let split = current
                .value
                .char_indices()
                .last()
                .map_or(0, |(i, _)| i);
            before.push_str(current.value.get(..split).unwrap_or(""));
            (
                CombinatorKind::Descendant,
                current.value.get(split..).unwrap_or("").to_string(),
            )
        }
        TokenKind::Delim('>') => (CombinatorKind::Child, current.value),
        TokenKind::Delim('~') => (CombinatorKind::Sibling, current.value),
        _ => (CombinatorKind::Adjacent, current.value),
    };

    SelectorNode::new(
        SelectorKind::Combinator {
            kind,
            value,
            before,
            after,
        },
        start,
        end,
    )
}

fn is_combinator_token(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Space | TokenKind::Delim('>') | TokenKind::Delim('~') | TokenKind::Delim('+')
    )
}

fn can_take_namespace(node: &SelectorNode) -> bool {
    match &*node.kind {
        SelectorKind::Element { value, nodes, .. } | SelectorKind::Star { value, nodes, .. } => {
            nodes.is_none()
                && !value
                    .chars()
                    .next()
                    .map_or(false, |c| c.is_ascii_digit())
        }
        _ => false,
    }
}

fn take_comments(s: &mut Cursor) -> Vec<SelectorNode> {
    s.take_many(TokenKind::MultiComment)
        .into_iter()
        .map(|t| SelectorNode::new(SelectorKind::Comment { value: t.value }, t.start, t.end))
        .collect()
}

fn ensure_selector(selectors: &mut SelectorList, token: &Token) {
    if selectors.is_empty() {
        selectors.push(Selector::empty(token.start));
    }
}

fn push_node(selectors: &mut SelectorList, node: SelectorNode) {
    if let Some(selector) = selectors.last_mut() {
        selector.nodes.push(node);
    }
}

/// A leading/trailing bare descendant combinator carries no structural
/// meaning; its text is folded into the selector's `before`/`after`.
fn trim_combinators(selector: &mut Selector) {
    fn is_space_combinator(node: &SelectorNode) -> bool {
        matches!(
            &*node.kind,
            SelectorKind::Combinator {
                kind: CombinatorKind::Descendant,
                ..
            }
        )
    }

    fn combinator_text(node: SelectorNode) -> String {
        match *node.kind {
            SelectorKind::Combinator {
                before,
                value,
                after,
                ..
            } => format!("{}{}{}", before, value, after),
            _ => String::new(),
        }
    }

    let mut before = String::new();
    let mut after = String::new();

    if selector.nodes.len() > 1 && selector.nodes.last().map_or(false, is_space_combinator) {
        if let Some(node) = selector.nodes.pop() {
            after = combinator_text(node);
        }
    }
    if selector.nodes.first().map_or(false, is_space_combinator) {
        let node = selector.nodes.remove(0);
        before = combinator_text(node);
    }

    selector.before = before;
    selector.after = after;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::stringify_selector_list;
    use simple_logger::SimpleLogger;
    use test_case::test_case;

    fn parse(source: &str) -> SelectorList {
        parse_selector_list(source).expect("parse should succeed")
    }

    #[test_case("" ; "empty")]
    #[test_case("a" ; "element")]
    #[test_case(".a" ; "class")]
    #[test_case("#a" ; "id")]
    #[test_case("*" ; "star")]
    #[test_case("a.b#c" ; "compound")]
    #[test_case("a b" ; "descendant")]
    #[test_case("a > b" ; "child spaced")]
    #[test_case("a>b" ; "child tight")]
    #[test_case("a ~ b + c" ; "siblings")]
    #[test_case("a , b" ; "comma with spaces")]
    #[test_case("a,b,c" ; "comma tight")]
    #[test_case("a," ; "trailing comma")]
    #[test_case("a ," ; "space before trailing comma")]
    #[test_case(" a " ; "padded")]
    #[test_case("  a  >  b  " ; "heavily padded")]
    #[test_case(":hover" ; "pseudo class")]
    #[test_case("::before" ; "pseudo element")]
    #[test_case(":" ; "bare colon")]
    #[test_case("::" ; "bare double colon")]
    #[test_case(":not(.a, .b)" ; "pseudo args")]
    #[test_case(":not(:where(#a))" ; "nested pseudo args")]
    #[test_case("a()" ; "empty group")]
    #[test_case("(a)" ; "group without host")]
    #[test_case(":is(a" ; "unclosed group")]
    #[test_case("((" ; "nested unclosed groups")]
    #[test_case("a(b(c" ; "deeply unclosed groups")]
    #[test_case("[href]" ; "attribute")]
    #[test_case("[href='a b']" ; "attribute with string")]
    #[test_case("[href=\"a]b\"]" ; "attribute with bracket in string")]
    #[test_case("[unclosed" ; "unclosed attribute")]
    #[test_case("ns|div" ; "namespaced element")]
    #[test_case("*|div" ; "namespaced star")]
    #[test_case("|div" ; "dangling namespace")]
    #[test_case("5|x" ; "invalid namespace")]
    #[test_case("a|" ; "namespace without name")]
    #[test_case("/*c*/a/*d*/" ; "comments around element")]
    #[test_case("./*c*/a" ; "dot comment")]
    #[test_case(":/*c*/hover" ; "colon comment")]
    #[test_case(":/*a*/:/*b*/before" ; "double colon comments")]
    #[test_case("a/*c*/ /*d*/b" ; "comment between combinator")]
    #[test_case("a{b}" ; "stray braces")]
    #[test_case("'text'" ; "stray string")]
    #[test_case("#foo > .bar + div.k1.k2 [id='baz']:hello(2):not(:where(#yolo))::before" ; "kitchen sink")]
    fn round_trip(source: &str) {
        let selectors = parse(source);
        assert_eq!(stringify_selector_list(&selectors), source);

        // Re-parsing the stringified form yields the same structure.
        let again = parse(&stringify_selector_list(&selectors));
        assert_eq!(again, selectors);
    }

    #[test]
    fn comma_splits_selectors() {
        let selectors = parse("a , b");
        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0].nodes.len(), 1);
        assert_eq!(selectors[0].after, " ");
        assert_eq!(selectors[1].before, " ");
        assert_eq!(selectors[1].nodes.len(), 1);
    }

    #[test]
    fn trailing_comma_opens_empty_selector() {
        let selectors = parse("a,");
        assert_eq!(selectors.len(), 2);
        assert!(selectors[1].nodes.is_empty());
        assert_eq!(selectors[1].start, selectors[1].end);
    }

    #[test]
    fn leading_space_folds_into_before() {
        let selectors = parse(" a");
        assert_eq!(selectors[0].before, " ");
        assert_eq!(selectors[0].nodes.len(), 1);
        assert!(!selectors[0].nodes[0].is_combinator());
    }

    #[test]
    fn trailing_space_folds_into_after() {
        let selectors = parse("a\t ");
        assert_eq!(selectors[0].after, "\t ");
        assert_eq!(selectors[0].nodes.len(), 1);
    }

    #[test]
    fn symbolic_combinator_keeps_surrounding_whitespace() {
        // A leading symbolic combinator is structural: it stays in `nodes`
        // and owns the whitespace around it.
        let selectors = parse(" > a");
        assert_eq!(selectors[0].before, "");
        let combinator = &selectors[0].nodes[0];
        assert!(matches!(
            &*combinator.kind,
            SelectorKind::Combinator {
                kind: CombinatorKind::Child,
                before,
                after,
                ..
            } if before == " " && after == " "
        ));
    }

    #[test]
    fn adjacent_symbolic_combinators_stay_separate() {
        // `>` absorbs the whitespace around it; `~` stays its own node and
        // the space before `b` becomes a descendant combinator.
        let selectors = parse("a > ~ b");
        let kinds: Vec<_> = selectors[0]
            .nodes
            .iter()
            .filter_map(|n| match &*n.kind {
                SelectorKind::Combinator { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                CombinatorKind::Child,
                CombinatorKind::Sibling,
                CombinatorKind::Descendant
            ]
        );
    }

    #[test]
    fn descendant_combinator_splits_run() {
        let selectors = parse("a  b");
        assert!(matches!(
            &*selectors[0].nodes[1].kind,
            SelectorKind::Combinator {
                kind: CombinatorKind::Descendant,
                before,
                value,
                after,
            } if before == " " && value == " " && after.is_empty()
        ));
    }

    #[test]
    fn namespace_fuses_onto_element() {
        let selectors = parse("ns|div");
        assert_eq!(selectors[0].nodes.len(), 1);
        assert!(matches!(
            &*selectors[0].nodes[0].kind,
            SelectorKind::Element {
                value,
                namespace: Some(ns),
                ..
            } if value == "div" && ns == "ns"
        ));
    }

    #[test]
    fn namespace_fuses_onto_star() {
        let selectors = parse("*|div");
        assert!(matches!(
            &*selectors[0].nodes[0].kind,
            SelectorKind::Element {
                value,
                namespace: Some(ns),
                ..
            } if value == "div" && ns == "*"
        ));
    }

    #[test]
    fn namespace_without_host_is_invalid() {
        let selectors = parse("|div");
        assert_eq!(selectors[0].nodes.len(), 1);
        assert!(matches!(
            &*selectors[0].nodes[0].kind,
            SelectorKind::Invalid { value } if value == "|div"
        ));
    }

    #[test]
    fn namespace_on_numeric_value_is_invalid() {
        let selectors = parse("5|x");
        assert_eq!(selectors[0].nodes.len(), 2);
        assert!(matches!(
            &*selectors[0].nodes[1].kind,
            SelectorKind::Invalid { value } if value == "|x"
        ));
    }

    #[test]
    fn pseudo_class_arguments_attach() {
        let selectors = parse(":not(.a, .b)");
        let pseudo = &selectors[0].nodes[0];
        let nested = pseudo.nested_nodes().expect("nested list");
        assert_eq!(nested.len(), 2);
        assert!(matches!(
            &*pseudo.kind,
            SelectorKind::PseudoClass { value, .. } if value == "not"
        ));
    }

    #[test]
    fn group_without_host_is_invalid() {
        let selectors = parse("(a)");
        assert!(matches!(
            &*selectors[0].nodes[0].kind,
            SelectorKind::Invalid { value } if value == "(a)"
        ));
    }

    #[test]
    fn second_group_on_same_host_is_invalid() {
        let selectors = parse("a()()");
        assert_eq!(selectors[0].nodes.len(), 2);
        assert!(selectors[0].nodes[0].has_nested());
        assert!(selectors[0].nodes[1].is_invalid());
    }

    #[test]
    fn unclosed_group_is_invalid() {
        let selectors = parse("a(b");
        assert_eq!(selectors[0].nodes.len(), 2);
        assert!(matches!(
            &*selectors[0].nodes[1].kind,
            SelectorKind::Invalid { value } if value == "(b"
        ));
    }

    #[test]
    fn attribute_keeps_raw_interior() {
        let selectors = parse("[ href ~= 'a b' ]");
        assert!(matches!(
            &*selectors[0].nodes[0].kind,
            SelectorKind::Attribute { value, .. } if value == " href ~= 'a b' "
        ));
    }

    #[test]
    fn unclosed_attribute_is_invalid() {
        let selectors = parse("[x");
        assert!(matches!(
            &*selectors[0].nodes[0].kind,
            SelectorKind::Invalid { value } if value == "[x"
        ));
    }

    #[test]
    fn class_comments_are_preserved() {
        let selectors = parse("./*c*/name");
        assert!(matches!(
            &*selectors[0].nodes[0].kind,
            SelectorKind::Class {
                value,
                dot_comments,
                ..
            } if value == "name" && dot_comments.len() == 1
        ));
    }

    #[test]
    fn line_comments_are_config_gated() {
        let config = ParserConfig {
            parse_line_comments: true,
        };
        let selectors =
            parse_selector_list_with("//c\na", &config).expect("parse should succeed");
        assert!(selectors[0].nodes[0].is_comment());

        let selectors = parse("//c");
        assert!(matches!(
            &*selectors[0].nodes[0].kind,
            SelectorKind::Element { value, .. } if value == "//c"
        ));
    }

    #[test]
    fn nested_selectors_are_trimmed() {
        let selectors = parse(":not( a , b )");
        let nested = selectors[0].nodes[0].nested_nodes().expect("nested list");
        assert_eq!(nested[0].before, " ");
        assert_eq!(nested[0].after, " ");
        assert_eq!(nested[1].before, " ");
        assert_eq!(nested[1].after, " ");
        assert_eq!(stringify_selector_list(&selectors), ":not( a , b )");
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let mut source = String::new();
        for _ in 0..200 {
            source.push_str("a(");
        }
        let result = parse_selector_list(&source);
        assert!(result.is_err());
    }

    #[test]
    fn spans_cover_nodes() {
        let selectors = parse("a.b, c");
        assert_eq!(selectors[0].start, 0);
        assert_eq!(selectors[0].end, 3);
        // The second selector starts at the whitespace that was folded into
        // its `before`.
        assert_eq!(selectors[1].start, 4);
        assert_eq!(selectors[1].end, 6);
        assert_eq!(selectors[0].nodes[1].start, 1);
        assert_eq!(selectors[0].nodes[1].end, 3);
    }

    #[test]
    fn ast_serializes() {
        let selectors = parse(".a");
        let json = serde_json::to_value(&selectors).expect("serialize");
        assert_eq!(json[0]["nodes"][0]["kind"]["Class"]["value"], "a");
    }

    #[test]
    #[ignore]
    fn trace_parse() {
        SimpleLogger::new().init().unwrap();

        let source = "#foo > .bar + div.k1.k2 [id='baz']:not(:where(#yolo))::before";
        let selectors = parse(source);
        assert_eq!(stringify_selector_list(&selectors), source);
    }
}
