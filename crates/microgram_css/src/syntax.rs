//! Parser for the value-definition syntax used to describe CSS property
//! value grammars (`<length-percentage> | auto`, `bold && <family-name>#`).
//!
//! Token-driven construction over the same engine as the selector parser,
//! with two distinguishing algorithms: multiplier attachment to the most
//! recently completed component, and explicit operator-precedence resolution
//! among the four grammar combinators. Unlike the selector parser this one is
//! fail-fast: a malformed grammar definition has no useful degraded
//! interpretation, so every error aborts the parse.

use crate::errors::SyntaxError;
use crate::grammar::tokenize_syntax;
use core::fmt::{Display, Formatter};
use microgram_shared::cursor::Cursor;
use microgram_shared::tokenizer::{text_between, Token, TokenKind};
use serde::Serialize;

/// Bound on `[...]` nesting.
const MAX_NESTING_DEPTH: usize = 128;

/// Grouping operator of a combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GroupCombinators {
    /// All components must be matched, in order (space delimited).
    Juxtaposition,
    /// `&&` — all components must be matched, in any order.
    AllAnyOrder,
    /// `||` — at least one component must be matched, in any order.
    AtLeastOneAnyOrder,
    /// `|` — exactly one component must be matched.
    ExactlyOne,
}

impl Display for GroupCombinators {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupCombinators::Juxtaposition => write!(f, " "),
            GroupCombinators::AllAnyOrder => write!(f, "&&"),
            GroupCombinators::AtLeastOneAnyOrder => write!(f, "||"),
            GroupCombinators::ExactlyOne => write!(f, "|"),
        }
    }
}

/// One bound of a cardinality or numeric range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum RangeBound {
    Finite(f64),
    Infinity,
    NegativeInfinity,
}

impl Display for RangeBound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeBound::Finite(value) => write!(f, "{}", value),
            RangeBound::Infinity => write!(f, "∞"),
            RangeBound::NegativeInfinity => write!(f, "-∞"),
        }
    }
}

/// A `(min, max)` range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    pub min: RangeBound,
    pub max: RangeBound,
}

impl Range {
    pub fn new(min: RangeBound, max: RangeBound) -> Self {
        Self { min, max }
    }

    /// Finite range, for the common `{min,max}` case.
    pub fn finite(min: f64, max: f64) -> Self {
        Self::new(RangeBound::Finite(min), RangeBound::Finite(max))
    }
}

/// Multipliers attached to exactly one component at a time.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Multipliers {
    /// Cardinality range from `!`/`?`/`+`/`*`/`{min,max}`.
    pub range: Option<Range>,
    /// The `#` comma-repeatable marker.
    pub list: bool,
}

/// A component of a value-definition-syntax tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SyntaxComponent {
    /// `<name>`, optionally with a numeric range (`<angle [0,360]>`).
    TypeDefinition {
        name: String,
        range: Option<Range>,
        multipliers: Option<Multipliers>,
    },
    /// `<'name'>` — a reference to another property's grammar.
    Property {
        name: String,
        range: Option<Range>,
        multipliers: Option<Multipliers>,
    },
    /// A generic keyword like `left` or `ease-in`.
    GenericKeyword {
        keyword: String,
        multipliers: Option<Multipliers>,
    },
    /// A literal character or quoted literal; `enclosed` marks the quoted
    /// form.
    Literal {
        value: String,
        enclosed: bool,
        multipliers: Option<Multipliers>,
    },
    /// One of the four combinator groups. Always has at least two components
    /// once parsing completes.
    Combination {
        combinator: GroupCombinators,
        components: Vec<SyntaxComponent>,
    },
    /// An explicit `[ ... ]` group; the only combination that can carry
    /// multipliers.
    Group {
        components: Vec<SyntaxComponent>,
        multipliers: Option<Multipliers>,
    },
}

impl SyntaxComponent {
    pub fn keyword(keyword: &str) -> Self {
        SyntaxComponent::GenericKeyword {
            keyword: keyword.to_string(),
            multipliers: None,
        }
    }

    pub fn literal(value: &str) -> Self {
        SyntaxComponent::Literal {
            value: value.to_string(),
            enclosed: false,
            multipliers: None,
        }
    }

    pub fn enclosed_literal(value: &str) -> Self {
        SyntaxComponent::Literal {
            value: value.to_string(),
            enclosed: true,
            multipliers: None,
        }
    }

    pub fn data_type(name: &str, range: Option<Range>) -> Self {
        SyntaxComponent::TypeDefinition {
            name: name.to_string(),
            range,
            multipliers: None,
        }
    }

    pub fn property(name: &str, range: Option<Range>) -> Self {
        SyntaxComponent::Property {
            name: name.to_string(),
            range,
            multipliers: None,
        }
    }

    pub fn group(components: Vec<SyntaxComponent>) -> Self {
        SyntaxComponent::Group {
            components,
            multipliers: None,
        }
    }

    pub fn combination(combinator: GroupCombinators, components: Vec<SyntaxComponent>) -> Self {
        SyntaxComponent::Combination {
            combinator,
            components,
        }
    }

    /// The combinator of a combination, `None` for any other component.
    pub fn combinator(&self) -> Option<GroupCombinators> {
        match self {
            SyntaxComponent::Combination { combinator, .. } => Some(*combinator),
            _ => None,
        }
    }

    /// `&&`, `||` and `|` combinations: the components a multiplier can
    /// never attach to.
    fn is_low_level_group(&self) -> bool {
        matches!(
            self.combinator(),
            Some(
                GroupCombinators::AllAnyOrder
                    | GroupCombinators::AtLeastOneAnyOrder
                    | GroupCombinators::ExactlyOne
            )
        )
    }

    fn multipliers_mut(&mut self) -> Option<&mut Option<Multipliers>> {
        match self {
            SyntaxComponent::TypeDefinition { multipliers, .. }
            | SyntaxComponent::Property { multipliers, .. }
            | SyntaxComponent::GenericKeyword { multipliers, .. }
            | SyntaxComponent::Literal { multipliers, .. }
            | SyntaxComponent::Group { multipliers, .. } => Some(multipliers),
            SyntaxComponent::Combination { .. } => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            SyntaxComponent::TypeDefinition { .. } => "data type",
            SyntaxComponent::Property { .. } => "property",
            SyntaxComponent::GenericKeyword { .. } => "keyword",
            SyntaxComponent::Literal { .. } => "literal",
            SyntaxComponent::Combination { .. } => "combination",
            SyntaxComponent::Group { .. } => "group",
        }
    }
}

/// Parses a value-definition-syntax string into its single root component.
pub fn parse_value_syntax(source: &str) -> Result<SyntaxComponent, SyntaxError> {
    let tokens = tokenize_syntax(source);
    let mut cursor = Cursor::new(&tokens);
    let mut parser = SyntaxParser { source, depth: 0 };

    let mut ast = cursor.try_run(
        |token, ast, cursor| parser.handle_token(token, ast, cursor),
        Vec::new(),
    )?;
    apply_precedence(&mut ast)?;
    ast.pop().ok_or(SyntaxError::EmptySyntax)
}

/// Partial stringifier: defined for `Property`, `TypeDefinition` and
/// `Literal` components; anything else is a reported error.
pub fn stringify_component(component: &SyntaxComponent) -> Result<String, SyntaxError> {
    fn range_suffix(range: &Option<Range>) -> String {
        range
            .map(|r| format!(" [{},{}]", r.min, r.max))
            .unwrap_or_default()
    }

    match component {
        SyntaxComponent::Property { name, range, .. } => {
            Ok(format!("<'{}'{}>", name, range_suffix(range)))
        }
        SyntaxComponent::TypeDefinition { name, range, .. } => {
            Ok(format!("<{}{}>", name, range_suffix(range)))
        }
        SyntaxComponent::Literal {
            value, enclosed, ..
        } => Ok(if *enclosed {
            format!("'{}'", value)
        } else {
            value.clone()
        }),
        other => Err(SyntaxError::UnsupportedStringify(other.kind_name())),
    }
}

struct SyntaxParser<'src> {
    source: &'src str,
    depth: usize,
}

#[derive(PartialEq)]
enum NameKind {
    DataType,
    Property,
    Invalid,
}

impl SyntaxParser<'_> {
    fn handle_token(
        &mut self,
        token: Token,
        ast: &mut Vec<SyntaxComponent>,
        s: &mut Cursor,
    ) -> Result<bool, SyntaxError> {
        match token.kind {
            TokenKind::Delim('<') => {
                let component = self.parse_type_definition(s)?;
                ast.push(component);
            }
            TokenKind::Delim('[') => {
                self.depth += 1;
                if self.depth > MAX_NESTING_DEPTH {
                    return Err(SyntaxError::NestingTooDeep);
                }
                let mut components = s.try_run(
                    |token, components, cursor| self.handle_token(token, components, cursor),
                    Vec::new(),
                )?;
                self.depth -= 1;

                let closed = s
                    .current()
                    .map_or(false, |t| t.kind == TokenKind::Delim(']'));
                if !closed {
                    return Err(SyntaxError::UnclosedGroup);
                }
                apply_precedence(&mut components)?;
                ast.push(SyntaxComponent::Group {
                    components,
                    multipliers: None,
                });
            }
            TokenKind::Delim(']') => {
                if self.depth == 0 {
                    return Err(SyntaxError::UnexpectedToken(token.value));
                }
                // Terminate the nested run; the `[` handler resumes right
                // after this token.
                return Ok(false);
            }
            TokenKind::Text => self.parse_text(token, ast, s)?,
            TokenKind::Delim(',')
            | TokenKind::Delim('/')
            | TokenKind::Delim('(')
            | TokenKind::Delim(')') => {
                ast.push(SyntaxComponent::Literal {
                    value: token.value,
                    enclosed: false,
                    multipliers: None,
                });
            }
            TokenKind::Space => {
                s.eat(TokenKind::Space);
            }
            TokenKind::Delim('!') => attach_range(ast, Range::finite(1.0, 1.0))?,
            TokenKind::Delim('?') => attach_range(ast, Range::finite(0.0, 1.0))?,
            TokenKind::Delim('+') => attach_range(
                ast,
                Range::new(RangeBound::Finite(1.0), RangeBound::Infinity),
            )?,
            TokenKind::Delim('*') => attach_range(
                ast,
                Range::new(RangeBound::Finite(0.0), RangeBound::Infinity),
            )?,
            TokenKind::Delim('{') => {
                // Validate the target before consuming the range body so a
                // misplaced `{2}` reports the modifier, not the range.
                attachment_target(ast)?;
                let range = parse_explicit_range(s)?;
                attach_range(ast, range)?;
            }
            TokenKind::Delim('#') => {
                let target = attachment_target(ast)?;
                let multipliers = target
                    .multipliers_mut()
                    .ok_or(SyntaxError::UnexpectedModifier)?;
                multipliers.get_or_insert_with(Multipliers::default).list = true;
            }
            TokenKind::Delim('&') => {
                s.take(TokenKind::Delim('&'))
                    .ok_or(SyntaxError::SingleAmpersand)?;
                ast.push(SyntaxComponent::Combination {
                    combinator: GroupCombinators::AllAnyOrder,
                    components: Vec::new(),
                });
            }
            TokenKind::Delim('|') => {
                let combinator = if s.take(TokenKind::Delim('|')).is_some() {
                    GroupCombinators::AtLeastOneAnyOrder
                } else {
                    GroupCombinators::ExactlyOne
                };
                ast.push(SyntaxComponent::Combination {
                    combinator,
                    components: Vec::new(),
                });
            }
            _ => return Err(SyntaxError::UnexpectedToken(token.value)),
        }

        apply_juxtaposing(ast);
        Ok(true)
    }

    /// `<name>` / `<'name'>`, optionally with a `[min,max]` range before the
    /// closing `>`.
    fn parse_type_definition(&mut self, s: &mut Cursor) -> Result<SyntaxComponent, SyntaxError> {
        log::trace!("parse_type_definition");

        let name = s
            .eat(TokenKind::Space)
            .next()
            .ok_or(SyntaxError::MissingDataTypeName)?;
        let kind = name_kind(&name);
        if kind == NameKind::Invalid {
            return Err(SyntaxError::MissingDataTypeName);
        }

        let mut range = None;
        let mut closed = false;
        match s.eat(TokenKind::Space).next() {
            Some(t) if t.kind == TokenKind::Delim('>') => closed = true,
            Some(t) if t.kind == TokenKind::Delim('[') => {
                let min = s.eat(TokenKind::Space).take(TokenKind::Text);
                let sep = s.eat(TokenKind::Space).take(TokenKind::Delim(','));
                let max = s.eat(TokenKind::Space).take(TokenKind::Text);
                let end = s.eat(TokenKind::Space).take(TokenKind::Delim(']'));
                match (min, sep, max, end) {
                    (Some(min), Some(_), Some(max), Some(_)) => {
                        range = Some(Range::new(
                            parse_number(&min.value)?,
                            parse_number(&max.value)?,
                        ));
                    }
                    _ => return Err(SyntaxError::InvalidRange),
                }
                if s.eat(TokenKind::Space).take(TokenKind::Delim('>')).is_some() {
                    closed = true;
                }
            }
            _ => {}
        }
        if !closed {
            return Err(SyntaxError::UnclosedTypeDefinition);
        }

        match kind {
            NameKind::Property => {
                let name = strip_quotes(&name.value).unwrap_or_default();
                if name.is_empty() {
                    return Err(SyntaxError::MissingDataTypeName);
                }
                Ok(SyntaxComponent::property(name, range))
            }
            _ => Ok(SyntaxComponent::data_type(&name.value, range)),
        }
    }

    /// Text tokens: keywords, single-token quoted literals, or the start of
    /// a multi-token quoted literal accumulated to its closing quote.
    fn parse_text(
        &mut self,
        token: Token,
        ast: &mut Vec<SyntaxComponent>,
        s: &mut Cursor,
    ) -> Result<(), SyntaxError> {
        match name_kind(&token) {
            NameKind::DataType => {
                ast.push(SyntaxComponent::keyword(&token.value));
                Ok(())
            }
            NameKind::Property => {
                // A complete `'...'` literal in one token.
                let value = strip_quotes(&token.value).unwrap_or_default();
                if value.is_empty() {
                    return Err(SyntaxError::UnclosedOrEmptyLiteral);
                }
                ast.push(SyntaxComponent::enclosed_literal(value));
                Ok(())
            }
            NameKind::Invalid => {
                if !token.value.starts_with('\'') {
                    return Err(SyntaxError::InvalidLiteral(token.value));
                }
                let tokens = s.run(
                    |token, tokens: &mut Vec<Token>, _| {
                        let closing = token.value.ends_with('\'');
                        tokens.push(token);
                        !closing
                    },
                    vec![token],
                );
                if tokens.len() <= 2 {
                    return Err(SyntaxError::UnclosedOrEmptyLiteral);
                }
                let text = text_between(&tokens, 0, tokens.len(), self.source);
                let value = strip_quotes(&text).unwrap_or_default();
                ast.push(SyntaxComponent::enclosed_literal(value));
                Ok(())
            }
        }
    }
}

/// `{min,max}` / `{min}` after a component.
fn parse_explicit_range(s: &mut Cursor) -> Result<Range, SyntaxError> {
    let start = s
        .eat(TokenKind::Space)
        .take(TokenKind::Text)
        .ok_or(SyntaxError::MissingRangeStart)?;

    if s.eat(TokenKind::Space).take(TokenKind::Delim(',')).is_some() {
        let end = s
            .eat(TokenKind::Space)
            .take(TokenKind::Text)
            .ok_or(SyntaxError::MissingRangeEnd)?;
        s.eat(TokenKind::Space)
            .take(TokenKind::Delim('}'))
            .ok_or(SyntaxError::UnclosedRange)?;
        Ok(Range::new(
            parse_number(&start.value)?,
            parse_number(&end.value)?,
        ))
    } else {
        s.eat(TokenKind::Space)
            .take(TokenKind::Delim('}'))
            .ok_or(SyntaxError::UnclosedRange)?;
        let bound = parse_number(&start.value)?;
        Ok(Range::new(bound, bound))
    }
}

/// Resolves the component a modifier attaches to: the most recently
/// completed component, or the last child of a trailing juxtaposition.
fn attachment_target(
    ast: &mut [SyntaxComponent],
) -> Result<&mut SyntaxComponent, SyntaxError> {
    let component = ast.last_mut().ok_or(SyntaxError::UnexpectedModifier)?;
    let component = if let SyntaxComponent::Combination {
        combinator: GroupCombinators::Juxtaposition,
        components,
    } = component
    {
        components
            .last_mut()
            .ok_or(SyntaxError::UnexpectedModifier)?
    } else {
        component
    };

    if component.combinator().is_some() {
        return Err(SyntaxError::UnexpectedModifier);
    }
    Ok(component)
}

fn attach_range(ast: &mut [SyntaxComponent], range: Range) -> Result<(), SyntaxError> {
    let target = attachment_target(ast)?;
    let multipliers = target
        .multipliers_mut()
        .ok_or(SyntaxError::UnexpectedModifier)?;
    let multipliers = multipliers.get_or_insert_with(Multipliers::default);
    if multipliers.range.is_some() {
        return Err(SyntaxError::DuplicateMultiplier);
    }
    multipliers.range = Some(range);
    Ok(())
}

/// Two adjacent solid components mean "both, in this order": fuse them into
/// (or extend) a juxtaposition group.
fn apply_juxtaposing(ast: &mut Vec<SyntaxComponent>) {
    if ast.len() < 2 {
        return;
    }
    let last_index = ast.len() - 1;
    let prev_index = ast.len() - 2;

    if ast[last_index].is_low_level_group() {
        return;
    }

    if ast[prev_index].combinator() == Some(GroupCombinators::Juxtaposition) {
        if let Some(last) = ast.pop() {
            if let Some(SyntaxComponent::Combination { components, .. }) = ast.last_mut() {
                components.push(last);
            }
        }
    } else if !ast[prev_index].is_low_level_group() {
        if let (Some(last), Some(prev)) = (ast.pop(), ast.pop()) {
            ast.push(SyntaxComponent::Combination {
                combinator: GroupCombinators::Juxtaposition,
                components: vec![prev, last],
            });
        }
    }
}

/// Fixed-precedence reduction over the flat component sequence, tightest
/// binding first: `&&`, then `||`, then `|`. Each occurrence takes its
/// immediate neighbours as children, merging into an already-same-kind left
/// neighbour to keep groups flat n-ary. A successful parse leaves exactly
/// one component.
fn apply_precedence(ast: &mut Vec<SyntaxComponent>) -> Result<(), SyntaxError> {
    for combinator in [
        GroupCombinators::AllAnyOrder,
        GroupCombinators::AtLeastOneAnyOrder,
        GroupCombinators::ExactlyOne,
    ] {
        let mut i = 0;
        while i < ast.len() {
            if ast[i].combinator() != Some(combinator)
                || !matches!(&ast[i], SyntaxComponent::Combination { components, .. } if components.is_empty())
            {
                i += 1;
                continue;
            }
            if i == 0 {
                return Err(SyntaxError::MissingComponentBefore(combinator));
            }
            if i + 1 >= ast.len() {
                return Err(SyntaxError::MissingComponentAfter(combinator));
            }
            if matches!(&ast[i + 1], SyntaxComponent::Combination { combinator: c, components } if *c == combinator && components.is_empty())
            {
                return Err(SyntaxError::InvalidGrouping);
            }

            let after = ast.remove(i + 1);
            let node = ast.remove(i);
            if ast[i - 1].combinator() == Some(combinator) {
                if let Some(SyntaxComponent::Combination { components, .. }) = ast.get_mut(i - 1) {
                    components.push(after);
                }
            } else {
                let before = ast.remove(i - 1);
                let mut node = node;
                if let SyntaxComponent::Combination { components, .. } = &mut node {
                    components.push(before);
                    components.push(after);
                }
                ast.insert(i - 1, node);
            }
            // The merged group sits at `i - 1`; `i` now addresses the next
            // unexamined component.
        }
    }

    if ast.len() > 1 {
        return Err(SyntaxError::AmbiguousSyntax);
    }
    Ok(())
}

fn parse_number(value: &str) -> Result<RangeBound, SyntaxError> {
    match value {
        "∞" | "inf" => Ok(RangeBound::Infinity),
        "-∞" | "-inf" => Ok(RangeBound::NegativeInfinity),
        _ => {
            let number: f64 = value
                .parse()
                .map_err(|_| SyntaxError::InvalidNumber(value.to_string()))?;
            if number.is_nan() {
                return Err(SyntaxError::InvalidNumber(value.to_string()));
            }
            if number.is_infinite() {
                return Ok(if number > 0.0 {
                    RangeBound::Infinity
                } else {
                    RangeBound::NegativeInfinity
                });
            }
            Ok(RangeBound::Finite(number))
        }
    }
}

fn name_kind(token: &Token) -> NameKind {
    if token.kind != TokenKind::Text {
        return NameKind::Invalid;
    }
    if token.value.starts_with('\'') {
        if token.value.ends_with('\'') && token.value.len() > 1 {
            NameKind::Property
        } else {
            NameKind::Invalid
        }
    } else {
        NameKind::DataType
    }
}

fn strip_quotes(value: &str) -> Option<&str> {
    value.strip_prefix('\'')?.strip_suffix('\'')
}

#[cfg(test)]
mod tests {
    use super::*;
    use GroupCombinators::{AllAnyOrder, AtLeastOneAnyOrder, ExactlyOne, Juxtaposition};

    fn parse(source: &str) -> SyntaxComponent {
        parse_value_syntax(source).expect("parse should succeed")
    }

    fn with_range(mut component: SyntaxComponent, range: Range) -> SyntaxComponent {
        if let Some(multipliers) = component.multipliers_mut() {
            *multipliers = Some(Multipliers {
                range: Some(range),
                list: false,
            });
        }
        component
    }

    #[test]
    fn keyword() {
        assert_eq!(parse("ease-in"), SyntaxComponent::keyword("ease-in"));
    }

    #[test]
    fn data_type_and_property() {
        assert_eq!(parse("<length>"), SyntaxComponent::data_type("length", None));
        assert_eq!(
            parse("<'background-color'>"),
            SyntaxComponent::property("background-color", None)
        );
    }

    #[test]
    fn data_type_ranges() {
        assert_eq!(
            parse("<percentage [0,100]>"),
            SyntaxComponent::data_type("percentage", Some(Range::finite(0.0, 100.0)))
        );
        assert_eq!(
            parse("<length [0,∞]>"),
            SyntaxComponent::data_type(
                "length",
                Some(Range::new(RangeBound::Finite(0.0), RangeBound::Infinity))
            )
        );
        assert_eq!(
            parse("<integer [-inf,0]>"),
            SyntaxComponent::data_type(
                "integer",
                Some(Range::new(RangeBound::NegativeInfinity, RangeBound::Finite(0.0)))
            )
        );
    }

    #[test]
    fn juxtaposition() {
        assert_eq!(
            parse("a b c"),
            SyntaxComponent::combination(
                Juxtaposition,
                vec![
                    SyntaxComponent::keyword("a"),
                    SyntaxComponent::keyword("b"),
                    SyntaxComponent::keyword("c"),
                ]
            )
        );
    }

    #[test]
    fn precedence_and_over_or() {
        // `&&` binds tighter than `||`.
        assert_eq!(
            parse("a && b || c"),
            SyntaxComponent::combination(
                AtLeastOneAnyOrder,
                vec![
                    SyntaxComponent::combination(
                        AllAnyOrder,
                        vec![SyntaxComponent::keyword("a"), SyntaxComponent::keyword("b")]
                    ),
                    SyntaxComponent::keyword("c"),
                ]
            )
        );
    }

    #[test]
    fn precedence_or_over_bar() {
        assert_eq!(
            parse("a || b | c"),
            SyntaxComponent::combination(
                AtLeastOneAnyOrder,
                vec![
                    SyntaxComponent::keyword("a"),
                    SyntaxComponent::combination(
                        ExactlyOne,
                        vec![SyntaxComponent::keyword("b"), SyntaxComponent::keyword("c")]
                    ),
                ]
            )
        );
    }

    #[test]
    fn precedence_all_three() {
        assert_eq!(
            parse("a | b || c && d"),
            SyntaxComponent::combination(
                AllAnyOrder,
                vec![
                    SyntaxComponent::combination(
                        AtLeastOneAnyOrder,
                        vec![
                            SyntaxComponent::combination(
                                ExactlyOne,
                                vec![
                                    SyntaxComponent::keyword("a"),
                                    SyntaxComponent::keyword("b")
                                ]
                            ),
                            SyntaxComponent::keyword("c"),
                        ]
                    ),
                    SyntaxComponent::keyword("d"),
                ]
            )
        );
    }

    #[test]
    fn n_ary_groups_stay_flat() {
        assert_eq!(
            parse("a | b | c | d"),
            SyntaxComponent::combination(
                ExactlyOne,
                vec![
                    SyntaxComponent::keyword("a"),
                    SyntaxComponent::keyword("b"),
                    SyntaxComponent::keyword("c"),
                    SyntaxComponent::keyword("d"),
                ]
            )
        );
    }

    #[test]
    fn juxtaposition_binds_tightest() {
        assert_eq!(
            parse("a b | c d"),
            SyntaxComponent::combination(
                ExactlyOne,
                vec![
                    SyntaxComponent::combination(
                        Juxtaposition,
                        vec![SyntaxComponent::keyword("a"), SyntaxComponent::keyword("b")]
                    ),
                    SyntaxComponent::combination(
                        Juxtaposition,
                        vec![SyntaxComponent::keyword("c"), SyntaxComponent::keyword("d")]
                    ),
                ]
            )
        );
    }

    #[test]
    fn explicit_groups() {
        assert_eq!(
            parse("[ a b ]"),
            SyntaxComponent::group(vec![SyntaxComponent::combination(
                Juxtaposition,
                vec![SyntaxComponent::keyword("a"), SyntaxComponent::keyword("b")]
            )])
        );

        // A group is a solid component: it participates in juxtaposition and
        // takes multipliers.
        let parsed = parse("[ a | b ]? c");
        let SyntaxComponent::Combination { combinator, components } = parsed else {
            panic!("expected juxtaposition, got {:?}", parsed);
        };
        assert_eq!(combinator, Juxtaposition);
        assert!(matches!(
            &components[0],
            SyntaxComponent::Group {
                multipliers: Some(m),
                ..
            } if m.range == Some(Range::finite(0.0, 1.0))
        ));
    }

    #[test]
    fn multiplier_shorthands() {
        assert_eq!(
            parse("<length>+"),
            with_range(
                SyntaxComponent::data_type("length", None),
                Range::new(RangeBound::Finite(1.0), RangeBound::Infinity)
            )
        );
        assert_eq!(
            parse("a?"),
            with_range(SyntaxComponent::keyword("a"), Range::finite(0.0, 1.0))
        );
        assert_eq!(
            parse("a*"),
            with_range(
                SyntaxComponent::keyword("a"),
                Range::new(RangeBound::Finite(0.0), RangeBound::Infinity)
            )
        );
        assert_eq!(
            parse("a!"),
            with_range(SyntaxComponent::keyword("a"), Range::finite(1.0, 1.0))
        );
    }

    #[test]
    fn explicit_range_multipliers() {
        assert_eq!(
            parse("a{1,4}"),
            with_range(SyntaxComponent::keyword("a"), Range::finite(1.0, 4.0))
        );
        assert_eq!(
            parse("a{3}"),
            with_range(SyntaxComponent::keyword("a"), Range::finite(3.0, 3.0))
        );
    }

    #[test]
    fn list_multiplier() {
        let parsed = parse("<length>+#");
        let SyntaxComponent::TypeDefinition {
            multipliers: Some(multipliers),
            ..
        } = parsed
        else {
            panic!("expected data type with multipliers");
        };
        assert_eq!(
            multipliers.range,
            Some(Range::new(RangeBound::Finite(1.0), RangeBound::Infinity))
        );
        assert!(multipliers.list);
    }

    #[test]
    fn multiplier_targets_last_of_juxtaposition() {
        let parsed = parse("a b?");
        let SyntaxComponent::Combination { components, .. } = parsed else {
            panic!("expected juxtaposition");
        };
        assert_eq!(components[0], SyntaxComponent::keyword("a"));
        assert!(matches!(
            &components[1],
            SyntaxComponent::GenericKeyword {
                multipliers: Some(m),
                ..
            } if m.range == Some(Range::finite(0.0, 1.0))
        ));
    }

    #[test]
    fn literals() {
        assert_eq!(
            parse("a , b"),
            SyntaxComponent::combination(
                Juxtaposition,
                vec![
                    SyntaxComponent::keyword("a"),
                    SyntaxComponent::literal(","),
                    SyntaxComponent::keyword("b"),
                ]
            )
        );
        assert_eq!(parse("'x'"), SyntaxComponent::enclosed_literal("x"));
        // `+` is a delimiter, so the quoted form spans several tokens.
        assert_eq!(parse("'+'"), SyntaxComponent::enclosed_literal("+"));
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse_value_syntax("<>"),
            Err(SyntaxError::MissingDataTypeName)
        );
        assert_eq!(
            parse_value_syntax("<length"),
            Err(SyntaxError::UnclosedTypeDefinition)
        );
        assert_eq!(
            parse_value_syntax("<length [1]>"),
            Err(SyntaxError::InvalidRange)
        );
        assert_eq!(
            parse_value_syntax("<length [1,2]"),
            Err(SyntaxError::UnclosedTypeDefinition)
        );
        assert_eq!(
            parse_value_syntax("<length>++"),
            Err(SyntaxError::DuplicateMultiplier)
        );
        assert_eq!(
            parse_value_syntax("a{1,4}{2}"),
            Err(SyntaxError::DuplicateMultiplier)
        );
        assert_eq!(
            parse_value_syntax("?a"),
            Err(SyntaxError::UnexpectedModifier)
        );
        assert_eq!(
            parse_value_syntax("a | ?"),
            Err(SyntaxError::UnexpectedModifier)
        );
        assert_eq!(
            parse_value_syntax("a{x}"),
            Err(SyntaxError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            parse_value_syntax("a{1"),
            Err(SyntaxError::UnclosedRange)
        );
        assert_eq!(parse_value_syntax("''"), Err(SyntaxError::UnclosedOrEmptyLiteral));
        assert_eq!(parse_value_syntax("'x"), Err(SyntaxError::UnclosedOrEmptyLiteral));
        assert_eq!(
            parse_value_syntax("a & b"),
            Err(SyntaxError::SingleAmpersand)
        );
        assert_eq!(
            parse_value_syntax("&& a"),
            Err(SyntaxError::MissingComponentBefore(AllAnyOrder))
        );
        assert_eq!(
            parse_value_syntax("a &&"),
            Err(SyntaxError::MissingComponentAfter(AllAnyOrder))
        );
        assert_eq!(
            parse_value_syntax("a && && b"),
            Err(SyntaxError::InvalidGrouping)
        );
        assert_eq!(
            parse_value_syntax("a ] b"),
            Err(SyntaxError::UnexpectedToken("]".to_string()))
        );
        assert_eq!(parse_value_syntax("[a"), Err(SyntaxError::UnclosedGroup));
        assert_eq!(parse_value_syntax(""), Err(SyntaxError::EmptySyntax));
        assert_eq!(parse_value_syntax("   "), Err(SyntaxError::EmptySyntax));
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let mut source = String::new();
        for _ in 0..200 {
            source.push('[');
        }
        assert_eq!(parse_value_syntax(&source), Err(SyntaxError::NestingTooDeep));
    }

    #[test]
    fn background_position_grammar_compiles() {
        let parsed = parse(
            "[ left | center | right | top | bottom | <length-percentage> ] | \
             [ left | center | right | <length-percentage> ] \
             [ top | center | bottom | <length-percentage> ] | \
             [ center | [ left | right ] <length-percentage>? ] && \
             [ center | [ top | bottom ] <length-percentage>? ]",
        );
        assert_eq!(parsed.combinator(), Some(ExactlyOne));
    }

    #[test]
    fn stringify_supported_components() {
        assert_eq!(
            stringify_component(&SyntaxComponent::property("color", None))
                .expect("stringify"),
            "<'color'>"
        );
        assert_eq!(
            stringify_component(&SyntaxComponent::data_type(
                "angle",
                Some(Range::finite(0.0, 360.0))
            ))
            .expect("stringify"),
            "<angle [0,360]>"
        );
        assert_eq!(
            stringify_component(&SyntaxComponent::data_type(
                "length",
                Some(Range::new(RangeBound::Finite(0.0), RangeBound::Infinity))
            ))
            .expect("stringify"),
            "<length [0,∞]>"
        );
        assert_eq!(
            stringify_component(&SyntaxComponent::literal("/")).expect("stringify"),
            "/"
        );
        assert_eq!(
            stringify_component(&SyntaxComponent::enclosed_literal("+")).expect("stringify"),
            "'+'"
        );
    }

    #[test]
    fn stringify_rejects_other_components() {
        assert_eq!(
            stringify_component(&SyntaxComponent::keyword("left")),
            Err(SyntaxError::UnsupportedStringify("keyword"))
        );
    }

    #[test]
    fn ast_serializes() {
        let json = serde_json::to_value(parse("<length>+")).expect("serialize");
        assert_eq!(json["TypeDefinition"]["name"], "length");
        assert_eq!(
            json["TypeDefinition"]["multipliers"]["range"]["max"],
            "Infinity"
        );
    }
}
