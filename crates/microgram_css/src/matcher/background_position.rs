//! State machine for the 1–4-value `background-position` composite grammar:
//!
//! ```text
//! [ left | center | right | top | bottom | <length-percentage> ] |
//! [ left | center | right | <length-percentage> ]
//!   [ top | center | bottom | <length-percentage> ] |
//! [ center | [ left | right ] <length-percentage>? ]
//!   && [ center | [ top | bottom ] <length-percentage>? ]
//! ```
//!
//! The machine is parameterised by an injected length-percentage predicate,
//! since deciding what counts as a `<length-percentage>` belongs to the
//! caller's value model.

use super::{keyword_predicate, MatchItem, MatchRule, Predicate, SequenceMachine, StateKey};
use std::sync::Arc;

const CENTER_KEYWORDS: &[&str] = &["center"];
const HORIZONTAL_EDGE_KEYWORDS: &[&str] = &["left", "right"];
const VERTICAL_EDGE_KEYWORDS: &[&str] = &["top", "bottom"];
const ALL_EDGE_KEYWORDS: &[&str] = &["left", "right", "top", "bottom"];

const LENGTH_PERCENTAGE: &str = "<length-percentage>";
const CENTER: &str = "center";
const HORIZONTAL: &str = "left | right";
const VERTICAL: &str = "top | bottom";
const THREE_VALUE: &str = "3-value";
const HORIZONTAL_THEN_LP: &str = "[ left | right ] <length-percentage>";
const VERTICAL_THEN_LP: &str = "[ top | bottom ] <length-percentage>";
const FOUR_VALUE: &str = "4-value";

/// Builds the `background-position` machine over the caller's item type.
pub fn background_position_machine<T: MatchItem + 'static>(
    length_percentage: impl Fn(&T) -> bool + Send + Sync + 'static,
) -> SequenceMachine<T> {
    let length_percentage = Arc::new(length_percentage);
    let lp = |next: Option<&'static str>| -> MatchRule<T> {
        let predicate = Arc::clone(&length_percentage);
        let rule = MatchRule::new(move |item: &T| (*predicate)(item));
        match next {
            Some(key) => rule.then(key),
            None => rule,
        }
    };
    let kw = |keywords: &'static [&'static str], next: Option<&'static str>| -> MatchRule<T> {
        let predicate: Predicate<T> = keyword_predicate(keywords);
        let rule = MatchRule::new(move |item: &T| predicate(item));
        match next {
            Some(key) => rule.then(key),
            None => rule,
        }
    };

    SequenceMachine::new(vec![
        vec![(
            StateKey::Start,
            vec![
                lp(Some(LENGTH_PERCENTAGE)),
                kw(CENTER_KEYWORDS, Some(CENTER)),
                kw(HORIZONTAL_EDGE_KEYWORDS, Some(HORIZONTAL)),
                kw(VERTICAL_EDGE_KEYWORDS, Some(VERTICAL)),
            ],
        )],
        vec![
            (
                StateKey::Named(LENGTH_PERCENTAGE),
                vec![
                    // <length-percentage> <length-percentage> $
                    lp(None),
                    // <length-percentage> center $
                    kw(CENTER_KEYWORDS, None),
                    // <length-percentage> [ top | bottom ] $
                    kw(VERTICAL_EDGE_KEYWORDS, None),
                ],
            ),
            (
                StateKey::Named(CENTER),
                vec![
                    // center <length-percentage> $
                    lp(None),
                    // center center $
                    kw(CENTER_KEYWORDS, None),
                    // center [ left | right | top | bottom ]
                    kw(ALL_EDGE_KEYWORDS, Some(THREE_VALUE)),
                ],
            ),
            (
                StateKey::Named(HORIZONTAL),
                vec![
                    // [ left | right ] <length-percentage>
                    lp(Some(HORIZONTAL_THEN_LP)),
                    // [ left | right ] center $
                    kw(CENTER_KEYWORDS, None),
                    // [ left | right ] [ top | bottom ]
                    kw(VERTICAL_EDGE_KEYWORDS, Some(THREE_VALUE)),
                ],
            ),
            (
                StateKey::Named(VERTICAL),
                vec![
                    // [ top | bottom ] <length-percentage>, only as part of a
                    // longer form
                    lp(Some(VERTICAL_THEN_LP)).must_continue(),
                    // [ top | bottom ] center $
                    kw(CENTER_KEYWORDS, None),
                    // [ top | bottom ] [ left | right ]
                    kw(HORIZONTAL_EDGE_KEYWORDS, Some(THREE_VALUE)),
                ],
            ),
        ],
        vec![
            (
                StateKey::Named(THREE_VALUE),
                vec![
                    // center [ edge ] <length-percentage> $
                    lp(None),
                ],
            ),
            (
                StateKey::Named(HORIZONTAL_THEN_LP),
                vec![
                    // [ left | right ] <length-percentage> center $
                    kw(CENTER_KEYWORDS, None),
                    // [ left | right ] <length-percentage> [ top | bottom ]
                    kw(VERTICAL_EDGE_KEYWORDS, Some(FOUR_VALUE)),
                ],
            ),
            (
                StateKey::Named(VERTICAL_THEN_LP),
                vec![
                    // [ top | bottom ] <length-percentage> center $
                    kw(CENTER_KEYWORDS, None),
                    // [ top | bottom ] <length-percentage> [ left | right ]
                    kw(HORIZONTAL_EDGE_KEYWORDS, Some(FOUR_VALUE)),
                ],
            ),
        ],
        vec![(
            StateKey::Named(FOUR_VALUE),
            vec![
                // both axes with offsets $
                lp(None),
            ],
        )],
    ])
}
