//! Generic sequence state-machine engine.
//!
//! A [`SequenceMachine`] is declarative data: one level per consumed item,
//! each level a read-only map from the current state key to an ordered list
//! of match rules. The engine walks the levels from a start index, follows
//! the first rule whose predicate accepts the current item (rule order is
//! significant), and reports how many consecutive items were consumed under
//! an accepted path. `0` means "does not match this grammar at all" — the
//! engine never raises.

pub mod background_position;

use crate::syntax::SyntaxComponent;
use cow_utils::CowUtils;
use std::collections::HashMap;

/// State key of a machine: the reserved start state or an author-chosen name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StateKey {
    Start,
    Named(&'static str),
}

/// Pure predicate over one item.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// One transition rule of a machine level.
pub struct MatchRule<T> {
    predicate: Predicate<T>,
    next_key: Option<StateKey>,
    must_continue: bool,
}

impl<T: 'static> MatchRule<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            next_key: None,
            must_continue: false,
        }
    }

    /// Sets the state to move to on a match. Without it, a match is an
    /// accepting terminal.
    #[must_use]
    pub fn then(mut self, key: &'static str) -> Self {
        self.next_key = Some(StateKey::Named(key));
        self
    }

    /// Marks the match as provisional: it only counts if something matches
    /// at the next level too.
    #[must_use]
    pub fn must_continue(mut self) -> Self {
        self.must_continue = true;
        self
    }
}

/// An ordered sequence of levels, each mapping a state key to its rules.
pub struct SequenceMachine<T> {
    levels: Vec<HashMap<StateKey, Vec<MatchRule<T>>>>,
}

impl<T> SequenceMachine<T> {
    pub fn new(levels: Vec<Vec<(StateKey, Vec<MatchRule<T>>)>>) -> Self {
        Self {
            levels: levels
                .into_iter()
                .map(|level| level.into_iter().collect())
                .collect(),
        }
    }
}

/// Matches `items[index..]` against `machine`, returning the number of items
/// consumed under an accepted path.
///
/// On a failure to match at a level, a previous rule flagged `must_continue`
/// retracts its own match, making the whole attempt one item shorter — this
/// models an optional trailing value that only counts if something else
/// follows.
pub fn match_sequence<T>(items: &[T], index: usize, machine: &SequenceMachine<T>) -> usize {
    let mut matched: usize = 0;
    let mut level: usize = 0;
    let mut key = Some(StateKey::Start);

    if machine.levels.is_empty() {
        return 0;
    }

    let mut previous: Option<bool> = None;
    loop {
        let mut current: Option<bool> = None;
        if let (Some(item), Some(state)) = (items.get(index + level), key) {
            if let Some(rules) = machine.levels[level].get(&state) {
                if let Some(rule) = rules.iter().find(|rule| (rule.predicate)(item)) {
                    matched += 1;
                    key = rule.next_key;
                    current = Some(rule.must_continue);
                }
            }
        }

        if current.is_none() && previous == Some(true) {
            matched = matched.saturating_sub(1);
        }
        previous = current;

        level += 1;
        if previous.is_none() || key.is_none() || level >= machine.levels.len() {
            break;
        }
    }

    matched
}

/// Items the stock machines can inspect.
pub trait MatchItem {
    /// The keyword this item represents, when it is one.
    fn keyword(&self) -> Option<&str>;
}

impl MatchItem for SyntaxComponent {
    fn keyword(&self) -> Option<&str> {
        match self {
            SyntaxComponent::GenericKeyword { keyword, .. } => Some(keyword),
            _ => None,
        }
    }
}

/// Case-insensitive membership predicate over a static keyword list.
pub fn keyword_predicate<T: MatchItem + 'static>(
    keywords: &'static [&'static str],
) -> Predicate<T> {
    Box::new(move |item| {
        item.keyword().map_or(false, |keyword| {
            let keyword = keyword.cow_to_ascii_lowercase();
            keywords.iter().any(|candidate| *candidate == keyword)
        })
    })
}
