use std::collections::BTreeSet;
use std::fmt;

use quiz_core::model::OptionId;

/// Exact set equality: every correct id selected and nothing else.
///
/// There is no partial credit.
#[must_use]
pub fn is_exact_match(correct: &BTreeSet<OptionId>, selected: &BTreeSet<OptionId>) -> bool {
    correct == selected
}

/// Final tally of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Share of correct answers in whole percent, rounded half up.
    ///
    /// An empty session scores 0.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let correct = u64::from(self.correct);
        let total = u64::from(self.total);
        let rounded = (correct * 200 + total) / (total * 2);
        u32::try_from(rounded).unwrap_or(100)
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.correct, self.total)
    }
}
