/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// Zero-based position of the current question.
    pub index: usize,
    pub total: usize,
    pub answered: usize,
    pub correct: u32,
    pub is_complete: bool,
}

impl QuizProgress {
    /// One-based position for display, capped at `total`.
    #[must_use]
    pub fn position(&self) -> usize {
        (self.index + 1).min(self.total)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total
    }
}
