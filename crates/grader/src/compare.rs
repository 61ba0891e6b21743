/// Ordered, exact comparison of actual records against expected records.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// `row` is the index of the first differing record, or the length of
    /// the shorter list when one is a prefix of the other.
    Mismatch { row: usize },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

pub fn compare<R: PartialEq>(actual: &[R], expected: &[R]) -> Verdict {
    if let Some(row) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        return Verdict::Mismatch { row };
    }
    if actual.len() != expected.len() {
        return Verdict::Mismatch {
            row: actual.len().min(expected.len()),
        };
    }
    Verdict::Correct
}
