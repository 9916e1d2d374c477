use std::ops::RangeInclusive;

/// Word range the exam asks for.
pub const TARGET_WORDS: RangeInclusive<usize> = 220..=260;

/// Whitespace-separated tokens of the trimmed text; zero for blank text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCountStatus {
    Empty,
    OnTarget,
    OffTarget,
}

impl WordCountStatus {
    pub fn of(count: usize) -> Self {
        if count == 0 {
            Self::Empty
        } else if TARGET_WORDS.contains(&count) {
            Self::OnTarget
        } else {
            Self::OffTarget
        }
    }
}
