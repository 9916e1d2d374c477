use crate::domain::{Band, WordCountStatus};
use console::style;
use std::fmt::Display;

/// Green bold: check marks after a saved change
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Red bold: failure notices on stderr
pub fn failure<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// White bold: section headers, task questions
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: secondary text, timestamps, hints
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: warnings
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Green: ids, paths, confirmed values
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: bullets and markers
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan: subscale names, field labels
pub fn cyan<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Band number coloured by strength.
pub fn band(band: Band) -> String {
    let styled = style(band).bold();
    let styled = match band.value() {
        4..=5 => styled.green(),
        2..=3 => styled.cyan(),
        _ => styled.yellow(),
    };
    styled.to_string()
}

/// Word-count text coloured by its position against the target range.
pub fn word_count<D: Display>(text: D, status: WordCountStatus) -> String {
    match status {
        WordCountStatus::Empty => dim(text),
        WordCountStatus::OnTarget => value(text),
        WordCountStatus::OffTarget => yellow(text),
    }
}
