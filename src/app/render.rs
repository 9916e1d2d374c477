//! Terminal rendering of workspace records.

use crate::domain::rubric::{self, resolve};
use crate::domain::{
    AssessmentFeedback, Band, GeneratedTask, HistoryEntry, ImprovedResponse, SCALES, ScoreState,
    Subscale, TARGET_WORDS, WordCountStatus, word_count,
};
use crate::ui::style as ui;
use std::fmt::Write as _;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn task(task: &GeneratedTask) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        ui::header(task.task_type.label()),
        ui::dim(format!("({})", task.short_id()))
    );
    let _ = writeln!(out, "\n{}", task.context);
    let _ = writeln!(out, "\n{}", ui::header(&task.question));
    for point in &task.points {
        let _ = writeln!(out, "  {} {point}", ui::accent("•"));
    }
    if let Some(opinions) = task.opinions.as_ref().filter(|o| !o.is_empty()) {
        let _ = writeln!(out, "\n{}", ui::cyan("Some opinions expressed:"));
        for opinion in opinions {
            let _ = writeln!(out, "  \"{opinion}\"");
        }
    }
    let _ = writeln!(out, "\n{}", ui::dim(&task.instructions));
    out
}

/// One line per library task, newest first.
pub fn task_list(tasks: &[GeneratedTask], active: Option<&str>) -> String {
    if tasks.is_empty() {
        return ui::dim("No saved tasks. Run `writewise task generate`.\n");
    }
    let mut out = String::new();
    for task in tasks {
        let marker = if active == Some(task.id.as_str()) {
            ui::accent("*")
        } else {
            " ".into()
        };
        let _ = writeln!(
            out,
            "{marker} {}  {}  {:<12}  {}",
            ui::value(task.short_id()),
            ui::dim(task.timestamp.format(DATE_FORMAT)),
            task.task_type.to_string(),
            task.question
        );
    }
    out
}

pub fn word_count_line(count: usize) -> String {
    let label = ui::word_count(format!("{count} words"), WordCountStatus::of(count));
    let target = format!("(target {}-{})", TARGET_WORDS.start(), TARGET_WORDS.end());
    format!("{label} {}", ui::dim(target))
}

pub fn draft(text: &str) -> String {
    let mut out = String::new();
    if text.trim().is_empty() {
        let _ = writeln!(out, "{}", ui::dim("(empty draft)"));
    } else {
        let _ = writeln!(out, "{}", text.trim_end());
    }
    let _ = writeln!(out, "\n{}", word_count_line(word_count(text)));
    out
}

pub fn improved(improved: &ImprovedResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", ui::header("Improved version"));
    let _ = writeln!(out, "{}", improved.rewritten_text.trim_end());
    if !improved.key_changes.is_empty() {
        let _ = writeln!(out, "\n{}", ui::header("Key changes"));
        for change in &improved.key_changes {
            let _ = writeln!(out, "  {} {change}", ui::accent("•"));
        }
    }
    out
}

/// Bands with the descriptor summary that applies to each.
pub fn scores(scores: &ScoreState) -> String {
    let mut out = String::new();
    for subscale in Subscale::ALL {
        let band = scores.get(subscale);
        let descriptor = resolve(rubric::definition(subscale), band);
        let _ = writeln!(
            out,
            "  {:<26} {}  {}",
            subscale.to_string(),
            ui::band(band),
            ui::dim(descriptor.summary)
        );
    }
    let _ = writeln!(out, "  {:<26} {}", "Total", ui::header(format!("{}/20", scores.total())));
    out
}

pub fn feedback(feedback: &AssessmentFeedback) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n{}", ui::header("Examiner feedback"), feedback.general);
    for subscale in Subscale::ALL {
        let detail = feedback.detail(subscale);
        let _ = writeln!(out, "\n{}", ui::cyan(subscale));
        let _ = writeln!(out, "{}", detail.summary);
        for strength in &detail.strengths {
            let _ = writeln!(out, "  {} {strength}", ui::value("+"));
        }
        for weakness in &detail.weaknesses {
            let _ = writeln!(out, "  {} {weakness}", ui::yellow("-"));
        }
    }
    out
}

/// Rubric text, optionally narrowed to one subscale and the descriptor for one band.
pub fn rubric(subscale: Option<Subscale>, band: Option<Band>) -> String {
    let mut out = String::new();
    for definition in SCALES
        .iter()
        .filter(|d| subscale.is_none_or(|s| s == d.subscale))
    {
        let _ = writeln!(out, "{}", ui::header(definition.name()));
        let _ = writeln!(out, "{}", ui::dim(definition.description));
        let descriptors: Vec<_> = match band {
            Some(band) => vec![definition.descriptor(band)],
            None => definition.descriptors.iter().collect(),
        };
        for descriptor in descriptors {
            let _ = writeln!(
                out,
                "\n  {} {}",
                ui::accent(format!("Band {}", descriptor.band)),
                descriptor.summary
            );
            for detail in descriptor.details {
                let _ = writeln!(out, "    - {detail}");
            }
        }
        out.push('\n');
    }
    out
}

pub fn history_list(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return ui::dim("No assessments yet. Run `writewise assess`.\n");
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  {}  {:<12}  {}  {}",
            ui::value(entry.id),
            ui::dim(entry.timestamp.format(DATE_FORMAT)),
            entry.task_type.to_string(),
            ui::header(format!("{:>2}/20", entry.scores.total())),
            ui::dim(format!("{} words", entry.word_count))
        );
    }
    out
}

pub fn history_entry(entry: &HistoryEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  {}",
        ui::header(entry.task_type.label()),
        ui::dim(format!("#{}", entry.id)),
        ui::dim(entry.timestamp.format(DATE_FORMAT))
    );
    match &entry.generated_task {
        Some(generated) => {
            let _ = writeln!(out, "{}", ui::dim(&generated.question));
        }
        None => {
            let _ = writeln!(out, "{}", ui::dim("Custom task"));
        }
    }
    let _ = writeln!(out, "\n{}", entry.student_text.trim_end());
    let _ = writeln!(out, "\n{}\n", word_count_line(entry.word_count));
    out.push_str(&scores(&entry.scores));
    out.push('\n');
    out.push_str(&feedback(&entry.feedback));
    out
}
