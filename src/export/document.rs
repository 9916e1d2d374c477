//! Format-neutral layout of an exported assessment.

use crate::domain::{HistoryEntry, Subscale};
use chrono::Local;

pub const TITLE: &str = "Cambridge C1 Advanced Writing Assessment";
pub const NO_TASK: &str = "Custom Task / No Prompt Provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Heading(String),
    Subheading(String),
    /// Bold label followed by its value, several pairs on one line.
    Fields(Vec<(String, String)>),
    /// Bold standalone label.
    Label(String),
    /// Body text. Line breaks become separate paragraphs.
    Text(String),
    Bullet(String),
    Table {
        header: [String; 2],
        rows: Vec<[String; 2]>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportDocument {
    pub blocks: Vec<Block>,
}

impl ExportDocument {
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        let mut doc = Self::default();
        doc.push(Block::Title(TITLE.into()));

        let date = entry.timestamp.with_timezone(&Local);
        doc.push(Block::Fields(vec![
            field("Date", date.format("%Y-%m-%d %H:%M")),
            field("Task Type", entry.task_type),
        ]));
        doc.push(Block::Fields(vec![
            field("Word Count", entry.word_count),
            field("Total Score", format!("{}/20", entry.scores.total())),
        ]));

        doc.push(Block::Heading("Task Requirements".into()));
        match &entry.generated_task {
            Some(task) => {
                doc.push(Block::Fields(vec![field("Context", &task.context)]));
                doc.push(Block::Fields(vec![field("Question", &task.question)]));
                for point in &task.points {
                    doc.push(Block::Bullet(point.clone()));
                }
                if let Some(opinions) = task.opinions.as_ref().filter(|o| !o.is_empty()) {
                    doc.push(Block::Text("Opinions:".into()));
                    for opinion in opinions {
                        doc.push(Block::Bullet(format!("\"{opinion}\"")));
                    }
                }
            }
            None => doc.push(Block::Text(NO_TASK.into())),
        }

        doc.push(Block::Heading("Student Submission".into()));
        doc.push(Block::Text(entry.student_text.clone()));

        doc.push(Block::Heading("Assessment Scores".into()));
        doc.push(Block::Table {
            header: ["Subscale".into(), "Band (0-5)".into()],
            rows: Subscale::ALL
                .iter()
                .map(|&s| [s.to_string(), entry.scores.get(s).to_string()])
                .collect(),
        });

        doc.push(Block::Heading("Examiner Feedback".into()));
        doc.push(Block::Label("General Summary:".into()));
        doc.push(Block::Text(entry.feedback.general.clone()));
        for subscale in Subscale::ALL {
            let detail = entry.feedback.detail(subscale);
            doc.push(Block::Subheading(subscale.to_string()));
            doc.push(Block::Text(detail.summary.clone()));
            doc.push(Block::Label("Strengths:".into()));
            for strength in &detail.strengths {
                doc.push(Block::Bullet(strength.clone()));
            }
            doc.push(Block::Label("Improvements:".into()));
            for weakness in &detail.weaknesses {
                doc.push(Block::Bullet(weakness.clone()));
            }
        }
        doc
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

fn field(label: &str, value: impl std::fmt::Display) -> (String, String) {
    (label.to_string(), value.to_string())
}
