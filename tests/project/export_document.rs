use chrono::{TimeZone, Utc};
use std::io::{Cursor, Read};
use tempfile::TempDir;
use writewise::domain::{
    Assessment, AssessmentFeedback, Band, FeedbackDetail, GeneratedTask, HistoryEntry, ScoreState,
    Subscale, TaskDraft, TaskType,
};
use writewise::export::{ExportFormat, export_entry};

fn entry() -> HistoryEntry {
    let detail = |name: &str| FeedbackDetail {
        summary: format!("{name} summary"),
        strengths: vec![format!("{name} strength")],
        weaknesses: vec![format!("{name} weakness")],
    };
    let task = GeneratedTask::stamp(
        TaskDraft {
            context: "A magazine wants letters from readers.".into(),
            question: "Write to the editor about local parks.".into(),
            points: vec!["facilities".into(), "safety".into()],
            opinions: None,
            instructions: "Write your letter.".into(),
        },
        TaskType::LetterEmail,
    );
    HistoryEntry::record(
        Utc.with_ymd_and_hms(2025, 11, 3, 8, 15, 0).unwrap(),
        None,
        TaskType::LetterEmail,
        Some(task),
        "Dear Editor, our parks need investment.".into(),
        Assessment {
            scores: ScoreState::default()
                .with(Subscale::Content, Band::new(4).unwrap())
                .with(Subscale::Communicative, Band::new(3).unwrap())
                .with(Subscale::Organisation, Band::new(5).unwrap())
                .with(Subscale::Language, Band::new(2).unwrap()),
            feedback: AssessmentFeedback {
                content: detail("Content"),
                communicative: detail("Communicative"),
                organisation: detail("Organisation"),
                language: detail("Language"),
                general: "Persuasive and well organised.".into(),
            },
        },
    )
}

#[tokio::test]
async fn docx_export_contains_report_sections() {
    let dir = TempDir::new().expect("tempdir");
    let path = export_entry(&entry(), ExportFormat::Docx, dir.path(), "C1_Assessment")
        .await
        .expect("export");

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("C1_Assessment_Letter-Email_2025-11-03.docx")
    );

    let bytes = std::fs::read(&path).expect("read export");
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .expect("document part")
        .read_to_string(&mut xml)
        .expect("utf-8 body");

    for expected in [
        "Cambridge C1 Advanced Writing Assessment",
        "Task Type: ",
        "Letter/Email",
        "Word Count: ",
        "14/20",
        "Task Requirements",
        "Write to the editor about local parks.",
        "• facilities",
        "Student Submission",
        "Dear Editor, our parks need investment.",
        "Assessment Scores",
        "Band (0-5)",
        "Communicative Achievement",
        "Examiner Feedback",
        "General Summary:",
        "Persuasive and well organised.",
        "Strengths:",
        "• Language strength",
        "Improvements:",
        "• Organisation weakness",
    ] {
        assert!(xml.contains(expected), "document.xml missing {expected:?}");
    }
}

#[tokio::test]
async fn markdown_export_uses_md_extension() {
    let dir = TempDir::new().expect("tempdir");
    let path = export_entry(&entry(), ExportFormat::Markdown, dir.path(), "Practice")
        .await
        .expect("export");

    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("md"));
    let text = std::fs::read_to_string(&path).expect("read export");
    assert!(text.contains("## Examiner Feedback"));
    assert!(text.contains("| Language | 2 |"));
}
