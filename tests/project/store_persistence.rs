use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;
use writewise::assessment::{ActiveView, Submission, Workspace};
use writewise::config::HistoryConfig;
use writewise::domain::{
    Assessment, AssessmentFeedback, Band, FeedbackDetail, GeneratedTask, ScoreState, Subscale,
    TaskDraft, TaskType,
};
use writewise::store::{self, ASSESSMENT_HISTORY_KEY, PersistentStore, SqliteStore};

fn assessment(content: u8) -> Assessment {
    Assessment {
        scores: ScoreState::default().with(Subscale::Content, Band::new(content).unwrap()),
        feedback: AssessmentFeedback {
            content: FeedbackDetail {
                summary: "Covers the points.".into(),
                strengths: vec!["relevant".into()],
                weaknesses: vec![],
            },
            general: "Good.".into(),
            ..AssessmentFeedback::default()
        },
    }
}

fn task() -> GeneratedTask {
    GeneratedTask::stamp(
        TaskDraft {
            context: "Your manager asked for a report.".into(),
            question: "Report on the staff canteen.".into(),
            points: vec!["food quality".into(), "prices".into()],
            opinions: None,
            instructions: "Write your report.".into(),
        },
        TaskType::Report,
    )
}

async fn open(dir: &TempDir) -> Arc<dyn PersistentStore> {
    Arc::new(
        SqliteStore::open(&dir.path().join("state.db"))
            .await
            .expect("open sqlite store"),
    )
}

#[tokio::test]
async fn workspace_survives_reopening_the_database() {
    let dir = TempDir::new().expect("tempdir");
    let limits = HistoryConfig::default();

    let mut ws = Workspace::new(&limits);
    let dirty = ws.apply_generated(task());
    ws.set_draft("The canteen needs cheaper lunches.".into());
    let submission = Submission::capture(&ws.session);
    let (assessed, _) = ws.apply_assessment(
        Utc.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap(),
        submission,
        assessment(3),
    );
    let view = ws.set_view(ActiveView::Draft);

    let store = open(&dir).await;
    ws.persist(store.as_ref(), dirty.with(assessed).with(view)).await;
    drop(store);

    let reopened = open(&dir).await;
    let restored = Workspace::restore(reopened.as_ref(), &limits).await;
    assert_eq!(restored, ws);
    assert_eq!(restored.history.items()[0].word_count, 5);
}

#[tokio::test]
async fn history_entries_round_trip_field_for_field() {
    let dir = TempDir::new().expect("tempdir");
    let limits = HistoryConfig::default();
    let mut ws = Workspace::new(&limits);
    for (i, band) in [2_u8, 4, 5].into_iter().enumerate() {
        ws.set_draft(format!("Draft number {i}"));
        let submission = Submission::capture(&ws.session);
        let _ = ws.apply_assessment(
            Utc.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap(),
            submission,
            assessment(band),
        );
    }

    let store = open(&dir).await;
    store::save(store.as_ref(), ASSESSMENT_HISTORY_KEY, ws.history.items()).await;
    let loaded: Vec<writewise::domain::HistoryEntry> =
        store::load(store.as_ref(), ASSESSMENT_HISTORY_KEY)
            .await
            .expect("history record");

    assert_eq!(loaded.len(), 3);
    for (original, reloaded) in ws.history.iter().zip(&loaded) {
        assert_eq!(reloaded.id, original.id);
        assert_eq!(reloaded.scores, original.scores);
        assert_eq!(reloaded.feedback, original.feedback);
        assert_eq!(reloaded.word_count, original.word_count);
        assert_eq!(reloaded.timestamp, original.timestamp);
    }
    let ids: Vec<_> = loaded.iter().map(|e| e.id).collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]), "{ids:?}");
}

#[tokio::test]
async fn corrupt_record_is_treated_as_absent() {
    let dir = TempDir::new().expect("tempdir");
    let store = open(&dir).await;
    store
        .save_raw(ASSESSMENT_HISTORY_KEY, "{not json".into())
        .await
        .expect("raw write");

    let restored = Workspace::restore(store.as_ref(), &HistoryConfig::default()).await;
    assert!(restored.history.is_empty());
}
