use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use writewise::assessment::{AssessmentOrchestrator, OrchestratorSettings, Workspace};
use writewise::config::HistoryConfig;
use writewise::domain::{Subscale, TaskType, word_count};
use writewise::error::AssessmentError;
use writewise::llm::GeminiProvider;
use writewise::store::{MemoryStore, PersistentStore, SqliteStore};

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn settings() -> OrchestratorSettings {
    OrchestratorSettings {
        model: "gemini-2.5-flash".into(),
        temperature: 0.7,
        limits: HistoryConfig::default(),
        lease_ttl: Duration::from_secs(60),
    }
}

fn orchestrator(server: &MockServer) -> AssessmentOrchestrator {
    let provider = Arc::new(GeminiProvider::new(Some("test-key"), &server.uri(), 5));
    AssessmentOrchestrator::new(
        provider,
        Arc::new(MemoryStore::new()),
        Workspace::new(&HistoryConfig::default()),
        settings(),
    )
    .with_topic_picker(|topics| topics[0])
}

fn candidate(payload: &serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": payload.to_string() }] },
            "finishReason": "STOP"
        }]
    }))
}

fn task_payload(question: &str, opinions: bool) -> serde_json::Value {
    let mut payload = json!({
        "context": "Your class has listened to a panel discussion.",
        "question": question,
        "points": ["cycle paths", "libraries", "sports centres"],
        "instructions": "Write your answer."
    });
    if opinions {
        payload["opinions"] = json!(["Cycling is healthy.", "Books matter.", "Sport unites."]);
    }
    payload
}

fn assessment_payload() -> serde_json::Value {
    let detail = |summary: &str| {
        json!({ "summary": summary, "strengths": ["clear"], "weaknesses": ["brief"] })
    };
    json!({
        "scores": { "content": 4, "communicative": 3, "organisation": 5, "language": 2 },
        "feedback": {
            "content": detail("Relevant."),
            "communicative": detail("Mostly appropriate."),
            "organisation": detail("Well linked."),
            "language": detail("Limited range."),
            "general": "A solid attempt."
        }
    })
}

#[tokio::test]
async fn essay_then_report_builds_library_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string_contains("Part 1 Essay"))
        .respond_with(candidate(&task_payload("Which facility should get funding?", true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string_contains("Part 2 Report"))
        .respond_with(candidate(&task_payload("Report on the sports centre.", false)))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    let essay = orch.generate_task(TaskType::Essay).await.expect("essay");
    let report = orch.generate_task(TaskType::Report).await.expect("report");

    let ws = orch.snapshot().await;
    let types: Vec<_> = ws.library.iter().map(|t| t.task_type).collect();
    assert_eq!(types, [TaskType::Report, TaskType::Essay]);
    assert_ne!(essay.id, report.id);
    assert_eq!(ws.session.task_type, TaskType::Report);
    assert_eq!(ws.session.generated_task.as_ref(), Some(&report));
    assert!(report.opinions.is_none());
}

#[tokio::test]
async fn whitespace_draft_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(candidate(&assessment_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.update(|ws| Ok(ws.set_draft("  ".into())))
        .await
        .expect("set draft");
    let before = orch.snapshot().await.session.scores;

    let err = orch.assess_writing().await.unwrap_err();

    assert!(matches!(err, AssessmentError::EmptyDraft { .. }));
    assert_eq!(orch.snapshot().await.session.scores, before);
}

#[tokio::test]
async fn assessment_totals_scores_and_records_word_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(candidate(&assessment_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let draft = "In my view, cycle paths deserve funding because they cut congestion.";
    let orch = orchestrator(&server);
    orch.update(|ws| Ok(ws.set_draft(draft.into())))
        .await
        .expect("set draft");

    let entry = orch.assess_writing().await.expect("assessment");

    assert_eq!(entry.scores.total(), 14);
    assert_eq!(entry.word_count, word_count(draft));
    assert_eq!(entry.task_type, TaskType::Essay);
    assert!(entry.generated_task.is_none());

    let ws = orch.snapshot().await;
    assert_eq!(ws.history.len(), 1);
    assert_eq!(ws.history.items()[0], entry);
    assert_eq!(ws.session.scores.get(Subscale::Language).value(), 2);
    assert_eq!(
        ws.session.feedback.as_ref().map(|f| f.general.as_str()),
        Some("A solid attempt.")
    );
}

#[tokio::test]
async fn concurrent_operation_is_rejected_while_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(candidate(&assessment_payload()).set_delay(Duration::from_millis(400)))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.update(|ws| Ok(ws.set_draft("A short but real draft.".into())))
        .await
        .expect("set draft");

    let (first, second) = tokio::join!(orch.assess_writing(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        orch.generate_task(TaskType::Review).await
    });

    assert!(first.is_ok());
    assert_eq!(
        second.unwrap_err(),
        AssessmentError::Busy {
            pending: "assessment".into()
        }
    );
    assert!(orch.in_flight().is_none());
}

#[tokio::test]
async fn unauthorized_provider_commits_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"error":{"message":"API key not valid: AIzaSyLEAKEDLEAKED"}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.update(|ws| Ok(ws.set_draft("Something worth improving.".into())))
        .await
        .expect("set draft");
    let before = orch.snapshot().await;

    let err = orch.improve_writing().await.unwrap_err();

    let AssessmentError::Provider(message) = err else {
        panic!("expected provider error, got {err:?}");
    };
    assert!(message.contains("authentication failed"));
    assert!(!message.contains("AIzaSyLEAKEDLEAKED"));
    assert_eq!(orch.snapshot().await, before);
}

async fn on_database(db: &Path, server: &MockServer) -> AssessmentOrchestrator {
    let store: Arc<dyn PersistentStore> = Arc::new(SqliteStore::open(db).await.expect("open store"));
    let provider = Arc::new(GeminiProvider::new(Some("test-key"), &server.uri(), 5));
    AssessmentOrchestrator::restore(provider, store, settings()).await
}

#[tokio::test]
async fn separate_orchestrators_on_one_database_are_serialized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(candidate(&assessment_payload()).set_delay(Duration::from_millis(400)))
        .expect(2)
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().expect("tempdir");
    let db = tmp.path().join("state.db");
    let first = on_database(&db, &server).await;
    let second = on_database(&db, &server).await;
    first
        .update(|ws| Ok(ws.set_draft("Both terminals assess this draft.".into())))
        .await
        .expect("set draft");

    let (a, b) = tokio::join!(first.assess_writing(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        second.assess_writing().await
    });

    let a = a.expect("first assessment");
    assert_eq!(
        b.unwrap_err(),
        AssessmentError::Busy {
            pending: "assessment".into()
        }
    );

    let b = second.assess_writing().await.expect("second assessment after release");
    assert!(b.id > a.id);

    let reopened = on_database(&db, &server).await.snapshot().await;
    let ids: Vec<_> = reopened.history.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}
