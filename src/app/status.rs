use crate::assessment::Workspace;
use crate::config::Config;
use crate::domain::word_count;
use crate::ui::style as ui;

pub fn render_status(
    config: &Config,
    workspace: &Workspace,
    provider_name: &str,
    store_name: &str,
) -> String {
    let session = &workspace.session;
    let mut lines = vec![
        format!("◆ {}", ui::header("writewise status")),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        format!(
            "Store       {} ({})",
            store_name,
            config.database_path().display()
        ),
        String::new(),
        format!("  Provider    {provider_name}"),
        format!("  Model       {}", config.default_model),
        format!("  Temperature {:.2}", config.default_temperature),
        format!(
            "  API key     {}",
            if config.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
                ui::value("configured")
            } else {
                ui::yellow("missing (set WRITEWISE_API_KEY or GEMINI_API_KEY)")
            }
        ),
        String::new(),
        format!("  Task type   {}", session.task_type.label()),
    ];

    lines.push(match &session.generated_task {
        Some(task) => format!("  Active task {} {}", ui::value(task.short_id()), task.question),
        None => format!("  Active task {}", ui::dim("none (generic task)")),
    });
    lines.push(format!(
        "  Draft       {} words",
        word_count(&session.student_text)
    ));
    lines.push(format!("  Score       {}/20", session.scores.total()));
    lines.push(format!(
        "  Feedback    {}",
        if session.feedback.is_some() { "yes" } else { "no" }
    ));
    lines.push(format!(
        "  View        {}{}",
        session.view,
        if session.improved.is_some() {
            ""
        } else {
            " (no improved version)"
        }
    ));
    lines.push(String::new());
    lines.push(format!(
        "  Tasks       {}/{}",
        workspace.library.len(),
        workspace.library.capacity()
    ));
    lines.push(format!(
        "  Assessments {}/{}",
        workspace.history.len(),
        workspace.history.capacity()
    ));

    lines.join("\n")
}
