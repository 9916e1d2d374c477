use crate::assessment::{ActiveView, AssessmentOrchestrator, OrchestratorSettings};
use crate::cli::{Cli, Commands, DraftCommands, HistoryCommands, ScoreCommands, TaskCommands};
use crate::config::Config;
use crate::domain::{Band, TaskType, word_count};
use crate::error::AssessmentError;
use crate::export::{ExportFormat, export_entry};
use crate::ui::style as ui;
use anyhow::{Context, Result, bail};
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use crate::app::render;
use crate::app::status::render_status;

pub async fn dispatch(cli: Cli, config: Arc<Config>) -> Result<()> {
    // The rubric needs neither the store nor the provider.
    if let Commands::Rubric { subscale, band } = &cli.command {
        print!("{}", render::rubric(*subscale, band.and_then(Band::new)));
        return Ok(());
    }

    let store = crate::store::create_store(&config).await;
    let provider = crate::llm::create_provider(&config);
    let orchestrator = AssessmentOrchestrator::restore(
        provider,
        store,
        OrchestratorSettings::from_config(&config),
    )
    .await;

    match cli.command {
        Commands::Rubric { .. } => Ok(()),

        Commands::Status => {
            let workspace = orchestrator.snapshot().await;
            println!(
                "{}",
                render_status(
                    &config,
                    &workspace,
                    orchestrator.provider_name(),
                    orchestrator.store_name()
                )
            );
            Ok(())
        }

        Commands::Type { task_type } => match task_type {
            Some(task_type) => {
                orchestrator
                    .update(|ws| Ok(ws.change_task_type(task_type)))
                    .await?;
                println!(
                    "{} Task type set to {}",
                    ui::success("✓"),
                    ui::value(task_type.label())
                );
                println!("  {}", ui::dim(task_type.description()));
                Ok(())
            }
            None => {
                let current = orchestrator.snapshot().await.session.task_type;
                for task_type in TaskType::ALL {
                    let marker = if task_type == current {
                        ui::accent("*")
                    } else {
                        " ".into()
                    };
                    println!(
                        "{marker} {:<22} {}",
                        task_type.label(),
                        ui::dim(task_type.description())
                    );
                }
                Ok(())
            }
        },

        Commands::Task { task_command } => run_task_command(&orchestrator, task_command).await,

        Commands::Draft { draft_command } => run_draft_command(&orchestrator, draft_command).await,

        Commands::Improve => {
            println!(
                "{}",
                ui::dim(format!("Improving draft with {}...", orchestrator.model()))
            );
            let improved = orchestrator.improve_writing().await?;
            print!("{}", render::improved(&improved));
            Ok(())
        }

        Commands::Assess => {
            println!(
                "{}",
                ui::dim(format!("Assessing draft with {}...", orchestrator.model()))
            );
            let entry = orchestrator.assess_writing().await?;
            println!("{}\n", render::word_count_line(entry.word_count));
            print!("{}", render::scores(&entry.scores));
            println!();
            print!("{}", render::feedback(&entry.feedback));
            println!(
                "\n{} Saved to history as {}",
                ui::success("✓"),
                ui::value(entry.id)
            );
            Ok(())
        }

        Commands::Score { score_command } => match score_command {
            ScoreCommands::Set { subscale, band } => {
                let band = Band::new(band).context("band must be between 0 and 5")?;
                orchestrator.update(|ws| Ok(ws.set_score(subscale, band))).await?;
                println!(
                    "{} {} set to band {}",
                    ui::success("✓"),
                    subscale,
                    ui::band(band)
                );
                Ok(())
            }
            ScoreCommands::Show => {
                let workspace = orchestrator.snapshot().await;
                print!("{}", render::scores(&workspace.session.scores));
                Ok(())
            }
        },

        Commands::History { history_command } => {
            run_history_command(&orchestrator, &config, history_command).await
        }

        Commands::View { view } => {
            if let Some(view) = view {
                orchestrator.update(|ws| Ok(ws.set_view(view))).await?;
            }
            let session = orchestrator.snapshot().await.session;
            match (session.view, &session.improved) {
                (ActiveView::Improved, Some(improved)) => print!("{}", render::improved(improved)),
                (ActiveView::Improved, None) => {
                    println!(
                        "{}",
                        ui::yellow("No improved version yet. Run `writewise improve`.")
                    );
                }
                (ActiveView::Draft, _) => print!("{}", render::draft(&session.student_text)),
            }
            Ok(())
        }
    }
}

async fn run_task_command(
    orchestrator: &AssessmentOrchestrator,
    command: TaskCommands,
) -> Result<()> {
    match command {
        TaskCommands::Generate { task_type } => {
            let task_type = match task_type {
                Some(task_type) => task_type,
                None => orchestrator.snapshot().await.session.task_type,
            };
            println!(
                "{}",
                ui::dim(format!(
                    "Generating {} task with {}...",
                    task_type,
                    orchestrator.model()
                ))
            );
            let task = orchestrator.generate_task(task_type).await?;
            print!("{}", render::task(&task));
            Ok(())
        }

        TaskCommands::List => {
            let workspace = orchestrator.snapshot().await;
            let active = workspace
                .session
                .generated_task
                .as_ref()
                .map(|t| t.id.as_str());
            print!("{}", render::task_list(workspace.library.items(), active));
            Ok(())
        }

        TaskCommands::Show { id } => {
            let workspace = orchestrator.snapshot().await;
            let task = match id {
                Some(query) => {
                    let id = workspace.resolve_task_id(&query)?;
                    workspace.library.find(id.as_str()).cloned()
                }
                None => workspace.session.generated_task.clone(),
            };
            match task {
                Some(task) => print!("{}", render::task(&task)),
                None => println!(
                    "{}",
                    ui::dim(format!(
                        "No active task; working on a generic {}.",
                        workspace.session.task_type
                    ))
                ),
            }
            Ok(())
        }

        TaskCommands::Load { id, yes } => {
            let id = orchestrator.snapshot().await.resolve_task_id(&id)?;
            match orchestrator.update(|ws| ws.load_task(&id, yes)).await {
                Err(AssessmentError::ConfirmationRequired) => {
                    if !confirm("Loading this task will clear your current draft. Continue?")? {
                        println!("{}", ui::dim("Cancelled."));
                        return Ok(());
                    }
                    orchestrator.update(|ws| ws.load_task(&id, true)).await?;
                }
                other => {
                    other?;
                }
            }
            let workspace = orchestrator.snapshot().await;
            if let Some(task) = &workspace.session.generated_task {
                println!("{} Loaded task {}", ui::success("✓"), ui::value(task.short_id()));
                print!("{}", render::task(task));
            }
            Ok(())
        }

        TaskCommands::Delete { id, yes } => {
            let id = orchestrator.snapshot().await.resolve_task_id(&id)?;
            if !yes && !confirm("Delete this task from the library?")? {
                println!("{}", ui::dim("Cancelled."));
                return Ok(());
            }
            orchestrator.update(|ws| ws.delete_task(&id)).await?;
            println!("{} Task deleted", ui::success("✓"));
            Ok(())
        }
    }
}

async fn run_draft_command(
    orchestrator: &AssessmentOrchestrator,
    command: DraftCommands,
) -> Result<()> {
    match command {
        DraftCommands::Set { text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read draft from {}", path.display()))?,
                (None, None) => {
                    let mut buf = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut buf)
                        .await
                        .context("failed to read draft from stdin")?;
                    buf
                }
            };
            let count = word_count(&text);
            orchestrator.update(|ws| Ok(ws.set_draft(text))).await?;
            println!(
                "{} Draft saved, {}",
                ui::success("✓"),
                render::word_count_line(count)
            );
            Ok(())
        }
        DraftCommands::Show => {
            let workspace = orchestrator.snapshot().await;
            print!("{}", render::draft(&workspace.session.student_text));
            Ok(())
        }
        DraftCommands::Clear => {
            orchestrator.update(|ws| Ok(ws.clear_draft())).await?;
            println!("{} Draft cleared", ui::success("✓"));
            Ok(())
        }
    }
}

async fn run_history_command(
    orchestrator: &AssessmentOrchestrator,
    config: &Config,
    command: HistoryCommands,
) -> Result<()> {
    match command {
        HistoryCommands::List => {
            let workspace = orchestrator.snapshot().await;
            print!("{}", render::history_list(workspace.history.items()));
            Ok(())
        }

        HistoryCommands::Show { id } => {
            let workspace = orchestrator.snapshot().await;
            let id = workspace.resolve_history_id(&id)?;
            let entry = workspace
                .history
                .find(&id)
                .ok_or(AssessmentError::HistoryEntryNotFound(id.to_string()))?;
            print!("{}", render::history_entry(entry));
            Ok(())
        }

        HistoryCommands::Delete { id, yes } => {
            let id = orchestrator.snapshot().await.resolve_history_id(&id)?;
            if !yes && !confirm("Delete this assessment from history?")? {
                println!("{}", ui::dim("Cancelled."));
                return Ok(());
            }
            orchestrator.update(|ws| ws.delete_history_entry(id)).await?;
            println!("{} Assessment deleted", ui::success("✓"));
            Ok(())
        }

        HistoryCommands::Export { id, format, out } => {
            let workspace = orchestrator.snapshot().await;
            let entry = match id {
                Some(query) => {
                    let id = workspace.resolve_history_id(&query)?;
                    workspace.history.find(&id).cloned()
                }
                None => workspace.history.first().cloned(),
            };
            let Some(entry) = entry else {
                bail!("no assessments to export yet; run `writewise assess` first");
            };
            let dir: PathBuf = out.unwrap_or_else(|| config.export_dir());
            let path = export_entry(&entry, format, &dir, &config.export.filename_prefix).await?;
            let kind = match format {
                ExportFormat::Docx => "Word document",
                ExportFormat::Markdown => "Markdown file",
            };
            println!(
                "{} {kind} written to {}",
                ui::success("✓"),
                ui::value(path.display())
            );
            Ok(())
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("confirmation needs an interactive terminal; pass --yes to skip it")
}
