//! The home page: file controls, date range, predict action, results.
//!
//! The page processes one command at a time. The file section is derived from
//! the shared file-state query, which polls in the background while the page
//! is mounted.

pub mod command;
pub mod download;
pub mod render;
pub mod state;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use lumen_client::{spawn_polling, PollingHandle};
use lumen_core::errors::{LumenError, LumenErrorCode, LumenResult};
use lumen_core::models::{DailyPrediction, DateRange};
use lumen_core::traits::PredictionApi;
use lumen_observability::action_span;
use lumen_observability::tracing_setup::events;
use tracing::Instrument;

pub use command::{Command, ParseCommandError, HELP};
pub use render::{HomeView, TITLE};
pub use state::{predict_blocker, predict_enabled, FileView, PredictPhase};

use crate::context::AppContext;

/// User-facing notification texts.
pub mod messages {
    pub const UPLOAD_OK: &str = "File successfully uploaded";
    pub const UPLOAD_FAILED: &str = "Error uploading file";
    pub const DELETE_OK: &str = "File successfully deleted";
    pub const DELETE_FAILED: &str = "Failed to delete file";
    pub const PREDICT_FAILED: &str = "Error getting predictions! Please try again";
    pub const DOWNLOAD_FAILED: &str = "Error downloading file";
}

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Render,
    Print(String),
    Quit,
}

pub struct HomePage<A> {
    ctx: AppContext<A>,
    dates: DateRange,
    phase: PredictPhase,
    polling: Option<PollingHandle>,
}

impl<A: PredictionApi + 'static> HomePage<A> {
    /// Mount the page and start polling the file state.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(ctx: AppContext<A>) -> Self {
        let polling = spawn_polling(
            Arc::clone(&ctx.file_query),
            ctx.config.polling.interval(),
        );
        tracing::debug!(interval = ?polling.interval(), "home page mounted");
        Self {
            ctx,
            dates: DateRange::default(),
            phase: PredictPhase::Idle,
            polling: Some(polling),
        }
    }
}

impl<A: PredictionApi> HomePage<A> {
    /// Stop polling. The shared cache keeps its last value.
    pub fn unmount(&mut self) {
        if self.polling.take().is_some() {
            tracing::debug!("home page unmounted");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.polling.as_ref().is_some_and(PollingHandle::is_running)
    }

    pub fn context(&self) -> &AppContext<A> {
        &self.ctx
    }

    /// Wait until the first file check has finished, at most `limit`.
    pub async fn settle(&self, limit: Duration) {
        let query = &self.ctx.file_query;
        let _ = tokio::time::timeout(limit, async {
            while query.stats().fetches == 0 || query.is_fetching() {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await;
    }

    pub fn file_view(&self) -> FileView {
        FileView::from_state(self.ctx.file_query.current().as_ref())
    }

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn phase(&self) -> &PredictPhase {
        &self.phase
    }

    pub fn predictions(&self) -> &[DailyPrediction] {
        self.phase.predictions()
    }

    pub fn predict_enabled(&self) -> bool {
        predict_enabled(&self.file_view(), &self.dates, &self.phase)
    }

    pub fn set_start(&mut self, date: NaiveDate) {
        self.dates.start = Some(date);
    }

    pub fn set_end(&mut self, date: NaiveDate) {
        self.dates.end = Some(date);
    }

    pub fn clear_dates(&mut self) {
        self.dates.clear();
    }

    /// Read `path` and upload it under its file name.
    pub async fn upload_path(&mut self, path: &Path) -> LumenResult<()> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| LumenError::ActionUnavailable {
                action: "upload",
                reason: format!("{} is not a file", path.display()),
            })?;
        let contents =
            tokio::fs::read(path)
                .await
                .map_err(|e| LumenError::ActionUnavailable {
                    action: "upload",
                    reason: format!("cannot read {}: {e}", path.display()),
                })?;
        self.upload(&filename, contents).await
    }

    /// Upload, then re-check the file state once success is observed.
    pub async fn upload(&mut self, filename: &str, contents: Vec<u8>) -> LumenResult<()> {
        if let FileView::FileReady(existing) = self.file_view() {
            return Err(LumenError::ActionUnavailable {
                action: "upload",
                reason: format!("{existing} is already uploaded, delete it first"),
            });
        }

        let result = self
            .ctx
            .api
            .upload_file(filename, contents)
            .instrument(action_span!("upload"))
            .await;
        match result {
            Ok(_) => {
                self.ctx.notifications.success(messages::UPLOAD_OK);
                self.refetch().await;
                Ok(())
            }
            Err(e) => {
                self.ctx.notifications.error(messages::UPLOAD_FAILED);
                events::action_failed("upload", e.error_code(), &e.to_string());
                Err(e.into())
            }
        }
    }

    /// Delete the stored file, then re-check.
    pub async fn delete(&mut self) -> LumenResult<()> {
        if !self.file_view().is_ready() {
            return Err(LumenError::ActionUnavailable {
                action: "delete",
                reason: "no data file is uploaded".to_string(),
            });
        }

        let result = self
            .ctx
            .api
            .delete_file()
            .instrument(action_span!("delete"))
            .await;
        match result {
            Ok(_) => {
                self.ctx.notifications.success(messages::DELETE_OK);
                self.refetch().await;
                Ok(())
            }
            Err(e) => {
                self.ctx.notifications.error(messages::DELETE_FAILED);
                events::action_failed("delete", e.error_code(), &e.to_string());
                Err(e.into())
            }
        }
    }

    /// Save the stored file into `dir`, or the configured download directory.
    pub async fn download(&mut self, dir: Option<&Path>) -> LumenResult<PathBuf> {
        let FileView::FileReady(filename) = self.file_view() else {
            return Err(LumenError::ActionUnavailable {
                action: "download",
                reason: "no data file is uploaded".to_string(),
            });
        };
        let dir = dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.ctx.config.shell.download_dir.clone());

        let result = async {
            let bytes = self.ctx.api.download_file().await?;
            let path = download::save_download(&dir, &filename, &bytes).await?;
            events::file_downloaded(&path.display().to_string(), bytes.len());
            Ok::<_, LumenError>(path)
        }
        .instrument(action_span!("download"))
        .await;

        if let Err(e) = &result {
            self.ctx.notifications.error(messages::DOWNLOAD_FAILED);
            events::action_failed("download", e.error_code(), &e.to_string());
        }
        result
    }

    /// Request predictions for the selected range.
    ///
    /// On failure predictions are cleared and predict becomes available again.
    pub async fn predict(&mut self) -> LumenResult<()> {
        let file = self.file_view();
        if let Some(reason) = predict_blocker(&file, &self.dates, &self.phase) {
            return Err(LumenError::ActionUnavailable {
                action: "predict",
                reason: reason.to_string(),
            });
        }
        let Some((start, end)) = self.dates.wire_dates() else {
            return Err(LumenError::ActionUnavailable {
                action: "predict",
                reason: "both dates are required".to_string(),
            });
        };

        self.phase = PredictPhase::Loading;
        let result = self
            .ctx
            .api
            .get_predictions(&start, &end)
            .instrument(action_span!("predict"))
            .await;
        match result {
            Ok(days) => {
                self.phase = PredictPhase::Done(days);
                Ok(())
            }
            Err(e) => {
                self.phase = PredictPhase::Failed;
                self.ctx.notifications.error(messages::PREDICT_FAILED);
                events::action_failed("predict", e.error_code(), &e.to_string());
                Err(e.into())
            }
        }
    }

    /// Re-check the file state now.
    pub async fn refresh(&self) -> LumenResult<FileView> {
        self.ctx.file_query.force_refresh().await?;
        Ok(self.file_view())
    }

    async fn refetch(&self) {
        // Failures are logged by the query and the previous value stays.
        let _ = self.ctx.file_query.force_refresh().await;
    }

    pub fn view(&self) -> HomeView {
        HomeView {
            file: self.file_view(),
            dates: self.dates,
            phase: self.phase.clone(),
            predict_enabled: self.predict_enabled(),
            notifications: self.ctx.notifications.visible(),
        }
    }

    pub fn render(&self) -> String {
        render::render(&self.view())
    }

    /// One-line connection and polling summary.
    pub fn status(&self) -> String {
        let stats = self.ctx.file_query.stats();
        let file = match self.file_view() {
            FileView::FileReady(name) => name,
            FileView::NoFile => "none".to_string(),
        };
        format!(
            "backend {} | file {} | polling {} every {} ms | checks {} ({} failed, {} discarded)",
            self.ctx.config.api.base_url,
            file,
            if self.is_polling() { "on" } else { "off" },
            self.ctx.config.polling.interval_ms,
            stats.fetches,
            stats.failures,
            stats.discarded,
        )
    }

    /// Run one command. Backend failures have already become notifications;
    /// guard failures come back as text.
    pub async fn execute(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Upload(None) => {
                let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                match command::upload_candidates(&dir) {
                    Ok(files) if files.is_empty() => {
                        CommandOutcome::Print(format!("No .parquet files in {}", dir.display()))
                    }
                    Ok(files) => CommandOutcome::Print(
                        files
                            .iter()
                            .map(|f| format!("  {}", f.display()))
                            .collect::<Vec<_>>()
                            .join("\n"),
                    ),
                    Err(e) => CommandOutcome::Print(format!("cannot list {}: {e}", dir.display())),
                }
            }
            Command::Upload(Some(path)) => outcome(self.upload_path(&path).await),
            Command::Download(dir) => match self.download(dir.as_deref()).await {
                Ok(path) => CommandOutcome::Print(format!("Saved {}", path.display())),
                Err(e) => outcome(Err(e)),
            },
            Command::Delete => outcome(self.delete().await),
            Command::Start(date) => {
                self.set_start(date);
                CommandOutcome::Render
            }
            Command::End(date) => {
                self.set_end(date);
                CommandOutcome::Render
            }
            Command::ClearDates => {
                self.clear_dates();
                CommandOutcome::Render
            }
            Command::Predict => outcome(self.predict().await),
            Command::Refresh => match self.refresh().await {
                Ok(_) => CommandOutcome::Render,
                Err(e) => CommandOutcome::Print(format!("refresh failed: {e}")),
            },
            Command::Status => CommandOutcome::Print(self.status()),
            Command::Help => CommandOutcome::Print(HELP.to_string()),
            Command::Quit => CommandOutcome::Quit,
        }
    }
}

fn outcome(result: LumenResult<()>) -> CommandOutcome {
    match result {
        Err(e @ LumenError::ActionUnavailable { .. }) => CommandOutcome::Print(e.to_string()),
        _ => CommandOutcome::Render,
    }
}
