//! Shell: splash, route mounting, and the command loop.

use std::io::{self, Write};

use lumen_core::errors::{LumenError, LumenResult};
use lumen_core::traits::PredictionApi;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::context::AppContext;
use crate::home::{Command, CommandOutcome, HomePage};
use crate::router::{Route, Router};

const PROMPT: &str = "> ";

pub struct Shell<A> {
    ctx: AppContext<A>,
    router: Router,
}

impl<A: PredictionApi + 'static> Shell<A> {
    pub fn new(ctx: AppContext<A>) -> Self {
        Self {
            ctx,
            router: Router::default(),
        }
    }

    pub fn context(&self) -> &AppContext<A> {
        &self.ctx
    }

    /// Cosmetic delay before the page appears. Skipped when configured to 0.
    pub async fn splash<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let delay = self.ctx.config.shell.splash_delay();
        if delay.is_zero() {
            return Ok(());
        }
        writeln!(out, "Lumen")?;
        writeln!(out, "Loading...")?;
        out.flush()?;
        tokio::time::sleep(delay).await;
        Ok(())
    }

    /// Mount the page registered for `path`.
    pub fn mount(&self, path: &str) -> LumenResult<HomePage<A>> {
        match self.router.resolve(path) {
            Some(Route::Home) => Ok(HomePage::mount(self.ctx.clone())),
            None => Err(LumenError::ActionUnavailable {
                action: "navigate",
                reason: format!("no page at {path}"),
            }),
        }
    }

    /// Splash, mount `/`, then read commands from `input` until `quit` or EOF.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.splash(out).await?;
        let mut page = self
            .mount(Router::INITIAL_PATH)
            .map_err(|e| io::Error::other(e.to_string()))?;
        page.settle(self.ctx.config.api.timeout()).await;
        write!(out, "{}", page.render())?;

        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            };
            if command == Command::Predict && page.predict_enabled() {
                writeln!(out, "Loading predictions...")?;
                out.flush()?;
            }
            match page.execute(command).await {
                CommandOutcome::Render => write!(out, "{}", page.render())?,
                CommandOutcome::Print(text) => writeln!(out, "{text}")?,
                CommandOutcome::Quit => break,
            }
        }

        page.unmount();
        out.flush()
    }
}
