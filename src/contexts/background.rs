use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use tc_app::usecases::relay::{DispatchTable, Effect, PasteLastItem, PlaybackOutcome};
use tc_app::HistoryEngine;
use tc_core::ports::StoreError;
use tc_core::{Endpoint, HostCommand};

use crate::bootstrap::{ContextDeps, SharedServices};

const COMMAND_CAPACITY: usize = 16;

pub enum BackgroundCommand {
    Host {
        command: HostCommand,
        reply: Option<oneshot::Sender<PlaybackOutcome>>,
    },
    /// Finish every message already in the mailbox, then stop.
    Shutdown,
}

/// The long-lived context: sole writer of new history items and the
/// receiver of host commands.
pub struct BackgroundContext {
    deps: ContextDeps,
    table: DispatchTable,
    paste_last: PasteLastItem,
    mailbox: mpsc::Receiver<Value>,
    command_rx: mpsc::Receiver<BackgroundCommand>,
    shutting_down: bool,
}

impl BackgroundContext {
    /// Register the background endpoint and spawn the context loop.
    pub async fn start(services: &SharedServices) -> Result<BackgroundHandle, StoreError> {
        let deps = services.attach_context().await?;
        let history = deps.history.clone();
        let paste_last = PasteLastItem::new(
            deps.history.clone(),
            services.tabs.clone(),
            services.bus.clone(),
        );
        let mailbox = services.bus.register(Endpoint::Background);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);

        let context = Self {
            deps,
            table: DispatchTable::background(),
            paste_last,
            mailbox,
            command_rx,
            shutting_down: false,
        };
        let join = tokio::spawn(context.run());
        info!("background context started");

        Ok(BackgroundHandle {
            command_tx,
            history,
            join,
        })
    }

    async fn run(mut self) {
        while !self.shutting_down {
            tokio::select! {
                Some(message) = self.mailbox.recv() => {
                    self.handle_message(message).await;
                }
                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command).await;
                }
                else => break,
            }
        }

        while let Ok(message) = self.mailbox.try_recv() {
            self.handle_message(message).await;
        }
        info!("background context stopped");
    }

    async fn handle_message(&self, message: Value) {
        match self.table.dispatch(&message) {
            Ok(Some(Effect::AddToHistory { text, url })) => {
                if let Err(err) = self.deps.history.add(&text, &url).await {
                    error!(error = %err, "failed to record captured text");
                }
            }
            Ok(Some(other)) => debug!(effect = ?other, "effect not handled by background"),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "dropping malformed message"),
        }
    }

    async fn handle_command(&mut self, command: BackgroundCommand) {
        match command {
            BackgroundCommand::Host { command, reply } => {
                debug!(command = command.name(), "running host command");
                let outcome = match command {
                    HostCommand::PasteLastItem => self.paste_last.execute().await,
                };
                if let Some(reply) = reply {
                    let _ = reply.send(outcome);
                }
            }
            BackgroundCommand::Shutdown => {
                self.shutting_down = true;
                info!("background context shutting down");
            }
        }
    }
}

pub struct BackgroundHandle {
    command_tx: mpsc::Sender<BackgroundCommand>,
    history: Arc<HistoryEngine>,
    join: JoinHandle<()>,
}

impl BackgroundHandle {
    /// Run a host command and wait for its outcome.
    ///
    /// Returns `None` when the context is gone.
    pub async fn execute(&self, command: HostCommand) -> Option<PlaybackOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.command_tx
            .send(BackgroundCommand::Host {
                command,
                reply: Some(reply),
            })
            .await
            .ok()?;
        outcome.await.ok()
    }

    /// This context's history mirror.
    pub fn history(&self) -> &Arc<HistoryEngine> {
        &self.history
    }

    pub async fn shutdown(self) {
        if self.command_tx.send(BackgroundCommand::Shutdown).await.is_err() {
            debug!("background context already stopped");
        }
        if let Err(err) = self.join.await {
            error!(error = %err, "background context task failed");
        }
    }
}
