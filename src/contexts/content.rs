use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use tc_app::usecases::relay::{
    CaptureOutcome, CaptureRelay, DispatchTable, Effect, InsertOutcome, InsertText,
};
use tc_core::ports::{PagePort, SystemClipboardPort};
use tc_core::{Endpoint, TabId};

use crate::bootstrap::SharedServices;

const COMMAND_CAPACITY: usize = 16;
/// Insert outcomes kept for the handle; later ones are dropped until it reads.
pub const INSERTED_CAPACITY: usize = 16;

pub enum ContentCommand {
    /// A copy event fired in the page.
    Copy {
        event_text: Option<String>,
        reply: Option<oneshot::Sender<CaptureOutcome>>,
    },
    Shutdown,
}

/// Content context attached to one tab.
///
/// It keeps no history mirror: captures go to the background as messages and
/// paste requests arrive as messages.
pub struct ContentContext {
    tab: TabId,
    table: DispatchTable,
    capture: CaptureRelay,
    insert: InsertText,
    mailbox: mpsc::Receiver<Value>,
    command_rx: mpsc::Receiver<ContentCommand>,
    inserted_tx: mpsc::Sender<InsertOutcome>,
    shutting_down: bool,
}

impl ContentContext {
    /// Register `tab` on the bus and spawn the context loop.
    pub fn start(
        services: &SharedServices,
        tab: TabId,
        page: Arc<dyn PagePort>,
        clipboard: Arc<dyn SystemClipboardPort>,
    ) -> ContentHandle {
        let mailbox = services.bus.register(Endpoint::Tab(tab));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (inserted_tx, inserted_rx) = mpsc::channel(INSERTED_CAPACITY);

        let context = Self {
            tab,
            table: DispatchTable::content(),
            capture: CaptureRelay::new(page.clone(), services.bus.clone()),
            insert: InsertText::new(page, clipboard),
            mailbox,
            command_rx,
            inserted_tx,
            shutting_down: false,
        };
        let join = tokio::spawn(context.run());
        debug!(%tab, "content context started");

        ContentHandle {
            tab,
            command_tx,
            inserted_rx,
            join,
        }
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
        info!(tab = %self.tab, "content context stopped");
    }

    async fn handle_message(&self, message: Value) {
        let text = match self.table.dispatch(&message) {
            Ok(Some(Effect::InsertText { text })) => text,
            Ok(Some(other)) => {
                debug!(effect = ?other, "effect not handled by content");
                return;
            }
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "dropping malformed message");
                return;
            }
        };

        match self.insert.execute(&text).await {
            Ok(outcome) => {
                debug!(?outcome, "inserted text");
                if let Err(TrySendError::Full(_)) = self.inserted_tx.try_send(outcome) {
                    debug!("insert outcome dropped, handle is not reading");
                }
            }
            Err(err) => error!(error = %err, "failed to insert text"),
        }
    }

    async fn handle_command(&mut self, command: ContentCommand) {
        match command {
            ContentCommand::Copy { event_text, reply } => {
                let outcome = self.capture.on_copy(event_text.as_deref()).await;
                if let Some(reply) = reply {
                    let _ = reply.send(outcome);
                }
            }
            ContentCommand::Shutdown => self.shutting_down = true,
        }
    }
}

pub struct ContentHandle {
    tab: TabId,
    command_tx: mpsc::Sender<ContentCommand>,
    inserted_rx: mpsc::Receiver<InsertOutcome>,
    join: JoinHandle<()>,
}

impl ContentHandle {
    pub fn tab(&self) -> TabId {
        self.tab
    }

    /// Fire a copy event and wait until the capture was relayed.
    pub async fn copy(&self, event_text: Option<String>) -> Option<CaptureOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.command_tx
            .send(ContentCommand::Copy {
                event_text,
                reply: Some(reply),
            })
            .await
            .ok()?;
        outcome.await.ok()
    }

    /// Wait for the next completed insertion.
    pub async fn next_insert(&mut self) -> Option<InsertOutcome> {
        self.inserted_rx.recv().await
    }

    pub async fn shutdown(self) {
        let _ = self.command_tx.send(ContentCommand::Shutdown).await;
        if let Err(err) = self.join.await {
            error!(error = %err, "content context task failed");
        }
    }
}
