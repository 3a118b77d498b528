//! Async session driver.
//!
//! DESIGN
//! ======
//! `EditorSession` owns the shell behind `Arc<RwLock<_>>` and runs every
//! `ReplyRequested` on its own tokio task: the task awaits the responder
//! without holding the lock, then takes the write lock only to hand the
//! result to `EditorShell::complete_reply`. Actions produced by a late reply
//! are queued on the session's action channel for the host.
//!
//! Reply tasks are not cancelled when the host navigates away; the shell's
//! generation check discards whatever they deliver late.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::asset::{AssetError, AssetService, PlaceholderAssets};
use crate::config::EditorConfig;
use crate::consts::SESSION_ACTION_CAPACITY;
use crate::conversation::PendingReply;
use crate::render::RenderedPage;
use crate::responder::{CannedResponder, Responder};
use crate::shell::{Action, EditorShell};

/// Result of dispatching one event into the shell.
#[derive(Debug)]
pub struct Dispatch {
    /// Actions for the host to carry out now. Reply requests are already handled.
    pub actions: Vec<Action>,
    /// One handle per reply task started by the event.
    pub replies: Vec<JoinHandle<()>>,
}

/// A live editing session.
#[derive(Clone)]
pub struct EditorSession {
    shell: Arc<RwLock<EditorShell>>,
    responder: Arc<dyn Responder>,
    assets: Arc<dyn AssetService>,
    actions: mpsc::Sender<Action>,
}

impl EditorSession {
    /// Start a session. The receiver yields actions produced by replies that
    /// arrive after their triggering event returned.
    #[must_use]
    pub fn new(
        shell: EditorShell,
        responder: Arc<dyn Responder>,
        assets: Arc<dyn AssetService>,
    ) -> (Self, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel(SESSION_ACTION_CAPACITY);
        let session = Self { shell: Arc::new(RwLock::new(shell)), responder, assets, actions: tx };
        (session, rx)
    }

    /// Session with the simulated responder and placeholder assets.
    #[must_use]
    pub fn from_config(config: EditorConfig) -> (Self, mpsc::Receiver<Action>) {
        info!(
            chat_latency_ms = config.chat_latency_ms,
            section_latency_ms = config.section_latency_ms,
            palette = %config.palette_id,
            page = config.initial_page.slug(),
            "editor session starting"
        );
        let responder = Arc::new(CannedResponder::from_config(&config));
        Self::new(EditorShell::new(config), responder, Arc::new(PlaceholderAssets::default()))
    }

    /// Apply one event to the shell and start any reply it requests.
    pub async fn dispatch<F>(&self, event: F) -> Dispatch
    where
        F: FnOnce(&mut EditorShell) -> Vec<Action>,
    {
        let produced = {
            let mut shell = self.shell.write().await;
            event(&mut *shell)
        };

        let mut actions = Vec::with_capacity(produced.len());
        let mut replies = Vec::new();
        for action in produced {
            match action {
                Action::ReplyRequested(pending) => replies.push(self.spawn_reply(pending)),
                other => actions.push(other),
            }
        }
        Dispatch { actions, replies }
    }

    /// Read the shell under the shared lock.
    pub async fn read<T>(&self, f: impl FnOnce(&EditorShell) -> T) -> T {
        let shell = self.shell.read().await;
        f(&*shell)
    }

    pub async fn render(&self) -> RenderedPage {
        self.read(EditorShell::render).await
    }

    /// Upload an image and point the selected image at it.
    ///
    /// # Errors
    ///
    /// Returns the asset service's error; the shell is left untouched.
    pub async fn upload_image(&self, file_name: &str, bytes: &[u8]) -> Result<Vec<Action>, AssetError> {
        let url = self.assets.upload_image(file_name, bytes).await.inspect_err(|e| {
            warn!(error = %e, code = e.error_code(), file_name, "image upload failed");
        })?;
        Ok(self.dispatch(|shell| shell.update_image_source(&url)).await.actions)
    }

    /// Generate an icon and swap it into the selected icon.
    ///
    /// # Errors
    ///
    /// Returns the asset service's error; the shell is left untouched.
    pub async fn generate_icon(&self, prompt: &str) -> Result<Vec<Action>, AssetError> {
        let markup = self.assets.generate_icon(prompt).await.inspect_err(|e| {
            warn!(error = %e, code = e.error_code(), "icon generation failed");
        })?;
        Ok(self.dispatch(|shell| shell.update_icon_markup(&markup)).await.actions)
    }

    fn spawn_reply(&self, pending: PendingReply) -> JoinHandle<()> {
        let shell = Arc::clone(&self.shell);
        let responder = Arc::clone(&self.responder);
        let tx = self.actions.clone();
        tokio::spawn(async move {
            let channel = pending.channel;
            let result = responder.respond_to(channel, &pending.history).await;
            let actions = shell.write().await.complete_reply(&pending, result);
            debug!(%channel, applied = !actions.is_empty(), "reply delivered");

            for action in actions {
                if tx.send(action).await.is_err() {
                    debug!(%channel, "action receiver closed");
                    break;
                }
            }
        })
    }
}
