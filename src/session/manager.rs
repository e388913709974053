//! SessionManager: the single live call, shared by every presentation surface.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info, warn};

use crate::error::WizardError;
use crate::wizard::copy::{CopyFeedback, CopyTarget};
use crate::wizard::Wizard;

use super::model::{Applied, SessionSnapshot, WizardAction, WsMessage};

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Holds the wizard behind a lock and fans state changes out to subscribers.
///
/// Each action holds the write lock for its whole duration, so actions from
/// different surfaces are applied one at a time.
///
/// Copy feedback is per client: the manager only hands out fresh trackers
/// with the configured window.
pub struct SessionManager {
    wizard: RwLock<Wizard>,
    copy_template: CopyFeedback,
    tx: broadcast::Sender<WsMessage>,
}

impl SessionManager {
    pub fn new(wizard: Wizard, copy: CopyFeedback) -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        info!(session_id = %wizard.state().session_id(), "Call session started");
        Arc::new(Self {
            wizard: RwLock::new(wizard),
            copy_template: copy.fresh(),
            tx,
        })
    }

    /// Subscribe to session updates. Each WS client calls this.
    pub fn subscribe(&self) -> broadcast::Receiver<WsMessage> {
        self.tx.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&*self.wizard.read().await)
    }

    /// An empty copy tracker for one client.
    pub fn copy_feedback(&self) -> CopyFeedback {
        self.copy_template.fresh()
    }

    /// Apply one action. Mutations are broadcast to all subscribers; a
    /// rejected action changes nothing and is not broadcast.
    pub async fn apply(&self, action: WizardAction) -> Result<Applied, WizardError> {
        let mut wizard = self.wizard.write().await;

        let copied = match &action {
            WizardAction::Advance => {
                wizard.advance()?;
                None
            }
            WizardAction::Retreat => {
                wizard.retreat();
                None
            }
            WizardAction::Reset { confirmed } => {
                wizard.reset(*confirmed)?;
                None
            }
            WizardAction::Select { selector, value } => {
                wizard.select(*selector, *value)?;
                None
            }
            WizardAction::Toggle { key } => {
                wizard.toggle(*key);
                None
            }
            WizardAction::OpenObjection { objection } => {
                wizard.open(*objection);
                None
            }
            WizardAction::CloseObjection => {
                wizard.close();
                None
            }
            WizardAction::CopyCard { index } => {
                let screen = wizard.screen();
                let card = screen.card(*index).ok_or(WizardError::UnknownCard(*index))?;
                debug!(step = %screen.step, index, "Script card copied");
                let target = CopyTarget::Card {
                    step: screen.step,
                    index: *index,
                };
                Some((target, card.plain_text()))
            }
            WizardAction::CopyObjection { objection } => {
                let target = CopyTarget::Objection { objection: *objection };
                Some((target, objection.entry().response.to_string()))
            }
        };

        let snapshot = SessionSnapshot::capture(&wizard);
        if action.is_mutation() {
            // Ok if nobody is listening.
            let _ = self.tx.send(WsMessage::SessionUpdate {
                snapshot: Box::new(snapshot.clone()),
            });
        }
        let (copy_target, clipboard) = copied.unzip();
        Ok(Applied {
            snapshot,
            clipboard,
            copy_target,
        })
    }

    /// Like [`apply`](Self::apply), but logs rejections. Used by surfaces
    /// that report errors back to the operator themselves.
    pub async fn apply_logged(&self, action: WizardAction) -> Result<Applied, WizardError> {
        let result = self.apply(action.clone()).await;
        if let Err(e) = &result {
            if e.is_conflict() {
                debug!(?action, error = %e, "Action refused");
            } else {
                warn!(?action, error = %e, "Invalid action");
            }
        }
        result
    }
}
