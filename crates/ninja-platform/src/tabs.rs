//! In-process tab registry delivering popup broadcasts over mpsc channels.

use async_trait::async_trait;
use ninja_core::{
    error::NinjaError,
    message::{TabId, TabMessage},
    traits::TabMessenger,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::debug;

/// Per-tab inbox capacity.
const TAB_BUFFER: usize = 16;

/// Registry of open tabs, each with a content-script inbox.
#[derive(Default)]
pub struct TabRegistry {
    next_id: AtomicU64,
    tabs: Mutex<BTreeMap<TabId, mpsc::Sender<TabMessage>>>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tab with a listening content script.
    pub fn open_tab(&self) -> (TabId, mpsc::Receiver<TabMessage>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let (tx, rx) = mpsc::channel(TAB_BUFFER);
        self.tabs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, tx);
        (id, rx)
    }

    /// Close a tab. Returns whether it was open.
    pub fn close_tab(&self, id: TabId) -> bool {
        self.tabs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }
}

#[async_trait]
impl TabMessenger for TabRegistry {
    async fn tabs(&self) -> Result<Vec<TabId>, NinjaError> {
        Ok(self
            .tabs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect())
    }

    async fn send(&self, tab: TabId, message: &TabMessage) -> Result<(), NinjaError> {
        let sender = self
            .tabs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&tab)
            .cloned()
            .ok_or_else(|| NinjaError::Messaging(format!("no such tab: {tab}")))?;

        sender
            .send(message.clone())
            .await
            .map_err(|_| NinjaError::Messaging(format!("tab {tab} has no receiver")))?;
        debug!("delivered {message:?} to tab {tab}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_reaches_open_tab() {
        let registry = TabRegistry::new();
        let (id, mut rx) = registry.open_tab();
        let msg = TabMessage::UpdateAutoDetectSetting { enabled: false };

        registry.send(id, &msg).await.unwrap();
        assert_eq!(rx.recv().await, Some(msg));
    }

    #[tokio::test]
    async fn test_tabs_lists_open_ids_in_order() {
        let registry = TabRegistry::new();
        let (a, _ra) = registry.open_tab();
        let (b, _rb) = registry.open_tab();
        assert_eq!(registry.tabs().await.unwrap(), vec![a, b]);

        assert!(registry.close_tab(a));
        assert!(!registry.close_tab(a));
        assert_eq!(registry.tabs().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_send_to_tab_without_receiver_fails() {
        let registry = TabRegistry::new();
        let (id, rx) = registry.open_tab();
        drop(rx);
        let msg = TabMessage::UpdateAutoDetectSetting { enabled: true };
        assert!(matches!(
            registry.send(id, &msg).await.unwrap_err(),
            NinjaError::Messaging(_)
        ));
        assert!(registry.send(999, &msg).await.is_err());
    }
}
