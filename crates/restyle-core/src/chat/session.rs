//! Per-user conversation sessions.
//!
//! A [`Session`] is the scratch record of one user's active dialogue. The
//! [`SessionRegistry`] hands out one async-locked slot per [`SessionKey`], so
//! events from the same user are processed one at a time while different
//! users proceed concurrently.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use restyle_types::chat::SessionKey;
use restyle_types::style::StyleName;

/// Which multi-step dialogue a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialogue {
    Creation,
    Rewrite,
}

/// The single active state of a user's dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    AwaitingPrompt,
    AwaitingExampleFile,
    AwaitingStyleName,
    AwaitingStyleSelection,
    AwaitingPostText,
}

impl DialogueState {
    pub fn dialogue(&self) -> Dialogue {
        match self {
            Self::AwaitingPrompt | Self::AwaitingExampleFile | Self::AwaitingStyleName => {
                Dialogue::Creation
            }
            Self::AwaitingStyleSelection | Self::AwaitingPostText => Dialogue::Rewrite,
        }
    }
}

/// Transient per-user data collected by a dialogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// `None` when no dialogue is active.
    pub state: Option<DialogueState>,
    /// System prompt collected during creation.
    pub prompt: Option<String>,
    /// Uploaded example file awaiting commit.
    pub example_file: Option<PathBuf>,
    /// Style chosen during a rewrite.
    pub selected_style: Option<StyleName>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn dialogue(&self) -> Option<Dialogue> {
        self.state.map(|s| s.dialogue())
    }

    /// Reset to the idle state, dropping all collected data.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Registry of per-user session slots.
///
/// Slots are created on first use and evicted by [`SessionRegistry::release`]
/// once the user is idle and nobody else is waiting on them.
#[derive(Debug, Default, Clone)]
pub struct SessionRegistry {
    slots: Arc<DashMap<SessionKey, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the session for `key`, waiting for any in-flight event of the
    /// same user to finish.
    ///
    /// The slot `Arc` is cloned out before awaiting so no `DashMap` guard is
    /// held across the `.await`.
    pub async fn lock(&self, key: SessionKey) -> OwnedMutexGuard<Session> {
        let slot = self.slots.entry(key).or_default().value().clone();
        slot.lock_owned().await
    }

    /// Unlock a session, evicting its slot if it holds no dialogue.
    ///
    /// The slot is kept while any other task holds a clone of it, which
    /// covers events of the same user already waiting in [`Self::lock`].
    /// `lock` clones under the same shard lock `remove_if` takes, so the
    /// count cannot change during the check.
    pub fn release(&self, key: SessionKey, guard: OwnedMutexGuard<Session>) {
        if *guard == Session::default() {
            self.slots
                .remove_if(&key, |_, slot| Arc::strong_count(slot) == 2);
        }
        drop(guard);
    }

    /// Snapshot of a session (for inspection and tests).
    pub async fn snapshot(&self, key: SessionKey) -> Session {
        let slot = self.slots.get(&key).map(|slot| slot.value().clone());
        match slot {
            Some(slot) => slot.lock().await.clone(),
            None => Session::default(),
        }
    }

    /// Number of users with a live slot.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
