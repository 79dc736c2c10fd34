//! Application State
//!
//! Arc-wrapped state shared across handlers. In release builds the page
//! store is fixed at startup; in debug builds it sits behind a lock so the
//! hot-reload watcher can swap in freshly loaded content.

use std::sync::Arc;

#[cfg(debug_assertions)]
use std::sync::{PoisonError, RwLock};

#[cfg(debug_assertions)]
use tokio::sync::broadcast;

use crate::content::PageStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    #[cfg(not(debug_assertions))]
    pages: Arc<PageStore>,
    #[cfg(debug_assertions)]
    pages: RwLock<Arc<PageStore>>,
    #[cfg(debug_assertions)]
    reloader: Option<broadcast::Sender<()>>,
}

impl AppState {
    /// Create a new `AppState` without hot reload.
    pub fn new(pages: PageStore) -> Self {
        Self {
            inner: Arc::new(InnerState {
                #[cfg(not(debug_assertions))]
                pages: Arc::new(pages),
                #[cfg(debug_assertions)]
                pages: RwLock::new(Arc::new(pages)),
                #[cfg(debug_assertions)]
                reloader: None,
            }),
        }
    }

    /// Create a new `AppState` with hot reload channel (debug only).
    #[cfg(debug_assertions)]
    pub fn with_reloader(self) -> Self {
        let (tx, _) = broadcast::channel(16);
        let pages = self.pages();
        Self {
            inner: Arc::new(InnerState {
                pages: RwLock::new(pages),
                reloader: Some(tx),
            }),
        }
    }

    /// Get the current page store.
    #[cfg(not(debug_assertions))]
    pub fn pages(&self) -> Arc<PageStore> {
        Arc::clone(&self.inner.pages)
    }

    /// Get the current page store.
    #[cfg(debug_assertions)]
    pub fn pages(&self) -> Arc<PageStore> {
        self.inner
            .pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a freshly loaded page store (debug only).
    ///
    /// In-flight requests keep the store they already cloned; new requests
    /// see the replacement.
    #[cfg(debug_assertions)]
    pub fn replace_pages(&self, pages: PageStore) {
        *self
            .inner
            .pages
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(pages);
    }

    /// Get the reloader channel (debug only).
    #[cfg(debug_assertions)]
    pub fn reloader(&self) -> Option<&broadcast::Sender<()>> {
        self.inner.reloader.as_ref()
    }
}
