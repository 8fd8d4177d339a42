//! Selection-keyed load state for pages
//!
//! Every page fetches data for a selection (a country, a list of countries,
//! or nothing at all). Responses are tagged with the selection they were
//! requested for, and a response whose key no longer matches the current
//! selection is dropped. This keeps a slow response for an old selection
//! from overwriting the data of the new one.

use afrifiscal_core::{Error, Result};
use std::fmt::Debug;
use std::future::Future;
use tracing::{debug, warn};

/// Load state of one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<K, T> {
    selection: K,
    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<K, T> PageState<K, T>
where
    K: PartialEq + Clone + Debug,
{
    /// Idle state for an initial selection, with no data yet
    #[must_use]
    pub const fn new(selection: K) -> Self {
        Self {
            selection,
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Switch to a new selection and mark the page as loading
    ///
    /// Previously received data stays available until a response for the
    /// new selection arrives.
    pub fn select(&mut self, key: K) {
        self.selection = key;
        self.loading = true;
        self.error = None;
    }

    /// Store a successful response
    ///
    /// Returns `false` and leaves the state untouched when `key` is not the
    /// current selection.
    pub fn receive(&mut self, key: &K, data: T) -> bool {
        if *key != self.selection {
            debug!(?key, selection = ?self.selection, "Discarding stale response");
            return false;
        }
        self.data = Some(data);
        self.loading = false;
        self.error = None;
        true
    }

    /// Record a failed fetch
    ///
    /// Loading is cleared and any prior data is kept. Returns `false` when
    /// `key` is not the current selection.
    pub fn fail(&mut self, key: &K, error: &Error) -> bool {
        if *key != self.selection {
            debug!(?key, selection = ?self.selection, "Discarding stale failure");
            return false;
        }
        warn!(?key, %error, "Failed to load page data");
        self.loading = false;
        self.error = Some(error.to_string());
        true
    }

    /// Select `key`, await `fetch` and store its outcome
    pub async fn load<F>(&mut self, key: K, fetch: F)
    where
        F: Future<Output = Result<T>>,
    {
        self.select(key.clone());
        match fetch.await {
            Ok(data) => {
                self.receive(&key, data);
            }
            Err(e) => {
                self.fail(&key, &e);
            }
        }
    }

    /// Current selection
    pub const fn selection(&self) -> &K {
        &self.selection
    }

    /// Data received for the current or a previous selection
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Take ownership of the received data
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Whether a fetch for the current selection is outstanding
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failure for the current selection
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
