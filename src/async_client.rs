//! Async wrapper around [`DextrendsSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs SDK operations on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], since the store does file IO and
//! PokéAPI lookups use a blocking HTTP client.
//!
//! # Example
//!
//! ```no_run
//! use dextrends_sdk::AsyncDextrendsSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncDextrendsSdk::builder().build().await.unwrap();
//!
//!     let decks = sdk.run(|s| s.decks().list()).await.unwrap();
//!     let pikachu = sdk.fetch_pokemon("pikachu").await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config;
use crate::error::{DextrendsError, Result};
use crate::models::TeamPokemon;
use crate::DextrendsSdk;

// ---------------------------------------------------------------------------
// AsyncDextrendsSdkBuilder
// ---------------------------------------------------------------------------

pub struct AsyncDextrendsSdkBuilder {
    storage_dir: Option<PathBuf>,
    quota_bytes: u64,
    offline: bool,
    timeout: Duration,
}

impl Default for AsyncDextrendsSdkBuilder {
    fn default() -> Self {
        Self {
            storage_dir: None,
            quota_bytes: config::DEFAULT_QUOTA_BYTES,
            offline: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl AsyncDextrendsSdkBuilder {
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn quota_bytes(mut self, quota: u64) -> Self {
        self.quota_bytes = quota;
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK. Opening the store runs on the blocking pool.
    pub async fn build(self) -> Result<AsyncDextrendsSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = DextrendsSdk::builder();
            if let Some(dir) = self.storage_dir {
                builder = builder.storage_dir(dir);
            }
            let sdk = builder
                .quota_bytes(self.quota_bytes)
                .offline(self.offline)
                .timeout(self.timeout)
                .build()?;
            Ok(AsyncDextrendsSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| DextrendsError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDextrendsSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`DextrendsSdk`].
///
/// The SDK sits behind a [`Mutex`]; each call locks it on a blocking thread.
pub struct AsyncDextrendsSdk {
    inner: Arc<Mutex<DextrendsSdk>>,
}

impl AsyncDextrendsSdk {
    pub fn builder() -> AsyncDextrendsSdkBuilder {
        AsyncDextrendsSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use dextrends_sdk::AsyncDextrendsSdk;
    /// # async fn example() -> dextrends_sdk::Result<()> {
    /// # let sdk = AsyncDextrendsSdk::builder().build().await?;
    /// let prefs = sdk.run(|s| s.preferences().get()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DextrendsSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| DextrendsError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DextrendsError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch a Pokémon from PokéAPI (or the local cache).
    pub async fn fetch_pokemon(&self, id_or_name: &str) -> Result<TeamPokemon> {
        let ident = id_or_name.to_string();
        self.run(move |s| s.fetch_pokemon(&ident)).await
    }
}
