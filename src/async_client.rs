//! Async wrapper around [`NumismaSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! quotes and articles are fetched over blocking HTTP.
//!
//! # Example
//!
//! ```no_run
//! use numisma_sdk::{AsyncNumismaSdk, NumismaSdk};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncNumismaSdk::new(NumismaSdk::builder()).await.unwrap();
//!
//!     let rates = sdk.rates().await.unwrap();
//!     let outcome = sdk.search_candidates("Krugerrand gold").await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let currency = sdk.run(|s| Ok(s.currency())).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{NumismaError, Result};
use crate::models::{NormalizedRate, SearchOutcome};
use crate::{NumismaSdk, NumismaSdkBuilder};

/// Async wrapper around [`NumismaSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`NumismaSdk`] is
/// protected by a [`Mutex`] since its quote cache uses `RefCell` internally.
pub struct AsyncNumismaSdk {
    inner: Arc<Mutex<NumismaSdk>>,
}

impl AsyncNumismaSdk {
    /// Build the SDK from a configured builder.
    ///
    /// Construction runs on the blocking thread pool because it may create
    /// a blocking HTTP client.
    pub async fn new(builder: NumismaSdkBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || {
            let sdk = builder.build()?;
            Ok(AsyncNumismaSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| NumismaError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&NumismaSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&NumismaSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| NumismaError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| NumismaError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch normalized rates asynchronously.
    pub async fn rates(&self) -> Result<NormalizedRate> {
        self.run(|s| s.rates()).await
    }

    /// Search for catalog candidates asynchronously.
    pub async fn search_candidates(&self, query: &str) -> Result<SearchOutcome> {
        let query = query.to_string();
        self.run(move |s| Ok(s.search_candidates(&query))).await
    }

    /// Close the SDK, releasing all resources on the blocking pool.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            drop(self.inner);
            Ok(())
        })
        .await
        .map_err(|e| NumismaError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
