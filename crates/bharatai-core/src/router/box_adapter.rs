//! BoxProviderAdapter -- object-safe dynamic dispatch wrapper for ProviderAdapter.
//!
//! 1. Define an object-safe `ProviderAdapterDyn` trait with boxed futures
//! 2. Blanket-impl `ProviderAdapterDyn` for all `T: ProviderAdapter`
//! 3. `BoxProviderAdapter` wraps `Box<dyn ProviderAdapterDyn>` and delegates

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bharatai_types::provider::{Capability, ProviderError, Reply};
use bharatai_types::query::Query;

use super::adapter::ProviderAdapter;

/// Object-safe version of [`ProviderAdapter`] with boxed futures.
pub trait ProviderAdapterDyn: Send + Sync {
    fn name(&self) -> &str;

    fn capability(&self) -> Capability;

    fn invoke_boxed<'a>(
        &'a self,
        query: &'a Query,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Reply, ProviderError>> + Send + 'a>>;
}

impl<T: ProviderAdapter> ProviderAdapterDyn for T {
    fn name(&self) -> &str {
        ProviderAdapter::name(self)
    }

    fn capability(&self) -> Capability {
        ProviderAdapter::capability(self)
    }

    fn invoke_boxed<'a>(
        &'a self,
        query: &'a Query,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Reply, ProviderError>> + Send + 'a>> {
        Box::pin(self.invoke(query, timeout))
    }
}

/// Type-erased adapter for runtime chain assembly.
///
/// Since `ProviderAdapter` uses RPITIT it cannot be used as a trait object
/// directly; this wrapper provides equivalent methods that delegate to the
/// inner `ProviderAdapterDyn` trait object.
pub struct BoxProviderAdapter {
    inner: Box<dyn ProviderAdapterDyn + Send + Sync>,
}

impl BoxProviderAdapter {
    /// Wrap a concrete `ProviderAdapter` in a type-erased box.
    pub fn new<T: ProviderAdapter + 'static>(adapter: T) -> Self {
        Self {
            inner: Box::new(adapter),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn capability(&self) -> Capability {
        self.inner.capability()
    }

    pub async fn invoke(&self, query: &Query, timeout: Duration) -> Result<Reply, ProviderError> {
        self.inner.invoke_boxed(query, timeout).await
    }
}

impl std::fmt::Debug for BoxProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxProviderAdapter")
            .field("name", &self.name())
            .field("capability", &self.capability())
            .finish()
    }
}
