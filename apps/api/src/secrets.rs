//! OpenAI key lookup: environment first, then AWS Secrets Manager, memoized
//! for the lifetime of the process.

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secrets Manager request failed: {0}")]
    Store(String),

    #[error("OpenAI API key not found in Secrets Manager")]
    Missing,
}

/// A remote key/value secret backend.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Returns the string value of `secret_id`, or `None` if the secret has no string payload.
    async fn secret_string(&self, secret_id: &str) -> Result<Option<String>, SecretError>;
}

pub struct AwsSecretStore {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretStore {
    /// Builds a Secrets Manager client using the default credential chain.
    pub async fn from_region(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: aws_sdk_secretsmanager::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn secret_string(&self, secret_id: &str) -> Result<Option<String>, SecretError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| SecretError::Store(DisplayErrorContext(&e).to_string()))?;

        Ok(output.secret_string().map(str::to_owned))
    }
}

/// Resolves the LLM API key.
///
/// The environment value wins when present. Otherwise the first successful
/// store lookup is cached; failed lookups are not cached and will be retried
/// by the next request.
pub struct SecretAccessor {
    env_key: Option<String>,
    secret_id: String,
    store: Arc<dyn SecretStore>,
    cached: OnceCell<String>,
}

impl SecretAccessor {
    pub fn new(env_key: Option<String>, secret_id: String, store: Arc<dyn SecretStore>) -> Self {
        Self {
            env_key,
            secret_id,
            store,
            cached: OnceCell::new(),
        }
    }

    pub async fn api_key(&self) -> Result<String, SecretError> {
        if let Some(key) = &self.env_key {
            return Ok(key.clone());
        }

        let key = self
            .cached
            .get_or_try_init(|| async {
                info!("Fetching API key from Secrets Manager ({})", self.secret_id);
                self.store
                    .secret_string(&self.secret_id)
                    .await?
                    .ok_or(SecretError::Missing)
            })
            .await?;

        Ok(key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        value: Option<String>,
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn new(value: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                value: value.map(String::from),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SecretStore for CountingStore {
        async fn secret_string(&self, _secret_id: &str) -> Result<Option<String>, SecretError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value.clone())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl SecretStore for FailingStore {
        async fn secret_string(&self, _secret_id: &str) -> Result<Option<String>, SecretError> {
            Err(SecretError::Store("access denied".to_string()))
        }
    }

    #[tokio::test]
    async fn test_env_key_short_circuits_store() {
        let store = CountingStore::new(Some("from-store"));
        let accessor =
            SecretAccessor::new(Some("from-env".to_string()), "id".to_string(), store.clone());

        assert_eq!(accessor.api_key().await.unwrap(), "from-env");
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_value_is_fetched_once() {
        let store = CountingStore::new(Some("sk-test"));
        let accessor = SecretAccessor::new(None, "id".to_string(), store.clone());

        assert_eq!(accessor.api_key().await.unwrap(), "sk-test");
        assert_eq!(accessor.api_key().await.unwrap(), "sk-test");
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_secret_string_is_error() {
        let store = CountingStore::new(None);
        let accessor = SecretAccessor::new(None, "id".to_string(), store.clone());

        let err = accessor.api_key().await.unwrap_err();
        assert!(matches!(err, SecretError::Missing));
        assert_eq!(err.to_string(), "OpenAI API key not found in Secrets Manager");

        // Failures are not memoized.
        let _ = accessor.api_key().await;
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_propagates_message() {
        let accessor = SecretAccessor::new(None, "id".to_string(), Arc::new(FailingStore));
        let err = accessor.api_key().await.unwrap_err();
        assert!(err.to_string().contains("access denied"));
    }
}
