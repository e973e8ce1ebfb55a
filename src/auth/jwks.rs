// Signing key lookup for token verification
// Keys are addressed by the `kid` carried in the token header.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;
use tokio::sync::RwLock;

use super::errors::AuthError;

const DEFAULT_REFETCH_COOLDOWN: Duration = Duration::from_secs(10);

/// Source of token verification keys
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Returns the key registered under `kid`, or `None` if there is none
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError>;
}

/// Fixed set of verification keys
///
/// Used by tests and local development where no identity provider is
/// reachable.
///
/// # Example
/// ```
/// use drinks_api::auth::jwks::StaticKeyStore;
/// use jsonwebtoken::DecodingKey;
///
/// let keys = StaticKeyStore::new().with_key("local", DecodingKey::from_secret(b"secret"));
/// ```
#[derive(Clone, Default)]
pub struct StaticKeyStore {
    keys: HashMap<String, DecodingKey>,
}

impl StaticKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, kid: impl Into<String>, key: DecodingKey) -> Self {
        self.keys.insert(kid.into(), key);
        self
    }
}

#[async_trait]
impl KeyStore for StaticKeyStore {
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        Ok(self.keys.get(kid).cloned())
    }
}

/// Key set published by the identity provider
///
/// The set is fetched lazily and cached. A `kid` that is not in the cached
/// set triggers one refetch so rotated keys are picked up, at most once per
/// refetch cooldown. Concurrent misses wait on the same fetch.
pub struct RemoteJwks {
    url: String,
    client: reqwest::Client,
    refetch_cooldown: Duration,
    cache: RwLock<CachedKeys>,
}

#[derive(Default)]
struct CachedKeys {
    set: Option<JwkSet>,
    fetched_at: Option<Instant>,
}

impl CachedKeys {
    fn is_fresh(&self, cooldown: Duration) -> bool {
        self.fetched_at
            .is_some_and(|fetched_at| fetched_at.elapsed() < cooldown)
    }
}

impl RemoteJwks {
    /// Creates a key store for the given JWKS document URL
    ///
    /// # Arguments
    /// * `url` - Location of the provider's `jwks.json`
    /// * `timeout` - Upper bound on a single key set fetch
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client,
            refetch_cooldown: DEFAULT_REFETCH_COOLDOWN,
            cache: RwLock::new(CachedKeys::default()),
        })
    }

    /// Sets the minimum time between two fetches caused by unknown `kid`s
    pub fn with_refetch_cooldown(mut self, cooldown: Duration) -> Self {
        self.refetch_cooldown = cooldown;
        self
    }

    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!(url = %self.url, "fetching signing keys");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))
    }
}

fn lookup(set: &JwkSet, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
    match set.find(kid) {
        Some(jwk) => DecodingKey::from_jwk(jwk).map(Some).map_err(|e| {
            tracing::warn!(kid = %kid, error = %e, "published key is not usable");
            AuthError::UnknownKey
        }),
        None => Ok(None),
    }
}

#[async_trait]
impl KeyStore for RemoteJwks {
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(set) = cache.set.as_ref() {
                if let Some(key) = lookup(set, kid)? {
                    return Ok(Some(key));
                }
            }
        }

        // Held across the fetch so concurrent misses share one request
        let mut cache = self.cache.write().await;
        if let Some(set) = cache.set.as_ref() {
            if let Some(key) = lookup(set, kid)? {
                return Ok(Some(key));
            }
        }
        if cache.is_fresh(self.refetch_cooldown) {
            tracing::debug!(kid = %kid, "unknown key id, refetch cooldown active");
            return Ok(None);
        }

        let set = self.fetch().await.map_err(|e| {
            tracing::error!(url = %self.url, error = %e, "failed to fetch signing keys");
            e
        })?;
        let key = lookup(&set, kid)?;
        cache.set = Some(set);
        cache.fetched_at = Some(Instant::now());

        Ok(key)
    }
}
