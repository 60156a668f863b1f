//! Reactive binding over [`QueryCache`]: one fetch per unique key, entity
//! wide invalidation after mutations, one automatic retry.

use contracts::shared::error::ApiError;
use contracts::shared::list_query::ListQuery;
use contracts::shared::query_cache::{FetchTicket, QueryCache, RetryPolicy};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

type CacheValue = Arc<dyn Any + Send + Sync>;

/// Anything that identifies a cached fetch.
pub trait QueryKey: Clone + PartialEq + Send + Sync + 'static {
    fn cache_key(&self) -> String;
}

impl QueryKey for ListQuery {
    fn cache_key(&self) -> String {
        format!("list|{}", ListQuery::cache_key(self))
    }
}

impl QueryKey for String {
    fn cache_key(&self) -> String {
        self.clone()
    }
}

fn failure_key(entity: &str, key: &str) -> String {
    format!("{entity}#{key}")
}

#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: StoredValue<QueryCache<CacheValue>>,
    failures: StoredValue<HashMap<String, ApiError>>,
    /// Bumped whenever an entry lands, fails or is invalidated.
    version: RwSignal<u64>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: StoredValue::new(QueryCache::new()),
            failures: StoredValue::new(HashMap::new()),
            version: RwSignal::new(0),
        }
    }

    fn bump(&self) {
        self.version.update(|v| *v = v.wrapping_add(1));
    }

    fn cached<T: Clone + 'static>(&self, entity: &str, key: &str) -> Option<T> {
        self.cache
            .with_value(|c| c.get(entity, key))
            .and_then(|v| v.downcast_ref::<T>().cloned())
    }

    fn failure(&self, entity: &str, key: &str) -> Option<ApiError> {
        self.failures
            .with_value(|f| f.get(&failure_key(entity, key)).cloned())
    }

    fn begin(&self, entity: &str, key: &str) -> Option<FetchTicket> {
        self.cache.try_update_value(|c| c.begin(entity, key)).flatten()
    }

    fn complete(&self, ticket: &FetchTicket, value: CacheValue) {
        let applied = self
            .cache
            .try_update_value(|c| c.complete(ticket, value))
            .unwrap_or(false);
        if applied {
            self.bump();
        } else {
            log::debug!("dropped stale result for {}:{}", ticket.entity, ticket.key);
        }
    }

    fn fail(&self, ticket: &FetchTicket, err: ApiError) {
        let live = self
            .cache
            .try_update_value(|c| {
                // an invalidation in between clears the in-flight mark
                let live = c.is_in_flight(&ticket.entity, &ticket.key);
                c.fail(ticket);
                live
            })
            .unwrap_or(false);
        if live {
            self.failures.update_value(|f| {
                f.insert(failure_key(&ticket.entity, &ticket.key), err);
            });
            self.bump();
        }
    }

    /// Drop everything cached for `entity`; mounted queries refetch.
    pub fn invalidate(&self, entity: &str) {
        let generation = self
            .cache
            .try_update_value(|c| c.invalidate(entity))
            .unwrap_or_default();
        let prefix = format!("{entity}#");
        self.failures
            .update_value(|f| f.retain(|k, _| !k.starts_with(&prefix)));
        log::debug!("invalidated {entity} (generation {generation})");
        self.bump();
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Reactive view of one cached query.
///
/// `data` keeps the last successful value while a new key loads so the
/// table does not blank out between pages; it is dropped once that key
/// fails. `error` always belongs to the current key.
pub struct QueryState<T: Send + Sync + 'static> {
    pub data: Signal<Option<T>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
}

impl<T: Send + Sync + 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryState<T> {}

impl<T: Send + Sync + 'static> QueryState<T> {
    pub fn view(&self) -> Signal<ListView> {
        let error = self.error;
        Signal::derive(move || list_view(error.get()))
    }
}

/// What a list area renders for the current key.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Failed(ApiError),
    Rows,
}

/// A failure of the current key wins over rows kept from an earlier key.
pub fn list_view(error: Option<ApiError>) -> ListView {
    match error {
        Some(err) => ListView::Failed(err),
        None => ListView::Rows,
    }
}

async fn fetch_with_retry<Q, T, F, Fut>(fetcher: &F, query: &Q) -> Result<T, ApiError>
where
    Q: Clone,
    F: Fn(Q) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let policy = RetryPolicy::ONCE;
    let mut failed = 0;
    loop {
        match fetcher(query.clone()).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                failed += 1;
                let retryable = !matches!(err, ApiError::Validation { .. });
                if retryable && policy.should_retry(failed) {
                    log::warn!("fetch failed, retrying: {err}");
                    continue;
                }
                return Err(err);
            }
        }
    }
}

pub fn use_cached_query<Q, T, F, Fut>(
    entity: &'static str,
    query: Signal<Q>,
    fetcher: F,
) -> QueryState<T>
where
    Q: QueryKey,
    T: Clone + Send + Sync + 'static,
    F: Fn(Q) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_context::<QueryClient>().expect("QueryClient not found");
    let data = RwSignal::new(None::<T>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<ApiError>);

    Effect::new(move |_| {
        client.version.track();
        let q = query.get();
        let key = q.cache_key();

        if let Some(value) = client.cached::<T>(entity, &key) {
            data.set(Some(value));
            error.set(None);
            loading.set(false);
            return;
        }
        if let Some(err) = client.failure(entity, &key) {
            data.set(None);
            error.set(Some(err));
            loading.set(false);
            return;
        }

        error.set(None);
        loading.set(true);
        // another consumer may already be fetching this key
        let Some(ticket) = client.begin(entity, &key) else {
            return;
        };
        let fetcher = fetcher.clone();
        spawn_local(async move {
            match fetch_with_retry(&fetcher, &q).await {
                Ok(value) => client.complete(&ticket, Arc::new(value)),
                Err(err) => {
                    log::error!("{entity} query failed: {err}");
                    client.fail(&ticket, err);
                }
            }
        });
    });

    QueryState {
        data: data.into(),
        loading: loading.into(),
        error: error.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_view_failure_wins() {
        let err = ApiError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(list_view(Some(err.clone())), ListView::Failed(err));
        assert_eq!(list_view(None), ListView::Rows);
    }
}
