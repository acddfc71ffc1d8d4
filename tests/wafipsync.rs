use lambda_runtime::{Context, LambdaEvent};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use wafipsync::core::ipset::replace_addresses;
use wafipsync::{handler, Error, IpSetState, IpSetStore, Result};

/*-------------------------------------------------------------------------------------------------
  In-Memory IP Set Store
-------------------------------------------------------------------------------------------------*/

/// Test double for the managed set store. Lock tokens are monotonically increasing
/// counters, bumped on every successful write, so a stale token is rejected exactly
/// like a lost WAFv2 optimistic-locking race.
struct MemoryIpSetStore {
    sets: Mutex<HashMap<(String, String), (Vec<String>, u64)>>,
}

impl MemoryIpSetStore {
    fn empty() -> Self {
        Self {
            sets: Mutex::new(HashMap::new()),
        }
    }

    fn with_set(name: &str, id: &str, addresses: &[&str]) -> Self {
        let store = Self::empty();
        store.sets.lock().unwrap().insert(
            (name.to_string(), id.to_string()),
            (addresses.iter().map(|a| a.to_string()).collect(), 1),
        );
        store
    }

    fn addresses(&self, name: &str, id: &str) -> Vec<String> {
        let sets = self.sets.lock().unwrap();
        sets[&(name.to_string(), id.to_string())].0.clone()
    }
}

impl IpSetStore for MemoryIpSetStore {
    async fn get(&self, name: &str, id: &str) -> Result<IpSetState> {
        let sets = self.sets.lock().unwrap();
        let (addresses, token) = sets
            .get(&(name.to_string(), id.to_string()))
            .ok_or_else(|| Error::Lookup("IP set not found".into()))?;

        Ok(IpSetState {
            addresses: addresses.clone(),
            lock_token: token.to_string(),
        })
    }

    async fn update(
        &self,
        name: &str,
        id: &str,
        addresses: Vec<String>,
        lock_token: &str,
    ) -> Result<()> {
        let mut sets = self.sets.lock().unwrap();
        let entry = sets
            .get_mut(&(name.to_string(), id.to_string()))
            .ok_or_else(|| Error::Update("IP set not found".into()))?;

        if entry.1.to_string() != lock_token {
            return Err(Error::Update("stale lock token".into()));
        }

        entry.0 = addresses;
        entry.1 += 1;
        Ok(())
    }
}

/// Wraps [MemoryIpSetStore] to simulate a concurrent writer landing between this
/// invocation's read and write: every `get` is followed by a winner's update, so the
/// token handed back is already stale.
struct RacingStore<'a> {
    inner: &'a MemoryIpSetStore,
    winner: Vec<String>,
}

impl IpSetStore for RacingStore<'_> {
    async fn get(&self, name: &str, id: &str) -> Result<IpSetState> {
        let state = self.inner.get(name, id).await?;
        self.inner
            .update(name, id, self.winner.clone(), &state.lock_token)
            .await?;
        Ok(state)
    }

    async fn update(
        &self,
        name: &str,
        id: &str,
        addresses: Vec<String>,
        lock_token: &str,
    ) -> Result<()> {
        self.inner.update(name, id, addresses, lock_token).await
    }
}

/*-------------------------------------------------------------------------------------------------
  Set Updater Tests
-------------------------------------------------------------------------------------------------*/

#[test_log::test(tokio::test)]
async fn replace_fully_replaces_the_address_list() {
    let store = MemoryIpSetStore::with_set("edge-allow", "set-1", &["198.51.100.0/24"]);

    replace_addresses(
        &store,
        "edge-allow",
        "set-1",
        vec!["13.32.0.0/15".to_string(), "205.251.208.0/20".to_string()],
    )
    .await
    .unwrap();

    assert_eq!(
        store.addresses("edge-allow", "set-1"),
        vec!["13.32.0.0/15".to_string(), "205.251.208.0/20".to_string()]
    );
}

#[test_log::test(tokio::test)]
async fn replace_is_idempotent_without_contention() {
    let store = MemoryIpSetStore::with_set("edge-allow", "set-1", &["198.51.100.0/24"]);
    let ranges = vec!["13.32.0.0/15".to_string()];

    replace_addresses(&store, "edge-allow", "set-1", ranges.clone())
        .await
        .unwrap();
    replace_addresses(&store, "edge-allow", "set-1", ranges.clone())
        .await
        .unwrap();

    assert_eq!(store.addresses("edge-allow", "set-1"), ranges);
}

#[test_log::test(tokio::test)]
async fn replace_with_empty_list_clears_the_set() {
    let store = MemoryIpSetStore::with_set("edge-allow", "set-1", &["198.51.100.0/24"]);

    replace_addresses(&store, "edge-allow", "set-1", Vec::new())
        .await
        .unwrap();

    assert!(store.addresses("edge-allow", "set-1").is_empty());
}

#[test_log::test(tokio::test)]
async fn replace_fails_on_missing_set() {
    let store = MemoryIpSetStore::empty();

    let result = replace_addresses(
        &store,
        "edge-allow",
        "set-1",
        vec!["13.32.0.0/15".to_string()],
    )
    .await;

    assert!(matches!(result, Err(Error::Lookup(_))));
}

#[test_log::test(tokio::test)]
async fn losing_the_token_race_fails_and_keeps_the_winner() {
    let inner = MemoryIpSetStore::with_set("edge-allow", "set-1", &["198.51.100.0/24"]);
    let store = RacingStore {
        inner: &inner,
        winner: vec!["203.0.113.0/24".to_string()],
    };

    let result = replace_addresses(
        &store,
        "edge-allow",
        "set-1",
        vec!["13.32.0.0/15".to_string()],
    )
    .await;

    assert!(matches!(result, Err(Error::Update(_))));
    assert_eq!(
        inner.addresses("edge-allow", "set-1"),
        vec!["203.0.113.0/24".to_string()]
    );
}

/*-------------------------------------------------------------------------------------------------
  Entrypoint Tests
-------------------------------------------------------------------------------------------------*/

#[test_log::test(tokio::test)]
async fn notification_without_url_is_a_client_error_and_touches_nothing() {
    let store = MemoryIpSetStore::with_set("edge-allow", "set-1", &["198.51.100.0/24"]);
    let payload = json!({"Records": [{"Sns": {"Message": "{}"}}]});
    let event = LambdaEvent::new(payload, Context::default());

    let response = handler::handle_notification(&store, event).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
        store.addresses("edge-allow", "set-1"),
        vec!["198.51.100.0/24".to_string()]
    );
}

#[test_log::test(tokio::test)]
async fn malformed_notification_envelope_is_a_client_error() {
    let store = MemoryIpSetStore::empty();
    let payload = json!({"detail": {"url": "https://example.com/ranges.json"}});
    let event = LambdaEvent::new(payload, Context::default());

    let response = handler::handle_notification(&store, event).await;

    assert_eq!(response.status_code, 400);
}
