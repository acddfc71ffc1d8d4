use crate::core::errors::{Error, Result};
use aws_sdk_wafv2::types::Scope;
use log::info;

/*-------------------------------------------------------------------------------------------------
  IP Set Store
-------------------------------------------------------------------------------------------------*/

// The managed sets guard CloudFront distributions, so every store call uses the
// edge-global scope.
const IP_SET_SCOPE: Scope = Scope::Cloudfront;

/// Current state of a managed IP set: its address list and the opaque lock token
/// that must accompany the next write.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IpSetState {
    pub addresses: Vec<String>,
    pub lock_token: String,
}

/// Read/write access to a managed IP set, keyed by `(name, id)` within a fixed
/// deployment scope. Implementations surface read failures as [Error::Lookup] and
/// write failures, including lock-token conflicts, as [Error::Update].
#[allow(async_fn_in_trait)]
pub trait IpSetStore {
    async fn get(&self, name: &str, id: &str) -> Result<IpSetState>;

    async fn update(
        &self,
        name: &str,
        id: &str,
        addresses: Vec<String>,
        lock_token: &str,
    ) -> Result<()>;
}

/*-------------------------------------------------------------------------------------------------
  Replace Addresses
-------------------------------------------------------------------------------------------------*/

/// Fully replace the address list of the managed IP set with `addresses`.
///
/// Read-modify-write: the lock token returned by the read is passed to the write so
/// the store rejects the update if another writer got there first. The two calls are
/// not atomic as a pair, and a token conflict is not retried; losing the race fails
/// the invocation and leaves the winner's addresses in place. An empty `addresses`
/// list is written as-is, clearing the set.
pub async fn replace_addresses<S: IpSetStore>(
    store: &S,
    name: &str,
    id: &str,
    addresses: Vec<String>,
) -> Result<()> {
    let current = store.get(name, id).await?;
    info!(
        "IP set {} currently holds {} address(es); lock token {}",
        name,
        current.addresses.len(),
        current.lock_token
    );

    store.update(name, id, addresses, &current.lock_token).await
}

/*-------------------------------------------------------------------------------------------------
  WAFv2 IP Set Store
-------------------------------------------------------------------------------------------------*/

/// [IpSetStore] backed by the WAFv2 API. Constructed once at process start and
/// shared across invocations; the client holds no mutable state beyond connection
/// reuse.
#[derive(Debug, Clone)]
pub struct WafIpSetStore {
    client: aws_sdk_wafv2::Client,
}

impl WafIpSetStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_wafv2::Client::new(config),
        }
    }
}

impl IpSetStore for WafIpSetStore {
    async fn get(&self, name: &str, id: &str) -> Result<IpSetState> {
        let output = self
            .client
            .get_ip_set()
            .name(name)
            .scope(IP_SET_SCOPE)
            .id(id)
            .send()
            .await
            .map_err(|error| Error::Lookup(error.into()))?;

        let lock_token = output
            .lock_token()
            .ok_or_else(|| Error::Lookup("GetIPSet response is missing a lock token".into()))?
            .to_string();

        let addresses = output
            .ip_set()
            .map(|ip_set| ip_set.addresses().to_vec())
            .unwrap_or_default();

        Ok(IpSetState {
            addresses,
            lock_token,
        })
    }

    async fn update(
        &self,
        name: &str,
        id: &str,
        addresses: Vec<String>,
        lock_token: &str,
    ) -> Result<()> {
        self.client
            .update_ip_set()
            .name(name)
            .scope(IP_SET_SCOPE)
            .id(id)
            .set_addresses(Some(addresses))
            .lock_token(lock_token)
            .send()
            .await
            .map_err(|error| Error::Update(error.into()))?;

        Ok(())
    }
}
