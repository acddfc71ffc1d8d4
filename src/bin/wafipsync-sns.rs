use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use wafipsync::{handler, WafIpSetStore};

/*-------------------------------------------------------------------------------------------------
  Notification-Triggered Updater
-------------------------------------------------------------------------------------------------*/

#[tokio::main]
async fn main() -> Result<(), Error> {
    handler::init_logging()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = WafIpSetStore::new(&aws_config);
    let store = &store;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<_, Error>(handler::handle_notification(store, event).await)
    }))
    .await
}
