use crate::core::config::{get_env_var, Config};
use crate::core::errors::Result;
use crate::core::fetch;
use crate::core::ipset::{self, IpSetStore};
use crate::core::sns;
use lambda_runtime::LambdaEvent;
use log::{error, info};
use serde::Serialize;
use serde_json::Value;

/*-------------------------------------------------------------------------------------------------
  Invocation Response
-------------------------------------------------------------------------------------------------*/

/// Terminal invocation outcome: 200 on success, 400 on a client-input error
/// (notification-triggered variant only), 500 on any fetch, parse, or store failure.
#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/*-------------------------------------------------------------------------------------------------
  Logging Setup
-------------------------------------------------------------------------------------------------*/

/// Initialize stderr logging; CloudWatch captures the Lambda's stderr stream.
/// Verbosity defaults to info and is overridable via `WAFIPSYNC_VERBOSITY`.
pub fn init_logging() -> std::result::Result<(), log::SetLoggerError> {
    stderrlog::new()
        .verbosity(get_env_var("WAFIPSYNC_VERBOSITY", 2usize))
        .timestamp(stderrlog::Timestamp::Off)
        .init()
}

/*-------------------------------------------------------------------------------------------------
  Entrypoints
-------------------------------------------------------------------------------------------------*/

/// Fixed-source entrypoint: always synchronizes from the canonical IP Ranges URL.
/// The payload carries no parameters and is logged only for traceability.
pub async fn handle_fixed<S: IpSetStore>(store: &S, event: LambdaEvent<Value>) -> Response {
    info!("Invocation payload: {}", event.payload);
    respond(sync(store, fetch::AWS_IP_RANGES_URL).await)
}

/// Notification-triggered entrypoint: the document URL is read from the SNS payload.
/// A payload without a usable `url` is a client-input outcome and triggers neither a
/// fetch nor a store call.
pub async fn handle_notification<S: IpSetStore>(store: &S, event: LambdaEvent<Value>) -> Response {
    info!("Invocation payload: {}", event.payload);

    let outcome = match sns::source_url(&event.payload) {
        Ok(url) => sync(store, &url).await,
        Err(error) => Err(error),
    };

    respond(outcome)
}

/*-------------------------------------------------------------------------------------------------
  Synchronization Pipeline
-------------------------------------------------------------------------------------------------*/

async fn sync<S: IpSetStore>(store: &S, url: &str) -> Result<usize> {
    let config = Config::from_env()?;

    let addresses = fetch::service_ranges(url, fetch::CLOUDFRONT_SERVICE).await?;
    info!(
        "Filtered {} {} range(s): {:?}",
        addresses.len(),
        fetch::CLOUDFRONT_SERVICE,
        addresses
    );

    let count = addresses.len();
    ipset::replace_addresses(store, &config.ip_set_name, &config.ip_set_id, addresses).await?;
    Ok(count)
}

fn respond(outcome: Result<usize>) -> Response {
    match outcome {
        Ok(count) => {
            let body = format!("IP set updated with {} address(es)", count);
            info!("{}", body);
            Response {
                status_code: 200,
                body,
            }
        }
        Err(error) => {
            error!("{}", error);
            Response {
                status_code: error.status_code(),
                body: error.to_string(),
            }
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::Error;

    #[test]
    fn test_success_response() {
        let response = respond(Ok(3));
        assert_eq!(
            response,
            Response {
                status_code: 200,
                body: "IP set updated with 3 address(es)".to_string(),
            }
        );
    }

    #[test]
    fn test_input_error_response() {
        let response = respond(Err(Error::Input("missing url".to_string())));
        assert_eq!(response.status_code, 400);
        assert!(response.body.contains("missing url"));
    }

    #[test]
    fn test_internal_error_response() {
        let response = respond(Err(Error::Update("stale lock token".into())));
        assert_eq!(response.status_code, 500);
        assert!(response.body.contains("stale lock token"));
    }

    #[test]
    fn test_response_shape() {
        let response = Response {
            status_code: 200,
            body: "ok".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"statusCode": 200, "body": "ok"}));
    }
}
