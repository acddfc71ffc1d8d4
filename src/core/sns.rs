use crate::core::errors::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/*-------------------------------------------------------------------------------------------------
  Notification Envelope
-------------------------------------------------------------------------------------------------*/

// SNS delivers the notification as `Records[0].Sns.Message`, where the message body
// is itself a JSON string requiring secondary parsing.

#[derive(Debug, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsNotification,
}

#[derive(Debug, Deserialize)]
pub struct SnsNotification {
    #[serde(rename = "Message")]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct SourceMessage {
    #[serde(default)]
    url: Option<String>,
}

/*-------------------------------------------------------------------------------------------------
  Source URL Extraction
-------------------------------------------------------------------------------------------------*/

/// Extract the IP Ranges document URL from an SNS invocation payload.
///
/// Any payload shape that does not yield a non-empty `url` is a client-input error,
/// not an internal one: the caller made the request malformed, and its retry policy
/// should see a 400-equivalent outcome.
pub fn source_url(payload: &Value) -> Result<String> {
    let event: SnsEvent = serde_json::from_value(payload.clone())
        .map_err(|error| Error::Input(format!("malformed notification envelope: {}", error)))?;

    let record = event
        .records
        .first()
        .ok_or_else(|| Error::Input("notification event contains no records".to_string()))?;

    let message: SourceMessage = serde_json::from_str(&record.sns.message)
        .map_err(|error| Error::Input(format!("malformed notification message: {}", error)))?;

    match message.url {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(Error::Input(
            "notification message has no url field".to_string(),
        )),
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
