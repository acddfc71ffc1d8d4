use crate::core::errors::Result;
use crate::core::json::{self, JsonIpRanges};
use log::info;

/*-------------------------------------------------------------------------------------------------
  Range Fetcher
-------------------------------------------------------------------------------------------------*/

/// Canonical AWS IP Ranges document URL, used by the fixed-source binary.
pub const AWS_IP_RANGES_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";

/// Service tag identifying CloudFront edge prefixes in the document.
pub const CLOUDFRONT_SERVICE: &str = "CLOUDFRONT";

/// Fetch the IP Ranges document from `url` and return the IPv4 CIDR strings tagged
/// with `service`, in document order.
///
/// A single GET with no retry: a network failure is terminal for the invocation, as
/// is a body that does not parse as an IP Ranges document. An empty filtered list is
/// returned as-is; the caller treats a successfully parsed document as authoritative.
pub async fn service_ranges(url: &str, service: &str) -> Result<Vec<String>> {
    let json = get_json(url).await?;
    service_prefixes(&json, service)
}

/// GET `url` and accumulate the full response body.
pub async fn get_json(url: &str) -> Result<String> {
    info!("GET {}", url);
    let response = reqwest::get(url).await?;
    let json = response.text().await?;
    Ok(json)
}

/// Parse `json` and return the IPv4 CIDR strings tagged with `service`.
pub fn service_prefixes(json: &str, service: &str) -> Result<Vec<String>> {
    let ip_ranges = json::parse(json)?;

    if let (Some(sync_token), Some(create_date)) = (ip_ranges.sync_token, ip_ranges.create_date) {
        info!("IP ranges document {} created {}", sync_token, create_date);
    }

    Ok(filter_prefixes(&ip_ranges, service))
}

/// Filter the parsed document to the IPv4 prefixes tagged with `service`, preserving
/// document order with no deduplication.
pub fn filter_prefixes(ip_ranges: &JsonIpRanges<'_>, service: &str) -> Vec<String> {
    ip_ranges
        .prefixes
        .iter()
        .filter(|prefix| prefix.service == service)
        .map(|prefix| prefix.ip_prefix.to_string())
        .collect()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
