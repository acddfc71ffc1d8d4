use crate::core::errors::Result;
use chrono::{DateTime, Utc};
use ipnetwork::{Ipv4Network, Ipv6Network};
use serde::{Deserialize, Serialize};

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

pub fn parse(json: &str) -> Result<JsonIpRanges<'_>> {
    Ok(serde_json::from_str(json)?)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  JSON IP Ranges
--------------------------------------------------------------------------------------*/

/// The IP Ranges document. Only the `prefixes` array is required; the document
/// metadata and the IPv6 prefix list are parsed when present.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonIpRanges<'j> {
    #[serde(rename = "syncToken", default)]
    pub sync_token: Option<&'j str>,

    #[serde(rename = "createDate", with = "crate::core::datetime", default)]
    pub create_date: Option<DateTime<Utc>>,

    pub prefixes: Vec<JsonIpPrefix<'j>>,

    #[serde(default)]
    pub ipv6_prefixes: Vec<JsonIpv6Prefix<'j>>,
}

/*--------------------------------------------------------------------------------------
  JSON IP (IPv4) Prefix
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonIpPrefix<'j> {
    pub ip_prefix: Ipv4Network,
    pub service: &'j str,

    #[serde(default)]
    pub region: Option<&'j str>,

    #[serde(default)]
    pub network_border_group: Option<&'j str>,
}

/*--------------------------------------------------------------------------------------
  JSON IPv6 Prefix
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonIpv6Prefix<'j> {
    pub ipv6_prefix: Ipv6Network,
    pub service: &'j str,

    #[serde(default)]
    pub region: Option<&'j str>,

    #[serde(default)]
    pub network_border_group: Option<&'j str>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
