/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod config;
pub mod datetime;
pub mod errors;
pub mod fetch;
pub mod ipset;
pub mod json;
pub mod sns;
