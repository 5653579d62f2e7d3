//! HTTP access to the Freight API

pub mod apps;
pub mod client;
pub mod deploys;

pub use client::{ApiClient, ApiRequest, Method, RawResponse, ReqwestTransport, Transport};
