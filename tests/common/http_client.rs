//! HTTP client utilities for testing.
//!
//! This module provides helper functions for making HTTP requests to the geolegend server during tests.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

/// Default timeout for HTTP requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a default test client
pub fn create_test_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to build test HTTP client")
}

/// Build a URL for a geolegend server endpoint
pub fn build_url(addr: &SocketAddr, path: &str) -> Url {
    format!("http://{}{}", addr, path)
        .parse()
        .expect("Failed to parse URL")
}

/// Make a GET request to the geolegend server
pub async fn get(addr: &SocketAddr, path: &str) -> Result<Response, Box<dyn Error>> {
    Ok(create_test_client().get(build_url(addr, path)).send().await?)
}

/// Make a POST request without a body
pub async fn post(addr: &SocketAddr, path: &str) -> Result<Response, Box<dyn Error>> {
    Ok(create_test_client().post(build_url(addr, path)).send().await?)
}

/// Make a POST request with a JSON body
pub async fn post_json<B: Serialize>(
    addr: &SocketAddr,
    path: &str,
    body: &B,
) -> Result<Response, Box<dyn Error>> {
    Ok(create_test_client()
        .post(build_url(addr, path))
        .json(body)
        .send()
        .await?)
}

/// Make a PUT request with a JSON body
pub async fn put_json<B: Serialize>(
    addr: &SocketAddr,
    path: &str,
    body: &B,
) -> Result<Response, Box<dyn Error>> {
    Ok(create_test_client()
        .put(build_url(addr, path))
        .json(body)
        .send()
        .await?)
}

/// Parse a response as JSON, failing on any status other than 200
pub async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, Box<dyn Error>> {
    if response.status() != StatusCode::OK {
        return Err(format!(
            "Unexpected status code: {}, body: {:?}",
            response.status(),
            response.text().await
        )
        .into());
    }

    Ok(response.json::<T>().await?)
}

/// Make a GET request and parse the JSON response
pub async fn get_json<T: DeserializeOwned>(
    addr: &SocketAddr,
    path: &str,
) -> Result<T, Box<dyn Error>> {
    expect_json(get(addr, path).await?).await
}

/// Download an image from the geolegend server
pub async fn get_image(addr: &SocketAddr, path: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let response = get(addr, path).await?;

    if response.status() != StatusCode::OK {
        return Err(format!(
            "Unexpected status code: {}, body: {:?}",
            response.status(),
            response.text().await
        )
        .into());
    }

    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let addr: SocketAddr = ([127, 0, 0, 1], 8000).into();
        let url = build_url(&addr, "/legend?width=10");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/legend?width=10");
    }
}
