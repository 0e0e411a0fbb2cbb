//! Cloud KMS REST transport
//!
//! Calls `POST {endpoint}/v1/{name}:asymmetricSign` to sign and
//! `GET {endpoint}/v1/{name}` to look a key version up, both with a bearer
//! token. The token comes from the connector or the `GOOGLE_OAUTH_ACCESS_TOKEN`
//! environment variable (e.g. `gcloud auth print-access-token`).

use std::{env, time::Duration};

use base64::{engine::general_purpose, Engine as _};
use kmsign_key::BoxError;
use reqwest::{blocking::Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::client::{KmsClient, KmsConnector, SignRequest};

pub const DEFAULT_ENDPOINT: &str = "https://cloudkms.googleapis.com";
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct GcpRestConnector {
    endpoint: String,
    access_token: Option<String>,
    timeout: Duration,
}

impl Default for GcpRestConnector {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GcpRestConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn access_token(&self) -> Result<String, BoxError> {
        if let Some(token) = &self.access_token {
            return Ok(token.clone());
        }
        env::var(ACCESS_TOKEN_ENV).map_err(|_| {
            format!("no access token configured and {ACCESS_TOKEN_ENV} is not set").into()
        })
    }
}

impl KmsConnector for GcpRestConnector {
    fn connect(&self) -> Result<Box<dyn KmsClient>, BoxError> {
        let access_token = self.access_token()?;
        let http = Client::builder().timeout(self.timeout).build()?;
        Ok(Box::new(GcpRestClient {
            http,
            endpoint: self.endpoint.clone(),
            access_token,
        }))
    }
}

struct GcpRestClient {
    http: Client,
    endpoint: String,
    access_token: String,
}

#[derive(Deserialize)]
struct AsymmetricSignResponse {
    signature: String,
}

impl KmsClient for GcpRestClient {
    fn sign(&self, request: &SignRequest<'_>) -> Result<Vec<u8>, BoxError> {
        let url = format!("{}/v1/{}:asymmetricSign", self.endpoint, request.key_id);
        let body = serde_json::json!({
            "data": general_purpose::STANDARD.encode(request.message),
        });

        debug!(%url, "posting asymmetricSign");
        let response: AsymmetricSignResponse = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(general_purpose::STANDARD.decode(response.signature)?)
    }

    fn key_exists(&self, key_id: &str) -> Result<bool, BoxError> {
        let url = format!("{}/v1/{}", self.endpoint, key_id);

        debug!(%url, "getting CryptoKeyVersion");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        response.error_for_status()?;
        Ok(true)
    }
}
