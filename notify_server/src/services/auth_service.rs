//! GCP access-token acquisition for the Cloud Build and Secret Manager APIs.
//!
//! On Cloud Run / GCE the token comes from the metadata server using the
//! ambient service account. `GCP_ACCESS_TOKEN` overrides it for local runs.

use serde::Deserialize;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Where bearer tokens for Google APIs come from.
#[derive(Clone, Debug)]
pub enum TokenSource {
    /// Fixed token supplied via `GCP_ACCESS_TOKEN`.
    Static(String),
    /// GCE/Cloud Run metadata server (ambient service account).
    Metadata,
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
}

impl TokenSource {
    pub fn from_env() -> Self {
        match std::env::var("GCP_ACCESS_TOKEN") {
            Ok(token) if !token.is_empty() => {
                tracing::debug!("Using access token from GCP_ACCESS_TOKEN");
                Self::Static(token)
            }
            _ => Self::Metadata,
        }
    }

    /// Fetch a bearer token. Metadata tokens are short-lived, so this is
    /// called once per message rather than cached.
    pub async fn fetch(&self, http: &reqwest::Client) -> anyhow::Result<String> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::Metadata => {
                let resp = http
                    .get(METADATA_TOKEN_URL)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await?
                    .error_for_status()?;
                let token: MetadataToken = resp.json().await?;
                Ok(token.access_token)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_token_is_returned_verbatim() {
        let source = TokenSource::Static("ya29.test".to_string());
        let token = source.fetch(&reqwest::Client::new()).await.unwrap();
        assert_eq!(token, "ya29.test");
    }
}
