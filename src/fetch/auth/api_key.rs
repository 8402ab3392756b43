use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// The header is validated once at construction, so every request can be
/// decorated without a fallible step.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    key: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid header name '{header_name}'"))?;
        let mut key = HeaderValue::from_str(key).context("API key is not a valid header value")?;
        key.set_sensitive(true);

        Ok(Self {
            inner,
            header_name,
            key,
        })
    }

    /// OpenAQ expects its key in `X-API-Key`.
    pub fn openaq(inner: C, key: &str) -> Result<Self> {
        Self::new(inner, "X-API-Key", key)
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.key.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unused;

    #[async_trait]
    impl HttpClient for Unused {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            unreachable!("construction tests never send")
        }
    }

    #[test]
    fn test_rejects_invalid_header_name() {
        assert!(ApiKey::new(Unused, "bad header", "k").is_err());
    }

    #[test]
    fn test_rejects_key_with_newline() {
        assert!(ApiKey::openaq(Unused, "abc\ndef").is_err());
    }

    #[test]
    fn test_accepts_openaq_key() {
        let client = ApiKey::openaq(Unused, "abc123").unwrap();
        assert_eq!(client.header_name.as_str(), "x-api-key");
        assert!(client.key.is_sensitive());
    }
}
