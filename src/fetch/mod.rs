use std::fmt;
use std::time::Duration;

use anyhow::anyhow;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

/// Raw-file host the reference CSVs are published on.
const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/parkingwang/go-vna/master/data/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a remote fetch failed. `NotFound` means the host answered 404 for
/// this filename; everything else (transport errors, other non-success
/// statuses) is `Transient` and carries the underlying error.
#[derive(Debug)]
pub enum FetchError {
    NotFound { name: String },
    Transient { name: String, source: anyhow::Error },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound { name } => {
                write!(f, "data file {} not found on remote host", name)
            }
            FetchError::Transient { name, source } => {
                write!(f, "fetching data file {} failed: {}", name, source)
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::NotFound { .. } => None,
            FetchError::Transient { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Something that can produce the bytes of a named data file. The HTTP host
/// is the real implementation; tests substitute in-memory sources.
pub trait RemoteSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches data files with a blocking GET against a fixed base URL.
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the source at a different host, e.g. a mirror.
    pub fn with_base_url(base: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base = Url::parse(base)?;
        Ok(Self { client, base })
    }
}

impl RemoteSource for HttpSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.base.join(name).map_err(|e| FetchError::Transient {
            name: name.to_string(),
            source: e.into(),
        })?;
        debug!(%url, "GET");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Transient {
                name: name.to_string(),
                source: e.into(),
            })?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                name: name.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(FetchError::Transient {
                name: name.to_string(),
                source: anyhow!("non-success status {} from {}", resp.status(), url),
            });
        }

        let bytes = resp.bytes().map_err(|e| FetchError::Transient {
            name: name.to_string(),
            source: e.into(),
        })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display_names_the_file() {
        let e = FetchError::NotFound {
            name: "prov-civil_v1.csv".to_string(),
        };
        assert!(e.to_string().contains("prov-civil_v1.csv"));

        let e = FetchError::Transient {
            name: "city-wj_v1.csv".to_string(),
            source: anyhow!("connection refused"),
        };
        let msg = e.to_string();
        assert!(msg.contains("city-wj_v1.csv"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn http_source_rejects_unjoinable_base() {
        assert!(HttpSource::with_base_url("not a url").is_err());
    }
}
