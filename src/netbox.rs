use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Errors surfaced at the NetBox API boundary.
#[derive(thiserror::Error, Debug)]
pub enum NetboxError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid API token")]
    Token(#[from] reqwest::header::InvalidHeaderValue),

    #[error("NetBox API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, NetboxError>;

/// List envelope returned by every NetBox collection endpoint.
#[derive(Debug, Deserialize)]
struct Page<T> {
    next: Option<String>,
    results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpAddress {
    /// Address in CIDR notation, e.g. `10.0.0.1/24`.
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub value: String,
}

/// A device or virtual machine as returned by the dcim/virtualization endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRecord {
    pub name: Option<String>,
    pub primary_ip: Option<IpAddress>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceOwner {
    pub name: String,
}

/// An entry from the ipam/services catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    #[serde(default)]
    pub ports: Vec<u16>,
    pub device: Option<ServiceOwner>,
    pub virtual_machine: Option<ServiceOwner>,
}

/// Typed client for the NetBox REST API.
#[derive(Debug, Clone)]
pub struct NetboxClient {
    client: Client,
    base_url: Url,
}

impl NetboxClient {
    pub fn new(base_url: impl AsRef<str>, token: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;

        let mut auth = HeaderValue::from_str(&format!("Token {token}"))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, base_url })
    }

    /// Devices filtered by tag and status.
    pub async fn devices(&self, tag: &str, statuses: &[String]) -> Result<Vec<DeviceRecord>> {
        let url = self.filtered_url("/api/dcim/devices/", tag, statuses)?;
        self.get_all(url).await
    }

    /// Virtual machines filtered by tag and status.
    pub async fn virtual_machines(
        &self,
        tag: &str,
        statuses: &[String],
    ) -> Result<Vec<DeviceRecord>> {
        let url = self.filtered_url("/api/virtualization/virtual-machines/", tag, statuses)?;
        self.get_all(url).await
    }

    /// The full, unfiltered service catalog.
    pub async fn services(&self) -> Result<Vec<ServiceRecord>> {
        let url = self.url("/api/ipam/services/")?;
        self.get_all(url).await
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(NetboxError::Url)
    }

    fn filtered_url(&self, path: &str, tag: &str, statuses: &[String]) -> Result<Url> {
        let mut url = self.url(path)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("tag", tag);
            for status in statuses {
                query.append_pair("status", status);
            }
        }
        Ok(url)
    }

    /// GET one page and deserialize the envelope.
    async fn get_page<T: DeserializeOwned>(&self, url: Url) -> Result<Page<T>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(NetboxError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// GET a collection endpoint, following `next` links until exhausted.
    async fn get_all<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let mut results = Vec::new();
        let mut next = Some(url);

        while let Some(url) = next {
            let page: Page<T> = self.get_page(url).await?;
            results.extend(page.results);
            next = page.next.as_deref().map(Url::parse).transpose()?;
        }

        Ok(results)
    }
}
