use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;

use crate::adapter::{Resource, adapt_all, collection_items, single_item};
use crate::error::{Result, SourceError};
use crate::source::{DataSource, FetchQuery};

/// Connection settings for [`RestSource`]
#[derive(Debug, Clone)]
pub struct RestSettings {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl RestSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Collection backed by the portal REST API (`{base}/{endpoint}`)
pub struct RestSource<R> {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Resource> RestSource<R> {
    pub fn new(settings: RestSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("portal/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token,
            _record: PhantomData,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, R::ENDPOINT)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, R::ENDPOINT, id)
    }

    /// Id of an existing record, rejected before any request when blank
    fn existing_id(id: &str) -> Result<&str> {
        if id.trim().is_empty() {
            return Err(SourceError::Invalid(format!(
                "{} without an id cannot be changed",
                R::KIND.label()
            )));
        }
        Ok(id)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and returns the JSON body of a 2xx response
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .or_else(|| body.get("error"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .filter(|m| !m.trim().is_empty());
            return Err(SourceError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| SourceError::Unusable(e.to_string()))
    }

    /// The server's view of a written record, or `sent` when the reply has none
    fn echo(reply: &Value, sent: &R) -> R {
        R::from_api(single_item(reply)).unwrap_or_else(|| {
            tracing::debug!(view = %R::KIND, "write response carried no record");
            sent.clone()
        })
    }
}

#[async_trait]
impl<R: Resource> DataSource<R> for RestSource<R> {
    fn name(&self) -> &str {
        "rest"
    }

    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<R>> {
        let url = self.collection_url();
        tracing::debug!(url = %url, limit = query.limit, "fetching collection");

        let limit = query.limit.to_string();
        let body = self
            .send(self.client.get(&url).query(&[("page", "1"), ("limit", limit.as_str())]))
            .await?;

        let items = collection_items(&body).map_err(SourceError::Unusable)?;
        Ok(adapt_all(items))
    }

    async fn create(&self, record: &R) -> Result<R> {
        let reply = self
            .send(self.client.post(self.collection_url()).json(&record.to_api()))
            .await?;
        Ok(Self::echo(&reply, record))
    }

    async fn update(&self, record: &R) -> Result<R> {
        let reply = self
            .send(
                self.client
                    .put(self.item_url(Self::existing_id(record.id())?))
                    .json(&record.to_api()),
            )
            .await?;
        Ok(Self::echo(&reply, record))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.send(self.client.delete(self.item_url(Self::existing_id(id)?)))
            .await?;
        Ok(())
    }
}
