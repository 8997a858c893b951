use std::time::Duration;

use async_trait::async_trait;

use crate::error::{DashboardError, Result};
use crate::models::{QueryAnswer, RawBatch};

/// The two read-only operations the dashboard consumes from the chaser backend.
#[async_trait]
pub trait ChaserBackend: Send + Sync {
    async fn list_tasks(&self, base: &str) -> Result<Vec<RawBatch>>;

    async fn ask(&self, base: &str, question: &str) -> Result<QueryAnswer>;
}

pub struct HttpBackend {
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn get_body(&self, req: reqwest::RequestBuilder) -> Result<String> {
        let req = req.header("Accept", "application/json").build()?;
        let url = req.url().to_string();
        let res = self.client.execute(req).await?;

        let status = res.status();
        if !status.is_success() {
            return Err(DashboardError::Status { status, url });
        }

        Ok(res.text().await?)
    }
}

#[async_trait]
impl ChaserBackend for HttpBackend {
    async fn list_tasks(&self, base: &str) -> Result<Vec<RawBatch>> {
        let body = self
            .get_body(self.client.get(format!("{}/chaser/tasks", base)))
            .await?;

        // An empty body or a JSON null is an empty listing.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let batches: Option<Vec<RawBatch>> = serde_json::from_str(&body)?;
        Ok(batches.unwrap_or_default())
    }

    async fn ask(&self, base: &str, question: &str) -> Result<QueryAnswer> {
        let body = self
            .get_body(
                self.client
                    .get(format!("{}/intelligence/ask", base))
                    .query(&[("q", question)]),
            )
            .await?;

        if body.trim().is_empty() {
            return Ok(QueryAnswer::default());
        }
        let answer: Option<QueryAnswer> = serde_json::from_str(&body)?;
        Ok(answer.unwrap_or_default())
    }
}
