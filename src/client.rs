use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::time::Duration;

/// Fire-and-forget POSTs the page actions make against the web server.
#[allow(async_fn_in_trait)]
pub trait ActionTransport {
    /// POST a pre-encoded form body and return the response text.
    async fn post_text(&self, url: &str, body: String) -> Result<String>;

    /// POST form fields and decode the JSON reply.
    async fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<Value>;
}

/// HTTP transport against a running web client server.
pub struct WebClient {
    http: reqwest::Client,
    base_url: String,
}

impl WebClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }
}

impl ActionTransport for WebClient {
    async fn post_text(&self, url: &str, body: String) -> Result<String> {
        let url = self.resolve(url);
        log::debug!("http: POST {url} ({} bytes)", body.len());
        let response = self
            .http
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<Value> {
        let url = self.resolve(url);
        log::debug!("http: POST {url} with {} field(s)", fields.len());
        let response = self
            .http
            .post(&url)
            .form(fields)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?
            .error_for_status()?;
        response
            .json::<Value>()
            .await
            .with_context(|| format!("invalid JSON from {url}"))
    }
}

/// Canned server used when running without a backend.
///
/// Shares cannot go into the basket, and file attachments are owned by
/// someone else so they refuse removal.
#[derive(Default)]
pub struct DemoServer {
    basket: Mutex<BTreeSet<String>>,
}

impl DemoServer {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn basket_len(&self) -> usize {
        self.basket.lock().len()
    }
}

impl ActionTransport for DemoServer {
    async fn post_text(&self, url: &str, body: String) -> Result<String> {
        log::debug!("demo: POST {url} {body}");
        let mut pairs = body.split('&');
        if pairs.next() != Some("action=add") {
            return Ok("Error: Unsupported action".to_string());
        }
        let items: Vec<&str> = pairs.collect();
        if let Some(bad) = items.iter().find(|p| p.starts_with("share=")) {
            return Ok(format!("Error: Permission denied for {bad}"));
        }
        let mut basket = self.basket.lock();
        basket.extend(items.iter().map(|s| s.to_string()));
        Ok(basket.len().to_string())
    }

    async fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<Value> {
        log::debug!("demo: POST {url} {fields:?}");
        if url.contains("/file/") {
            return Ok(json!({"bad": "true", "errs": "Annotation is locked by its owner"}));
        }
        Ok(json!({"bad": "false", "errs": ""}))
    }
}

/// Transport chosen from configuration at startup.
pub enum Transport {
    Http(WebClient),
    Demo(DemoServer),
}

impl Transport {
    pub fn describe(&self) -> String {
        match self {
            Transport::Http(client) => client.base_url().to_string(),
            Transport::Demo(_) => "offline demo".to_string(),
        }
    }
}

impl ActionTransport for Transport {
    async fn post_text(&self, url: &str, body: String) -> Result<String> {
        match self {
            Transport::Http(client) => client.post_text(url, body).await,
            Transport::Demo(server) => server.post_text(url, body).await,
        }
    }

    async fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<Value> {
        match self {
            Transport::Http(client) => client.post_form(url, fields).await,
            Transport::Demo(server) => server.post_form(url, fields).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_urls_resolve_against_base() {
        let client = WebClient::new("http://localhost:4080/").unwrap();
        assert_eq!(
            client.resolve("/webclient/basket/update/"),
            "http://localhost:4080/webclient/basket/update/"
        );
        assert_eq!(client.resolve("https://other/x"), "https://other/x");
    }

    #[tokio::test]
    async fn demo_basket_counts_distinct_items() {
        let server = DemoServer::new();
        let reply = server
            .post_text("/basket", "action=add&image=1&image=2".to_string())
            .await
            .unwrap();
        assert_eq!(reply, "2");
        let reply = server
            .post_text("/basket", "action=add&image=2".to_string())
            .await
            .unwrap();
        assert_eq!(reply, "2");
        assert_eq!(server.basket_len(), 2);
    }

    #[tokio::test]
    async fn demo_basket_rejects_shares() {
        let server = DemoServer::new();
        let reply = server
            .post_text("/basket", "action=add&share=4".to_string())
            .await
            .unwrap();
        assert!(reply.starts_with("Error: Permission"));
        assert_eq!(server.basket_len(), 0);
    }

    #[tokio::test]
    async fn demo_refuses_file_annotation_removal() {
        let server = DemoServer::new();
        let reply = server
            .post_form("/webclient/action/remove/file/88/", &[])
            .await
            .unwrap();
        assert_eq!(reply["bad"], "true");
        let reply = server
            .post_form("/webclient/action/remove/tag/12/", &[])
            .await
            .unwrap();
        assert_eq!(reply["bad"], "false");
    }
}
