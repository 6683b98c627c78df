use crate::app_config::AppConfig;
use crate::domain::{BulkChange, Change, Provider, ProviderSnapshot};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use thiserror::Error;
use tracing::{info, instrument};

/// Contract between the panel and the lampctl-style backend.
///
/// All request/response bodies are JSON. Any 2xx response is success; the
/// bodies of the apply endpoints are discarded.
#[async_trait]
pub trait Gateway: Debug + Send + Sync {
    async fn list_providers(&self) -> Result<Vec<Provider>, GatewayError>;

    async fn provider_snapshot(&self, provider_id: &str) -> Result<ProviderSnapshot, GatewayError>;

    async fn apply(&self, provider_id: &str, changes: &[Change]) -> Result<(), GatewayError>;

    async fn apply_all(&self, provider_id: &str, change: &BulkChange) -> Result<(), GatewayError>;
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

pub fn new_client() -> Result<Client, GatewayError> {
    let client = Client::builder().build()?;
    Ok(client)
}

/// Reqwest-backed gateway talking to `{base_url}/api/...`.
#[derive(Debug)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        HttpGateway {
            client,
            base_url: config.panel().url().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip(self))]
    async fn list_providers(&self) -> Result<Vec<Provider>, GatewayError> {
        info!("Retrieving providers...");

        let providers = self
            .client
            .get(format!("{}/api/providers", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Provider>>()
            .await?;

        info!("Retrieving providers... OK, {} found", providers.len());
        Ok(providers)
    }

    #[instrument(skip(self))]
    async fn provider_snapshot(&self, provider_id: &str) -> Result<ProviderSnapshot, GatewayError> {
        info!("Retrieving snapshot for provider '{}'...", provider_id);

        let snapshot = self
            .client
            .get(format!("{}/api/providers/{}", self.base_url, provider_id))
            .send()
            .await?
            .error_for_status()?
            .json::<ProviderSnapshot>()
            .await?;

        #[rustfmt::skip]
        info!("Retrieving snapshot for provider '{}'... OK, {} group(s), {} lamp(s)", provider_id, snapshot.groups.len(), snapshot.lamps.len());
        Ok(snapshot)
    }

    #[instrument(skip(self, changes))]
    async fn apply(&self, provider_id: &str, changes: &[Change]) -> Result<(), GatewayError> {
        self.client
            .post(format!("{}/api/providers/{}/apply", self.base_url, provider_id))
            .json(&changes)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn apply_all(&self, provider_id: &str, change: &BulkChange) -> Result<(), GatewayError> {
        self.client
            .post(format!("{}/api/providers/{}/apply/all", self.base_url, provider_id))
            .json(change)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn gateway(server: &mockito::Server) -> HttpGateway {
        let config = AppConfigBuilder::new().panel_url(server.url()).build();
        HttpGateway::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn list_providers_parses_the_summary_list() -> Result<(), GatewayError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/providers")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../tests/resources/providers_response.json"))
            .create_async()
            .await;

        let providers = gateway(&server).list_providers().await?;

        mock.assert();
        assert_eq!(
            providers,
            vec![
                Provider {
                    id: "hue".to_string(),
                    name: "Philips Hue".to_string(),
                },
                Provider {
                    id: "gpio".to_string(),
                    name: "GPIO".to_string(),
                },
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn provider_snapshot_parses_groups_and_lamps() -> Result<(), GatewayError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/providers/hue")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../tests/resources/provider_snapshot_response.json"))
            .create_async()
            .await;

        let snapshot = gateway(&server).provider_snapshot("hue").await?;

        mock.assert();
        assert_eq!(snapshot.groups.len(), 2);
        assert_eq!(snapshot.lamps.len(), 3);
        assert_eq!(snapshot.lamps[0].group_id, "g-living");
        assert!(snapshot.lamps[0].state);
        Ok(())
    }

    #[tokio::test]
    async fn apply_posts_the_change_batch() -> Result<(), GatewayError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/providers/hue/apply")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!([{ "group_id": "g1", "lamp_id": "l1", "state": true }])))
            .with_status(200)
            .create_async()
            .await;

        gateway(&server).apply("hue", &[Change::set_state("g1", "l1", true)]).await?;

        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn apply_all_posts_state_and_duration() -> Result<(), GatewayError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/providers/hue/apply/all")
            .match_body(Matcher::Json(json!({ "state": false, "duration": 1000 })))
            .with_status(200)
            .create_async()
            .await;

        gateway(&server)
            .apply_all(
                "hue",
                &BulkChange {
                    state: false,
                    duration: 1000,
                },
            )
            .await?;

        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn non_2xx_responses_are_errors() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/api/providers").with_status(500).create_async().await;

        let result = gateway(&server).list_providers().await;

        assert!(result.is_err());
    }
}
