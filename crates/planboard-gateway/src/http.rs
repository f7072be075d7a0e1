use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use planboard_core::wire::{
    CreatePhaseRequest, Envelope, MessagePayload, MovePhaseRequest, PhaseRecord, SearchRecords,
    TaskRecord, UpdatePhaseRequest,
};
use planboard_core::{PhaseId, ProjectId};

use crate::config::GatewayConfig;
use crate::{Gateway, GatewayError};

/// JSON-over-HTTP gateway. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Url::parse(&config.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(%method, %url, "gateway request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Envelope<T>, GatewayError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| env.error)
                .unwrap_or(body);
            tracing::debug!(status = status.as_u16(), %message, "gateway error response");
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Envelope::empty());
        }
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn list_phases(
        &self,
        project_id: ProjectId,
    ) -> Result<Envelope<Vec<PhaseRecord>>, GatewayError> {
        self.send(self.request(Method::GET, &format!("projects/{project_id}/phases")))
            .await
    }

    async fn list_tasks(
        &self,
        phase_id: PhaseId,
    ) -> Result<Envelope<Vec<TaskRecord>>, GatewayError> {
        self.send(self.request(Method::GET, &format!("phases/{phase_id}/tasks")))
            .await
    }

    async fn create_phase(
        &self,
        project_id: ProjectId,
        body: &CreatePhaseRequest,
    ) -> Result<Envelope<PhaseRecord>, GatewayError> {
        let req = self
            .request(Method::POST, &format!("projects/{project_id}/phases"))
            .json(body);
        self.send(req).await
    }

    async fn update_phase(
        &self,
        phase_id: PhaseId,
        body: &UpdatePhaseRequest,
    ) -> Result<Envelope<PhaseRecord>, GatewayError> {
        let req = self
            .request(Method::PUT, &format!("phases/{phase_id}"))
            .json(body);
        self.send(req).await
    }

    async fn delete_phase(
        &self,
        phase_id: PhaseId,
    ) -> Result<Envelope<MessagePayload>, GatewayError> {
        self.send(self.request(Method::DELETE, &format!("phases/{phase_id}")))
            .await
    }

    async fn move_phase(
        &self,
        phase_id: PhaseId,
        body: &MovePhaseRequest,
    ) -> Result<Envelope<MessagePayload>, GatewayError> {
        let req = self
            .request(Method::PATCH, &format!("phases/{phase_id}/move"))
            .json(body);
        self.send(req).await
    }

    async fn search(&self, keyword: &str) -> Result<Envelope<SearchRecords>, GatewayError> {
        let req = self
            .request(Method::GET, "search")
            .query(&[("keyword", keyword)]);
        self.send(req).await
    }
}
