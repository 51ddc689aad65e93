//! HTTP client for the remote audit log.

use super::service::{AuditError, AuditResult, AuditSink};
use crate::config::AuditConfig;
use crate::domain::audit_event::AuditEvent;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Bearer-style credential presented to the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AccessToken {
    token_type: String,
    value: String,
}

impl AccessToken {
    fn header_value(&self) -> String {
        format!("{} {}", self.token_type, self.value)
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// Posts audit events to the logging sidecar.
///
/// The access token is held in memory. Without a preconfigured token the sink
/// authenticates lazily with the configured client credentials; a `401`
/// clears the token, re-authenticates once and resends the event.
pub struct HttpAuditSink {
    client: Client,
    config: AuditConfig,
    token: Mutex<Option<AccessToken>>,
}

impl HttpAuditSink {
    /// Builds the sink and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: AuditConfig) -> AuditResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        let token = config.access_token.clone().map(|value| AccessToken {
            token_type: config.token_type.clone(),
            value,
        });

        info!("Audit log enabled: {}", config.log_endpoint);

        Ok(Self {
            client,
            config,
            token: Mutex::new(token),
        })
    }

    /// Returns the cached token, authenticating first if there is none.
    async fn current_token(&self) -> AuditResult<AccessToken> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        let token = self.authenticate().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Drops `stale` and fetches a fresh token.
    ///
    /// If another task already replaced the token, that one is reused.
    async fn refresh_token(&self, stale: &AccessToken) -> AuditResult<AccessToken> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref()
            && token != stale
        {
            return Ok(token.clone());
        }

        *guard = None;
        let token = self.authenticate().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    async fn authenticate(&self) -> AuditResult<AccessToken> {
        let (Some(endpoint), Some(credentials)) =
            (&self.config.auth_endpoint, &self.config.credentials)
        else {
            return Err(AuditError::Authentication(
                "no auth endpoint or credentials configured".to_string(),
            ));
        };

        debug!("Authenticating against audit log at {}", endpoint);

        let response = self.client.post(endpoint).json(credentials).send().await?;

        if !response.status().is_success() {
            return Err(AuditError::Authentication(format!(
                "auth endpoint returned {}",
                response.status()
            )));
        }

        let body: AuthResponse = response.json().await?;
        info!("Obtained audit log access token");

        Ok(AccessToken {
            token_type: body
                .token_type
                .unwrap_or_else(|| self.config.token_type.clone()),
            value: body.access_token,
        })
    }

    async fn post(&self, event: &AuditEvent, token: &AccessToken) -> AuditResult<StatusCode> {
        let response = self
            .client
            .post(&self.config.log_endpoint)
            .header(header::AUTHORIZATION, token.header_value())
            .json(event)
            .send()
            .await?;

        Ok(response.status())
    }
}

#[async_trait]
impl AuditSink for HttpAuditSink {
    async fn send(&self, event: &AuditEvent) -> AuditResult<()> {
        let token = self.current_token().await?;
        let mut status = self.post(event, &token).await?;

        if status == StatusCode::UNAUTHORIZED {
            warn!("Audit token rejected, re-authenticating");
            let fresh = self.refresh_token(&token).await?;
            status = self.post(event, &fresh).await?;

            if status == StatusCode::UNAUTHORIZED {
                return Err(AuditError::Unauthorized);
            }
        }

        if status.is_success() {
            debug!("Audit event delivered: {}", event.message);
            Ok(())
        } else {
            Err(AuditError::Rejected(status.as_u16()))
        }
    }
}
