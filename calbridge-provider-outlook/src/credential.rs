//! Acquires a bearer token for Microsoft Graph.
//!
//! Every tool call builds its own credential and drops it on return, so no
//! token outlives the call that requested it.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::OutlookConfig;

const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

pub enum Credential {
    /// Token supplied through configuration.
    Static(String),
    /// OAuth 2.0 client-credentials grant for an app registration.
    ClientSecret {
        authority_host: String,
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Credential {
    pub fn from_config(config: &OutlookConfig) -> Result<Self> {
        if let Some(token) = non_empty(&config.access_token) {
            return Ok(Credential::Static(token.to_string()));
        }

        let tenant_id = non_empty(&config.tenant_id);
        let client_id = non_empty(&config.client_id);
        let client_secret = non_empty(&config.client_secret);

        match (tenant_id, client_id, client_secret) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(Credential::ClientSecret {
                authority_host: config.authority_host.trim_end_matches('/').to_string(),
                tenant_id: tenant_id.to_string(),
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
            }),
            _ => {
                let missing: Vec<&str> = [
                    ("AZURE_TENANT_ID", tenant_id),
                    ("AZURE_CLIENT_ID", client_id),
                    ("AZURE_CLIENT_SECRET", client_secret),
                ]
                .iter()
                .filter(|(_, value)| value.is_none())
                .map(|(name, _)| *name)
                .collect();

                anyhow::bail!(
                    "No Microsoft Graph credential configured (missing {}). \
                    Set CALBRIDGE_ACCESS_TOKEN or the client credential variables.",
                    missing.join(", ")
                )
            }
        }
    }

    pub async fn access_token(&self, http: &reqwest::Client) -> Result<String> {
        match self {
            Credential::Static(token) => Ok(token.clone()),
            Credential::ClientSecret {
                authority_host,
                tenant_id,
                client_id,
                client_secret,
            } => {
                let token_url = format!("{}/{}/oauth2/v2.0/token", authority_host, tenant_id);

                let response = http
                    .post(&token_url)
                    .form(&[
                        ("grant_type", "client_credentials"),
                        ("client_id", client_id.as_str()),
                        ("client_secret", client_secret.as_str()),
                        ("scope", GRAPH_SCOPE),
                    ])
                    .send()
                    .await
                    .context("Failed to send token request")?;

                if !response.status().is_success() {
                    let status = response.status();
                    let error_text = response.text().await.unwrap_or_default();
                    anyhow::bail!("Failed to acquire token ({}): {}", status, error_text);
                }

                let token: TokenResponse = response
                    .json()
                    .await
                    .context("Failed to parse token response")?;

                Ok(token.access_token)
            }
        }
    }
}
