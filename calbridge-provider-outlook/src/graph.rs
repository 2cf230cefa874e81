//! Minimal Microsoft Graph client.
//!
//! Only the two calls the tools need: a calendar view over a window and
//! event creation. Responses are returned as loose JSON and shaped by
//! `calbridge_core::event`.

use anyhow::{Context, Result};
use calbridge_core::constants::{CIVIL_TIME_ZONE_NAME, QUERY_PAGE_SIZE};
use calbridge_core::event::EventCreateRequest;
use calbridge_core::time::TimeWindow;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::OutlookConfig;
use crate::credential::Credential;

const MINIMAL_EVENT_FIELDS: &str = "subject,start,end,isAllDay";
const ORDER_BY_START: &str = "start/dateTime asc";
const PREFER_REPRESENTATION: &str = "return=representation";

/// `Prefer` value asking Graph to render date-times in civil time instead of UTC.
fn prefer_civil_time_zone() -> String {
    format!("outlook.timezone=\"{}\"", CIVIL_TIME_ZONE_NAME)
}

#[derive(Debug, Deserialize)]
struct GraphListResponse {
    #[serde(default)]
    value: Vec<Value>,
}

pub struct GraphClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl GraphClient {
    /// Acquire a token and build a client for a single tool call.
    pub async fn connect(config: &OutlookConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.graph_endpoint)?;
        let http = reqwest::Client::new();

        let credential = Credential::from_config(config)?;
        let access_token = credential
            .access_token(&http)
            .await
            .context("Failed to acquire Microsoft Graph token")?;

        Ok(Self {
            http,
            base_url,
            access_token,
        })
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Graph endpoint must be an absolute URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Events (with recurring occurrences expanded by Graph) inside `window`,
    /// limited to the minimal fields and a single page.
    pub async fn calendar_view(&self, user_id: &str, window: &TimeWindow) -> Result<Vec<Value>> {
        let url = self.url_with_segments(&["users", user_id, "calendarView"])?;

        tracing::debug!(
            user = user_id,
            start = %window.start_param(),
            end = %window.end_param(),
            "Fetching calendar view"
        );

        let request = self
            .http
            .get(url)
            .query(&[
                ("startDateTime", window.start_param()),
                ("endDateTime", window.end_param()),
                ("$select", MINIMAL_EVENT_FIELDS.to_string()),
                ("$orderby", ORDER_BY_START.to_string()),
                ("$top", QUERY_PAGE_SIZE.to_string()),
            ])
            .header("Prefer", prefer_civil_time_zone());

        let response: GraphListResponse = self
            .send(request)
            .await?
            .json()
            .await
            .context("Failed to parse calendar view response")?;

        Ok(response.value)
    }

    /// Create an event and return Graph's full representation of it.
    pub async fn create_event(&self, user_id: &str, event: &EventCreateRequest) -> Result<Value> {
        let url = self.url_with_segments(&["users", user_id, "events"])?;

        tracing::debug!(user = user_id, subject = %event.subject, "Creating event");

        let request = self
            .http
            .post(url)
            .json(event)
            .header("Prefer", PREFER_REPRESENTATION)
            .header("Prefer", prefer_civil_time_zone());

        self.send(request)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse created event: {}", event.subject))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .context("Failed to send Microsoft Graph request")?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Microsoft Graph request failed ({status}): {body}")
        }
    }
}

fn parse_base_url(endpoint: &str) -> Result<Url> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    anyhow::ensure!(!trimmed.is_empty(), "Graph endpoint must not be empty");
    Url::parse(trimmed).with_context(|| format!("Invalid Graph endpoint: {}", endpoint))
}
