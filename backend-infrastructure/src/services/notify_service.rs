// Webhook notifier
// Announces freshly scheduled events to a team chat. Supports a plain
// HTTP webhook with a JSON template and a OneBot-style websocket bot.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::json;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::warn;

use backend_domain::ports::NotificationDispatcher;
use backend_domain::{Event, RuntimeConfig};

const MAX_LISTED_EVENTS: usize = 8;
const WS_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Default)]
pub struct WebhookNotifier;

impl WebhookNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookNotifier {
    fn notify_events_created(&self, config: RuntimeConfig, events: Vec<Event>) {
        if events.is_empty() || config.notify_webhook_url.is_none() {
            return;
        }
        tokio::spawn(async move {
            if let Err(err) = send_notices(&config, &events).await {
                warn!("event webhook failed: {}", err);
            }
        });
    }

    async fn check_target(&self, config: &RuntimeConfig) -> Result<()> {
        check_notify_target(config).await
    }
}

pub async fn check_notify_target(config: &RuntimeConfig) -> Result<()> {
    let url = resolve_notify_url(config)?;
    if url.starts_with("ws://") || url.starts_with("wss://") {
        check_ws_target(config, &url).await
    } else {
        check_http_target(config, &url).await
    }
}

async fn send_notices(config: &RuntimeConfig, events: &[Event]) -> Result<()> {
    let url = resolve_notify_url(config)?;
    if url.starts_with("ws://") || url.starts_with("wss://") {
        send_ws_notices(config, &url, events).await
    } else {
        send_http_notices(config, &url, events).await
    }
}

async fn send_http_notices(config: &RuntimeConfig, url: &str, events: &[Event]) -> Result<()> {
    let template = config
        .notify_webhook_template
        .as_deref()
        .unwrap_or(r#"{"message":"{total} new events scheduled\n{lines}"}"#);

    let payload = build_payload(events, template);
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
        .build()?;

    client
        .post(url)
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

async fn check_http_target(config: &RuntimeConfig, url: &str) -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
        .build()?;
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("event webhook responded {}", response.status());
    }
    Ok(())
}

async fn check_ws_target(config: &RuntimeConfig, url: &str) -> Result<()> {
    let token = config.notify_webhook_token.clone();
    if let Err(err) = try_ws_check(url, token.as_deref(), false).await {
        if token.as_ref().is_some() {
            return try_ws_check(url, token.as_deref(), true).await;
        }
        return Err(err);
    }
    Ok(())
}

async fn send_ws_notices(config: &RuntimeConfig, url: &str, events: &[Event]) -> Result<()> {
    let group_id = config
        .notify_group_id
        .ok_or_else(|| anyhow::anyhow!("notify_group_id not configured"))?;
    let message = build_message(events, &config.public_base_url);
    let payload = json!({
        "action": "send_group_msg",
        "params": {
            "group_id": group_id,
            "message": message,
        },
        "echo": format!("matchday-{}", chrono::Utc::now().timestamp_millis()),
    })
    .to_string();

    let token = config.notify_webhook_token.clone();
    if let Err(err) = try_ws_send(url, token.as_deref(), &payload, false).await {
        if token.as_ref().is_some() {
            try_ws_send(url, token.as_deref(), &payload, true).await?;
        } else {
            return Err(err);
        }
    }
    Ok(())
}

/// Some bots accept the token only as a Bearer header, others only as an
/// `access_token` query parameter. `token_in_query` selects which form.
async fn connect_ws(url: &str, token: Option<&str>, token_in_query: bool) -> Result<WsStream> {
    let target = match token {
        Some(token) if token_in_query && !token.trim().is_empty() => with_access_token(url, token),
        _ => url.to_string(),
    };
    let mut request = target.into_client_request()?;
    if let Some(token) = token {
        if !token_in_query {
            request
                .headers_mut()
                .insert(AUTHORIZATION, format!("Bearer {}", token).parse()?);
        }
    }
    let (ws, _) = tokio_tungstenite::connect_async(request).await?;
    Ok(ws)
}

async fn try_ws_check(url: &str, token: Option<&str>, use_query: bool) -> Result<()> {
    let mut ws = connect_ws(url, token, use_query).await?;
    let payload = json!({
        "action": "get_status",
        "params": {},
        "echo": format!("matchday-check-{}", chrono::Utc::now().timestamp_millis()),
    })
    .to_string();
    ws.send(Message::Text(payload)).await?;
    let _ = timeout(WS_REPLY_TIMEOUT, ws.next()).await?;
    let _ = ws.close(None).await;
    Ok(())
}

async fn try_ws_send(url: &str, token: Option<&str>, payload: &str, use_query: bool) -> Result<()> {
    let mut ws = connect_ws(url, token, use_query).await?;
    ws.send(Message::Text(payload.to_string())).await?;
    let _ = timeout(WS_REPLY_TIMEOUT, ws.next()).await.ok();
    let _ = ws.close(None).await;
    Ok(())
}

fn with_access_token(url: &str, token: &str) -> String {
    if url.contains("access_token=") {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}access_token={}", url, sep, token)
}

fn resolve_notify_url(config: &RuntimeConfig) -> Result<String> {
    if let Some(url) = &config.notify_webhook_url {
        if !url.trim().is_empty() {
            return Ok(url.clone());
        }
    }
    anyhow::bail!("notify webhook url not configured")
}

fn format_event_line(event: &Event) -> String {
    let title = match &event.opponent {
        Some(opponent) => format!("{} vs {}", event.title, opponent),
        None => event.title.clone(),
    };
    format!(
        "{} {} | {} | {}",
        event.date.format("%a %Y-%m-%d"),
        event.start_time.format("%H:%M"),
        event.kind.as_str(),
        title
    )
}

fn build_message(events: &[Event], public_base_url: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{} new events scheduled", events.len()));
    for event in events.iter().take(MAX_LISTED_EVENTS) {
        lines.push(format_event_line(event));
    }
    if events.len() > MAX_LISTED_EVENTS {
        lines.push(format!("...and {} more", events.len() - MAX_LISTED_EVENTS));
    }
    lines.push(format!("{}/events", public_base_url.trim_end_matches('/')));
    lines.join("\n")
}

fn build_payload(events: &[Event], template: &str) -> String {
    let lines = events
        .iter()
        .take(MAX_LISTED_EVENTS)
        .map(|event| format_event_line(event))
        .collect::<Vec<_>>();
    let mut line_text = lines.join("\\n");
    if events.len() > MAX_LISTED_EVENTS {
        line_text.push_str(&format!(
            "\\n...and {} more",
            events.len() - MAX_LISTED_EVENTS
        ));
    }
    template
        .replace("{total}", &events.len().to_string())
        .replace("{lines}", &line_text)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Utc};

    use backend_domain::value_objects::{EventId, MemberId, TeamId};
    use backend_domain::EventKind;

    use super::*;

    fn event(title: &str, opponent: Option<&str>) -> Event {
        Event {
            id: EventId("e1".to_string()),
            team_id: TeamId("first-team".to_string()),
            kind: if opponent.is_some() {
                EventKind::Match
            } else {
                EventKind::Training
            },
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 12).expect("valid date"),
            meeting_time: None,
            start_time: NaiveTime::from_hms_opt(19, 0, 0).expect("valid time"),
            end_time: None,
            location: None,
            opponent: opponent.map(str::to_string),
            notes: None,
            requires_response: true,
            is_repeating: false,
            repeat_pattern: None,
            created_by: MemberId("trainer-1".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn payload_template_placeholders_are_replaced() {
        let events = vec![event("League match", Some("Rovers"))];
        let payload = build_payload(&events, r#"{"text":"{total}: {lines}"}"#);
        assert!(payload.contains(r#""text":"1: "#));
        assert!(payload.contains("League match vs Rovers"));
        assert!(payload.contains("19:00"));
    }

    #[test]
    fn long_series_is_truncated_in_the_message() {
        let events: Vec<Event> = (0..12).map(|_| event("Session", None)).collect();
        let message = build_message(&events, "http://club.example/");
        assert!(message.starts_with("12 new events scheduled"));
        assert!(message.contains("...and 4 more"));
        assert!(message.ends_with("http://club.example/events"));
    }
}

