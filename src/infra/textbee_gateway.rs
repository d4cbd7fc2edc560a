use crate::app::ports::{GatewayPort, SendOutcome};
use crate::config::GatewayCredentials;
use crate::constants::API_KEY_HEADER;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SendSmsRequest<'a> {
    recipients: Vec<&'a str>,
    message: &'a str,
}

/// SMS gateway client for the TextBee device API.
pub struct TextBeeGateway {
    base_url: String,
    credentials: GatewayCredentials,
}

impl TextBeeGateway {
    pub fn new(base_url: impl Into<String>, credentials: GatewayCredentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/gateway/devices/{}/send-sms",
            self.base_url.trim_end_matches('/'),
            self.credentials.device_id
        )
    }
}

/// Interprets a gateway response.
///
/// 200 and 201 are success regardless of body. Any other status is still a
/// success when the body carries `data.success == true`; otherwise the raw
/// body is the failure reason. A body that is not JSON carries no flag.
pub fn classify_response(status: u16, body: &str) -> SendOutcome {
    if status == 200 || status == 201 {
        return SendOutcome::Success;
    }
    let flagged = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/data/success").and_then(Value::as_bool))
        .unwrap_or(false);
    if flagged {
        SendOutcome::Success
    } else {
        SendOutcome::Failure(body.to_string())
    }
}

#[async_trait]
impl GatewayPort for TextBeeGateway {
    async fn send_sms(&self, recipient: &str, message: &str) -> SendOutcome {
        let payload = SendSmsRequest {
            recipients: vec![recipient],
            message,
        };

        // One client per call: no connection reuse between rows.
        let client = reqwest::Client::new();
        let resp = match client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return SendOutcome::Failure(format!("request failed: {}", e)),
        };

        let status = resp.status().as_u16();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => return SendOutcome::Failure(format!("reading response failed: {}", e)),
        };
        debug!(status, %body, "Gateway responded");

        classify_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn credentials() -> GatewayCredentials {
        GatewayCredentials {
            api_key: "test-key".to_string(),
            device_id: "device-123".to_string(),
        }
    }

    /// Serves exactly one HTTP response and hands back the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let content_length = text[..split]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= split + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });

        (base_url, handle)
    }

    #[test]
    fn test_created_without_flag_is_success() {
        assert_eq!(classify_response(201, ""), SendOutcome::Success);
        assert_eq!(classify_response(200, "not json"), SendOutcome::Success);
    }

    #[test]
    fn test_bad_request_with_false_flag_keeps_body_verbatim() {
        let body = r#"{"data":{"success":false}}"#;
        assert_eq!(classify_response(400, body), SendOutcome::Failure(body.to_string()));
    }

    #[test]
    fn test_inner_success_flag_overrides_status() {
        let body = r#"{"data":{"success":true,"smsBatchId":"abc"}}"#;
        assert_eq!(classify_response(202, body), SendOutcome::Success);
    }

    #[test]
    fn test_unparseable_error_body_is_failure() {
        assert_eq!(
            classify_response(500, "<html>oops</html>"),
            SendOutcome::Failure("<html>oops</html>".to_string())
        );
        assert_eq!(
            classify_response(400, r#"{"data":{"success":"yes"}}"#),
            SendOutcome::Failure(r#"{"data":{"success":"yes"}}"#.to_string())
        );
    }

    #[test]
    fn test_endpoint_embeds_device_id() {
        let gateway = TextBeeGateway::new("https://api.textbee.dev/api/v1/", credentials());
        assert_eq!(
            gateway.endpoint(),
            "https://api.textbee.dev/api/v1/gateway/devices/device-123/send-sms"
        );
    }

    #[tokio::test]
    async fn test_send_posts_json_with_api_key() {
        let (base_url, server) = serve_once("201 Created", r#"{"data":{"success":true}}"#).await;
        let gateway = TextBeeGateway::new(base_url, credentials());

        let outcome = gateway.send_sms("+919876543210", "hello").await;
        let request = server.await.unwrap();

        assert_eq!(outcome, SendOutcome::Success);
        assert!(request.starts_with("POST /gateway/devices/device-123/send-sms HTTP/1.1"));
        let lower = request.to_lowercase();
        assert!(lower.contains("x-api-key: test-key"));
        assert!(lower.contains("content-type: application/json"));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["recipients"], serde_json::json!(["+919876543210"]));
        assert_eq!(json["message"], "hello");
    }

    #[tokio::test]
    async fn test_rejected_send_reports_response_body() {
        let (base_url, server) = serve_once("400 Bad Request", r#"{"data":{"success":false}}"#).await;
        let gateway = TextBeeGateway::new(base_url, credentials());

        let outcome = gateway.send_sms("+919876543210", "hello").await;
        server.await.unwrap();

        assert_eq!(outcome, SendOutcome::Failure(r#"{"data":{"success":false}}"#.to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_failure_not_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = TextBeeGateway::new(format!("http://{}", addr), credentials());
        let outcome = gateway.send_sms("+919876543210", "hello").await;

        assert!(matches!(outcome, SendOutcome::Failure(reason) if reason.starts_with("request failed")));
    }
}
