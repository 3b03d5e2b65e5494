/// HTTP client for the classification service
///
/// No retries, no timeout and no cancellation: a request runs to settlement
/// and the shell decides whether its outcome still matters.
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::error::ClassifyError;
use crate::state::data::{ClassificationResponse, ServiceHealth};
use crate::state::selection::SelectedImage;

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    /// Service root without a trailing slash (e.g., "http://localhost:8001")
    base_url: String,
}

impl HttpClassifier {
    pub fn new(base_url: &str) -> Result<Self, ClassifyError> {
        let client = Client::builder()
            .user_agent(concat!("style-classifier/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload `image` to `POST /classify` and parse the ranked predictions
    pub async fn classify(
        self,
        image: SelectedImage,
    ) -> Result<ClassificationResponse, ClassifyError> {
        let url = format!("{}/classify", self.base_url);

        let mut part = Part::bytes(image.bytes.to_vec()).file_name(image.name.clone());
        if !image.mime_type.is_empty() {
            part = part.mime_str(&image.mime_type)?;
        }
        let form = Form::new().part(FILE_FIELD, part);

        log::debug!("POST {} ({} bytes)", url, image.size_bytes);
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        ClassificationResponse::from_json(&body)
    }

    /// Probe `GET /health`
    pub async fn health(self) -> Result<ServiceHealth, ClassifyError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const GOTHIC_BODY: &str = r#"{"success":true,"filename":"a.jpg","image_size":{"width":800,"height":600},"top_prediction":{"style":"Gothic","confidence":0.81},"predictions":[{"style":"Gothic","confidence":0.81},{"style":"Baroque","confidence":0.12}]}"#;

    fn image() -> SelectedImage {
        SelectedImage {
            name: "a.jpg".to_string(),
            size_bytes: 4,
            mime_type: "image/jpeg".to_string(),
            bytes: Arc::from(vec![0xFFu8, 0xD8, 0xFF, 0xD9]),
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    /// Read one HTTP request: headers plus a content-length or chunked body
    async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(header_end) = find(&buf, b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok());

            let complete = match content_length {
                Some(len) => buf.len() >= header_end + 4 + len,
                None if headers.contains("transfer-encoding: chunked") => {
                    buf.ends_with(b"0\r\n\r\n")
                }
                None => true,
            };
            if complete {
                break;
            }
        }
        buf
    }

    /// Serve a single canned response and hand back the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{addr}/"), handle)
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let classifier = HttpClassifier::new("http://localhost:8001/").unwrap();
        assert_eq!(classifier.base_url(), "http://localhost:8001");
    }

    #[tokio::test]
    async fn test_classify_success() {
        let (base, server) = serve_once("200 OK", GOTHIC_BODY).await;
        let classifier = HttpClassifier::new(&base).unwrap();

        let response = classifier.classify(image()).await.unwrap();
        assert_eq!(response.filename, "a.jpg");
        assert_eq!(response.top_prediction.style, "Gothic");
        assert_eq!(response.predictions.len(), 2);

        let request = String::from_utf8_lossy(&server.await.unwrap()).to_string();
        assert!(request.starts_with("POST /classify HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data"));
        assert!(request.contains(r#"name="file""#));
        assert!(request.contains(r#"filename="a.jpg""#));
    }

    #[tokio::test]
    async fn test_classify_server_error() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let classifier = HttpClassifier::new(&base).unwrap();

        let err = classifier.classify(image()).await.unwrap_err();
        assert_eq!(err, ClassifyError::Status(500));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_classify_garbage_body() {
        let (base, server) = serve_once("200 OK", "<html>not json</html>").await;
        let classifier = HttpClassifier::new(&base).unwrap();

        let err = classifier.classify(image()).await.unwrap_err();
        assert!(matches!(err, ClassifyError::Parse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_classify_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let classifier = HttpClassifier::new(&format!("http://{addr}")).unwrap();
        let err = classifier.classify(image()).await.unwrap_err();
        assert!(matches!(err, ClassifyError::Network(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (base, server) =
            serve_once("200 OK", r#"{"status":"healthy","service":"architectural-classifier"}"#).await;
        let classifier = HttpClassifier::new(&base).unwrap();

        let health = classifier.health().await.unwrap();
        assert!(health.is_healthy());

        let request = String::from_utf8_lossy(&server.await.unwrap()).to_string();
        assert!(request.starts_with("GET /health HTTP/1.1"));
    }
}
