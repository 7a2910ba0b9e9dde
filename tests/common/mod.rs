#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned-response HTTP server on a random local port. Unknown paths get 404;
/// a route with status `HANG` accepts the request and never answers.
pub const HANG: u16 = 0;

pub struct TestServer {
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn start(routes: Vec<(&str, u16, String)>) -> TestServer {
        let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, status, body)| (path.to_string(), (status, body)))
                .collect(),
        );
        let hits = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let log = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        let n = stream.read(&mut chunk).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }

                    let request = String::from_utf8_lossy(&buf);
                    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                    log.lock().unwrap().push(path.clone());

                    let (status, body) = routes
                        .get(&path)
                        .cloned()
                        .unwrap_or((404, "not found".to_string()));
                    if status == HANG {
                        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                        return;
                    }
                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reason(status),
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        TestServer { base, hits }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

pub fn overview_html() -> String {
    std::fs::read_to_string("tests/fixtures/overview.html").unwrap()
}

pub fn schema_json(name: &str) -> String {
    serde_json::json!({
        "attributes": [],
        "description": format!("The {} resource.", name),
        "display_name": name,
        "fields": {
            format!("{}.id", name): {
                "field_details": {
                    "category": "ATTRIBUTE",
                    "data_type": "INT64",
                    "description": format!("The ID of the {}.", name),
                    "filterable": true,
                    "selectable": true,
                    "selectable_with": ["segments.date"],
                    "sortable": true
                },
                "incompatible_fields": []
            },
            format!("{}.resource_name", name): {
                "field_details": {
                    "category": "ATTRIBUTE",
                    "data_type": "RESOURCE_NAME",
                    "type_url": ""
                },
                "incompatible_fields": ["segments.hour"]
            }
        },
        "metrics": ["metrics.clicks"],
        "name": name,
        "segments": ["segments.date"]
    })
    .to_string()
}
