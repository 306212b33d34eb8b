//! # Integration Tests
//!
//! End-to-end tests for the collect -> aggregate -> dispatch pipeline,
//! exercised against a local capture HTTP server (no external services).

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::PlanVersion::V1;
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{AggregateStats, DispatchStatus};
    use dispatcher::Dispatcher;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::mpsc;

    /// One captured HTTP request
    struct RecordedRequest {
        request_line: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl RecordedRequest {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    /// Minimal capture server: records every request, answers with the
    /// given status line
    async fn spawn_capture_server(
        status_line: &'static str,
    ) -> (SocketAddr, mpsc::UnboundedReceiver<RecordedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(request) = read_request(&mut socket).await {
                        let _ = tx.send(request);
                    }
                    let response = format!(
                        "HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });

        (addr, rx)
    }

    async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            match buf.windows(4).position(|w| w == b"\r\n\r\n") {
                Some(pos) => break pos,
                None => {
                    let n = socket.read(&mut chunk).await.ok()?;
                    if n == 0 {
                        return None;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.lines();
        let request_line = lines.next()?.to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| {
                line.split_once(':')
                    .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            })
            .collect();

        let content_length: usize = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);

        let mut body = buf[header_end + 4..].to_vec();
        while body.len() < content_length {
            let n = socket.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }

        Some(RecordedRequest {
            request_line,
            headers,
            body: String::from_utf8_lossy(&body).to_string(),
        })
    }

    /// Address with nothing listening on it
    async fn refused_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    }

    fn shard_entry(id: u32, guilds: u64) -> (String, String) {
        (
            id.to_string(),
            format!(
                r#"{{"id":{id},"status":"ready","guildsCacheSize":{guilds},"usersCacheSize":0,"updatedAt":1700000000000}}"#
            ),
        )
    }

    /// Store contents -> aggregate -> default-body dispatch, verified on
    /// the wire.
    #[tokio::test]
    async fn store_records_flow_to_default_body() {
        let (addr, mut requests) = spawn_capture_server("200 OK").await;

        // The shard hash as the workers write it
        let entries: HashMap<String, String> =
            [shard_entry(0, 10), shard_entry(1, 5)].into_iter().collect();
        let records = collector::decode_records(entries).unwrap();
        let stats = AggregateStats::from_records(&records);
        assert_eq!(stats.server_count, 15);
        assert_eq!(stats.shard_count, 2);

        let yaml = format!(
            r#"
bot_id: "123456789"
destinations:
  - name: listing
    endpoint: "http://{addr}/api/stats"
    token: secret-token
"#
        );
        let plan = ConfigLoader::load_from_str(&yaml, ConfigFormat::Yaml).unwrap();

        let dispatcher = Dispatcher::new(None).unwrap();
        let outcomes = dispatcher.dispatch_all(&plan.destinations, stats).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_success());

        // No-op without a recorder, but keeps the recording path honest
        for outcome in &outcomes {
            observability::record_dispatch_outcome(outcome);
        }

        let request = requests.recv().await.unwrap();
        assert!(
            request.request_line.starts_with("POST /api/stats"),
            "got: {}",
            request.request_line
        );
        assert_eq!(request.header("authorization"), Some("secret-token"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body, "{\"server_count\": 15}");
    }

    /// A count placeholder in the endpoint puts the counts in the URL and
    /// drops the body.
    #[tokio::test]
    async fn query_mode_resolves_url_and_sends_no_body() {
        let (addr, mut requests) = spawn_capture_server("200 OK").await;

        let yaml = format!(
            r#"
bot_id: "abc"
destinations:
  - name: counter
    endpoint: "http://{addr}/bots/@bot_id@/stats?count=@server_count@"
    token: t
    method: GET
"#
        );
        let plan = ConfigLoader::load_from_str(&yaml, ConfigFormat::Yaml).unwrap();
        // Bot id resolved at load; counts resolved at dispatch
        assert_eq!(
            plan.destinations[0].endpoint,
            format!("http://{addr}/bots/abc/stats?count=@server_count@")
        );

        let stats = AggregateStats {
            server_count: 15,
            shard_count: 2,
        };

        let dispatcher = Dispatcher::new(None).unwrap();
        let outcomes = dispatcher.dispatch_all(&plan.destinations, stats).await;
        assert_eq!(
            outcomes[0].url,
            format!("http://{addr}/bots/abc/stats?count=15")
        );
        assert!(outcomes[0].is_success());

        let request = requests.recv().await.unwrap();
        assert!(
            request
                .request_line
                .starts_with("GET /bots/abc/stats?count=15"),
            "got: {}",
            request.request_line
        );
        assert_eq!(request.body, "");
        assert_eq!(request.header("content-type"), None);
    }

    /// Custom templates may carry both counts.
    #[tokio::test]
    async fn custom_body_template_on_the_wire() {
        let (addr, mut requests) = spawn_capture_server("200 OK").await;

        let yaml = format!(
            r#"
bot_id: "123"
destinations:
  - name: listing
    endpoint: "http://{addr}/v2/stats"
    token: t
    method: put
    body_template: '{{"guilds": @server_count@, "shards": @shard_count@}}'
"#
        );
        let plan = ConfigLoader::load_from_str(&yaml, ConfigFormat::Yaml).unwrap();

        let stats = AggregateStats {
            server_count: 42,
            shard_count: 3,
        };
        let dispatcher = Dispatcher::new(None).unwrap();
        let outcomes = dispatcher.dispatch_all(&plan.destinations, stats).await;
        assert!(outcomes[0].is_success());

        let request = requests.recv().await.unwrap();
        assert!(request.request_line.starts_with("PUT /v2/stats"));
        assert_eq!(request.body, "{\"guilds\": 42, \"shards\": 3}");
    }

    /// Zero destinations is a fatal configuration error; no network
    /// activity happens.
    #[tokio::test]
    async fn zero_destinations_is_fatal_at_load() {
        let yaml = r#"
bot_id: "123456789"
destinations: []
"#;
        let err = ConfigLoader::load_from_str(yaml, ConfigFormat::Yaml).unwrap_err();
        assert!(err.to_string().contains("at least one destination"));
    }

    /// One refused destination out of three: the batch still yields three
    /// outcomes and the other two succeed.
    #[tokio::test]
    async fn partial_failure_keeps_the_batch_complete() {
        let (addr, _requests) = spawn_capture_server("200 OK").await;
        let refused = refused_addr().await;

        let yaml = format!(
            r#"
bot_id: "123"
destinations:
  - name: first
    endpoint: "http://{addr}/stats"
    token: t1
  - name: unreachable
    endpoint: "http://{refused}/stats"
    token: t2
  - name: third
    endpoint: "http://{addr}/stats"
    token: t3
"#
        );
        let plan = ConfigLoader::load_from_str(&yaml, ConfigFormat::Yaml).unwrap();

        let stats = AggregateStats {
            server_count: 7,
            shard_count: 1,
        };
        let dispatcher = Dispatcher::new(None).unwrap();
        let outcomes = dispatcher.dispatch_all(&plan.destinations, stats).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_success());
        assert!(matches!(outcomes[1].status, DispatchStatus::Failed { .. }));
        assert!(outcomes[2].is_success());
    }

    /// A non-2xx answer is recorded verbatim, not escalated.
    #[tokio::test]
    async fn rejection_is_recorded_verbatim() {
        let (addr, _requests) = spawn_capture_server("401 Unauthorized").await;

        let yaml = format!(
            r#"
bot_id: "123"
destinations:
  - name: listing
    endpoint: "http://{addr}/stats"
    token: wrong-token
"#
        );
        let plan = ConfigLoader::load_from_str(&yaml, ConfigFormat::Yaml).unwrap();

        let stats = AggregateStats {
            server_count: 1,
            shard_count: 1,
        };
        let dispatcher = Dispatcher::new(None).unwrap();
        let outcomes = dispatcher.dispatch_all(&plan.destinations, stats).await;

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_success());
        match &outcomes[0].status {
            DispatchStatus::Responded { code, text } => {
                assert_eq!(*code, 401);
                assert_eq!(text, "401 Unauthorized");
            }
            other => panic!("expected a recorded response, got {other:?}"),
        }
    }
}
