//! Request preparation
//!
//! Builds one fully-formed request description per destination.

use contracts::{template, AggregateStats, DestinationConfig};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};

/// A fully resolved request, ready to send
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Destination name
    pub destination: String,

    /// Uppercased HTTP method
    pub method: Method,

    /// Resolved URL, every placeholder substituted
    pub url: Url,

    /// JSON body; None in query/path mode
    pub body: Option<String>,
}

/// Build the request for one destination
///
/// Mode selection inspects the endpoint, not the body: an endpoint
/// carrying a count placeholder is sent with the counts substituted into
/// the URL and no body; otherwise the (possibly default) body template is
/// rendered and sent as JSON.
///
/// # Errors
/// An unparsable method or URL is a construction failure for this
/// destination only; the message becomes its outcome.
pub fn prepare(
    destination: &DestinationConfig,
    stats: AggregateStats,
) -> Result<PreparedRequest, String> {
    let method = Method::from_bytes(destination.method.to_uppercase().as_bytes())
        .map_err(|_| format!("invalid HTTP method '{}'", destination.method))?;

    let (raw_url, body) = if destination.uses_query_mode() {
        (template::render(&destination.endpoint, stats), None)
    } else {
        let body = template::render(destination.effective_body_template(), stats);
        (destination.endpoint.clone(), Some(body))
    };

    let url = Url::parse(&raw_url).map_err(|e| format!("invalid URL '{raw_url}': {e}"))?;

    Ok(PreparedRequest {
        destination: destination.name.clone(),
        method,
        url,
        body,
    })
}

impl PreparedRequest {
    /// Turn the prepared request into a sendable builder
    ///
    /// The `Authorization` header carries the destination's raw token
    /// value; the operator supplies whatever prefix the target expects.
    pub fn into_builder(self, client: &reqwest::Client, token: &str) -> reqwest::RequestBuilder {
        let mut builder = client
            .request(self.method, self.url)
            .header(AUTHORIZATION, token);

        if let Some(body) = self.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destination(endpoint: &str, body_template: Option<&str>, method: &str) -> DestinationConfig {
        DestinationConfig {
            name: "listing".into(),
            endpoint: endpoint.into(),
            token: "secret".into(),
            body_template: body_template.map(String::from),
            method: method.into(),
        }
    }

    fn stats(server_count: u64, shard_count: u64) -> AggregateStats {
        AggregateStats {
            server_count,
            shard_count,
        }
    }

    #[test]
    fn query_mode_substitutes_url_and_omits_body() {
        let dest = destination(
            "https://api.example.com/bots/abc/stats?count=@server_count@",
            None,
            "GET",
        );
        let prepared = prepare(&dest, stats(15, 2)).unwrap();
        assert_eq!(
            prepared.url.as_str(),
            "https://api.example.com/bots/abc/stats?count=15"
        );
        assert_eq!(prepared.method, Method::GET);
        assert!(prepared.body.is_none());
    }

    #[test]
    fn body_mode_uses_default_template() {
        let dest = destination("https://api.example.com/stats", None, "POST");
        let prepared = prepare(&dest, stats(15, 2)).unwrap();
        assert_eq!(prepared.url.as_str(), "https://api.example.com/stats");
        assert_eq!(prepared.body.as_deref(), Some("{\"server_count\": 15}"));
    }

    #[test]
    fn empty_body_template_falls_back_to_default() {
        let dest = destination("https://api.example.com/stats", Some(""), "POST");
        let prepared = prepare(&dest, stats(15, 2)).unwrap();
        assert_eq!(prepared.body.as_deref(), Some("{\"server_count\": 15}"));
    }

    #[test]
    fn custom_body_template_renders_both_counts() {
        let dest = destination(
            "https://api.example.com/stats",
            Some("{\"guilds\": @server_count@, \"shards\": @shard_count@}"),
            "post",
        );
        let prepared = prepare(&dest, stats(15, 2)).unwrap();
        assert_eq!(prepared.method, Method::POST);
        assert_eq!(
            prepared.body.as_deref(),
            Some("{\"guilds\": 15, \"shards\": 2}")
        );
    }

    #[test]
    fn method_is_uppercased() {
        let dest = destination("https://api.example.com/stats", None, "put");
        let prepared = prepare(&dest, stats(1, 1)).unwrap();
        assert_eq!(prepared.method, Method::PUT);
    }

    #[test]
    fn invalid_method_is_a_construction_failure() {
        let dest = destination("https://api.example.com/stats", None, "PO ST");
        let err = prepare(&dest, stats(1, 1)).unwrap_err();
        assert!(err.contains("invalid HTTP method"), "got: {err}");
    }

    #[test]
    fn invalid_url_is_a_construction_failure() {
        let dest = destination("not a url", None, "POST");
        let err = prepare(&dest, stats(1, 1)).unwrap_err();
        assert!(err.contains("invalid URL"), "got: {err}");
    }
}
