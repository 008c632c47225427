//! Help and catalog listing served at `/` and `/help`.

use axum::http::{header, HeaderMap};
use serde::Serialize;

use crate::catalog::{Catalog, Mode};
use crate::config::ServiceInfo;

const USAGE_PATH: &str = "/:endpoint";
const FORMATS: &str = "json | text | shields";
const MODE_NOTE: &str =
    "Omitting mode picks a random mode from that endpoint's supported modes; use ?mode=... to filter.";
const EXAMPLE_REQUESTS: [&str; 4] = [
    "/blame?format=text",
    "/motivate?mode=wholesome&format=json",
    "/random?format=json",
    "/random?format=shields",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpBody<'a> {
    pub service: &'a str,
    pub description: &'a str,
    pub version: &'a str,
    pub base_url: String,
    pub usage: Usage,
    pub endpoints: Vec<EndpointSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Usage {
    pub path: &'static str,
    pub query: UsageQuery,
    pub note: &'static str,
    pub examples: [&'static str; 4],
}

#[derive(Debug, Serialize)]
pub struct UsageQuery {
    pub mode: String,
    pub format: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub path: String,
    pub example_count: usize,
    pub modes: &'a [Mode],
}

fn mode_list(separator: &str) -> String {
    Mode::ALL
        .iter()
        .map(Mode::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Structured help, every catalog entry included.
pub fn help_body<'a>(catalog: &'a Catalog, info: &'a ServiceInfo, base_url: String) -> HelpBody<'a> {
    let endpoints = catalog
        .iter()
        .map(|e| EndpointSummary {
            name: &e.name,
            description: &e.description,
            path: format!("/{}", e.name),
            example_count: e.example_count(),
            modes: &e.modes,
        })
        .collect();

    HelpBody {
        service: &info.name,
        description: &info.description,
        version: &info.version,
        base_url,
        usage: Usage {
            path: USAGE_PATH,
            query: UsageQuery {
                mode: mode_list(" | "),
                format: FORMATS,
            },
            note: MODE_NOTE,
            examples: EXAMPLE_REQUESTS,
        },
        endpoints,
    }
}

/// Fixed human-readable listing for `format=text`.
pub fn help_text(catalog: &Catalog, info: &ServiceInfo) -> String {
    let names = catalog.names().collect::<Vec<_>>().join(", ");
    format!(
        "{service} Endpoints:\n\
         Available endpoints: {names}\n\
         Use /:endpoint?mode={modes}&format=json|text|shields\n\
         Omitting mode picks a random mode per endpoint; use ?mode=... to filter.\n\
         Examples:\n  \
         /blame?format=text\n  \
         /motivate?mode=wholesome&format=json\n  \
         /random?format=shields\n",
        service = info.name,
        modes = mode_list("|"),
    )
}

/// The configured base URL, or `http://<host>/` from the request.
pub fn base_url(info: &ServiceInfo, headers: &HeaderMap) -> String {
    if let Some(url) = &info.base_url {
        return url.clone();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost");
    format!("http://{}/", host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Endpoint;
    use axum::http::HeaderValue;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Endpoint::new("lgtm", "Approve", vec![Mode::Normal], vec!["Ship it.".into()]),
            Endpoint::new(
                "blame",
                "Blame someone",
                vec![Mode::Normal, Mode::Toxic],
                vec!["DNS".into()],
            )
            .with_mode_examples(Mode::Normal, vec!["a".into(), "b".into()])
            .with_mode_examples(Mode::Toxic, vec!["c".into()]),
        ])
    }

    #[test]
    fn test_help_body_lists_endpoints() {
        let catalog = catalog();
        let info = ServiceInfo::default();
        let body = help_body(&catalog, &info, "http://example.com/".into());
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["service"], "DOaaS");
        assert_eq!(value["version"], "1.2.0");
        assert_eq!(value["baseUrl"], "http://example.com/");
        assert_eq!(value["usage"]["path"], "/:endpoint");
        assert_eq!(
            value["usage"]["query"]["mode"],
            "normal | chaos | corporate | security | wholesome | toxic | sarcastic | devops"
        );
        assert_eq!(value["usage"]["examples"].as_array().unwrap().len(), 4);

        let endpoints = value["endpoints"].as_array().unwrap();
        assert_eq!(endpoints[0]["name"], "blame");
        assert_eq!(endpoints[0]["path"], "/blame");
        assert_eq!(endpoints[0]["exampleCount"], 3);
        assert_eq!(endpoints[0]["modes"], serde_json::json!(["normal", "toxic"]));
        assert_eq!(endpoints[1]["exampleCount"], 1);
    }

    #[test]
    fn test_help_text() {
        let text = help_text(&catalog(), &ServiceInfo::default());
        assert!(text.starts_with("DOaaS Endpoints:\n"));
        assert!(text.contains("Available endpoints: blame, lgtm\n"));
        assert!(text.contains("  /random?format=shields\n"));
    }

    #[test]
    fn test_base_url() {
        let mut info = ServiceInfo::default();
        let mut headers = HeaderMap::new();
        assert_eq!(base_url(&info, &headers), "http://localhost/");

        headers.insert(header::HOST, HeaderValue::from_static("doaas.local:8787"));
        assert_eq!(base_url(&info, &headers), "http://doaas.local:8787/");

        info.base_url = Some("https://doaas.dev/".into());
        assert_eq!(base_url(&info, &headers), "https://doaas.dev/");
    }
}
