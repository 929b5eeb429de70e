// Redirect walker tests against a scripted transport.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
use reqwest::Url;

use crate::config::CheckOptions;
use crate::error_handling::{FetchError, NetworkErrorKind};
use crate::fetch::redirects::resolve_redirect_chain;
use crate::fetch::transport::{FailedFetch, FetchedResponse, Transport};
use crate::models::{RedirectKind, TerminationReason};

enum Scripted {
    Respond {
        status: u16,
        location: Option<String>,
        body: Option<String>,
    },
    Fail(NetworkErrorKind, &'static str),
}

/// Serves canned responses keyed by URL and records every request it sees.
#[derive(Default)]
struct ScriptedTransport {
    routes: HashMap<String, Scripted>,
    delay: Option<Duration>,
    requests: Mutex<Vec<(String, HeaderMap)>>,
}

impl ScriptedTransport {
    fn redirect(mut self, from: &str, status: u16, location: &str) -> Self {
        self.routes.insert(
            from.to_string(),
            Scripted::Respond {
                status,
                location: Some(location.to_string()),
                body: None,
            },
        );
        self
    }

    fn page(mut self, at: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            at.to_string(),
            Scripted::Respond {
                status,
                location: None,
                body: Some(body.to_string()),
            },
        );
        self
    }

    fn fail(mut self, at: &str, kind: NetworkErrorKind, message: &'static str) -> Self {
        self.routes
            .insert(at.to_string(), Scripted::Fail(kind, message));
        self
    }

    fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &Url, headers: &HeaderMap) -> Result<FetchedResponse, FailedFetch> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), headers.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.routes.get(url.as_str()) {
            Some(Scripted::Respond {
                status,
                location,
                body,
            }) => {
                let mut response_headers = HeaderMap::new();
                if let Some(loc) = location {
                    response_headers.insert(LOCATION, HeaderValue::from_str(loc).unwrap());
                }
                Ok(FetchedResponse {
                    status: *status,
                    reason: reqwest::StatusCode::from_u16(*status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or_default()
                        .to_string(),
                    headers: response_headers,
                    body: if *status == 200 { body.clone() } else { None },
                    elapsed: Duration::from_millis(3),
                })
            }
            Some(Scripted::Fail(kind, message)) => Err(FailedFetch {
                error: FetchError::new(*kind, *message),
                elapsed: Duration::from_millis(5),
            }),
            None => Ok(FetchedResponse {
                status: 404,
                reason: "Not Found".to_string(),
                headers: HeaderMap::new(),
                body: None,
                elapsed: Duration::from_millis(1),
            }),
        }
    }
}

fn no_extra() -> HashMap<String, String> {
    HashMap::new()
}

#[tokio::test]
async fn test_http_then_meta_refresh_then_final_page() {
    let transport = ScriptedTransport::default()
        .redirect("https://a.example/", 301, "/b")
        .page(
            "https://a.example/b",
            200,
            r#"<html><head><meta http-equiv="refresh" content="0;url=https://c.example/"></head></html>"#,
        )
        .page("https://c.example/", 200, "<html><body>done</body></html>");

    let result = resolve_redirect_chain(
        "https://a.example/",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;

    assert_eq!(result.hops.len(), 3);
    assert_eq!(
        result.hops[0].next_location.as_deref(),
        Some("https://a.example/b")
    );
    assert_eq!(result.hops[0].redirect_kind, RedirectKind::Http);
    assert_eq!(result.hops[0].status, 301);
    assert_eq!(result.hops[0].status_text, "Moved Permanently");
    assert_eq!(result.hops[1].redirect_kind, RedirectKind::MetaRefresh);
    assert_eq!(
        result.hops[1].next_location.as_deref(),
        Some("https://c.example/")
    );
    assert_eq!(result.hops[2].redirect_kind, RedirectKind::None);
    assert_eq!(result.hops[2].next_location, None);
    assert_eq!(result.hops[2].host, "c.example");
    assert_eq!(result.final_url, "https://c.example/");
    assert_eq!(result.termination_reason, TerminationReason::Completed);
}

#[tokio::test]
async fn test_hop_limit_stops_long_chain() {
    let mut transport = ScriptedTransport::default();
    for i in 1..=15 {
        transport = transport.redirect(
            &format!("https://loop.example/{i}"),
            302,
            &format!("/{}", i + 1),
        );
    }

    let options = CheckOptions {
        max_hops: 10,
        ..Default::default()
    };
    let result =
        resolve_redirect_chain("https://loop.example/1", &options, &no_extra(), &transport).await;

    assert_eq!(result.hops.len(), 10);
    assert_eq!(result.termination_reason, TerminationReason::HopLimitReached);
    assert_eq!(result.final_url, "https://loop.example/10");
    // The 11th fetch is never issued
    assert_eq!(transport.requested_urls().len(), 10);
}

#[tokio::test]
async fn test_hops_never_exceed_limit() {
    let transport = ScriptedTransport::default()
        .redirect("https://self.example/", 302, "https://self.example/");
    for max_hops in [1, 2, 5, 10] {
        let options = CheckOptions {
            max_hops,
            ..Default::default()
        };
        let result =
            resolve_redirect_chain("https://self.example/", &options, &no_extra(), &transport)
                .await;
        assert_eq!(result.hops.len(), max_hops);
        assert_eq!(result.termination_reason, TerminationReason::HopLimitReached);
    }
}

#[tokio::test]
async fn test_zero_max_hops_fetches_nothing() {
    let transport = ScriptedTransport::default().page("https://a.example/", 200, "hello");
    let options = CheckOptions {
        max_hops: 0,
        ..Default::default()
    };
    let result =
        resolve_redirect_chain("https://a.example/", &options, &no_extra(), &transport).await;
    assert!(result.hops.is_empty());
    assert_eq!(result.final_url, "https://a.example/");
    assert_eq!(result.termination_reason, TerminationReason::HopLimitReached);
    assert!(transport.requested_urls().is_empty());
}

#[tokio::test]
async fn test_hops_within_limit_for_every_setting() {
    let transport = ScriptedTransport::default().page("https://a.example/", 200, "hello");
    for max_hops in 0..4 {
        let options = CheckOptions {
            max_hops,
            ..Default::default()
        };
        let result =
            resolve_redirect_chain("https://a.example/", &options, &no_extra(), &transport).await;
        assert!(result.hops.len() <= max_hops);
    }
}

#[tokio::test]
async fn test_first_hop_keeps_url_as_given() {
    let transport = ScriptedTransport::default()
        .page("https://plain.example/", 200, "<html><body>plain</body></html>")
        .redirect("https://upper.example/start", 302, "/end")
        .page("https://upper.example/end", 200, "done");

    let result = resolve_redirect_chain(
        "https://PLAIN.example",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;
    assert_eq!(result.hops.len(), 1);
    assert_eq!(result.hops[0].url, "https://PLAIN.example");
    assert_eq!(result.hops[0].host, "plain.example");
    assert_eq!(result.final_url, "https://PLAIN.example");
    assert_eq!(result.termination_reason, TerminationReason::Completed);

    // Later hops record the resolved target
    let result = resolve_redirect_chain(
        "https://UPPER.example/start",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;
    assert_eq!(result.hops[0].url, "https://UPPER.example/start");
    assert_eq!(
        result.hops[0].next_location.as_deref(),
        Some("https://upper.example/end")
    );
    assert_eq!(result.final_url, "https://upper.example/end");
    assert_eq!(
        transport.requested_urls()[1..],
        [
            "https://upper.example/start".to_string(),
            "https://upper.example/end".to_string()
        ]
    );
}

#[tokio::test]
async fn test_plain_page_completes_after_one_hop() {
    let transport = ScriptedTransport::default().page(
        "https://plain.example/",
        200,
        "<html><head><title>Plain</title></head><body>nothing to see</body></html>",
    );
    let result = resolve_redirect_chain(
        "https://plain.example/",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;

    assert_eq!(result.hops.len(), 1);
    assert_eq!(result.final_url, "https://plain.example/");
    assert_eq!(result.termination_reason, TerminationReason::Completed);
    assert_eq!(result.hops[0].error, None);
}

#[tokio::test]
async fn test_timeout_on_second_hop_is_network_error() {
    let transport = ScriptedTransport::default()
        .redirect("https://a.example/", 302, "https://slow.example/")
        .fail(
            "https://slow.example/",
            NetworkErrorKind::Timeout,
            "operation timed out",
        );
    let result = resolve_redirect_chain(
        "https://a.example/",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;

    assert_eq!(result.hops.len(), 2);
    assert_eq!(result.hops[1].status, 0);
    let error = result.hops[1].error.as_deref().unwrap_or_default();
    assert!(!error.is_empty());
    assert!(error.contains("timeout"));
    assert_eq!(result.hops[1].redirect_kind, RedirectKind::None);
    assert_eq!(result.termination_reason, TerminationReason::NetworkError);
    assert_eq!(result.final_url, result.hops[1].url);
}

#[tokio::test]
async fn test_404_is_completed_not_error() {
    let transport = ScriptedTransport::default();
    let result = resolve_redirect_chain(
        "https://missing.example/page",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;

    assert_eq!(result.hops.len(), 1);
    assert_eq!(result.hops[0].status, 404);
    assert_eq!(result.final_url, "https://missing.example/page");
    assert_eq!(result.termination_reason, TerminationReason::Completed);
}

#[tokio::test]
async fn test_server_error_is_completed() {
    let transport = ScriptedTransport::default().page("https://a.example/", 503, "down");
    let result = resolve_redirect_chain(
        "https://a.example/",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;
    assert_eq!(result.hops[0].status, 503);
    assert_eq!(result.termination_reason, TerminationReason::Completed);
}

#[tokio::test]
async fn test_invalid_input_makes_no_requests() {
    let transport = ScriptedTransport::default();
    let result = resolve_redirect_chain(
        "not-a-url",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;

    assert!(result.hops.is_empty());
    assert_eq!(result.termination_reason, TerminationReason::InvalidInput);
    assert_eq!(result.final_url, "not-a-url");
    assert!(transport.requested_urls().is_empty());
}

#[tokio::test]
async fn test_headers_merged_with_per_call_precedence() {
    let transport = ScriptedTransport::default().page("https://a.example/", 200, "ok");
    let mut options = CheckOptions::default();
    options
        .headers
        .insert("User-Agent".to_string(), "options-agent".to_string());
    options
        .headers
        .insert("Referer".to_string(), "https://options.example/".to_string());
    let mut extra = HashMap::new();
    extra.insert("referer".to_string(), "https://call.example/".to_string());

    resolve_redirect_chain("https://a.example/", &options, &extra, &transport).await;
    resolve_redirect_chain("https://a.example/", &CheckOptions::default(), &no_extra(), &transport)
        .await;

    let requests = transport.requests.lock().unwrap();
    let (_, first) = &requests[0];
    assert_eq!(first.get("user-agent").unwrap(), "options-agent");
    assert_eq!(first.get("referer").unwrap(), "https://call.example/");
    assert_eq!(first.get("accept-language").unwrap(), "en-US,en;q=0.5");

    // Nothing from the first call carries over into the second
    let (_, second) = &requests[1];
    assert!(!second.contains_key("referer"));
    assert_ne!(second.get("user-agent").unwrap(), "options-agent");
}

#[tokio::test]
async fn test_expired_deadline_cancels_before_fetch() {
    let transport = ScriptedTransport::default().page("https://a.example/", 200, "ok");
    let options = CheckOptions {
        deadline: Some(Duration::ZERO),
        ..Default::default()
    };
    let result =
        resolve_redirect_chain("https://a.example/", &options, &no_extra(), &transport).await;
    assert!(result.hops.is_empty());
    assert_eq!(result.termination_reason, TerminationReason::Cancelled);
    assert!(transport.requested_urls().is_empty());
}

#[tokio::test]
async fn test_deadline_cuts_slow_chain_short() {
    let mut transport = ScriptedTransport::default()
        .redirect("https://slow.example/", 302, "https://slow.example/");
    transport.delay = Some(Duration::from_millis(40));
    let options = CheckOptions {
        max_hops: 50,
        deadline: Some(Duration::from_millis(100)),
        ..Default::default()
    };
    let result =
        resolve_redirect_chain("https://slow.example/", &options, &no_extra(), &transport).await;

    assert_eq!(result.termination_reason, TerminationReason::Cancelled);
    assert!(!result.hops.is_empty());
    assert!(result.hops.len() < 50);
}

#[tokio::test]
async fn test_unfollowable_target_recorded_on_final_hop() {
    let transport = ScriptedTransport::default()
        .redirect("https://a.example/", 302, "javascript:alert(1)");
    let result = resolve_redirect_chain(
        "https://a.example/",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;

    assert_eq!(result.hops.len(), 1);
    assert_eq!(result.hops[0].redirect_kind, RedirectKind::None);
    assert!(result.hops[0].error.is_some());
    assert_eq!(result.termination_reason, TerminationReason::Completed);
}

#[tokio::test]
async fn test_relative_locations_always_absolute() {
    let transport = ScriptedTransport::default()
        .redirect("http://a.example/x/y", 301, "../z")
        .redirect("http://a.example/z", 302, "?q=1")
        .page("http://a.example/z?q=1", 200, "ok");
    let result = resolve_redirect_chain(
        "http://a.example/x/y",
        &CheckOptions::default(),
        &no_extra(),
        &transport,
    )
    .await;

    assert_eq!(
        result.simplified().path,
        vec![
            "http://a.example/x/y".to_string(),
            "http://a.example/z".to_string(),
            "http://a.example/z?q=1".to_string(),
        ]
    );
    for hop in &result.hops {
        if let Some(next) = &hop.next_location {
            assert!(Url::parse(next).is_ok());
        }
    }
}
