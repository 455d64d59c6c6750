//! Tests for the request executor: retry policy, error reporting and the
//! end-to-end flow through a scripted transport.

mod helpers;

use helpers::{config_with_retries, form_pairs, http_response, scripted_client, ScriptedTransport};
use mws_products::operations::{GetLowestOfferListingsForAsinRequest, GetServiceStatusRequest};
use mws_products::{ClientConfig, ErrorFault, ErrorKind, ParameterSet};

const SERVICE_STATUS_BODY: &str = "<?xml version=\"1.0\"?>\
<GetServiceStatusResponse xmlns=\"http://mws.amazonservices.com/schema/Products/2011-10-01\">\
<GetServiceStatusResult><Status>GREEN</Status></GetServiceStatusResult>\
<ResponseMetadata><RequestId>abc123</RequestId></ResponseMetadata>\
</GetServiceStatusResponse>";

fn server_error() -> Vec<u8> {
    http_response(500, "Internal Server Error", &[], "")
}

fn ok(body: &str) -> Vec<u8> {
    http_response(200, "OK", &[("Content-Type", "text/xml")], body)
}

#[tokio::test(start_paused = true)]
async fn test_constant_500_exhausts_retries() {
    for max_error_retry in [0u32, 1, 3] {
        let client = scripted_client(
            config_with_retries(max_error_retry),
            ScriptedTransport::new([server_error()]),
        );
        let error = client
            .invoke(&GetServiceStatusRequest::default())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Server);
        assert_eq!(error.status_code, Some(500));
        assert_eq!(error.message, "Internal Error");
        assert_eq!(
            client.transport().attempts(),
            max_error_retry as usize + 1,
            "max_error_retry={}",
            max_error_retry
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_success_on_attempt_k_returns_that_body() {
    for k in 1..=4usize {
        let mut script: Vec<Vec<u8>> = (1..k).map(|_| server_error()).collect();
        script.push(ok(&format!("<Attempt>{}</Attempt>", k)));
        let client = scripted_client(config_with_retries(3), ScriptedTransport::new(script));

        let response = client.execute(ParameterSet::new()).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body_text(), format!("<Attempt>{}</Attempt>", k));
        assert_eq!(client.transport().attempts(), k);
    }
}

#[tokio::test(start_paused = true)]
async fn test_retries_resend_identical_signed_body() {
    let client = scripted_client(
        config_with_retries(2),
        ScriptedTransport::new([server_error(), server_error(), ok("done")]),
    );
    client.execute(ParameterSet::new()).await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.body == requests[0].body));
}

#[tokio::test(start_paused = true)]
async fn test_backoff_waits_between_attempts() {
    let client = scripted_client(
        config_with_retries(3),
        ScriptedTransport::new([server_error()]),
    );
    let start = tokio::time::Instant::now();
    let _ = client.execute(ParameterSet::new()).await;
    assert_eq!(start.elapsed().as_millis(), 400 + 1_600 + 6_400);
}

#[tokio::test]
async fn test_get_service_status_end_to_end() {
    let response = http_response(
        200,
        "OK",
        &[
            ("Content-Type", "text/xml"),
            ("x-mws-request-id", "abc123"),
            ("x-mws-timestamp", "2013-09-05T18:12:21.687Z"),
            ("x-mws-response-context", "ctx"),
        ],
        SERVICE_STATUS_BODY,
    );
    let client = scripted_client(config_with_retries(3), ScriptedTransport::new([response]));

    let result = client
        .invoke(&GetServiceStatusRequest {
            seller_id: Some("A1SELLER".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(result.body_text().contains("<Status>GREEN</Status>"));
    assert_eq!(result.metadata.request_id.as_deref(), Some("abc123"));
    assert_eq!(result.metadata.response_context.as_deref(), Some("ctx"));
    assert!(result.metadata.quota_max.is_none());

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    let pairs = form_pairs(&requests[0].body);
    let names: Vec<&str> = pairs.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "AWSAccessKeyId",
            "Action",
            "SellerId",
            "Signature",
            "SignatureMethod",
            "SignatureVersion",
            "Timestamp",
            "Version",
        ]
    );
    let timestamp = &pairs.iter().find(|(name, _)| name == "Timestamp").unwrap().1;
    assert!(timestamp.ends_with(".000Z"), "timestamp was {}", timestamp);
    assert!(requests[0]
        .headers
        .iter()
        .any(|(name, value)| name == "Content-Type"
            && value == "application/x-www-form-urlencoded; charset=utf-8"));
}

#[tokio::test]
async fn test_missing_service_url_is_configuration_error() {
    let config = ClientConfig {
        service_url: None,
        ..Default::default()
    };
    let client = scripted_client(config, ScriptedTransport::new([ok("unused")]));

    let error = client.execute(ParameterSet::new()).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Configuration);
    assert_eq!(error.code.as_deref(), Some("InvalidServiceURL"));
    assert!(error.message.starts_with("Missing serviceUrl configuration value."));
    assert_eq!(client.transport().attempts(), 0);
}

#[tokio::test]
async fn test_unsupported_signature_method_sends_nothing() {
    let config = ClientConfig {
        signature_method: "HmacMD5".into(),
        ..config_with_retries(3)
    };
    let client = scripted_client(config, ScriptedTransport::new([ok("unused")]));

    let error = client.execute(ParameterSet::new()).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Configuration);
    assert_eq!(error.code.as_deref(), Some("InvalidSignatureMethod"));
    assert_eq!(client.transport().attempts(), 0);
}

#[tokio::test]
async fn test_structured_400_error() {
    let body = "<ErrorResponse xmlns=\"http://mws.amazonservices.com/schema/Products/2011-10-01\">\
<Error><Type>Sender</Type><Code>InvalidParameterValue</Code><Message>Invalid ASIN</Message></Error>\
<RequestID>req-400</RequestID></ErrorResponse>";
    let response = http_response(
        400,
        "Bad Request",
        &[("x-mws-quota-remaining", "5"), ("x-mws-quota-remaining", "3")],
        body,
    );
    let client = scripted_client(config_with_retries(3), ScriptedTransport::new([response]));

    let error = client
        .invoke(&GetLowestOfferListingsForAsinRequest {
            asin_list: vec!["not-an-asin".into()],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::Api);
    assert_eq!(error.status_code, Some(400));
    assert_eq!(error.code.as_deref(), Some("InvalidParameterValue"));
    assert_eq!(error.message, "Invalid ASIN");
    assert_eq!(error.error_type, "Sender");
    assert_eq!(error.fault(), ErrorFault::Client);
    assert_eq!(error.request_id.as_deref(), Some("req-400"));
    assert_eq!(error.xml.as_deref(), Some(body));
    assert_eq!(error.metadata.quota_remaining.as_deref(), Some("5,3"));
    assert_eq!(client.transport().attempts(), 1);
}

#[tokio::test]
async fn test_non_xml_error_body() {
    let response = http_response(403, "Forbidden", &[], "Access denied");
    let client = scripted_client(config_with_retries(3), ScriptedTransport::new([response]));

    let error = client.execute(ParameterSet::new()).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Api);
    assert_eq!(error.message, "Internal Error");
    assert_eq!(error.status_code, Some(403));
    assert!(error.xml.is_none());
}

#[tokio::test]
async fn test_malformed_response_fails_without_retry() {
    let client = scripted_client(
        config_with_retries(3),
        ScriptedTransport::new([b"HTTP/1.1 200 OK\r\nX-Nothing: 1\r\n\r\nbody".to_vec()]),
    );
    let error = client.execute(ParameterSet::new()).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::MalformedResponse);
    assert!(error.message.starts_with("Failed to parse valid HTTP response ("));
    assert_eq!(client.transport().attempts(), 1);
}

#[tokio::test]
async fn test_provisional_response_is_skipped() {
    let mut raw = b"HTTP/1.1 100 Continue\r\n\r\n".to_vec();
    raw.extend(ok("<Status>GREEN</Status>"));
    let client = scripted_client(config_with_retries(3), ScriptedTransport::new([raw]));

    let response = client.execute(ParameterSet::new()).await.unwrap();
    assert_eq!(response.body_text(), "<Status>GREEN</Status>");
}
