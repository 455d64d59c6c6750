//! Interpretation of non-success responses.
//!
//! A structured MWS error body looks like:
//!
//! ```xml
//! <ErrorResponse xmlns="http://mws.amazonservices.com/schema/Products/2011-10-01">
//!   <Error>
//!     <Type>Sender</Type>
//!     <Code>InvalidParameterValue</Code>
//!     <Message>bad ASIN</Message>
//!   </Error>
//!   <RequestID>abc123</RequestID>
//! </ErrorResponse>
//! ```
//!
//! Anything that is not well-formed XML with an `Error` child under the root
//! is reported as `"Internal Error"` with the status code. The document is
//! read from raw bytes, so a BOM or an `encoding` declaration is honored.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::categorization::categorize_status;
use super::types::{ApiError, UNKNOWN_ERROR_TYPE};
use crate::response::ResponseHeaderMetadata;

/// Message used when the body carries no structured error.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Error";

/// Fields extracted from a structured error document.
#[derive(Debug, Default, PartialEq, Eq)]
struct ErrorDocument {
    has_error: bool,
    code: Option<String>,
    message: Option<String>,
    error_type: Option<String>,
    request_id_upper: Option<String>,
    request_id_lower: Option<String>,
}

impl ErrorDocument {
    fn request_id(&self) -> Option<String> {
        self.request_id_upper
            .clone()
            .or_else(|| self.request_id_lower.clone())
    }
}

/// Builds the terminal error for a non-200 response.
pub fn report_error(status: u16, body: &[u8], metadata: ResponseHeaderMetadata) -> ApiError {
    let kind = categorize_status(status);

    let Some((xml, document)) = parse_error_document(body) else {
        return ApiError::new(kind, INTERNAL_ERROR_MESSAGE)
            .with_status(status)
            .with_metadata(metadata);
    };

    let request_id = document.request_id();
    let mut error = ApiError::new(kind, document.message.unwrap_or_default())
        .with_status(status)
        .with_metadata(metadata);
    error.code = document.code;
    error.error_type = document
        .error_type
        .unwrap_or_else(|| UNKNOWN_ERROR_TYPE.to_string());
    error.request_id = request_id;
    error.xml = Some(xml);
    error
}

/// Which text node the reader is currently inside, if any we care about.
#[derive(Clone, Copy)]
enum Capture {
    Code,
    Message,
    Type,
    RequestIdUpper,
    RequestIdLower,
}

/// Parses `body` as an error document, returning it decoded alongside the
/// extracted fields.
///
/// Returns `None` unless the document is well-formed, has exactly one root,
/// and the root has an `Error` child.
fn parse_error_document(body: &[u8]) -> Option<(String, ErrorDocument)> {
    let mut reader = Reader::from_reader(body);
    reader.trim_text(true);

    let mut document = ErrorDocument::default();
    let mut path: Vec<String> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if path.is_empty() {
                    if seen_root {
                        return None;
                    }
                    seen_root = true;
                }
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                if path.len() == 1 && name == "Error" {
                    document.has_error = true;
                }
                path.push(name);
            }
            Ok(Event::Empty(empty)) => {
                if path.is_empty() {
                    if seen_root {
                        return None;
                    }
                    seen_root = true;
                }
                if path.len() == 1 && empty.local_name().as_ref() == b"Error" {
                    document.has_error = true;
                }
            }
            Ok(Event::End(_)) => {
                path.pop()?;
            }
            Ok(Event::Text(text)) => {
                let value = text.unescape().ok()?;
                if path.is_empty() {
                    if !value.trim().is_empty() {
                        return None;
                    }
                    continue;
                }
                append_capture(&mut document, &path, &value);
            }
            Ok(Event::CData(data)) => {
                if path.is_empty() {
                    return None;
                }
                let raw = data.into_inner();
                let value = reader.decoder().decode(&raw).ok()?;
                append_capture(&mut document, &path, &value);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    if !path.is_empty() || !seen_root || !document.has_error {
        return None;
    }

    trim_field(&mut document.code);
    trim_field(&mut document.message);
    trim_field(&mut document.error_type);
    trim_field(&mut document.request_id_upper);
    trim_field(&mut document.request_id_lower);

    let xml = match reader.decoder().decode(body) {
        Ok(text) => text.trim_start_matches('\u{feff}').to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    };
    Some((xml, document))
}

fn capture_for(path: &[String]) -> Option<Capture> {
    match path {
        [_, error, field] if error == "Error" => match field.as_str() {
            "Code" => Some(Capture::Code),
            "Message" => Some(Capture::Message),
            "Type" => Some(Capture::Type),
            _ => None,
        },
        [_, field] if field == "RequestID" => Some(Capture::RequestIdUpper),
        [_, field] if field == "RequestId" => Some(Capture::RequestIdLower),
        _ => None,
    }
}

fn append_capture(document: &mut ErrorDocument, path: &[String], value: &str) {
    let slot = match capture_for(path) {
        Some(Capture::Code) => &mut document.code,
        Some(Capture::Message) => &mut document.message,
        Some(Capture::Type) => &mut document.error_type,
        Some(Capture::RequestIdUpper) => &mut document.request_id_upper,
        Some(Capture::RequestIdLower) => &mut document.request_id_lower,
        None => return,
    };
    slot.get_or_insert_with(String::new).push_str(value);
}

fn trim_field(field: &mut Option<String>) {
    if let Some(value) = field.as_mut() {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::{ErrorFault, ErrorKind};

    const STRUCTURED: &str = r#"<?xml version="1.0"?>
<ErrorResponse xmlns="http://mws.amazonservices.com/schema/Products/2011-10-01">
  <Error>
    <Type>Sender</Type>
    <Code>InvalidParameterValue</Code>
    <Message>bad ASIN</Message>
  </Error>
  <RequestID>req-42</RequestID>
</ErrorResponse>"#;

    #[test]
    fn test_structured_error_is_extracted() {
        let metadata = ResponseHeaderMetadata {
            request_id: Some("hdr-1".into()),
            ..Default::default()
        };
        let error = report_error(400, STRUCTURED.as_bytes(), metadata.clone());

        assert_eq!(error.kind, ErrorKind::Api);
        assert_eq!(error.code.as_deref(), Some("InvalidParameterValue"));
        assert_eq!(error.message, "bad ASIN");
        assert_eq!(error.error_type, "Sender");
        assert_eq!(error.fault(), ErrorFault::Client);
        assert_eq!(error.status_code, Some(400));
        assert_eq!(error.request_id.as_deref(), Some("req-42"));
        assert_eq!(error.xml.as_deref(), Some(STRUCTURED));
        assert_eq!(error.metadata, metadata);
    }

    #[test]
    fn test_request_id_fallback_spelling() {
        let body = "<ErrorResponse><Error><Code>X</Code><Message>m</Message></Error><RequestId>lower</RequestId></ErrorResponse>";
        let error = report_error(403, body.as_bytes(), ResponseHeaderMetadata::default());
        assert_eq!(error.request_id.as_deref(), Some("lower"));
        assert_eq!(error.error_type, "Unknown");
    }

    #[test]
    fn test_request_id_prefers_upper_case_spelling() {
        let body = "<R><Error/><RequestId>lower</RequestId><RequestID>upper</RequestID></R>";
        let error = report_error(400, body.as_bytes(), ResponseHeaderMetadata::default());
        assert_eq!(error.request_id.as_deref(), Some("upper"));
    }

    #[test]
    fn test_non_xml_body_is_internal_error() {
        let error = report_error(503, b"Service Unavailable", ResponseHeaderMetadata::default());
        assert_eq!(error.kind, ErrorKind::Api);
        assert_eq!(error.message, "Internal Error");
        assert_eq!(error.status_code, Some(503));
        assert!(error.code.is_none());
        assert!(error.xml.is_none());
    }

    #[test]
    fn test_xml_without_error_child_is_internal_error() {
        let body = "<GetServiceStatusResponse><Status>RED</Status></GetServiceStatusResponse>";
        let error = report_error(500, body.as_bytes(), ResponseHeaderMetadata::default());
        assert_eq!(error.kind, ErrorKind::Server);
        assert_eq!(error.message, "Internal Error");
    }

    #[test]
    fn test_nested_error_is_not_a_root_child() {
        let body = "<Root><Wrapper><Error><Code>X</Code></Error></Wrapper></Root>";
        let error = report_error(400, body.as_bytes(), ResponseHeaderMetadata::default());
        assert_eq!(error.message, "Internal Error");
    }

    #[test]
    fn test_truncated_xml_is_internal_error() {
        let body = "<ErrorResponse><Error><Code>X</Code>";
        let error = report_error(400, body.as_bytes(), ResponseHeaderMetadata::default());
        assert_eq!(error.message, "Internal Error");
        assert!(error.code.is_none());
    }

    #[test]
    fn test_trailing_text_is_not_well_formed() {
        let body = "<ErrorResponse><Error><Code>X</Code></Error></ErrorResponse> trailing";
        let error = report_error(400, body.as_bytes(), ResponseHeaderMetadata::default());
        assert_eq!(error.message, "Internal Error");
    }

    #[test]
    fn test_escaped_message_is_unescaped() {
        let body = "<E><Error><Message>a &amp; b</Message></Error></E>";
        let error = report_error(400, body.as_bytes(), ResponseHeaderMetadata::default());
        assert_eq!(error.message, "a & b");
    }

    #[test]
    fn test_latin1_declared_document_is_decoded() {
        let body = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><ErrorResponse><Error><Code>C</Code><Message>caf\xe9</Message></Error><RequestID>r-1</RequestID></ErrorResponse>";
        let error = report_error(400, body, ResponseHeaderMetadata::default());
        assert_eq!(error.code.as_deref(), Some("C"));
        assert_eq!(error.message, "caf\u{e9}");
        assert_eq!(error.request_id.as_deref(), Some("r-1"));
        assert!(error.xml.as_deref().is_some_and(|xml| xml.contains("caf\u{e9}")));
    }

    #[test]
    fn test_utf8_bom_is_not_kept_in_xml() {
        let mut body = b"\xef\xbb\xbf".to_vec();
        body.extend_from_slice(b"<E><Error><Code>C</Code><Message>M</Message></Error></E>");
        let error = report_error(400, &body, ResponseHeaderMetadata::default());
        assert_eq!(error.code.as_deref(), Some("C"));
        assert_eq!(error.message, "M");
        assert!(error.xml.as_deref().is_some_and(|xml| xml.starts_with("<E>")));
    }

    #[test]
    fn test_invalid_utf8_without_declaration_is_internal_error() {
        let body = b"<E><Error><Message>caf\xe9</Message></Error></E>";
        let error = report_error(400, body, ResponseHeaderMetadata::default());
        assert_eq!(error.message, "Internal Error");
    }

    #[test]
    fn test_receiver_type_is_server_fault() {
        let body = "<E><Error><Type>Receiver</Type><Code>InternalError</Code></Error></E>";
        let error = report_error(500, body.as_bytes(), ResponseHeaderMetadata::default());
        assert_eq!(error.kind, ErrorKind::Server);
        assert_eq!(error.fault(), ErrorFault::Server);
    }
}
