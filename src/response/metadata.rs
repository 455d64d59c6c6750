//! Quota and request-tracking metadata carried in response headers.

use serde::Serialize;

use crate::config::METADATA_HEADERS;

/// The `x-mws-*` headers of one response.
///
/// A header that appears more than once has its values joined with `,` in
/// the order they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseHeaderMetadata {
    pub request_id: Option<String>,
    pub response_context: Option<String>,
    pub timestamp: Option<String>,
    pub quota_max: Option<String>,
    pub quota_remaining: Option<String>,
    pub quota_resets_on: Option<String>,
}

impl ResponseHeaderMetadata {
    /// Collects metadata from raw header lines.
    ///
    /// Each line is split at its first `": "`; lines without one are skipped.
    /// Header names are compared ASCII case-insensitively.
    pub fn from_header_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut metadata = Self::default();
        for line in lines {
            let Some((name, value)) = line.as_ref().split_once(": ") else {
                continue;
            };
            if let Some(slot) = metadata.slot_mut(name) {
                match slot {
                    Some(existing) => {
                        existing.push(',');
                        existing.push_str(value);
                    }
                    None => *slot = Some(value.to_string()),
                }
            }
        }
        metadata
    }

    /// Fields in the order of [`METADATA_HEADERS`].
    fn slots_mut(&mut self) -> [&mut Option<String>; 6] {
        [
            &mut self.request_id,
            &mut self.response_context,
            &mut self.timestamp,
            &mut self.quota_max,
            &mut self.quota_remaining,
            &mut self.quota_resets_on,
        ]
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let name = name.trim();
        METADATA_HEADERS
            .iter()
            .zip(self.slots_mut())
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, slot)| slot)
    }

    /// True when no metadata header was present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
