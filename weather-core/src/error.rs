use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the live clients.
///
/// There is deliberately no retry machinery behind these: a failed
/// request is reported once and the caller decides what to show.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}: {body}")]
    UnexpectedStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Trim an error body for display; upstream APIs can return whole HTML
/// documents on failure.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back off to a char boundary so multibyte text cannot panic the slice.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_bodies_alone() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_clips_long_bodies() {
        let long = "x".repeat(500);
        let clipped = truncate_body(&long);
        assert_eq!(clipped.len(), 203);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        // 'é' spans bytes 199..201, straddling the clip point.
        let long = format!("{}é{}", "a".repeat(199), "x".repeat(50));
        let clipped = truncate_body(&long);

        assert_eq!(clipped, format!("{}...", "a".repeat(199)));
    }

    #[test]
    fn truncate_keeps_short_multibyte_bodies_intact() {
        let body = "café не найден";
        assert_eq!(truncate_body(body), body);
    }
}
