//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

/// Collections whose second segment is a caller-chosen slug.
const SLUG_COLLECTIONS: [&str; 1] = ["categories"];

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = route_template(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Collapse identifiers so every request to one route shares a span name
/// and a metrics label.
fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let mut template = String::new();
    let mut previous: Option<&str> = None;

    for segment in segments {
        template.push('/');

        if Uuid::parse_str(segment).is_ok() {
            template.push_str("{uuid}");
        } else if previous.is_some_and(|collection| SLUG_COLLECTIONS.contains(&collection)) {
            template.push_str("{slug}");
        } else {
            template.push_str(segment);
        }

        previous = Some(segment);
    }

    if template.is_empty() {
        template.push('/');
    }

    template
}
