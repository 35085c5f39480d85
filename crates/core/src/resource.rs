//! The compiled artifact and the ids it is addressed by.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::model::ComponentKind;

/// The only MIME type compilers produce and hosts render.
pub const HTML_MIME_TYPE: &str = "text/html";

/// Content encoding of [`UiResource::text`].
pub const TEXT_ENCODING: &str = "text";

/// A renderable markup resource.
///
/// Serialized as `{uri, mimeType, text, encoding}`; `text` carries the markup.
/// `mime_type` is a free string so that hosts can receive and reject foreign
/// resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiResource {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_encoding() -> String {
    TEXT_ENCODING.to_string()
}

impl UiResource {
    pub fn html(uri: impl Into<String>, markup: impl Into<String>) -> Self {
        UiResource {
            uri: uri.into(),
            mime_type: HTML_MIME_TYPE.to_string(),
            text: markup.into(),
            encoding: default_encoding(),
        }
    }

    pub fn is_html(&self) -> bool {
        self.mime_type == HTML_MIME_TYPE
    }
}

/// Identity of one generated component.
///
/// The id is `<kind>-<userId>-<unix millis>` and the resource uri is
/// `ui://<namespace>/<kind>/<id>`. Two requests for the same user and kind in
/// the same millisecond get the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentId {
    namespace: String,
    kind: ComponentKind,
    id: String,
}

impl ComponentId {
    pub fn new(namespace: &str, kind: ComponentKind, user_id: &str, created_ms: i64) -> Self {
        ComponentId {
            namespace: namespace.to_string(),
            kind,
            id: format!("{}-{}-{}", kind, user_id, created_ms),
        }
    }

    /// Id stamped with the current wall-clock time.
    pub fn now(namespace: &str, kind: ComponentKind, user_id: &str) -> Self {
        Self::new(namespace, kind, user_id, now_millis())
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn uri(&self) -> String {
        format!("ui://{}/{}/{}", self.namespace, self.kind, self.id)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
