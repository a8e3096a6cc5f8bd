//! Request body types.

#[cfg(feature = "multipart")]
mod multipart;

#[cfg(feature = "multipart")]
pub use multipart::Part;

/// Body of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Raw text content sent as-is.
    Text {
        /// The content.
        content: String,
        /// Content type, if one should be set by the driver.
        content_type: Option<String>,
    },
    /// URL-encoded form fields.
    Form {
        /// Form fields in insertion order.
        fields: Vec<(String, String)>,
    },
    /// A JSON document, serialized by the driver.
    Json(serde_json::Value),
    /// Multipart form data.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    Multipart {
        /// Parts in insertion order.
        parts: Vec<Part>,
    },
}
