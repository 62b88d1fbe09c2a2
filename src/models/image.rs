/// Image bytes returned by a successful webhook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File extension matching the payload's media type, e.g. `png` for `image/png`.
    pub fn extension(&self) -> &str {
        extension_for(&self.content_type)
    }
}

pub fn extension_for(content_type: &str) -> &str {
    let subtype = media_type(content_type)
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or("");

    match subtype {
        "jpeg" | "jpg" | "pjpeg" => "jpg",
        "svg+xml" => "svg",
        "x-icon" | "vnd.microsoft.icon" => "ico",
        "" => "bin",
        other => other,
    }
}

/// The media type of a `Content-Type` value without its parameters.
pub fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or("").trim()
}

/// Whether a `Content-Type` header denotes image data (`image/*`).
pub fn is_image_content_type(content_type: &str) -> bool {
    media_type(content_type)
        .get(..6)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("image/"))
}
