pub mod books;
pub mod comments;
pub mod engagement;
pub mod videos;
pub mod websites;

/// Schemeless input gets an `http://` prefix, the way browser address bars
/// treat it; validation happens downstream on the normalized value.
pub(crate) fn assume_http(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
