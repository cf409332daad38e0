use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based sanitization: safe inline tags (like <b>, <p>) survive,
/// while <script>/<iframe> and event-handler attributes are stripped.
/// Post content may carry basic markup, so it is cleaned here rather than
/// entity-escaped wholesale.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
