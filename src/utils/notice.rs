use url::form_urlencoded;

/// Builds the list-page URL carrying transient `notice`/`error` messages as
/// query parameters. Messages are percent-encoded; the next rendered page
/// displays and discards them.
pub fn list_url(notice: Option<&str>, error: Option<&str>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(msg) = notice {
        serializer.append_pair("notice", msg);
    }
    if let Some(msg) = error {
        serializer.append_pair("error", msg);
    }

    let query = serializer.finish();
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_list_url_without_messages() {
        assert_eq!(list_url(None, None), "/");
    }

    #[test]
    fn notice_is_percent_encoded() {
        assert_eq!(
            list_url(Some("Post added successfully!"), None),
            "/?notice=Post+added+successfully%21"
        );
    }

    #[test]
    fn notice_and_error_both_carried() {
        let url = list_url(Some("saved"), Some("one file skipped"));
        assert!(url.contains("notice=saved"));
        assert!(url.contains("error=one+file+skipped"));
    }
}
