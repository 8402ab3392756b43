use url::form_urlencoded;

/// Appends the present parameters to `base` as a form-encoded query string.
///
/// Parameters keep their input order; `None` values are skipped. Spaces are
/// encoded as `+`. `base` is not validated. With no present parameters
/// `base` is returned unchanged.
pub fn create_url<K, V, I>(base: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for (key, value) in params {
        if let Some(value) = value {
            query.append_pair(key.as_ref(), value.as_ref());
            any = true;
        }
    }

    if any {
        format!("{base}?{}", query.finish())
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_url_skips_none() {
        let actual = create_url(
            "http://base.url",
            [("param1", Some("1")), ("param2", Some("2")), ("param3", None)],
        );
        assert_eq!(actual, "http://base.url?param1=1&param2=2");
    }

    #[test]
    fn test_create_url_value_with_spaces() {
        let actual = create_url(
            "http://base.url",
            [
                ("param1", Some("1")),
                ("param2", Some("2")),
                ("param3", Some("string with spaces")),
            ],
        );
        assert_eq!(actual, "http://base.url?param1=1&param2=2&param3=string+with+spaces");
    }

    #[test]
    fn test_create_url_keeps_insertion_order() {
        let actual = create_url("b", [("z", Some("1")), ("a", Some("2")), ("m", Some("3"))]);
        assert_eq!(actual, "b?z=1&a=2&m=3");
    }

    #[test]
    fn test_create_url_encodes_reserved_characters() {
        let actual = create_url("b", [("city", Some("São Paulo & co"))]);
        assert_eq!(actual, "b?city=S%C3%A3o+Paulo+%26+co");
    }

    #[test]
    fn test_create_url_without_params_returns_base() {
        let none: [(&str, Option<&str>); 1] = [("a", None)];
        assert_eq!(create_url("not a url", none), "not a url");
    }

    #[test]
    fn test_create_url_owned_values() {
        let limit = 100.to_string();
        let actual = create_url("b", vec![("limit", Some(limit)), ("page", None)]);
        assert_eq!(actual, "b?limit=100");
    }
}
