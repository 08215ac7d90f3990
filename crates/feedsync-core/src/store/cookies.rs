//! Reading values out of a raw `Cookie` header.

/// Value of cookie `name` in a `Cookie` header string, URL-decoded.
///
/// Returns `None` when the cookie is absent or appears more than once.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    let mut found = header.split(';').filter_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then_some(value.trim())
    });
    let value = found.next()?;
    if found.next().is_some() {
        return None;
    }
    let decoded = urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string());
    Some(decoded)
}
