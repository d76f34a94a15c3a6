/// Joins a base URL and an endpoint path with exactly one slash between them.
///
/// An empty endpoint yields the base URL unchanged.
#[must_use]
pub fn resolve_url(base_url: &str, endpoint: &str) -> String {
    if endpoint.is_empty() {
        return base_url.to_owned();
    }
    match (base_url.ends_with('/'), endpoint.starts_with('/')) {
        (true, true) => format!("{}{}", base_url.trim_end_matches('/'), endpoint),
        (false, false) => format!("{}/{}", base_url, endpoint),
        (true, false) | (false, true) => format!("{}{}", base_url, endpoint),
    }
}
