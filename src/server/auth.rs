use http::HeaderMap;
use http::header::AUTHORIZATION;
use http::request::Parts;

const BEARER_PREFIX: &str = "bearer ";
const TOKEN_QUERY_PARAM: &str = "token";

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn from_authorization_header(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    if value.len() < BEARER_PREFIX.len()
        || !value[..BEARER_PREFIX.len()].eq_ignore_ascii_case(BEARER_PREFIX)
    {
        return None;
    }
    non_empty(&value[BEARER_PREFIX.len()..])
}

fn from_query(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == TOKEN_QUERY_PARAM)
        .filter_map(|(_, value)| urlencoding::decode(value).ok())
        .find_map(|value| non_empty(&value))
}

/// Pick the bearer token for one request.
///
/// Priority: `Authorization: Bearer` header, then the `token` query parameter,
/// then the configured fallback. Blank candidates are skipped; when nothing is
/// found the empty string is returned and upstream calls fail on their own.
pub fn extract_bearer_token(
    headers: &HeaderMap,
    query: Option<&str>,
    fallback: Option<&str>,
) -> String {
    from_authorization_header(headers)
        .or_else(|| query.and_then(from_query))
        .or_else(|| fallback.and_then(non_empty))
        .unwrap_or_default()
}

/// Token for a tool call; `parts` is absent on the stdio transport.
pub fn token_for_request(parts: Option<&Parts>, fallback: Option<&str>) -> String {
    match parts {
        Some(parts) => extract_bearer_token(&parts.headers, parts.uri.query(), fallback),
        None => fallback.and_then(non_empty).unwrap_or_default(),
    }
}
