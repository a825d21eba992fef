use crate::api::types::{ApiResult, OmbiError};

/// Build the canonical base URL all versioned API paths hang off.
///
/// Shape: `scheme://host[:port]/[prefix/]api/v1/`. The scheme comes from
/// `use_https` alone; a host that already embeds one is rejected rather
/// than silently producing `https://http://...`.
pub fn resolve_base_url(
    use_https: bool,
    host: &str,
    port: Option<u16>,
    url_base: &str,
) -> ApiResult<String> {
    if host.starts_with("http://") || host.starts_with("https://") {
        return Err(OmbiError::Config(format!(
            "host '{}' must not embed a scheme; use the `use_https` flag instead",
            host
        )));
    }

    let host = host.trim_end_matches('/');
    if host.is_empty() {
        return Err(OmbiError::Config("host must not be empty".to_string()));
    }

    let scheme = if use_https { "https" } else { "http" };
    let port_suffix = match port {
        Some(port) => format!(":{}", port),
        None => String::new(),
    };

    let prefix = url_base.trim_matches('/');
    let prefix_segment =
        if prefix.is_empty() { String::new() } else { format!("{}/", prefix) };

    Ok(format!("{}://{}{}/{}api/v1/", scheme, host, port_suffix, prefix_segment))
}
