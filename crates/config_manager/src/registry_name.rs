//! Short display names for registries.
//!
//! A registry's name is derived from the host of its upstream URL
//! (`proxy.remoteurl`), keeping only the trailing dot-separated segments.
//! `https://registry.npmjs.org/` with two parts becomes `npmjs.org`.

use serde_yaml::Value;

#[cfg(test)]
#[path = "registry_name_tests.rs"]
mod tests;

/// Number of trailing host segments kept when no count is given.
pub const DEFAULT_NAME_PARTS: i64 = 2;

/// Derives a short name from a registry definition.
///
/// Returns `None` when no name can be derived: the definition is not a
/// mapping, it has no `proxy` mapping, `proxy.remoteurl` is missing, empty
/// or not a string, or the URL yields an empty host.
///
/// `parts` below 1 is treated as 1.
pub fn derive_registry_name(definition: &Value, parts: i64) -> Option<String> {
    let remote_url = remote_url(definition)?;
    let host = hostname_from_url(remote_url);
    if host.is_empty() {
        return None;
    }

    let segments: Vec<&str> = host.split('.').collect();
    let keep = usize::try_from(parts.max(1)).unwrap_or(usize::MAX);
    let start = segments.len().saturating_sub(keep);

    Some(segments[start..].join("."))
}

/// Returns `proxy.remoteurl` if it is a non-empty string.
pub fn remote_url(definition: &Value) -> Option<&str> {
    definition
        .as_mapping()?
        .get("proxy")?
        .as_mapping()?
        .get("remoteurl")?
        .as_str()
        .filter(|url| !url.is_empty())
}

/// Extracts the bare host name from a URL or a scheme-less host string.
///
/// A URL with an authority (`https://host:port/path`, `//host/path`)
/// contributes its authority exactly as written; anything else
/// (`host:port/path`) is used as a whole. The path and then the port are
/// stripped from the chosen text.
pub fn hostname_from_url(value: &str) -> String {
    let authority = authority(value).unwrap_or(value);

    let without_path = authority.split('/').next().unwrap_or_default();
    let without_port = without_path.split(':').next().unwrap_or_default();
    without_port.to_string()
}

/// Returns the raw authority of `value` when it has one.
///
/// The authority runs from `//` to the next `/`, `?` or `#`. It is not
/// validated or normalized, so hosts keep their case and escapes, and
/// out-of-range ports do not hide the host.
fn authority(value: &str) -> Option<&str> {
    let rest = match value.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) && rest.starts_with("//") => rest,
        _ if value.starts_with("//") => value,
        _ => return None,
    };

    let rest = &rest[2..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn is_scheme(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
