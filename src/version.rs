use crate::config::TOOL_NAME;

/// Turns the user's `version` input into a release tag.
///
/// `""` stays empty (meaning "latest"), `inspequte-…` is kept as is,
/// `v1.2.3` becomes `inspequte-v1.2.3` and `1.2.3` becomes `inspequte-v1.2.3`.
pub fn normalize_version_input(input: &str) -> String {
    if input.is_empty() || input.starts_with(&format!("{TOOL_NAME}-")) {
        return input.to_string();
    }
    if input.starts_with('v') {
        format!("{TOOL_NAME}-{input}")
    } else {
        format!("{TOOL_NAME}-v{input}")
    }
}

/// Strips a release tag down to the bare version used as the cache key.
pub fn to_cache_version(tag: &str) -> String {
    let tag = tag
        .strip_prefix(TOOL_NAME)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(tag);
    tag.strip_prefix('v').unwrap_or(tag).to_string()
}
