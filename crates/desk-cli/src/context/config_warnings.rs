/// Variables read directly by the binary rather than through figment.
const NON_CONFIG_VARS: &[&str] = &["DESK_LOG"];

/// Emit warnings for `DESK_*` env vars that figment will silently ignore.
pub fn warn_misnamed_env() {
    for warning in collect_misnamed_env_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

/// A `DESK_` variable only reaches a config field when the section and key
/// are separated by a double underscore (`DESK_STORE__PATH`).
fn collect_misnamed_env_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    env.into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with(desk_config::ENV_PREFIX))
        .filter(|key| !NON_CONFIG_VARS.contains(&key.as_str()))
        .filter(|key| !key[desk_config::ENV_PREFIX.len()..].contains("__"))
        .map(|key| {
            format!(
                "{key} does not map to a config field. Use double underscores (example: DESK_STORE__PATH)."
            )
        })
        .collect()
}
