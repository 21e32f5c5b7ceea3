/// Read an environment variable, preferring the `HIRE_RELAY_` prefixed form.
///
/// `HIRE_RELAY_{key}` wins over `{key}`, so a deployment can override a
/// platform-provided variable (e.g. `PORT`) without unsetting it. Empty
/// values are treated as absent.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::utils::get_env_with_prefix;
///
/// // Checks HIRE_RELAY_EMAIL_USER first, then EMAIL_USER
/// let account = get_env_with_prefix("EMAIL_USER");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("HIRE_RELAY_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
        .filter(|value| !value.is_empty())
}

/// Parse a boolean flag the way operators usually write them.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
