/// Get environment variable with BREAKWATER_ prefix, falling back to unprefixed version
///
/// This helper function checks for `BREAKWATER_{key}` first, then falls back
/// to `{key}` for compatibility with standard environment variable naming.
///
/// # Examples
///
/// ```rust
/// use breakwater::utils::get_env_with_prefix;
///
/// // Checks BREAKWATER_WEBHOOK_SECRET first, then WEBHOOK_SECRET
/// let secret = get_env_with_prefix("WEBHOOK_SECRET");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("BREAKWATER_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}
