//! Compile-time build identification, generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Human-readable build line for report headers.
pub fn build_string() -> String {
    format!(
        "v{} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_build_string_names_version() {
        let line = build_string();
        assert!(line.contains(env!("CARGO_PKG_VERSION")));
        assert!(line.contains(BUILD_COMMIT));
    }
}
