//! Package-level constants.

/// Current version of ssoled (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name.
pub const NAME: &str = "ssoled";

/// Operating system the GameSense server publishes its discovery file on.
pub const REQUIRED_OS: &str = "windows";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "VERSION must be semver (MAJOR.MINOR.PATCH)");
        for part in parts {
            let _: u32 = part.parse().expect("each semver segment must be a number");
        }
    }

    #[test]
    fn required_os_matches_std_consts_spelling() {
        assert_eq!(REQUIRED_OS, REQUIRED_OS.to_lowercase());
    }
}
