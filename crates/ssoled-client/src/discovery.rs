//! Server discovery through the `coreProps.json` file.
//!
//! SteelSeries Engine writes its listen address to a small JSON file while it
//! is running; the file's absence means the server is down.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use ssoled_core::{OledError, Result};
use tracing::debug;

/// The part of `coreProps.json` we read. Other keys are ignored.
#[derive(Debug, Deserialize)]
struct CoreProps {
    address: String,
}

/// Result of a successful discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discovery {
    /// Expanded path the address was read from.
    pub path: PathBuf,
    /// `host:port` published by the server.
    pub address: String,
}

impl Discovery {
    /// Origin every endpoint is appended to.
    pub fn base_address(&self) -> String {
        format!("http://{}", self.address)
    }
}

/// Expand the discovery path template and read the server address from it.
pub fn discover(path_template: &str) -> Result<Discovery> {
    let path = PathBuf::from(expand_env_vars(path_template));
    read_core_props(&path)
}

/// Read the server address from an already-expanded path.
pub fn read_core_props(path: &Path) -> Result<Discovery> {
    if !path.is_file() {
        return Err(OledError::ServerNotRunning {
            path: path.to_path_buf(),
        });
    }

    let invalid = |message: String| OledError::Discovery {
        path: path.to_path_buf(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let props: CoreProps = serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    if props.address.trim().is_empty() {
        return Err(invalid("`address` is empty".to_string()));
    }

    debug!(path = %path.display(), address = %props.address, "discovered GameSense server");
    Ok(Discovery {
        path: path.to_path_buf(),
        address: props.address,
    })
}

/// Expand `%VAR%`, `$VAR` and `${VAR}` from the process environment.
pub fn expand_env_vars(input: &str) -> String {
    expand_vars_with(input, |name| std::env::var(name).ok())
}

/// Expand variables through `lookup`. Unknown variables are left as written;
/// `%%` and `$$` produce a literal `%` / `$`.
pub fn expand_vars_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(['%', '$']) {
        out.push_str(&rest[..pos]);
        let sigil = &rest[pos..=pos];
        let after = &rest[pos + 1..];

        if after.starts_with(sigil) {
            out.push_str(sigil);
            rest = &after[1..];
            continue;
        }

        let (name, literal_len, remainder) = if sigil == "%" {
            match after.find('%') {
                Some(end) => (&after[..end], end + 2, &after[end + 1..]),
                None => ("", 1, after),
            }
        } else if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 3, &braced[end + 1..]),
                None => ("", 1, after),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end + 1, &after[end..])
        };

        match (!name.is_empty()).then(|| lookup(name)).flatten() {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[pos..pos + literal_len]),
        }
        rest = remainder;
    }

    out.push_str(rest);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
