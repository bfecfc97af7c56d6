//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod analyze;
pub mod check;
pub mod simulate;

use std::path::Path;

use serde_json::Value;

use crate::{CliError, Result};

/// Reads and parses a JSON input file.
pub fn read_json(path: &str) -> Result<Value> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// Writes `content` to a uniquely named file in the temp directory.
    pub fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sim_cli_{}_{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }
}
