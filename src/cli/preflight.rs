//! Pre-flight checks before expensive operations.
//!
//! Validates that the credential and any external tools are available
//! before starting a run that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{CastwrightError, Result};
use std::process::Command;

/// Run pre-flight checks for a podcast run.
pub fn check(settings: &Settings) -> Result<()> {
    check_api_key()?;
    if settings.audio.reencode {
        check_tool("ffmpeg")?;
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(CastwrightError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(CastwrightError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("-version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(CastwrightError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CastwrightError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(CastwrightError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        let err = check_tool("castwright-no-such-tool").unwrap_err();
        assert!(matches!(err, CastwrightError::ToolNotFound(_)));
    }
}
