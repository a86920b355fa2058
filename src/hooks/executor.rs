use crate::error::{Result, VersionerError};
use crate::hooks::{HookContext, ReleasePublisher};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Executes a release hook script
#[derive(Debug, Clone)]
pub struct HookExecutor {
    script: PathBuf,
}

impl HookExecutor {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        HookExecutor {
            script: script.into(),
        }
    }

    /// Execute the hook script with the given context
    ///
    /// The script is executed with environment variables set from the context.
    /// If the script exits with code 0, the hook succeeds. Any non-zero exit code
    /// is treated as a failure.
    ///
    /// # Returns
    /// * `Ok(())` if hook succeeds (exit code 0)
    /// * `Err` if script not found, not executable, or returns non-zero exit code
    pub fn execute(&self, context: &HookContext) -> Result<()> {
        let path = self.script.as_path();

        if !path.exists() {
            return Err(VersionerError::hook(format!(
                "Hook script not found: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(VersionerError::hook(format!(
                "Hook path is not a file: {}",
                path.display()
            )));
        }

        let mut cmd = Command::new(path);
        cmd.envs(context.to_env_vars());

        debug!(script = %path.display(), tag = %context.tag, "running release hook");
        let output = cmd.output().map_err(|e| {
            VersionerError::hook(format!("Failed to execute hook {}: {}", path.display(), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(VersionerError::hook(format!(
                "Hook {} failed with exit code {}\nStdout: {}\nStderr: {}",
                path.display(),
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(())
    }
}

impl ReleasePublisher for HookExecutor {
    fn publish(&self, context: &HookContext) -> Result<()> {
        self.execute(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BumpLevel;
    use serial_test::serial;
    use tempfile::TempDir;

    fn context() -> HookContext {
        HookContext {
            version: "1.0.0".to_string(),
            tag: "v1.0.0".to_string(),
            branch: "main".to_string(),
            prerelease: None,
            bump: BumpLevel::Major,
            notes: "## [1.0.0] - 2025-06-18".to_string(),
        }
    }

    #[test]
    fn test_nonexistent_hook_fails() {
        let hook = HookExecutor::new("/nonexistent/path/to/hook.sh");
        let result = hook.execute(&context());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Hook script not found"));
    }

    #[test]
    fn test_hook_directory_fails() {
        let dir = TempDir::new().unwrap();
        let hook = HookExecutor::new(dir.path());
        let result = hook.execute(&context());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a file"));
    }

    #[cfg(unix)]
    fn write_script(dir: &TempDir, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("hook.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_hook_receives_release_env() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let script = write_script(
            &dir,
            &format!(
                "printf '%s %s %s' \"$VERSIONER_TAG\" \"$VERSIONER_BUMP\" \"$VERSIONER_PRERELEASE\" > '{}'",
                out.display()
            ),
        );

        HookExecutor::new(script).publish(&context()).unwrap();

        assert_eq!(std::fs::read_to_string(out).unwrap(), "v1.0.0 major false");
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_hook_non_zero_exit_fails() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo nope >&2\nexit 3");

        let err = HookExecutor::new(script).execute(&context()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("exit code 3"));
        assert!(message.contains("nope"));
    }
}
