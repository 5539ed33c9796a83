//! Git process runner
//!
//! Every interaction with git goes through [`GitRunner`]: a single narrow
//! `run(args) -> stdout` call. [`GitExecutor`] is the real implementation,
//! spawning the executable resolved once from `PATH`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

/// Narrow execution interface over the git command line
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run git with `args` and return its stdout
    ///
    /// Non-zero exit status or spawn failure maps to [`Error::ExecutionFailed`].
    async fn run(&self, args: &[&str]) -> Result<String>;
}

/// Runs the real git executable
#[derive(Debug, Clone)]
pub struct GitExecutor {
    /// Resolved path to the executable
    program: PathBuf,
    /// Working directory for spawned commands (current directory if unset)
    working_dir: Option<PathBuf>,
}

impl GitExecutor {
    /// Resolve `program` on the search path
    pub fn locate(program: &str) -> Result<Self> {
        let resolved = which::which(program).map_err(|e| {
            debug!("Failed to resolve {}: {}", program, e);
            Error::ToolNotFound {
                program: program.to_string(),
            }
        })?;

        debug!("Resolved {} to {:?}", program, resolved);

        Ok(Self {
            program: resolved,
            working_dir: None,
        })
    }

    /// Run commands inside `dir` instead of the current directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Path of the resolved executable
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn describe(&self, args: &[&str]) -> String {
        let name = self
            .program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "git".to_string());

        if args.is_empty() {
            name
        } else {
            format!("{} {}", name, args.join(" "))
        }
    }
}

#[async_trait]
impl GitRunner for GitExecutor {
    #[instrument(skip(self), fields(args = ?args))]
    async fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| {
            warn!("Failed to spawn {}: {}", self.describe(args), e);
            Error::ExecutionFailed {
                command: self.describe(args),
                message: e.to_string(),
            }
        })?;

        if output.status.success() {
            debug!("{} succeeded", self.describe(args));
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        };

        warn!("{} failed: {}", self.describe(args), message);

        Err(Error::ExecutionFailed {
            command: self.describe(args),
            message,
        })
    }
}
