//! External image viewer launch for flower images.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, error, instrument};
use wait_timeout::ChildExt;

use crate::io::config::ViewerConfig;

/// Displays an image file to the user.
pub trait AssetViewer {
    fn show(&self, asset: &Path) -> Result<()>;
}

/// Launches a configured program with the image path as its last argument.
#[derive(Debug, Clone)]
pub struct CommandViewer {
    command: Vec<String>,
    grace: Duration,
}

impl CommandViewer {
    /// Build a viewer from config. Returns `None` when no command is configured.
    pub fn from_config(cfg: &ViewerConfig) -> Option<Self> {
        if cfg.command.is_empty() {
            return None;
        }
        Some(Self {
            command: cfg.command.clone(),
            grace: Duration::from_millis(cfg.launch_grace_ms),
        })
    }
}

impl AssetViewer for CommandViewer {
    /// Spawn the viewer and wait up to the grace period for an early failure.
    ///
    /// A viewer still running after the grace period is left running.
    #[instrument(skip_all, fields(asset = %asset.display(), grace_ms = self.grace.as_millis() as u64))]
    fn show(&self, asset: &Path) -> Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| anyhow!("viewer command is empty"))?;
        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg(asset)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        debug!(program, "spawning viewer");
        let mut child = match cmd.spawn() {
            Ok(c) => c,
            Err(e) => {
                error!(err = %e, program, "failed to spawn viewer");
                return Err(e).with_context(|| format!("spawn viewer {program}"));
            }
        };

        match child.wait_timeout(self.grace).context("wait for viewer")? {
            Some(status) if !status.success() => bail!("viewer {program} exited with {status}"),
            Some(_) => Ok(()),
            None => {
                debug!("viewer still running after grace period");
                Ok(())
            }
        }
    }
}
