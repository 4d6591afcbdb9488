/*!
 * Rendering engine integration.
 *
 * The pipeline talks to rendering through the `Renderer` trait; the concrete
 * implementation drives Manim as a subprocess, captures its diagnostics and
 * moves the produced video to the run's target path.
 */

use async_trait::async_trait;
use log::{debug, info, warn};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use walkdir::WalkDir;

use crate::app_config::RendererConfig;

/// A failed render: exit status description plus captured process output
#[derive(Debug, Clone)]
pub struct RenderFailure {
    /// Human readable exit status (exit code, signal, timeout)
    pub status: String,
    /// Captured stdout/stderr from the rendering process
    pub diagnostics: String,
}

impl RenderFailure {
    fn new(status: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            diagnostics: diagnostics.into(),
        }
    }
}

/// External rendering engine contract
#[async_trait]
pub trait Renderer: Send + Sync + Debug {
    /// Render `source` and deliver the video at `target`.
    ///
    /// # Arguments
    /// * `source` - Path of the persisted animation source file
    /// * `target` - Path the finished video must end up at
    ///
    /// # Returns
    /// * `Result<PathBuf, RenderFailure>` - The target path, or the failure
    ///   with captured diagnostics. Never retried by the caller.
    async fn render(&self, source: &Path, target: &Path) -> Result<PathBuf, RenderFailure>;
}

/// Renders animation source by invoking the Manim CLI as a subprocess
#[derive(Debug, Clone)]
pub struct ManimRenderer {
    config: RendererConfig,
    /// Scratch directory Manim writes its media tree into
    media_dir: PathBuf,
}

impl ManimRenderer {
    pub fn new(config: RendererConfig, media_dir: PathBuf) -> Self {
        Self { config, media_dir }
    }

    /// Locate the rendered scene file somewhere under the media tree.
    ///
    /// Manim buries the output in a quality-dependent subdirectory, so the
    /// well-known scene filename is searched for recursively.
    fn find_output(&self) -> Option<PathBuf> {
        let expected = format!("{}.{}", self.config.scene_class, self.config.format);
        WalkDir::new(&self.media_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| {
                entry.file_type().is_file()
                    && entry.file_name().to_string_lossy() == expected
            })
            .map(|entry| entry.into_path())
    }

    /// Append a LaTeX installation hint when the diagnostics point at it
    fn annotate_diagnostics(diagnostics: String) -> String {
        let lowered = diagnostics.to_lowercase();
        if lowered.contains("latex") || lowered.contains("dvisvgm") {
            format!(
                "{}\nHint: the generated code uses MathTex/Tex and a LaTeX \
                 toolchain does not appear to be installed",
                diagnostics
            )
        } else {
            diagnostics
        }
    }
}

#[async_trait]
impl Renderer for ManimRenderer {
    async fn render(&self, source: &Path, target: &Path) -> Result<PathBuf, RenderFailure> {
        let mut command = Command::new(&self.config.binary);
        command
            .arg(format!("-{}", self.config.quality))
            .arg(format!("--format={}", self.config.format))
            .arg(format!("--media_dir={}", self.media_dir.display()))
            .arg(source)
            .arg(&self.config.scene_class)
            .kill_on_drop(true);

        debug!("Invoking renderer: {:?}", command);

        let timeout = std::time::Duration::from_secs(self.config.timeout_secs);
        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(RenderFailure::new(
                    "failed to start",
                    format!("Could not launch '{}': {}", self.config.binary, e),
                ))
            }
            Err(_) => {
                return Err(RenderFailure::new(
                    "timed out",
                    format!("Render exceeded {} seconds", self.config.timeout_secs),
                ))
            }
        };

        if !output.status.success() {
            let mut diagnostics = String::from_utf8_lossy(&output.stderr).to_string();
            diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));
            warn!("Renderer exited unsuccessfully: {}", output.status);
            return Err(RenderFailure::new(
                output.status.to_string(),
                Self::annotate_diagnostics(diagnostics),
            ));
        }

        let Some(produced) = self.find_output() else {
            return Err(RenderFailure::new(
                "no output file",
                format!(
                    "Renderer exited successfully but produced no {}.{} under {:?}",
                    self.config.scene_class, self.config.format, self.media_dir
                ),
            ));
        };

        std::fs::rename(&produced, target).map_err(|e| {
            RenderFailure::new(
                "move failed",
                format!("Could not move {:?} to {:?}: {}", produced, target, e),
            )
        })?;

        info!("Video rendered to {:?}", target);
        Ok(target.to_path_buf())
    }
}
