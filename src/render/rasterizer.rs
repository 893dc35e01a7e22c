//! Markup → PNG rasterization.
//!
//! The rendering engine is an external `typst` binary. A process-wide instance is
//! created on first use (which probes the binary) and reused afterwards; callers
//! should expect the first image of a process to be slower.

use crate::render::error::RenderError;
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::OnceCell;

/// Accepted render scale range (multiplies the 72 ppi base)
pub const MIN_RENDER_SCALE: f64 = 0.5;
pub const MAX_RENDER_SCALE: f64 = 4.0;
pub const DEFAULT_RENDER_SCALE: f64 = 2.0;

/// Pixels per inch at scale 1.0
const BASE_PPI: f64 = 72.0;

#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Render a complete markup document to PNG bytes
    async fn rasterize(&self, markup: &str, scale: f64) -> Result<Vec<u8>, RenderError>;
}

/// Clamp a configured scale into the supported range
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_RENDER_SCALE, MAX_RENDER_SCALE)
    } else {
        DEFAULT_RENDER_SCALE
    }
}

/// Rasterizer backed by the `typst` command line compiler
#[derive(Debug, Clone)]
pub struct TypstCli {
    binary: String,
}

impl TypstCli {
    /// Probe `binary` with `--version`; fails when it cannot be executed
    pub async fn probe(binary: &str) -> Result<Self, RenderError> {
        let output = Command::new(binary)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| RenderError::Unavailable {
                message: format!(
                    "could not run '{}': {}. Install typst or set typst-bin in the configuration",
                    binary, e
                ),
            })?;

        if !output.status.success() {
            return Err(RenderError::Unavailable {
                message: format!("'{} --version' exited with {}", binary, output.status),
            });
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        log::info!("Using rasterizer {}", version);
        Ok(Self {
            binary: binary.to_string(),
        })
    }

    fn ppi(scale: f64) -> u32 {
        (BASE_PPI * clamp_scale(scale)).round() as u32
    }
}

#[async_trait]
impl Rasterizer for TypstCli {
    async fn rasterize(&self, markup: &str, scale: f64) -> Result<Vec<u8>, RenderError> {
        let ppi = Self::ppi(scale);
        log::debug!("Rasterizing {} bytes of markup at {} ppi", markup.len(), ppi);

        let mut child = Command::new(&self.binary)
            .args(["compile", "--format", "png", "--ppi"])
            .arg(ppi.to_string())
            .args(["-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RenderError::Unavailable {
                message: format!("could not start '{}': {}", self.binary, e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(markup.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(RenderError::Rasterize {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput);
        }
        Ok(output.stdout)
    }
}

static SHARED: OnceCell<Arc<TypstCli>> = OnceCell::const_new();

/// Process-wide rasterizer, created on first call and reused.
///
/// A failed probe is not cached, so a later call may succeed once the binary exists.
pub async fn shared_rasterizer(binary: &str) -> Result<Arc<TypstCli>, RenderError> {
    SHARED
        .get_or_try_init(|| async { TypstCli::probe(binary).await.map(Arc::new) })
        .await
        .cloned()
}

/// Rasterizer that resolves the process-wide `typst` instance on first use.
///
/// Lets callers hold a rasterizer without probing the binary when no image is
/// requested; a missing binary surfaces as the error of the first `rasterize`.
#[derive(Debug, Clone)]
pub struct SharedTypst {
    binary: String,
}

impl SharedTypst {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl Rasterizer for SharedTypst {
    async fn rasterize(&self, markup: &str, scale: f64) -> Result<Vec<u8>, RenderError> {
        shared_rasterizer(&self.binary)
            .await?
            .rasterize(markup, scale)
            .await
    }
}
