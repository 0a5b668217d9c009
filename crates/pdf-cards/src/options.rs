use crate::layout::GuidePolicy;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How an image is fitted into its card cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScalingMode {
    /// Keep the aspect ratio and center inside the cell
    #[default]
    Fit,
    /// Fill the cell exactly, ignoring the aspect ratio
    Stretch,
}

/// Card sheet build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    // Locations
    pub input_root: PathBuf,
    pub output_root: PathBuf,

    // Layout
    pub grid: GridSpec,
    pub paper: PaperSize,
    pub scaling: ScalingMode,

    // Cutting guides
    pub guides: bool,
    pub guide_policy: GuidePolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("input"),
            output_root: PathBuf::from("output"),
            grid: GridSpec::default(),
            paper: PaperSize::A4,
            scaling: ScalingMode::Fit,
            guides: true,
            guide_policy: GuidePolicy::GridPosition,
        }
    }
}

impl BuildOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| CardsError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CardsError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;

        if self.input_root.as_os_str().is_empty() {
            return Err(CardsError::Config("No input directory specified".to_string()));
        }
        if self.output_root.as_os_str().is_empty() {
            return Err(CardsError::Config(
                "No output directory specified".to_string(),
            ));
        }

        Ok(())
    }

    /// Page geometry implied by the paper size and grid
    pub fn geometry(&self) -> Result<PageGeometry> {
        PageGeometry::new(self.paper, self.grid)
    }

    /// Output path for a deck: `<output_root>/<deck>.pdf`
    pub fn output_path(&self, deck_name: &str) -> PathBuf {
        self.output_root.join(format!("{deck_name}.pdf"))
    }
}
