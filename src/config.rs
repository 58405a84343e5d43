use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::color::{parse_hex, CurveColors};

/// Environment variable pointing at a settings file.
pub const CONFIG_ENV: &str = "HYSTERESIS_CONFIG";
/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "hysteresis.json";

// ---------------------------------------------------------------------------
// Settings – user-editable, JSON
// ---------------------------------------------------------------------------

/// User settings. Missing keys take their default value.
///
/// ```json
/// { "image_width": 1600, "longitudinal_color": "#d62728", "output_dir": "/tmp/loops" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub image_width: u32,
    pub image_height: u32,
    pub line_width: u32,
    pub longitudinal_color: String,
    pub transversal_color: String,
    /// Initial directory of the output-folder dialog.
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // 6.4 x 4.8 in at 300 dpi
            image_width: 1920,
            image_height: 1440,
            line_width: 2,
            longitudinal_color: "#ff0000".to_string(),
            transversal_color: "#0000ff".to_string(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Load from `$HYSTERESIS_CONFIG` or `./hysteresis.json`.
    /// A missing file gives the defaults; a broken one is logged and ignored.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            log::debug!("no settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Resolve colours and sizes into a [`PlotStyle`].
    pub fn plot_style(&self) -> Result<PlotStyle> {
        let color = |name: &str, value: &str| -> Result<Srgb<u8>> {
            parse_hex(value).with_context(|| format!("{name}: '{value}' is not a hex colour"))
        };
        Ok(PlotStyle {
            width: self.image_width.max(1),
            height: self.image_height.max(1),
            line_width: self.line_width.max(1),
            colors: CurveColors {
                longitudinal: color("longitudinal_color", &self.longitudinal_color)?,
                transversal: color("transversal_color", &self.transversal_color)?,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// PlotStyle – resolved rendering parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub colors: CurveColors,
}

impl Default for PlotStyle {
    fn default() -> Self {
        let s = Settings::default();
        Self {
            width: s.image_width,
            height: s.image_height,
            line_width: s.line_width,
            colors: CurveColors::default(),
        }
    }
}

impl PlotStyle {
    /// Font and margin scale relative to a 640x480 figure.
    pub fn scale(&self) -> f64 {
        f64::from(self.width.min(self.height * 4 / 3)) / 640.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_style_matches_default_settings() {
        let style = Settings::default().plot_style().unwrap();
        assert_eq!(style, PlotStyle::default());
        assert_eq!(style.scale(), 3.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "image_width": 800 }"#).unwrap();
        assert_eq!(s.image_width, 800);
        assert_eq!(s.image_height, 1440);
        assert_eq!(s.transversal_color, "#0000ff");
        assert_eq!(s.output_dir, None);
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let s = Settings {
            longitudinal_color: "reddish".into(),
            ..Settings::default()
        };
        let err = s.plot_style().unwrap_err();
        assert!(format!("{err:#}").contains("longitudinal_color"));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "line_width": 4, "output_dir": "/tmp/out" }}"#).unwrap();
        let s = Settings::from_path(file.path()).unwrap();
        assert_eq!(s.line_width, 4);
        assert_eq!(s.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_from_path_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Settings::from_path(file.path()).is_err());
    }
}
