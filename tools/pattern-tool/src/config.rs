// Copyright 2025. TOML configuration for the pattern CLI.
//
// Example:
//
//   layout = "halving"
//   preset = "office"
//   output = "pattern.png"
//
//   [presets.office]
//   layout = "halving"
//   values = [170, 125, 95, 72, 54, 40, 29]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use dither_gamma::{Curve, CurvePresetStore, Layout};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// A user preset from the `[presets]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetEntry {
    #[serde(default)]
    pub layout: Layout,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub layout: Option<Layout>,
    pub preset: Option<String>,
    pub values: Option<Vec<i64>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub output: Option<PathBuf>,
    pub gray: Option<bool>,
    pub presets: BTreeMap<String, PresetEntry>,
}

impl ToolConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("in config {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `explicit` if given, else the per-user config file if it exists,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Register this config's presets for `store`'s layout.
    ///
    /// Entries for other layouts are skipped.
    pub fn register_presets(&self, store: &mut CurvePresetStore) -> Result<()> {
        for (name, entry) in &self.presets {
            if entry.layout != store.layout() {
                continue;
            }
            let points = clamp_values(&entry.values);
            let curve = Curve::new(entry.layout, &points)
                .with_context(|| format!("preset {:?}", name))?;
            store
                .insert(name, curve)
                .with_context(|| format!("preset {:?}", name))?;
        }
        Ok(())
    }
}

/// `<config dir>/pattern-tool/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pattern-tool").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Clamp raw values into 0..=255, warning about any that were out of range.
pub fn clamp_values(values: &[i64]) -> Vec<u8> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let c = v.clamp(0, 255);
            if c != v {
                warn!("curve point {} value {} clamped to {}", i, v, c);
            }
            c as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
layout = "named-grays"
preset = "lab"
width = 400
output = "out.png"

[presets.lab]
layout = "named-grays"
values = [50, 72, 100, 138, 166, 189, 208, 226, 241]

[presets.office]
values = [170, 125, 95, 72, 54, 40, 29]
"#;

    #[test]
    fn test_parse_sample() {
        let config = ToolConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.layout, Some(Layout::NamedGrays));
        assert_eq!(config.preset.as_deref(), Some("lab"));
        assert_eq!(config.width, Some(400));
        assert_eq!(config.height, None);
        assert_eq!(config.output, Some(PathBuf::from("out.png")));
        assert_eq!(config.presets.len(), 2);
        // Layout defaults to halving.
        assert_eq!(config.presets["office"].layout, Layout::Halving);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ToolConfig::from_toml("colour = 3").is_err());
    }

    #[test]
    fn test_register_presets_filters_by_layout() {
        let config = ToolConfig::from_toml(SAMPLE).unwrap();
        let mut store = CurvePresetStore::new(Layout::Halving);
        config.register_presets(&mut store).unwrap();
        assert!(store.contains("office"));
        assert!(!store.contains("lab"));
    }

    #[test]
    fn test_register_presets_bad_length() {
        let config = ToolConfig::from_toml("[presets.short]\nvalues = [1, 2]\n").unwrap();
        let mut store = CurvePresetStore::new(Layout::Halving);
        assert!(config.register_presets(&mut store).is_err());
    }

    #[test]
    fn test_clamp_values() {
        assert_eq!(clamp_values(&[-3, 0, 128, 255, 900]), vec![0, 0, 128, 255, 255]);
    }

    #[test]
    fn test_discover_explicit_missing_path() {
        // An explicit path must exist; only the per-user file is optional.
        assert!(ToolConfig::discover(Some(Path::new("/nonexistent/pattern.toml"))).is_err());
    }
}
