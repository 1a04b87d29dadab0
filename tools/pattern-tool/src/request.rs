// Copyright 2025. Command-line options and their resolution against config.
//
// Flags always win over the config file; the config file wins over the
// layout's defaults.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dither_gamma::gamma::Gamma;
use dither_gamma::{Curve, CurvePresetStore, Layout};

use crate::config::{clamp_values, ToolConfig};

/// Options shared by the `render` and `bands` commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub layout: Option<Layout>,
    pub preset: Option<String>,
    pub values: Option<Vec<i64>>,
    pub gamma: Option<Gamma>,
    pub size: Option<(u32, u32)>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub gray: bool,
}

impl CliOptions {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut opts = CliOptions::default();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            if flag == "--gray" {
                opts.gray = true;
                i += 1;
                continue;
            }
            let value = args
                .get(i + 1)
                .with_context(|| format!("{} needs a value", flag))?;
            match flag {
                "-l" | "--layout" => opts.layout = Some(value.parse()?),
                "-p" | "--preset" => opts.preset = Some(value.clone()),
                "-c" | "--values" => opts.values = Some(parse_values(value)?),
                "-g" | "--gamma" => opts.gamma = Some(value.parse()?),
                "-s" | "--size" => opts.size = Some(parse_size(value)?),
                "--config" => opts.config = Some(PathBuf::from(value)),
                "-o" | "--output" => opts.output = Some(PathBuf::from(value)),
                _ => bail!("unknown option: {}", flag),
            }
            i += 2;
        }
        let sources = [
            opts.preset.is_some(),
            opts.values.is_some(),
            opts.gamma.is_some(),
        ];
        if sources.iter().filter(|&&set| set).count() > 1 {
            bail!("--preset, --values and --gamma are mutually exclusive");
        }
        Ok(opts)
    }
}

/// Comma-separated integers, e.g. `171,127,97`.
pub fn parse_values(s: &str) -> Result<Vec<i64>> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .with_context(|| format!("invalid curve value {:?}", v))
        })
        .collect()
}

/// `WIDTHxHEIGHT`, both positive.
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("size must look like 134x240, got {:?}", s))?;
    let w: u32 = w.trim().parse().with_context(|| format!("invalid width {:?}", w))?;
    let h: u32 = h.trim().parse().with_context(|| format!("invalid height {:?}", h))?;
    if w == 0 || h == 0 {
        bail!("size must be positive, got {}x{}", w, h);
    }
    Ok((w, h))
}

/// Where the curve came from, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSource {
    Preset(String),
    Values,
    /// Reference curve of an ideal display with this response.
    Gamma(Gamma),
}

/// Everything needed to render one pattern.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub curve: Curve,
    pub source: CurveSource,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    pub gray: bool,
}

impl RenderRequest {
    pub fn resolve(opts: &CliOptions, config: &ToolConfig) -> Result<Self> {
        let layout = opts.layout.or(config.layout).unwrap_or_default();
        let mut store = CurvePresetStore::new(layout);
        config.register_presets(&mut store)?;

        let (curve, source) = if let Some(gamma) = opts.gamma {
            (Curve::from_gamma(layout, &gamma), CurveSource::Gamma(gamma))
        } else {
            // A flag of either kind overrides both config keys.
            let (preset, values) = if opts.preset.is_some() || opts.values.is_some() {
                (opts.preset.clone(), opts.values.clone())
            } else {
                (config.preset.clone(), config.values.clone())
            };
            match (preset, values) {
                (_, Some(values)) => {
                    let curve = Curve::new(layout, &clamp_values(&values))?;
                    (curve, CurveSource::Values)
                }
                (Some(name), None) => (store.load(&name)?, CurveSource::Preset(name)),
                (None, None) => {
                    let name = store.active_name().to_string();
                    (store.active().clone(), CurveSource::Preset(name))
                }
            }
        };

        let (dw, dh) = layout.canvas_size();
        let (width, height) = opts.size.unwrap_or((
            config.width.unwrap_or(dw),
            config.height.unwrap_or(dh),
        ));
        if width == 0 || height == 0 {
            bail!("size must be positive, got {}x{}", width, height);
        }

        let output = opts
            .output
            .clone()
            .or_else(|| config.output.clone())
            .unwrap_or_else(|| PathBuf::from(format!("{}_{}x{}.png", layout, width, height)));

        Ok(Self {
            curve,
            source,
            width,
            height,
            output,
            gray: opts.gray || config.gray.unwrap_or(false),
        })
    }
}
