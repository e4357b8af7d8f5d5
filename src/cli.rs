//! Command-line argument parsing.

use clap::Parser;

use crate::params::{
    OrbitConfig, PanelConfig, ParamName, ParamValue, RenderConfig, WaterParams,
    WaterSurfaceConfig, MAX_SEGMENTS,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ragingsea")]
#[command(about = "Animated procedural water with a live debug panel", long_about = None)]
pub struct Args {
    /// Initial window width (logical pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Initial window height (logical pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Plane subdivisions per side (1-2048)
    #[arg(
        long,
        value_name = "COUNT",
        default_value = "512",
        value_parser = clap::value_parser!(u32).range(1..=MAX_SEGMENTS as i64)
    )]
    pub segments: u32,

    /// Cap on the device pixel ratio
    #[arg(long, value_name = "RATIO", default_value = "2", value_parser = parse_pixel_ratio)]
    pub max_pixel_ratio: f64,

    /// Initial water parameter, e.g. uWaveSpeed=1.5, uWaveFrequency=4,2 or
    /// uDepthColor=#1d86bf (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(ParamName, ParamValue)>,

    /// Disable orbit-control damping
    #[arg(long)]
    pub no_damping: bool,

    /// Start with the debug panel hidden (toggle with H)
    #[arg(long)]
    pub hide_panel: bool,

    /// Exit after drawing this many frames
    #[arg(long, value_name = "FRAMES")]
    pub frames: Option<u64>,
}

/// Positive, finite pixel ratio
fn parse_pixel_ratio(s: &str) -> Result<f64, String> {
    let ratio: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("pixel ratio must be a positive number, got {}", s))
    }
}

/// `NAME=VALUE`, with the value parsed by the parameter's kind
fn parse_param(s: &str) -> Result<(ParamName, ParamValue), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name: ParamName = name.trim().parse().map_err(|e| format!("{}", e))?;
    let value = ParamValue::parse(name.kind(), value).map_err(|e| format!("{}", e))?;
    Ok((name, value))
}

impl Args {
    /// Defaults with any `--param` overrides applied in order
    pub fn water_params(&self) -> WaterParams {
        let mut params = WaterParams::default();
        for (name, value) in &self.params {
            if let Err(e) = params.set(*name, *value) {
                log::warn!("Ignoring --param {}: {}", name, e);
            }
        }
        params
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            max_pixel_ratio: self.max_pixel_ratio,
            frame_limit: self.frames,
            ..Default::default()
        }
    }

    pub fn surface_config(&self) -> WaterSurfaceConfig {
        WaterSurfaceConfig {
            width_segments: self.segments,
            height_segments: self.segments,
            ..Default::default()
        }
    }

    pub fn orbit_config(&self) -> OrbitConfig {
        OrbitConfig {
            enable_damping: !self.no_damping,
            ..Default::default()
        }
    }

    pub fn panel_config(&self) -> PanelConfig {
        PanelConfig {
            visible: !self.hide_panel,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        let args = Args::try_parse_from(["ragingsea"]).unwrap();
        let render = args.render_config();
        assert_eq!((render.window_width, render.window_height), (1280, 720));
        assert_eq!(render.max_pixel_ratio, RenderConfig::default().max_pixel_ratio);
        assert_eq!(render.frame_limit, None);
        assert_eq!(args.surface_config().width_segments, 512);
        assert!(args.orbit_config().enable_damping);
        assert!(args.panel_config().visible);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "ragingsea",
            "--width",
            "800",
            "--height",
            "600",
            "--segments",
            "64",
            "--no-damping",
            "--hide-panel",
            "--frames",
            "10",
        ])
        .unwrap();
        let render = args.render_config();
        assert_eq!((render.window_width, render.window_height), (800, 600));
        assert_eq!(render.frame_limit, Some(10));
        assert_eq!(args.surface_config().height_segments, 64);
        assert!(!args.orbit_config().enable_damping);
        assert!(!args.panel_config().visible);
    }

    #[test]
    fn test_segments_outside_mesh_range_are_rejected() {
        for bad in ["0", "2049", "70000"] {
            assert!(
                Args::try_parse_from(["ragingsea", "--segments", bad]).is_err(),
                "accepted --segments {}",
                bad
            );
        }
        let args = Args::try_parse_from(["ragingsea", "--segments", "2048"]).unwrap();
        assert_eq!(args.surface_config().width_segments, MAX_SEGMENTS);
    }

    #[test]
    fn test_pixel_ratio_must_be_positive_and_finite() {
        for bad in ["0", "-1", "NaN", "inf", "two"] {
            assert!(
                Args::try_parse_from(["ragingsea", "--max-pixel-ratio", bad]).is_err(),
                "accepted --max-pixel-ratio {}",
                bad
            );
        }
        let args = Args::try_parse_from(["ragingsea", "--max-pixel-ratio", "1.5"]).unwrap();
        assert_eq!(args.render_config().max_pixel_ratio, 1.5);
    }

    #[test]
    fn test_param_overrides_go_through_the_store() {
        let args = Args::try_parse_from([
            "ragingsea",
            "--param",
            "uWaveSpeed=1.5",
            "--param",
            "uWaveFrequency=3,1",
            "--param",
            "uDepthColor=#ff0000",
        ])
        .unwrap();
        let params = args.water_params();
        assert_eq!(params.wave_speed, 1.5);
        assert_eq!(params.wave_frequency, glam::Vec2::new(3.0, 1.0));
        assert_eq!(params.depth_color.to_hex(), "#ff0000");
        assert_eq!(params.color_multiplier, WaterParams::default().color_multiplier);
    }

    #[test]
    fn test_bad_param_overrides_are_rejected() {
        for bad in ["uTime=1", "uWaveSpeed", "uWaveFrequency=4", "uDepthColor=blue"] {
            assert!(
                Args::try_parse_from(["ragingsea", "--param", bad]).is_err(),
                "accepted --param {}",
                bad
            );
        }
    }
}
