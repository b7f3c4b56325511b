use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use notehead_core::consts::DEFAULT_FIXED_THRESHOLD;
use notehead_core::detection::{Bounds, DetectionConfig, NoteheadDetector, ThresholdMode};
use notehead_core::io::image_io::derive_output_path;

use crate::summary::print_detection_summary;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ThresholdArg {
    /// Global Otsu threshold
    Otsu,
    /// Local mean threshold (see --block-size, --offset)
    Adaptive,
    /// Fixed threshold (see --threshold-value)
    Fixed,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Input score image (PNG, JPEG, BMP, ...)
    pub image: PathBuf,

    /// TOML file with detection parameters; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (default: <stem>_detected.<ext> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Binarization method
    #[arg(long, value_enum)]
    pub threshold: Option<ThresholdArg>,

    /// Adaptive threshold window size in pixels (odd)
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Adaptive threshold offset below the local mean, in [0.0, 1.0]
    #[arg(long)]
    pub offset: Option<f32>,

    /// Fixed threshold level in [0.0, 1.0]
    #[arg(long)]
    pub threshold_value: Option<f32>,

    /// Gaussian blur kernel size before thresholding (odd, e.g. 5)
    #[arg(long)]
    pub blur: Option<usize>,

    /// Width of the horizontal staff-line kernel in pixels
    #[arg(long)]
    pub staff_kernel_width: Option<usize>,

    /// Minimum contour area in square pixels
    #[arg(long)]
    pub min_area: Option<f64>,

    /// Accepted width/height ratio: "min,max" (e.g. "0.7,1.3")
    #[arg(long)]
    pub aspect: Option<String>,

    /// Accepted box side in pixels: "min,max" (e.g. "5,120")
    #[arg(long)]
    pub size: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &DetectArgs, verbose: bool) -> Result<()> {
    let config = build_config(args)?;
    let detector = NoteheadDetector::new(config)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&args.image));

    if shows_summary(args, verbose) {
        print_detection_summary(detector.config(), &args.image, &output);
    }

    let result = detector
        .detect_to(&args.image, output)
        .with_context(|| format!("Failed to process {}", args.image.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Detected {} noteheads. Output saved to {}",
            result.boxes.len(),
            result.output_path.display()
        );
    }

    Ok(())
}

/// The styled summary goes to stdout, so it is suppressed for `--json`.
fn shows_summary(args: &DetectArgs, verbose: bool) -> bool {
    verbose && !args.json
}

fn build_config(args: &DetectArgs) -> Result<DetectionConfig> {
    let mut config = match args.config {
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str::<DetectionConfig>(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => DetectionConfig::default(),
    };

    if let Some(mode) = args.threshold {
        config.threshold_mode = match mode {
            ThresholdArg::Otsu => ThresholdMode::Otsu,
            ThresholdArg::Adaptive => ThresholdMode::adaptive(),
            ThresholdArg::Fixed => ThresholdMode::Fixed(DEFAULT_FIXED_THRESHOLD),
        };
    }

    if args.block_size.is_some() || args.offset.is_some() {
        let ThresholdMode::AdaptiveMean { block_size, offset } = &mut config.threshold_mode else {
            anyhow::bail!("--block-size and --offset require --threshold adaptive");
        };
        if let Some(b) = args.block_size {
            *block_size = b;
        }
        if let Some(o) = args.offset {
            *offset = o;
        }
    }

    if let Some(level) = args.threshold_value {
        let ThresholdMode::Fixed(t) = &mut config.threshold_mode else {
            anyhow::bail!("--threshold-value requires --threshold fixed");
        };
        *t = level;
    }

    if let Some(ksize) = args.blur {
        config.blur_kernel_size = Some(ksize);
    }
    if let Some(width) = args.staff_kernel_width {
        config.staff_kernel_width = width;
    }
    if let Some(area) = args.min_area {
        config.area_min = area;
    }
    if let Some(ref aspect) = args.aspect {
        let [min, max] = parse_pair::<f64>(aspect, "aspect")?;
        config.aspect_range = Bounds::new(min, max);
    }
    if let Some(ref size) = args.size {
        let [min, max] = parse_pair::<u32>(size, "size")?;
        config.size_range = Bounds::new(min, max);
    }

    Ok(config)
}

fn parse_pair<T: std::str::FromStr>(s: &str, name: &str) -> Result<[T; 2]>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let parts: Vec<T> = s
        .split(',')
        .map(|p| p.trim().parse::<T>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid {name} format (expected 'min,max')"))?;
    match <[T; 2]>::try_from(parts) {
        Ok(pair) => Ok(pair),
        Err(_) => anyhow::bail!("{name} requires exactly 2 values: min,max"),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        detect: DetectArgs,
    }

    fn args(extra: &[&str]) -> DetectArgs {
        let argv = ["notehead", "page.png"].iter().chain(extra.iter());
        TestCli::try_parse_from(argv).unwrap().detect
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair::<f64>("0.5, 1.5", "aspect").unwrap(), [0.5, 1.5]);
        assert_eq!(parse_pair::<u32>("5,120", "size").unwrap(), [5, 120]);
        assert!(parse_pair::<u32>("1,2,3", "size").is_err());
        assert!(parse_pair::<u32>("7", "size").is_err());
        assert!(parse_pair::<f64>("low,high", "aspect").is_err());
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        let config = build_config(&args(&[])).unwrap();
        assert_eq!(config, DetectionConfig::default());
    }

    #[test]
    fn test_flags_override_filter() {
        let config = build_config(&args(&[
            "--aspect",
            "0.5,1.5",
            "--size",
            "8,60",
            "--min-area",
            "20",
            "--blur",
            "5",
            "--staff-kernel-width",
            "40",
        ]))
        .unwrap();
        assert_eq!(config.aspect_range, Bounds::new(0.5, 1.5));
        assert_eq!(config.size_range, Bounds::new(8, 60));
        assert_eq!(config.area_min, 20.0);
        assert_eq!(config.blur_kernel_size, Some(5));
        assert_eq!(config.staff_kernel_width, 40);
    }

    #[test]
    fn test_adaptive_parameters() {
        let config = build_config(&args(&[
            "--threshold",
            "adaptive",
            "--block-size",
            "21",
            "--offset",
            "0.05",
        ]))
        .unwrap();
        assert_eq!(
            config.threshold_mode,
            ThresholdMode::AdaptiveMean {
                block_size: 21,
                offset: 0.05
            }
        );
    }

    #[test]
    fn test_adaptive_parameters_need_adaptive_mode() {
        assert!(build_config(&args(&["--block-size", "21"])).is_err());
        assert!(build_config(&args(&["--threshold", "otsu", "--offset", "0.1"])).is_err());
    }

    #[test]
    fn test_threshold_value_needs_fixed_mode() {
        assert!(build_config(&args(&["--threshold-value", "0.3"])).is_err());
        let config =
            build_config(&args(&["--threshold", "fixed", "--threshold-value", "0.3"])).unwrap();
        assert_eq!(config.threshold_mode, ThresholdMode::Fixed(0.3));
    }

    #[test]
    fn test_malformed_pairs_are_rejected() {
        assert!(build_config(&args(&["--aspect", "0.5"])).is_err());
        assert!(build_config(&args(&["--size", "a,b"])).is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detect.toml");
        std::fs::write(&path, "area_min = 12.0\nstaff_kernel_width = 35\n").unwrap();
        let path = path.to_str().unwrap();

        let config = build_config(&args(&["--config", path, "--min-area", "50"])).unwrap();

        assert_eq!(config.staff_kernel_width, 35);
        assert_eq!(config.area_min, 50.0);
    }

    #[test]
    fn test_summary_suppressed_for_json() {
        assert!(shows_summary(&args(&[]), true));
        assert!(!shows_summary(&args(&[]), false));
        assert!(!shows_summary(&args(&["--json"]), true));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        assert!(build_config(&args(&["--config", "/nonexistent/detect.toml"])).is_err());
    }
}
