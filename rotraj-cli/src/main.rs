use clap::Parser;
use rotraj::io::{load_image, save_image};
use rotraj::{
    Fill, Interpolation, NamedFill, Padding, PaddingMode, TensorLayout, Trajectory,
    TrajectoryConfig, TrajectoryGenerator,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

const MANIFEST_FILE: &str = "trajectory.json";
const TENSOR_FILE: &str = "trajectory.bin";

#[derive(Parser, Debug)]
#[command(author, version, about = "Rotation trajectory generator (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FillConfig {
    Scalar(u8),
    PerChannel(Vec<u8>),
    Named(String),
}

impl TryFrom<FillConfig> for Fill {
    type Error = rotraj::RotrajError;

    fn try_from(value: FillConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            FillConfig::Scalar(v) => Fill::Scalar(v),
            FillConfig::PerChannel(values) => Fill::PerChannel(values),
            FillConfig::Named(name) => Fill::Named(name.parse::<NamedFill>()?),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum InterpolationConfig {
    Nearest,
    Bilinear,
    Bicubic,
}

impl From<InterpolationConfig> for Interpolation {
    fn from(value: InterpolationConfig) -> Self {
        match value {
            InterpolationConfig::Nearest => Interpolation::Nearest,
            InterpolationConfig::Bilinear => Interpolation::Bilinear,
            InterpolationConfig::Bicubic => Interpolation::Bicubic,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PaddingConfig {
    Uniform,
    PerAxis,
}

impl From<PaddingConfig> for PaddingMode {
    fn from(value: PaddingConfig) -> Self {
        match value {
            PaddingConfig::Uniform => PaddingMode::Uniform,
            PaddingConfig::PerAxis => PaddingMode::PerAxis,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LayoutConfig {
    Nchw,
    Nhwc,
}

impl From<LayoutConfig> for TensorLayout {
    fn from(value: LayoutConfig) -> Self {
        match value {
            LayoutConfig::Nchw => TensorLayout::Nchw,
            LayoutConfig::Nhwc => TensorLayout::Nhwc,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    output_dir: Option<String>,
    angle_range: (f64, f64),
    sample_count: usize,
    fill: FillConfig,
    interpolation: InterpolationConfig,
    padding: PaddingConfig,
    layout: LayoutConfig,
    parallel: bool,
    write_frames: bool,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = TrajectoryConfig::default();
        Self {
            image_path: String::new(),
            output_dir: None,
            angle_range: cfg.angle_range,
            sample_count: cfg.sample_count,
            fill: FillConfig::Named(NamedFill::default().as_str().to_string()),
            interpolation: InterpolationConfig::Bicubic,
            padding: PaddingConfig::Uniform,
            layout: LayoutConfig::Nchw,
            parallel: cfg.parallel,
            write_frames: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct PaddingRecord {
    left: usize,
    top: usize,
    right: usize,
    bottom: usize,
}

impl From<Padding> for PaddingRecord {
    fn from(value: Padding) -> Self {
        Self {
            left: value.left,
            top: value.top,
            right: value.right,
            bottom: value.bottom,
        }
    }
}

#[derive(Debug, Serialize)]
struct FrameRecord {
    index: usize,
    angle_deg: f64,
    padding: PaddingRecord,
    file: Option<String>,
}

#[derive(Debug, Serialize)]
struct Manifest {
    shape: [usize; 4],
    layout: &'static str,
    tensor_file: Option<String>,
    frames: Vec<FrameRecord>,
}

fn layout_name(layout: TensorLayout) -> &'static str {
    match layout {
        TensorLayout::Nchw => "nchw",
        TensorLayout::Nhwc => "nhwc",
    }
}

fn frame_file_name(index: usize) -> String {
    format!("frame_{index:04}.png")
}

fn write_outputs(
    trajectory: &Trajectory,
    dir: &Path,
    write_frames: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(TENSOR_FILE), trajectory.as_slice())?;
    if write_frames {
        for index in 0..trajectory.len() {
            let frame = trajectory
                .frame_image(index)
                .ok_or("frame index out of range")?;
            save_image(dir.join(frame_file_name(index)), frame.view())?;
        }
    }
    Ok(())
}

fn manifest(trajectory: &Trajectory, with_files: bool, write_frames: bool) -> Manifest {
    let frames = trajectory
        .angles()
        .iter()
        .zip(trajectory.paddings())
        .enumerate()
        .map(|(index, (&angle_deg, &padding))| FrameRecord {
            index,
            angle_deg,
            padding: padding.into(),
            file: (with_files && write_frames).then(|| frame_file_name(index)),
        })
        .collect();
    Manifest {
        shape: trajectory.shape(),
        layout: layout_name(trajectory.layout()),
        tensor_file: with_files.then(|| TENSOR_FILE.to_string()),
        frames,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("rotraj=debug".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }

    let generator = TrajectoryGenerator::new(TrajectoryConfig {
        angle_range: config.angle_range,
        sample_count: config.sample_count,
        fill: config.fill.try_into()?,
        interpolation: config.interpolation.into(),
        padding: config.padding.into(),
        layout: config.layout.into(),
        parallel: config.parallel,
    })?;

    let image = load_image(&config.image_path)?;
    tracing::info!(
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "loaded image"
    );
    let trajectory = generator.generate(image.view())?;

    let output_dir = config.output_dir.map(PathBuf::from);
    if let Some(dir) = &output_dir {
        write_outputs(&trajectory, dir, config.write_frames)?;
    }
    let manifest = manifest(&trajectory, output_dir.is_some(), config.write_frames);
    let json = serde_json::to_string_pretty(&manifest)?;
    match &output_dir {
        Some(dir) => fs::write(dir.join(MANIFEST_FILE), &json)?,
        None => println!("{json}"),
    }

    Ok(())
}
