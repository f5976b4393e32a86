use clap::Parser;
use ridgeprint::pipeline::{accumulate, enroll, verify};
use ridgeprint::{
    BoundaryConfig, DetectorConfig, PairingStrategy, PipelineConfig, PreprocessConfig,
    RidgeprintResult, TemplateStore,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Ridgeprint CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PairingConfig {
    RasterAdjacent,
    NearestNeighbor,
    FullyPairwise,
}

impl From<PairingConfig> for PairingStrategy {
    fn from(value: PairingConfig) -> Self {
        match value {
            PairingConfig::RasterAdjacent => PairingStrategy::RasterAdjacent,
            PairingConfig::NearestNeighbor => PairingStrategy::NearestNeighbor,
            PairingConfig::FullyPairwise => PairingStrategy::FullyPairwise,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PipelineConfigJson {
    size: u32,
    min_blob_area: f64,
    smoothing_radius: u32,
    margin: f32,
    pairing: PairingConfig,
    parallel: bool,
}

impl Default for PipelineConfigJson {
    fn default() -> Self {
        let pre = PreprocessConfig::default();
        let boundary = BoundaryConfig::default();
        Self {
            size: pre.size,
            min_blob_area: pre.min_blob_area,
            smoothing_radius: boundary.smoothing_radius,
            margin: boundary.margin,
            pairing: PairingConfig::RasterAdjacent,
            parallel: DetectorConfig::default().parallel,
        }
    }
}

impl From<PipelineConfigJson> for PipelineConfig {
    fn from(value: PipelineConfigJson) -> Self {
        let size = value.size as usize;
        Self {
            preprocess: PreprocessConfig {
                size: value.size,
                min_blob_area: value.min_blob_area,
            },
            boundary: BoundaryConfig {
                smoothing_radius: value.smoothing_radius,
                margin: value.margin,
            },
            detector: DetectorConfig {
                width: size,
                height: size,
                parallel: value.parallel,
            },
            pairing: value.pairing.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Task {
    Enroll {
        subject: String,
        image_path: PathBuf,
    },
    Accumulate {
        samples: Vec<String>,
        output: String,
    },
    Verify {
        candidate: String,
        reference: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    templates_dir: PathBuf,
    continue_on_error: bool,
    output_path: Option<PathBuf>,
    pipeline: PipelineConfigJson,
    tasks: Vec<Task>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            continue_on_error: false,
            output_path: None,
            pipeline: PipelineConfigJson::default(),
            tasks: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct TaskRecord {
    action: &'static str,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_matches: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn run_task(task: &Task, store: &TemplateStore, cfg: &PipelineConfig) -> TaskRecord {
    let (action, name, result): (_, _, RidgeprintResult<TaskRecord>) = match task {
        Task::Enroll {
            subject,
            image_path,
        } => (
            "enroll",
            subject.clone(),
            enroll(store, subject, image_path, cfg).map(|tpl| TaskRecord {
                entries: Some(tpl.len()),
                ..TaskRecord::default()
            }),
        ),
        Task::Accumulate { samples, output } => (
            "accumulate",
            output.clone(),
            accumulate(store, samples, output).map(|acc| TaskRecord {
                entries: Some(acc.len()),
                ..TaskRecord::default()
            }),
        ),
        Task::Verify {
            candidate,
            reference,
        } => (
            "verify",
            format!("{candidate} vs {reference}"),
            verify(store, candidate, reference).map(|outcome| TaskRecord {
                score: Some(outcome.score),
                raw_matches: Some(outcome.raw_matches()),
                ..TaskRecord::default()
            }),
        ),
    };
    let mut record = result.unwrap_or_else(|err| TaskRecord {
        error: Some(err.to_string()),
        ..TaskRecord::default()
    });
    record.action = action;
    record.name = name;
    record
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("ridgeprint=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tasks.is_empty() {
        return Err("no tasks given in the config".into());
    }

    let store = TemplateStore::new(&config.templates_dir);
    let pipeline: PipelineConfig = config.pipeline.into();

    let mut records = Vec::with_capacity(config.tasks.len());
    for task in &config.tasks {
        let record = run_task(task, &store, &pipeline);
        if let Some(err) = &record.error {
            tracing::warn!(action = record.action, name = %record.name, "{err}");
            if !config.continue_on_error {
                return Err(format!("{} {}: {err}", record.action, record.name).into());
            }
        }
        records.push(record);
    }

    let json = serde_json::to_string_pretty(&records)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
