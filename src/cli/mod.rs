//! Command-line interface
//!
//! Serve the API, run a one-off prediction from a JSON payload file, or
//! inspect an artifact pair.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::artifacts::{ArtifactConfig, ArtifactStore, FeatureScaling};
use crate::inference::FEATURE_NAMES;
use crate::models::Estimator;
use crate::server::{run_server, ServerConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn kv(key: &str, val: &str) {
    println!("  {} {}", muted(&format!("{:<14}", key)), val.white());
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "housing-predict")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "California housing price prediction service")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Artifact pair selection shared by all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct ArtifactArgs {
    /// Model artifact (defaults to $MODEL_PATH or models/linear/model.json)
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Scaler artifact; required when the model was fitted on scaled features
    /// (defaults to $SCALER_PATH, otherwise no scaling)
    #[arg(short, long)]
    pub scaler: Option<PathBuf>,
}

impl ArtifactArgs {
    /// Resolve against environment defaults
    pub fn resolve(&self) -> ArtifactConfig {
        let defaults = ArtifactConfig::default();
        ArtifactConfig {
            model_path: self.model.clone().unwrap_or(defaults.model_path),
            scaling: match &self.scaler {
                Some(path) => FeatureScaling::Scaler(path.clone()),
                None => defaults.scaling,
            },
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Server port (defaults to $API_PORT or 8000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Server host (defaults to $API_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        #[command(flatten)]
        artifacts: ArtifactArgs,
    },

    /// Predict from a JSON file holding the eight feature fields
    Predict {
        /// Request payload (JSON object)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        artifacts: ArtifactArgs,
    },

    /// Show what an artifact pair contains
    Inspect {
        #[command(flatten)]
        artifacts: ArtifactArgs,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub async fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    artifacts: &ArtifactArgs,
) -> anyhow::Result<()> {
    let defaults = ServerConfig::default();
    let config = ServerConfig {
        host: host.unwrap_or(defaults.host),
        port: port.unwrap_or(defaults.port),
        artifacts: artifacts.resolve(),
    };

    println!();
    println!("  {} {}", "housing-predict".truecolor(120, 170, 255).bold(), dim(&format!("v{}", env!("CARGO_PKG_VERSION"))));
    println!("  {}", dim(&"─".repeat(56)));
    kv("API", &format!("http://{}:{}", config.host, config.port));
    kv("Predict", &format!("http://{}:{}/predict", config.host, config.port));
    kv("Model", &config.artifacts.model_path.display().to_string());
    kv("Scaling", &config.artifacts.scaling.to_string());
    println!();
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    run_server(config).await
}

/// Run a single prediction and print it. Returns the predicted value.
pub fn cmd_predict(input: &Path, artifacts: &ArtifactArgs) -> anyhow::Result<f64> {
    section("Predict");

    let store = ArtifactStore::open(&artifacts.resolve())?;
    step_ok(&format!("Loaded {} model", store.model().kind()));

    let payload = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let body: serde_json::Value = serde_json::from_str(&payload)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;
    let fields = body
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("{} must contain a JSON object", input.display()))?;

    let start = Instant::now();
    let prediction = store.pipeline().predict(fields)?;
    let elapsed = start.elapsed();

    println!();
    kv("Prediction", &format!("{:.4}", prediction));
    kv("Latency", &format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0));
    println!();

    Ok(prediction)
}

pub fn cmd_inspect(artifacts: &ArtifactArgs) -> anyhow::Result<()> {
    section("Artifacts");

    let config = artifacts.resolve();
    let store = ArtifactStore::open(&config)?;
    let model = store.model();

    kv("Model file", &config.model_path.display().to_string());
    kv("Model kind", model.kind());
    kv("Scaled input", &model.expects_scaled_input.to_string());
    if config.scaling.is_identity() {
        kv("Scaling", "identity");
    }

    match &model.estimator {
        Estimator::LinearRegression(linear) => {
            kv("Intercept", &format!("{:.6}", linear.intercept));
            section("Coefficients");
            for (name, w) in FEATURE_NAMES.iter().zip(&linear.coefficients) {
                kv(name, &format!("{:+.6}", w));
            }
        }
        Estimator::RandomForest(forest) => {
            kv("Trees", &forest.n_estimators().to_string());
            kv("Max depth", &forest.max_depth().to_string());
            kv("Leaves", &forest.n_leaves().to_string());
        }
    }

    if let Some(scaler) = store.scaler() {
        section(&format!("Scaler ({})", scaler.scaler_type()));
        for (name, p) in FEATURE_NAMES.iter().zip(scaler.params()) {
            kv(name, &format!("center {:>12.4}  scale {:>12.4}", p.center, p.scale));
        }
    }
    println!();

    Ok(())
}
