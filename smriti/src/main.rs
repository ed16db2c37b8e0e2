//! Smriti loop-closure evaluation.
//!
//! Verifies every neighbour candidate of a scan dataset with RANSAC and
//! writes match, error and timing tables.
//!
//! Usage:
//!   smriti-eval --dataset data/fr079.json
//!   smriti-eval --dataset data/fr079.json --nnfile data/fr079_nn.txt --neighborhood 10 --distance batt

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;

use smriti::evaluation::{
    EvaluationRun, EvaluationState, MatchEvaluator, OutputNames, PairwiseVerifier, PhaseTimings,
    timed, write_json_summary, write_tables,
};
use smriti::features::HistogramDistance;
use smriti::matching::{CorrespondenceStrategy, RansacFeatureSetMatcher};
use smriti::{Dataset, NeighborTable, SmritiConfig};

#[derive(Parser, Debug)]
#[command(
    name = "smriti-eval",
    about = "Evaluate loop-closure verification against ground truth"
)]
struct Args {
    /// Dataset file (JSON scans with features and ground truth)
    #[arg(long, value_name = "FILE")]
    dataset: PathBuf,

    /// Neighbour candidate file (defaults to <dataset>.nn)
    #[arg(long, value_name = "FILE")]
    nnfile: Option<PathBuf>,

    /// Configuration file (defaults to configs/smriti.yaml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of candidates considered per query
    #[arg(long)]
    neighborhood: Option<usize>,

    /// Temporal exclusion window around each query
    #[arg(long)]
    local_skip: Option<usize>,

    /// Histogram distance for descriptor comparison
    #[arg(long, value_enum)]
    distance: Option<HistogramDistance>,

    /// Correspondence proposal strategy
    #[arg(long, value_enum)]
    strategy: Option<CorrespondenceStrategy>,

    /// Feature position noise (meters)
    #[arg(long)]
    acceptance_sigma: Option<f64>,

    /// RANSAC success probability
    #[arg(long)]
    success: Option<f64>,

    /// Assumed inlier probability
    #[arg(long)]
    inlier: Option<f64>,

    /// Descriptor matching threshold
    #[arg(long)]
    matching_threshold: Option<f64>,

    /// RANSAC sampling seed
    #[arg(long)]
    seed: Option<u64>,

    /// Verify queries in parallel
    #[arg(long)]
    parallel: bool,

    /// Directory for the result tables
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Also write a JSON summary
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

impl Args {
    fn apply_overrides(&self, config: &mut SmritiConfig) {
        if let Some(k) = self.neighborhood {
            config.evaluation.neighborhood_size = k;
        }
        if let Some(skip) = self.local_skip {
            config.evaluation.local_skip = skip;
        }
        if self.parallel {
            config.evaluation.parallel = true;
        }
        if let Some(distance) = self.distance {
            config.descriptor.distance = distance;
        }
        if let Some(strategy) = self.strategy {
            config.matcher.strategy = strategy;
        }
        if let Some(sigma) = self.acceptance_sigma {
            config.matcher.acceptance_sigma = sigma;
        }
        if let Some(p) = self.success {
            config.matcher.success_probability = p;
        }
        if let Some(p) = self.inlier {
            config.matcher.inlier_probability = p;
        }
        if let Some(threshold) = self.matching_threshold {
            config.matcher.matching_threshold = threshold;
        }
        if let Some(seed) = self.seed {
            config.matcher.seed = seed;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = Some(dir.to_string_lossy().into_owned());
        }
        if let Some(json) = &self.json {
            config.output.json_summary = Some(json.to_string_lossy().into_owned());
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("Evaluation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> smriti::Result<()> {
    let mut config = match &args.config {
        Some(path) => SmritiConfig::load(path)?,
        None => SmritiConfig::load_default()?,
    };
    args.apply_overrides(&mut config);

    let nnfile = args
        .nnfile
        .clone()
        .unwrap_or_else(|| args.dataset.with_extension("nn"));

    log::info!("Smriti loop-closure evaluation");
    log::info!("Dataset: {}", args.dataset.display());
    log::info!("Neighbour file: {}", nnfile.display());
    config.log_summary();

    let dataset = Dataset::load(&args.dataset, config.descriptor.distance)?;
    let detector = dataset.detector.clone().unwrap_or_else(|| "unknown".to_string());
    let descriptor = dataset
        .descriptor_kind()
        .map(|kind| kind.tag())
        .unwrap_or("unknown");
    log::info!(
        "Loaded {} scans ({} features, {:.1} per scan), detector={}, descriptor={}",
        dataset.store.len(),
        dataset.store.total_features(),
        dataset.store.mean_features_per_scan(),
        detector,
        descriptor
    );

    let (table, candidate_time) = timed(|| NeighborTable::load(&nnfile));
    let table = table?;
    log::info!("Loaded {} candidate rows", table.len());

    let mut state = EvaluationState::new();
    let extraction = PhaseTimings::from_extraction(dataset.extraction_time);
    state.record_extraction(extraction.detection, extraction.description);
    state.record_candidate_generation(candidate_time);

    let verifier = PairwiseVerifier::new(RansacFeatureSetMatcher::new(config.matcher.clone()));
    let evaluator = MatchEvaluator::new(&dataset.store, verifier, config.evaluation.clone());
    EvaluationRun::new(evaluator).execute(&table, &mut state)?;

    let summary = state.summary();
    summary.log();

    if config.output.write_tables {
        let names = OutputNames {
            stem: output_stem(&args.dataset, config.output.directory.as_deref()),
            detector,
            descriptor: descriptor.to_string(),
            distance: config.descriptor.distance.tag().to_string(),
            neighborhood: config.evaluation.neighborhood_size,
        };
        write_tables(&names, &summary)?;
    }

    if let Some(path) = &config.output.json_summary {
        write_json_summary(Path::new(path), &summary)?;
    }

    Ok(())
}

/// Dataset path without extension, optionally moved into `directory`.
fn output_stem(dataset: &Path, directory: Option<&str>) -> PathBuf {
    let stem = dataset.with_extension("");
    match (directory, stem.file_name()) {
        (Some(dir), Some(name)) => Path::new(dir).join(name),
        _ => stem,
    }
}
