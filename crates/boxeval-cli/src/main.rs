use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use boxeval_metrics::batch::{self, GenerateConfig};
use boxeval_metrics::doctor;
use boxeval_metrics::loss::{batch_loss, pair_loss, LossWeights};
use boxeval_metrics::Rect;

#[derive(Debug, Parser)]
#[command(name = "boxeval", version, about = "BoxEval - Batched Box-Match Loss Scoring")]
struct Cli {
    #[arg(long)]
    config: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a batch file with the configured weights.
    Score {
        #[arg(long)]
        batch: String,
    },
    /// Score the built-in two-pair sample batch.
    Demo,
    /// Write a randomized batch file.
    Generate {
        #[arg(long)]
        out: String,
        #[arg(long)]
        count: Option<usize>,
    },
    Doctor,
}

#[derive(Debug, serde::Deserialize)]
struct Config {
    loss: LossWeights,
    generate: Option<GenerateConfig>,
}

fn load_config(path: &str) -> Result<Config> {
    let s = std::fs::read_to_string(path).context("read config")?;
    Ok(toml::from_str(&s).context("parse config toml")?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    match cli.cmd {
        Command::Score { batch } => score(&cfg, &batch)?,
        Command::Demo => demo(&cfg)?,
        Command::Generate { out, count } => generate(&cfg, &out, count)?,
        Command::Doctor => run_doctor(&cfg)?,
    }
    Ok(())
}

fn score(cfg: &Config, batch_path: &str) -> Result<()> {
    let (preds, targets) = batch::load_batch(batch_path)?;
    report(&preds, &targets, &cfg.loss)
}

fn demo(cfg: &Config) -> Result<()> {
    let preds = vec![
        Rect::new(10.0, 10.0, 30.0, 30.0),
        Rect::new(50.0, 50.0, 70.0, 70.0),
    ];
    let targets = vec![
        Rect::new(15.0, 15.0, 35.0, 35.0),
        Rect::new(55.0, 52.0, 75.0, 78.0),
    ];
    report(&preds, &targets, &cfg.loss)
}

fn report(preds: &[Rect], targets: &[Rect], w: &LossWeights) -> Result<()> {
    let loss = batch_loss(preds, targets, w)?;
    for (i, (p, t)) in preds.iter().zip(targets).enumerate() {
        let s = pair_loss(*p, *t, w);
        info!(
            "pair {}: overlap={:.4} center_penalty={:.4} aspect_penalty={:.4} loss={:.4}",
            i, s.overlap, s.center_penalty, s.aspect_penalty, s.loss
        );
    }
    println!("batch loss: {:.6}", loss);
    Ok(())
}

fn generate(cfg: &Config, out: &str, count: Option<usize>) -> Result<()> {
    let mut gcfg = cfg.generate.clone().unwrap_or_default();
    if let Some(n) = count {
        gcfg.count = n;
    }
    doctor::check_generate(&gcfg)?;

    let pairs = batch::generate_batch(&gcfg);
    batch::save_batch(out, &pairs)?;
    info!("generate: wrote {} pairs to {}", pairs.len(), out);
    Ok(())
}

fn run_doctor(cfg: &Config) -> Result<()> {
    info!("doctor: starting");

    doctor::check_weights(&cfg.loss)?;
    if let Some(g) = &cfg.generate {
        doctor::check_generate(g)?;
    }

    info!("doctor: OK");
    Ok(())
}
