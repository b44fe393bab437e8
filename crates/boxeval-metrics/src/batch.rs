use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Rect;

/// One scored pair as it appears in a batch file, corner-array form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairEntry {
    pub pred: [f32; 4],
    pub target: [f32; 4],
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub pairs: Vec<PairEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateConfig {
    pub count: usize,
    pub coord_max: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub jitter: f32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            count: 8,
            coord_max: 100.0,
            min_size: 15.0,
            max_size: 40.0,
            jitter: 4.0,
        }
    }
}

pub fn load_batch(path: &str) -> Result<(Vec<Rect>, Vec<Rect>)> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read batch file {}", path))?;
    let file: BatchFile = toml::from_str(&s).context("parse batch toml")?;

    let mut preds = Vec::with_capacity(file.pairs.len());
    let mut targets = Vec::with_capacity(file.pairs.len());
    for p in &file.pairs {
        preds.push(Rect::from(p.pred));
        targets.push(Rect::from(p.target));
    }
    debug!("loaded {} pairs from {}", preds.len(), path);
    Ok((preds, targets))
}

pub fn save_batch(path: &str, pairs: &[PairEntry]) -> Result<()> {
    let file = BatchFile { pairs: pairs.to_vec() };
    let s = toml::to_string_pretty(&file).context("serialize batch toml")?;
    std::fs::write(path, s).with_context(|| format!("write batch file {}", path))?;
    Ok(())
}

/// Random batch: targets placed inside the coordinate range, predictions
/// derived by jittering each target corner.
pub fn generate_batch(cfg: &GenerateConfig) -> Vec<PairEntry> {
    let mut rng = rand::thread_rng();
    let mut pairs = Vec::with_capacity(cfg.count);

    for _ in 0..cfg.count {
        let w = rng.gen_range(cfg.min_size..=cfg.max_size);
        let h = rng.gen_range(cfg.min_size..=cfg.max_size);
        let x = rng.gen_range(0.0..=(cfg.coord_max - w).max(0.0));
        let y = rng.gen_range(0.0..=(cfg.coord_max - h).max(0.0));
        let target = [x, y, x + w, y + h];

        let mut pred = target;
        for c in &mut pred {
            *c += rng.gen_range(-cfg.jitter..=cfg.jitter);
        }
        pairs.push(PairEntry { pred, target });
    }
    pairs
}
