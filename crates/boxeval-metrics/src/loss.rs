use anyhow::Result;
use serde::Deserialize;

use crate::{overlap_ratio, Rect, GEOM_EPS};

/// Relative contribution of the geometric penalty terms, loaded straight
/// from the `[loss]` config section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LossWeights {
    pub center_weight: f32,
    pub aspect_weight: f32,
}

impl Default for LossWeights {
    fn default() -> Self {
        Self { center_weight: 1.5, aspect_weight: 0.8 }
    }
}

/// Per-pair breakdown of the combined score.
#[derive(Debug, Clone, Copy)]
pub struct PairScore {
    pub overlap: f32,
    pub center_penalty: f32,
    pub aspect_penalty: f32,
    pub loss: f32,
}

fn dist_sq(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (x1 - x2) * (x1 - x2) + (y1 - y2) * (y1 - y2)
}

/// Score a single predicted box against its target.
///
/// The overlap ratio is discounted by the center displacement (normalized by
/// the enclosing-box diagonal) and the weighted aspect-ratio gap; the loss is
/// one minus that score. Not clamped, so a poor match can exceed 1 and a
/// perfect one lands at 0.
pub fn pair_loss(pred: Rect, target: Rect, w: &LossWeights) -> PairScore {
    let overlap = overlap_ratio(pred, target);

    let (pcx, pcy) = pred.center();
    let (tcx, tcy) = target.center();
    let center_dist_sq = dist_sq(pcx, pcy, tcx, tcy);

    // smallest box enclosing the pair
    let min_x = pred.x_min.min(target.x_min);
    let min_y = pred.y_min.min(target.y_min);
    let max_x = pred.x_max.max(target.x_max);
    let max_y = pred.y_max.max(target.y_max);
    let diag_sq = dist_sq(min_x, min_y, max_x, max_y) + GEOM_EPS;

    let center_penalty = center_dist_sq / diag_sq;
    let aspect_penalty = (pred.aspect_ratio() - target.aspect_ratio()).abs();

    // TODO: fold center_weight into the center term
    let adjusted = overlap - center_penalty - w.aspect_weight * aspect_penalty;

    PairScore { overlap, center_penalty, aspect_penalty, loss: 1.0 - adjusted }
}

/// Mean pair loss over an index-aligned batch.
///
/// Errors on mismatched lengths rather than truncating; an empty batch
/// scores 0.
pub fn batch_loss(preds: &[Rect], targets: &[Rect], w: &LossWeights) -> Result<f32> {
    anyhow::ensure!(
        preds.len() == targets.len(),
        "batch shape mismatch: {} predictions vs {} targets",
        preds.len(),
        targets.len()
    );
    if preds.is_empty() {
        return Ok(0.0);
    }

    let total: f32 = preds
        .iter()
        .zip(targets)
        .map(|(p, t)| pair_loss(*p, *t, w).loss)
        .sum();
    Ok(total / preds.len() as f32)
}
