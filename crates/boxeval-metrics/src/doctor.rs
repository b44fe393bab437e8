use anyhow::Result;

use crate::batch::GenerateConfig;
use crate::loss::LossWeights;

pub fn check_weights(w: &LossWeights) -> Result<()> {
    anyhow::ensure!(w.center_weight.is_finite() && w.center_weight >= 0.0, "loss.center_weight invalid");
    anyhow::ensure!(w.aspect_weight.is_finite() && w.aspect_weight >= 0.0, "loss.aspect_weight invalid");
    Ok(())
}

pub fn check_generate(g: &GenerateConfig) -> Result<()> {
    anyhow::ensure!(g.count >= 1, "generate.count must be >= 1");
    anyhow::ensure!(g.min_size > 0.0 && g.min_size <= g.max_size, "generate size range invalid");
    anyhow::ensure!(g.max_size <= g.coord_max, "generate.max_size exceeds coord_max");
    anyhow::ensure!(g.jitter >= 0.0 && g.jitter < g.min_size, "generate.jitter out of range");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass() {
        assert!(check_weights(&LossWeights::default()).is_ok());
        assert!(check_generate(&GenerateConfig::default()).is_ok());
    }

    #[test]
    fn bad_weights_rejected() {
        let w = LossWeights { center_weight: f32::NAN, aspect_weight: 0.8 };
        assert!(check_weights(&w).is_err());
        let w = LossWeights { center_weight: 1.5, aspect_weight: -0.1 };
        assert!(check_weights(&w).is_err());
    }

    #[test]
    fn oversized_boxes_rejected() {
        let g = GenerateConfig { max_size: 500.0, ..Default::default() };
        assert!(check_generate(&g).is_err());
    }
}
