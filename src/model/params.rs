use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const TOP_P_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const RETRIEVAL_K_RANGE: RangeInclusive<usize> = 1..=10;

/// Sampling and retrieval knobs exposed as sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub temperature: f32,
    pub top_p: f32,
    pub retrieval_k: usize,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
            retrieval_k: 3,
        }
    }
}

impl GenerationParameters {
    pub fn validate(&self) -> Result<(), String> {
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(format!(
                "temperature {} outside {:?}",
                self.temperature, TEMPERATURE_RANGE
            ));
        }
        if !TOP_P_RANGE.contains(&self.top_p) {
            return Err(format!("top_p {} outside {:?}", self.top_p, TOP_P_RANGE));
        }
        if !RETRIEVAL_K_RANGE.contains(&self.retrieval_k) {
            return Err(format!(
                "retrieval_k {} outside {:?}",
                self.retrieval_k, RETRIEVAL_K_RANGE
            ));
        }
        Ok(())
    }

    /// Pulls every field back inside its slider range.
    pub fn clamped(self) -> Self {
        Self {
            temperature: clamp_f32(self.temperature, TEMPERATURE_RANGE),
            top_p: clamp_f32(self.top_p, TOP_P_RANGE),
            retrieval_k: self
                .retrieval_k
                .clamp(*RETRIEVAL_K_RANGE.start(), *RETRIEVAL_K_RANGE.end()),
        }
    }
}

fn clamp_f32(v: f32, range: RangeInclusive<f32>) -> f32 {
    if v.is_nan() {
        *range.start()
    } else {
        v.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GenerationParameters::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let p = GenerationParameters {
            temperature: 2.5,
            ..Default::default()
        };
        assert!(p.validate().is_err());

        let p = GenerationParameters {
            retrieval_k: 0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn clamped_lands_in_range() {
        let p = GenerationParameters {
            temperature: f32::NAN,
            top_p: 3.0,
            retrieval_k: 99,
        }
        .clamped();
        assert_eq!(p.temperature, 0.0);
        assert_eq!(p.top_p, 1.0);
        assert_eq!(p.retrieval_k, 10);
        assert!(p.validate().is_ok());
    }
}
