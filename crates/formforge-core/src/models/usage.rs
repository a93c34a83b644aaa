use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Token counts for one generation call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenCount {
    pub input: u64,
    pub output: u64,
}

/// Pricing per million tokens for a generation model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

/// What one form generation consumed, recorded alongside the stored
/// prompt for auditability.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenUsage {
    pub tokens: TokenCount,
    pub cost_usd: f64,
}

impl TokenCount {
    pub fn total(self) -> u64 {
        self.input + self.output
    }

    /// Price this count under the given model pricing.
    pub fn priced(self, pricing: ModelPricing) -> TokenUsage {
        let cost_usd = (self.input as f64 / 1_000_000.0) * pricing.input_per_million
            + (self.output as f64 / 1_000_000.0) * pricing.output_per_million;
        TokenUsage {
            tokens: self,
            cost_usd,
        }
    }
}
