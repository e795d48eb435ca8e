//! Token cost estimation for `DeepSeek` models

/// Per-million-token pricing for one model (USD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    /// Cost per million prompt tokens
    pub prompt_per_mtok: f64,
    /// Cost per million completion tokens
    pub completion_per_mtok: f64,
}

const CHAT_PRICING: ModelPricing = ModelPricing {
    prompt_per_mtok: 0.14,
    completion_per_mtok: 0.28,
};

const REASONER_PRICING: ModelPricing = ModelPricing {
    prompt_per_mtok: 0.55,
    completion_per_mtok: 2.19,
};

const PRICING: &[(&str, ModelPricing)] = &[("deepseek-chat", CHAT_PRICING), ("deepseek-reasoner", REASONER_PRICING)];

/// Pricing for a model, falling back to chat-tier pricing for unknown ids
pub fn pricing_for(model: &str) -> ModelPricing {
    PRICING
        .iter()
        .find(|(id, _)| *id == model)
        .map_or(CHAT_PRICING, |(_, pricing)| *pricing)
}

/// Estimate the USD cost of a completion
pub fn calculate_cost(prompt_tokens: u32, completion_tokens: u32, model: &str) -> f64 {
    let pricing = pricing_for(model);
    let prompt_cost = (f64::from(prompt_tokens) / 1_000_000.0) * pricing.prompt_per_mtok;
    let completion_cost = (f64::from(completion_tokens) / 1_000_000.0) * pricing.completion_per_mtok;
    prompt_cost + completion_cost
}

/// Render a cost for display: four decimals below one cent, two otherwise
pub fn format_cost(cost: f64) -> String {
    if cost < 0.01 {
        format!("${cost:.4}")
    } else {
        format!("${cost:.2}")
    }
}
