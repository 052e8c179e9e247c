//! Shares and percentages.

use crate::metrics::ranking::stable_desc_by;
use crate::models::{MessageType, OrderedCounts, YearAnalysis};
use serde::Serialize;

/// Maximum number of emojis shown in the reaction spectrum.
pub const SPECTRUM_LIMIT: usize = 10;

/// `part` as a percentage of `total`; zero when `total` is zero.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

/// Positive and negative reactions as shares of all reactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReactionShare {
    pub positive: f64,
    pub negative: f64,
}

impl ReactionShare {
    /// Share of reactions that are neither positive nor negative.
    pub fn neutral(&self) -> f64 {
        (100.0 - self.positive - self.negative).max(0.0)
    }
}

pub fn reaction_share(analysis: &YearAnalysis) -> ReactionShare {
    ReactionShare {
        positive: percentage(analysis.total_positive_reactions, analysis.total_reactions),
        negative: percentage(analysis.total_negative_reactions, analysis.total_reactions),
    }
}

/// One labelled slice of a whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub count: u64,
    pub percentage: f64,
}

/// Each emoji's share of `total_reactions`, most used first, capped at
/// [`SPECTRUM_LIMIT`].
pub fn reaction_spectrum(distribution: &OrderedCounts, total_reactions: u64) -> Vec<Share> {
    let mut slices: Vec<Share> = distribution
        .iter()
        .map(|(emoji, count)| Share {
            label: emoji.to_string(),
            description: None,
            count,
            percentage: percentage(count, total_reactions),
        })
        .collect();

    stable_desc_by(&mut slices, |s| s.count);
    slices.truncate(SPECTRUM_LIMIT);
    slices
}

/// Message-type coverage over all messages, most frequent first.
pub fn message_type_distribution(analysis: &YearAnalysis) -> Vec<Share> {
    let mut slices: Vec<Share> = analysis
        .distribution_message
        .iter()
        .map(|(type_id, count)| {
            let message_type = type_id.parse::<u8>().ok().and_then(MessageType::from_id);
            let (label, description) = match message_type {
                Some(t) => (t.label().to_string(), t.description().to_string()),
                None => (
                    format!("Tipo {}", type_id),
                    "Sin descripción disponible.".to_string(),
                ),
            };
            Share {
                label,
                description: Some(description),
                count,
                percentage: percentage(count, analysis.total_messages),
            }
        })
        .collect();

    stable_desc_by(&mut slices, |s| s.count);
    slices
}
