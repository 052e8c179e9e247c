//! Data models for yearly channel analyses.
//!
//! This module mirrors the `analysis_data_{year}.json` documents written by
//! the ingestion pipeline. The schema is the superset of every document
//! variant seen so far; fields that only later variants carry are defaulted.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A label → count mapping that keeps the document's key order.
///
/// Several maps in the document are already ranked by the producer
/// (reaction distribution, repeated words), so order is data here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCounts(Vec<(String, u64)>);

impl OrderedCounts {
    /// Build from `(label, count)` pairs, keeping their order.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        let mut counts = Self::default();
        for (key, value) in pairs {
            counts.insert(key.into(), value);
        }
        counts
    }

    /// Insert or overwrite a label. New labels go to the end.
    pub fn insert(&mut self, key: String, value: u64) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.values().sum()
    }
}

impl Serialize for OrderedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedCountsVisitor;

impl<'de> Visitor<'de> for OrderedCountsVisitor {
    type Value = OrderedCounts;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of labels to non-negative counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut counts = OrderedCounts(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((key, value)) = access.next_entry::<String, u64>()? {
            counts.insert(key, value);
        }
        Ok(counts)
    }
}

impl<'de> Deserialize<'de> for OrderedCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedCountsVisitor)
    }
}

/// A single channel post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelegramMessage {
    pub id: u64,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub date_utc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_utc_d: Option<String>,
    #[serde(default)]
    pub date_cuba: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_cuba_d: Option<String>,
    #[serde(default)]
    pub reactions: OrderedCounts,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub text: String,
    /// Ranking value attached to extremal and top-N messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl TelegramMessage {
    /// First `max_chars` characters of the text, on one line.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let flat: String = self.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }
}

/// Kinds of posts the producer classifies messages into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageType {
    GeneralInformation,
    Daf,
    FailureByZone,
    DailyResume,
    BlockInformation,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::GeneralInformation,
        MessageType::Daf,
        MessageType::FailureByZone,
        MessageType::DailyResume,
        MessageType::BlockInformation,
    ];

    /// Numeric id used as the key in `distribution_message`.
    pub fn id(self) -> u8 {
        match self {
            MessageType::GeneralInformation => 1,
            MessageType::Daf => 2,
            MessageType::FailureByZone => 3,
            MessageType::DailyResume => 4,
            MessageType::BlockInformation => 5,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            MessageType::GeneralInformation => "Información General",
            MessageType::Daf => "DAF",
            MessageType::FailureByZone => "Afectaciones por Zonas",
            MessageType::DailyResume => "Resumen Diario",
            MessageType::BlockInformation => "Afectaciones de Bloques",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MessageType::GeneralInformation => "Noticias generales, mantenimientos planificados, avisos institucionales y otras informaciones de interés.",
            MessageType::Daf => "Disparado Automático por Frecuencia (DAF).",
            MessageType::FailureByZone => "Reportes específicos de averías o interrupciones en municipios, repartos o zonas determinadas.",
            MessageType::DailyResume => "Resumen estadístico y descriptivo del comportamiento del servicio eléctrico durante el día anterior.",
            MessageType::BlockInformation => "Información relacionada con la programación, rotación y afectación de los bloques de apagón.",
        }
    }
}

/// Statistics for one outage rotation block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockAnalysis {
    pub number: u32,
    #[serde(default)]
    pub mentions: u64,
    #[serde(default)]
    pub declared_recoveries: u64,
    #[serde(default)]
    pub declared_affectations: u64,
    #[serde(default)]
    pub declared_emergencies: u64,
    #[serde(default)]
    pub estimated_affected_seconds: u64,
    /// Outage seconds per weekday, Monday first.
    #[serde(default)]
    pub weekday_off_seconds: Vec<u64>,
    /// Average outage seconds per weekday, Monday first. May be fractional.
    #[serde(default)]
    pub weekday_off_avg_seconds: Vec<f64>,
}

/// A national grid (SEN) collapse, from the disconnection notice to full recovery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenFailureEvent {
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_d: Option<String>,
    #[serde(default)]
    pub start_message: Option<TelegramMessage>,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date_d: Option<String>,
    #[serde(default)]
    pub end_message: Option<TelegramMessage>,
    #[serde(default)]
    pub estimated_duration_seconds: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenAnalysis {
    #[serde(default)]
    pub mentions: u64,
    #[serde(default)]
    pub total_failure_events: u64,
    #[serde(default)]
    pub failure_events: Vec<SenFailureEvent>,
}

/// The full statistics document for one calendar year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearAnalysis {
    #[serde(default)]
    pub sync_date: String,
    pub year: i32,
    pub first_message: Option<TelegramMessage>,
    pub last_message: Option<TelegramMessage>,
    pub shortest_message: Option<TelegramMessage>,
    pub longest_message: Option<TelegramMessage>,

    pub total_views: u64,
    pub total_messages: u64,
    #[serde(default)]
    pub total_erased_messages: u64,
    pub total_replies: u64,
    pub total_reactions: u64,
    pub total_positive_reactions: u64,
    pub total_negative_reactions: u64,

    #[serde(default)]
    pub avg_views: u64,
    #[serde(default)]
    pub avg_replies: u64,
    #[serde(default)]
    pub avg_reactions: u64,
    #[serde(default)]
    pub avg_positive_reactions: u64,
    #[serde(default)]
    pub avg_negative_reactions: u64,
    #[serde(default)]
    pub avg_text_length: u64,

    #[serde(default)]
    pub monthly_views: OrderedCounts,
    #[serde(default)]
    pub monthly_replies: OrderedCounts,
    #[serde(default)]
    pub monthly_reactions: OrderedCounts,
    #[serde(default)]
    pub monthly_messages: OrderedCounts,
    #[serde(default)]
    pub daily_messages: OrderedCounts,

    #[serde(default)]
    pub distribution_message: OrderedCounts,
    #[serde(default)]
    pub distribution_reaction: OrderedCounts,

    #[serde(default)]
    pub top3_most_viewed_messages: Vec<TelegramMessage>,
    #[serde(default)]
    pub top3_most_replied_messages: Vec<TelegramMessage>,
    #[serde(default)]
    pub top3_most_positive_reaction_messages: Vec<TelegramMessage>,
    #[serde(default)]
    pub top3_most_negative_reaction_messages: Vec<TelegramMessage>,

    #[serde(default)]
    pub top25_most_repeated_words: OrderedCounts,

    #[serde(default)]
    pub blocks_analysis: Vec<BlockAnalysis>,
    #[serde(default)]
    pub sen_analysis: SenAnalysis,
}
