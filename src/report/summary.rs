//! Year summary assembly.
//!
//! Collects every derived metric a report shows into one serializable
//! structure, so the Markdown, JSON and terminal renderers agree.

use crate::metrics::dates::format_date;
use crate::metrics::duration::format_duration;
use crate::metrics::heatmap::{daily_activity, weekly_block_matrix, WeeklyMatrix, WeeklyMode};
use crate::metrics::number::format_number;
use crate::metrics::ranking::{ranked_messages, top_n};
use crate::metrics::ratio::{message_type_distribution, reaction_share, reaction_spectrum};
use crate::metrics::ratio::{ReactionShare, Share};
use crate::metrics::series::{monthly_series, peak_month, MonthPoint, SeriesKind};
use crate::metrics::theme::theme_for_year;
use crate::metrics::wordcloud::{word_cloud, SizeRange, WordSize};
use crate::models::{TelegramMessage, YearAnalysis};
use serde::Serialize;

const EXCERPT_CHARS: usize = 140;

/// How much to include in a summary.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Entries per ranked list.
    pub top_n: usize,
    pub word_sizes: SizeRange,
    pub weekly_mode: WeeklyMode,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            top_n: 3,
            word_sizes: SizeRange::default(),
            weekly_mode: WeeklyMode::Total,
        }
    }
}

/// A labelled figure with its compact display form.
#[derive(Debug, Clone, Serialize)]
pub struct StatLine {
    pub label: &'static str,
    pub value: u64,
    pub display: String,
}

impl StatLine {
    fn new(label: &'static str, value: u64) -> Self {
        Self {
            label,
            value,
            display: format_number(value),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageLine {
    pub id: u64,
    pub link: String,
    pub date: String,
    pub count: Option<u64>,
    pub excerpt: String,
}

impl MessageLine {
    fn from_message(message: &TelegramMessage) -> Self {
        Self {
            id: message.id,
            link: message.link.clone(),
            date: format_date(&message.date_cuba),
            count: message.count,
            excerpt: message.excerpt(EXCERPT_CHARS),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedList {
    pub title: &'static str,
    pub unit: &'static str,
    pub messages: Vec<MessageLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockLine {
    pub number: u32,
    pub mentions: u64,
    pub recoveries: u64,
    pub affectations: u64,
    pub emergencies: u64,
    pub affected_seconds: u64,
    pub affected: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenEventLine {
    pub start: String,
    pub end: String,
    pub duration_seconds: u64,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenSummary {
    pub mentions: u64,
    pub total_events: u64,
    pub total_duration: String,
    pub longest: Option<SenEventLine>,
    pub events: Vec<SenEventLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub busiest_day: u64,
    pub average: f64,
}

/// Everything a report about one year shows.
#[derive(Debug, Clone, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub synced_at: String,
    pub theme: &'static str,
    pub totals: Vec<StatLine>,
    pub averages: Vec<StatLine>,
    pub reactions: ReactionShare,
    pub reaction_spectrum: Vec<Share>,
    pub message_types: Vec<Share>,
    pub monthly_messages: Vec<MonthPoint>,
    pub busiest_month: Option<MonthPoint>,
    pub daily: DailySummary,
    pub first_message: Option<MessageLine>,
    pub last_message: Option<MessageLine>,
    pub shortest_message: Option<MessageLine>,
    pub longest_message: Option<MessageLine>,
    pub rankings: Vec<RankedList>,
    pub words: Vec<WordSize>,
    pub blocks: Vec<BlockLine>,
    pub weekly_matrix: WeeklyMatrix,
    pub sen: SenSummary,
}

impl YearSummary {
    pub fn build(analysis: &YearAnalysis, options: &SummaryOptions) -> Self {
        let monthly_messages = monthly_series(SeriesKind::Messages.counts(analysis));
        let busiest_month = peak_month(&monthly_messages).cloned();
        let daily = daily_activity(&analysis.daily_messages, analysis.year);

        Self {
            year: analysis.year,
            synced_at: format_date(&analysis.sync_date),
            theme: theme_for_year(analysis.year).name,
            totals: totals(analysis),
            averages: averages(analysis),
            reactions: reaction_share(analysis),
            reaction_spectrum: reaction_spectrum(
                &analysis.distribution_reaction,
                analysis.total_reactions,
            ),
            message_types: message_type_distribution(analysis),
            monthly_messages,
            busiest_month,
            daily: DailySummary {
                busiest_day: daily.max,
                average: daily.average,
            },
            first_message: analysis.first_message.as_ref().map(MessageLine::from_message),
            last_message: analysis.last_message.as_ref().map(MessageLine::from_message),
            shortest_message: analysis.shortest_message.as_ref().map(MessageLine::from_message),
            longest_message: analysis.longest_message.as_ref().map(MessageLine::from_message),
            rankings: rankings(analysis, options.top_n),
            words: word_cloud(&analysis.top25_most_repeated_words, options.word_sizes),
            blocks: blocks(analysis),
            weekly_matrix: weekly_block_matrix(&analysis.blocks_analysis, options.weekly_mode),
            sen: sen_summary(analysis),
        }
    }
}

fn totals(analysis: &YearAnalysis) -> Vec<StatLine> {
    vec![
        StatLine::new("Mensajes", analysis.total_messages),
        StatLine::new("Vistas", analysis.total_views),
        StatLine::new("Reacciones", analysis.total_reactions),
        StatLine::new("Comentarios", analysis.total_replies),
        StatLine::new("Mensajes borrados", analysis.total_erased_messages),
    ]
}

fn averages(analysis: &YearAnalysis) -> Vec<StatLine> {
    vec![
        StatLine::new("Vistas por mensaje", analysis.avg_views),
        StatLine::new("Comentarios por mensaje", analysis.avg_replies),
        StatLine::new("Reacciones por mensaje", analysis.avg_reactions),
        StatLine::new("Reacciones positivas por mensaje", analysis.avg_positive_reactions),
        StatLine::new("Reacciones negativas por mensaje", analysis.avg_negative_reactions),
        StatLine::new("Caracteres por mensaje", analysis.avg_text_length),
    ]
}

fn rankings(analysis: &YearAnalysis, n: usize) -> Vec<RankedList> {
    let lists: [(&'static str, &'static str, &Vec<TelegramMessage>); 4] = [
        ("Más vistos", "vistas", &analysis.top3_most_viewed_messages),
        ("Más comentados", "comentarios", &analysis.top3_most_replied_messages),
        (
            "Más reacciones positivas",
            "reacciones",
            &analysis.top3_most_positive_reaction_messages,
        ),
        (
            "Más reacciones negativas",
            "reacciones",
            &analysis.top3_most_negative_reaction_messages,
        ),
    ];

    lists
        .into_iter()
        .filter(|(_, _, messages)| !messages.is_empty())
        .map(|(title, unit, messages)| RankedList {
            title,
            unit,
            messages: ranked_messages(messages, n)
                .into_iter()
                .map(MessageLine::from_message)
                .collect(),
        })
        .collect()
}

fn blocks(analysis: &YearAnalysis) -> Vec<BlockLine> {
    let mut blocks: Vec<BlockLine> = analysis
        .blocks_analysis
        .iter()
        .map(|block| BlockLine {
            number: block.number,
            mentions: block.mentions,
            recoveries: block.declared_recoveries,
            affectations: block.declared_affectations,
            emergencies: block.declared_emergencies,
            affected_seconds: block.estimated_affected_seconds,
            affected: format_duration(block.estimated_affected_seconds),
        })
        .collect();
    blocks.sort_by_key(|b| b.number);
    blocks
}

fn sen_summary(analysis: &YearAnalysis) -> SenSummary {
    let events: Vec<SenEventLine> = analysis
        .sen_analysis
        .failure_events
        .iter()
        .map(|event| SenEventLine {
            start: format_date(&event.start_date),
            end: format_date(&event.end_date),
            duration_seconds: event.estimated_duration_seconds,
            duration: format_duration(event.estimated_duration_seconds),
        })
        .collect();

    let total_seconds: u64 = events.iter().map(|e| e.duration_seconds).sum();
    let longest = top_n(&events, 1, |e| e.duration_seconds)
        .first()
        .map(|e| (*e).clone());

    SenSummary {
        mentions: analysis.sen_analysis.mentions,
        total_events: analysis.sen_analysis.total_failure_events,
        total_duration: format_duration(total_seconds),
        longest,
        events,
    }
}
