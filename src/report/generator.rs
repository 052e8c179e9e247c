//! Report rendering.
//!
//! Renders a [`YearSummary`] as Markdown, JSON, or a compact terminal
//! overview.

use crate::metrics::duration::format_duration;
use crate::metrics::heatmap::{WeeklyMatrix, WeeklyMode, WEEKDAYS_SHORT};
use crate::metrics::number::{format_axis_tick, format_percent, group_digits};
use crate::metrics::ranking::podium;
use crate::report::summary::{MessageLine, RankedList, SenSummary, YearSummary};
use anyhow::Result;

/// Width of the widest bar in the monthly chart.
const BAR_WIDTH: usize = 30;

/// Generate a complete Markdown report for one year.
pub fn generate_markdown_report(summary: &YearSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("# UNE Unwrapped {}\n\n", summary.year));
    if !summary.synced_at.is_empty() {
        output.push_str(&format!("*Datos sincronizados: {}*\n\n", summary.synced_at));
    }

    output.push_str(&generate_totals_section(summary));
    output.push_str(&generate_distribution_section(summary));
    output.push_str(&generate_monthly_section(summary));
    output.push_str(&generate_highlights_section(summary));
    output.push_str(&generate_rankings_section(&summary.rankings));
    output.push_str(&generate_words_section(summary));
    output.push_str(&generate_blocks_section(summary));
    output.push_str(&generate_sen_section(&summary.sen));
    output.push_str(&generate_footer());

    output
}

/// Totals and averages tables.
fn generate_totals_section(summary: &YearSummary) -> String {
    let mut section = String::new();

    section.push_str("## Totales\n\n");
    section.push_str("| Métrica | Valor |\n");
    section.push_str("|:---|---:|\n");
    for stat in &summary.totals {
        section.push_str(&format!("| {} | {} |\n", stat.label, stat.display));
    }
    section.push('\n');

    section.push_str("### Promedios\n\n");
    section.push_str("| Métrica | Valor |\n");
    section.push_str("|:---|---:|\n");
    for stat in &summary.averages {
        section.push_str(&format!("| {} | {} |\n", stat.label, stat.display));
    }
    section.push('\n');

    section
}

/// Reaction sentiment, reaction spectrum and message types.
fn generate_distribution_section(summary: &YearSummary) -> String {
    let mut section = String::new();

    section.push_str("## Distribución\n\n");
    section.push_str(&format!(
        "- 👍 Reacciones positivas: **{}**\n- 👎 Reacciones negativas: **{}**\n\n",
        format_percent(summary.reactions.positive),
        format_percent(summary.reactions.negative)
    ));

    if !summary.reaction_spectrum.is_empty() {
        section.push_str("### Espectro de reacciones\n\n");
        section.push_str("| Reacción | Cantidad | % |\n");
        section.push_str("|:---:|---:|---:|\n");
        for slice in &summary.reaction_spectrum {
            section.push_str(&format!(
                "| {} | {} | {} |\n",
                slice.label,
                group_digits(slice.count),
                format_percent(slice.percentage)
            ));
        }
        section.push('\n');
    }

    if !summary.message_types.is_empty() {
        section.push_str("### Tipos de mensaje\n\n");
        section.push_str("| Tipo | Mensajes | Cobertura |\n");
        section.push_str("|:---|---:|---:|\n");
        for slice in &summary.message_types {
            section.push_str(&format!(
                "| {} | {} | {} |\n",
                slice.label,
                group_digits(slice.count),
                format_percent(slice.percentage)
            ));
        }
        section.push('\n');
    }

    section
}

/// Monthly messages as a text bar chart.
fn generate_monthly_section(summary: &YearSummary) -> String {
    let mut section = String::new();

    section.push_str("## Mensajes por mes\n\n```\n");
    let max = summary
        .monthly_messages
        .iter()
        .map(|p| p.value)
        .max()
        .unwrap_or(0);
    for point in &summary.monthly_messages {
        let width = if max == 0 {
            0
        } else {
            (point.value as f64 / max as f64 * BAR_WIDTH as f64).round() as usize
        };
        section.push_str(&format!(
            "{} {:<width$} {}\n",
            point.short,
            "█".repeat(width),
            format_axis_tick(point.value),
            width = BAR_WIDTH
        ));
    }
    section.push_str("```\n\n");

    if let Some(ref month) = summary.busiest_month {
        section.push_str(&format!(
            "Mes más activo: **{}** ({} mensajes). Día más activo: {} mensajes; promedio diario: {:.0}.\n\n",
            month.month,
            group_digits(month.value),
            group_digits(summary.daily.busiest_day),
            summary.daily.average
        ));
    }

    section
}

/// First, last, shortest and longest messages.
fn generate_highlights_section(summary: &YearSummary) -> String {
    let highlights = [
        ("Primer mensaje", &summary.first_message),
        ("Último mensaje", &summary.last_message),
        ("Mensaje más corto", &summary.shortest_message),
        ("Mensaje más largo", &summary.longest_message),
    ];

    if highlights.iter().all(|(_, m)| m.is_none()) {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Mensajes destacados\n\n");

    for (title, message) in highlights {
        if let Some(message) = message {
            section.push_str(&format!("### {}\n\n", title));
            section.push_str(&generate_message_block(message, None));
        }
    }

    section
}

fn generate_message_block(message: &MessageLine, unit: Option<&str>) -> String {
    let mut block = String::new();

    block.push_str(&format!("> {}\n\n", message.excerpt));
    let mut meta = vec![message.date.clone()];
    if let (Some(count), Some(unit)) = (message.count, unit) {
        meta.push(format!("{} {}", group_digits(count), unit));
    }
    if !message.link.is_empty() {
        meta.push(format!("[ver en Telegram]({})", message.link));
    }
    block.push_str(&format!("*{}*\n\n", meta.join(" · ")));

    block
}

fn generate_rankings_section(rankings: &[RankedList]) -> String {
    if rankings.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Top mensajes\n\n");

    for list in rankings {
        section.push_str(&format!("### {}\n\n", list.title));
        for (rank, message) in list.messages.iter().enumerate() {
            let badge = podium(rank)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}.", rank + 1));
            section.push_str(&format!("{} ", badge));
            section.push_str(&generate_message_block(message, Some(list.unit)));
        }
    }

    section
}

fn generate_words_section(summary: &YearSummary) -> String {
    if summary.words.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Palabras más repetidas\n\n");
    section.push_str("| Palabra | Apariciones | Tamaño |\n");
    section.push_str("|:---|---:|---:|\n");
    for word in &summary.words {
        section.push_str(&format!(
            "| {} | {} | {:.2}rem |\n",
            word.word,
            group_digits(word.count),
            word.size_rem
        ));
    }
    section.push('\n');

    section
}

fn generate_blocks_section(summary: &YearSummary) -> String {
    if summary.blocks.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Bloques\n\n");
    section.push_str(
        "| Bloque | Menciones | Afectaciones | Restablecimientos | Emergencias | Tiempo afectado |\n",
    );
    section.push_str("|:---:|---:|---:|---:|---:|:---|\n");
    for block in &summary.blocks {
        section.push_str(&format!(
            "| B{} | {} | {} | {} | {} | {} |\n",
            block.number,
            group_digits(block.mentions),
            group_digits(block.affectations),
            group_digits(block.recoveries),
            group_digits(block.emergencies),
            block.affected
        ));
    }
    section.push('\n');

    if summary.weekly_matrix.has_data() {
        let title = match summary.weekly_matrix.mode {
            WeeklyMode::Total => "Patrón semanal de afectaciones (total)",
            WeeklyMode::Average => "Patrón semanal de afectaciones (promedio)",
        };
        section.push_str(&format!("### {}\n\n```\n", title));
        section.push_str(&render_weekly_matrix(&summary.weekly_matrix));
        section.push_str("```\n\n");
    }

    section
}

/// Blocks × weekdays grid of intensity glyphs.
pub fn render_weekly_matrix(matrix: &WeeklyMatrix) -> String {
    let mut grid = String::new();

    grid.push_str("    ");
    for day in WEEKDAYS_SHORT {
        grid.push_str(&format!(" {}", day));
    }
    grid.push('\n');

    for row in &matrix.rows {
        grid.push_str(&format!("B{:<3}", row.block));
        for value in row.values {
            let glyph = matrix.level(value).glyph();
            grid.push_str(&format!("  {} ", glyph));
        }
        grid.push('\n');
    }

    grid.push_str(&format!("máx: {}\n", format_duration(matrix.max)));
    grid
}

fn generate_sen_section(sen: &SenSummary) -> String {
    let mut section = String::new();

    section.push_str("## Sistema Eléctrico Nacional\n\n");
    section.push_str(&format!(
        "- Menciones del SEN: **{}**\n- Caídas totales: **{}**\n- Tiempo total sin sistema: **{}**\n\n",
        group_digits(sen.mentions),
        group_digits(sen.total_events),
        sen.total_duration
    ));

    if sen.events.is_empty() {
        return section;
    }

    section.push_str("| Inicio | Fin | Duración |\n");
    section.push_str("|:---|:---|:---|\n");
    for event in &sen.events {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            event.start, event.end, event.duration
        ));
    }
    section.push('\n');

    section
}

fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Generado por UNE Unwrapped*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(summaries: &[YearSummary]) -> Result<String> {
    match summaries {
        [single] => serde_json::to_string_pretty(single).map_err(Into::into),
        many => serde_json::to_string_pretty(many).map_err(Into::into),
    }
}

/// Short terminal overview, in the spirit of a stats dashboard.
pub fn generate_text_summary(summary: &YearSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n📊 UNE Unwrapped {}\n", summary.year));
    for stat in &summary.totals {
        out.push_str(&format!("   {:<20} {}\n", stat.label, stat.display));
    }
    out.push_str(&format!(
        "   👍 {} | 👎 {}\n",
        format_percent(summary.reactions.positive),
        format_percent(summary.reactions.negative)
    ));

    if let Some(ref month) = summary.busiest_month {
        out.push_str(&format!(
            "   Mes más activo: {} ({})\n",
            month.month,
            group_digits(month.value)
        ));
    }

    if let Some(top) = summary.message_types.first() {
        out.push_str(&format!(
            "   Tipo más frecuente: {} ({})\n",
            top.label,
            format_percent(top.percentage)
        ));
    }

    if !summary.words.is_empty() {
        let words: Vec<&str> = summary.words.iter().take(5).map(|w| w.word.as_str()).collect();
        out.push_str(&format!("   Palabras: {}\n", words.join(", ")));
    }

    out.push_str(&format!(
        "   ⚡ SEN: {} caídas, {} sin sistema\n",
        summary.sen.total_events, summary.sen.total_duration
    ));

    if summary.weekly_matrix.has_data() {
        out.push('\n');
        out.push_str(&render_weekly_matrix(&summary.weekly_matrix));
    }

    out
}
