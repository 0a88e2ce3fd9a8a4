//! Slash command implementations used by the Discord bot.

use tracing::instrument;

use crate::discord::bot::Context;
use crate::error::AppError;
use crate::history::{HistorySummary, PlayerLookup};
use crate::riot::Region;
use crate::riot::types::ApiError;

const COLUMNS: [&str; 8] = [
    "Outcome", "Queue", "Champion", "K/D/A", "Damage", "Length", "Pentas", "Date",
];

/// Show a player's recent match history
#[poise::command(slash_command)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id, player = %player))]
pub async fn match_history(
    ctx: Context<'_>,
    #[description = "Riot ID (Name#Tag) or a registered PUUID"] player: String,
    #[description = "How many matches to show (1-20)"]
    #[min = 1]
    #[max = 20]
    count: Option<u8>,
    #[description = "Routing region"] region: Option<Region>,
) -> Result<(), AppError> {
    let count = count.unwrap_or(ctx.data().default_history_count);
    let region = region.unwrap_or(ctx.data().default_region);
    let lookup = PlayerLookup::from_input(&player);

    // The aggregation can take a few seconds under upstream rate limits.
    ctx.defer().await?;

    match ctx
        .data()
        .history
        .get_match_history(lookup, region, count)
        .await
    {
        Ok(summary) => {
            ctx.say(render_summary(&summary)).await?;
        }
        Err(e) => {
            ctx.say(user_message(&e)).await?;
        }
    }
    Ok(())
}

/// One clear message per terminal failure category.
fn user_message(err: &ApiError) -> &'static str {
    match err {
        ApiError::NotFound => "❌ Player not found. Check the Riot ID and region.",
        ApiError::InvalidCredential(_) => {
            "❌ The bot's Riot API credential was rejected. Ping the operator."
        }
        ApiError::RateLimitExceeded { .. } | ApiError::UpstreamUnavailable { .. } => {
            "⏳ Riot's servers are struggling right now, try again in a moment."
        }
        ApiError::Network(_) | ApiError::UnexpectedStatus(_) => {
            "❌ Couldn't reach the Riot API. Try again later."
        }
    }
}

/// Render the summary as a monospace table, one line per match, plus an
/// explicit note whenever some matches could not be loaded.
fn render_summary(summary: &HistorySummary) -> String {
    if summary.rows.is_empty() {
        return format!(
            "No displayable matches for **{}** ({} of {} loaded).",
            summary.player, summary.succeeded, summary.requested
        );
    }

    let cells: Vec<[String; 8]> = summary
        .rows
        .iter()
        .map(|row| {
            [
                row.outcome.clone(),
                row.queue.clone(),
                row.champion.clone(),
                row.kda.clone(),
                row.damage.clone(),
                row.duration.clone(),
                row.penta_kills.to_string(),
                row.date.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths: [usize; 8] = COLUMNS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let render_line = |cells: &[String; 8]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header = render_line(&COLUMNS.map(str::to_string));
    let separator = "-".repeat(header.len());

    let mut lines = vec![header, separator];
    lines.extend(cells.iter().map(render_line));

    let mut out = format!(
        "Match history for **{}**:\n```\n{}\n```",
        summary.player,
        lines.join("\n")
    );
    if summary.failed > 0 {
        out.push_str(&format!(
            "\n⚠️ {} of {} matches loaded.",
            summary.succeeded, summary.requested
        ));
    }
    out
}
