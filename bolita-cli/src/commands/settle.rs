use crate::ticket::{ResultBook, Ticket};
use anyhow::{bail, Context};
use bolita_core::{CalculationResult, EngineConfig, LotteryResult};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use uuid::Uuid;

/// Winners of one ticket across all of its dates and tracks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketReport {
    pub ticket_id: Uuid,
    pub winners: Vec<DatedWin>,
    pub missing_results: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatedWin {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub win: CalculationResult,
}

impl TicketReport {
    pub fn total_prize(&self) -> f64 {
        self.winners.iter().map(|w| w.win.prize).sum()
    }
}

pub async fn load_tickets(path: &Path) -> anyhow::Result<Vec<Ticket>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read tickets from {}", path.display()))?;
    let tickets: Vec<Ticket> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid tickets file {}", path.display()))?;

    for ticket in &tickets {
        if let Some((bet, amount)) = ticket.negative_amount() {
            bail!("Ticket {} play {} has negative amount {}", ticket.id, bet, amount);
        }
    }
    Ok(tickets)
}

pub async fn load_results(path: &Path) -> anyhow::Result<ResultBook> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read results from {}", path.display()))?;
    let results: Vec<LotteryResult> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid results file {}", path.display()))?;
    Ok(ResultBook::new(results))
}

/// Settle every ticket, one task per ticket.
pub async fn settle_tickets(
    tickets: Vec<Ticket>,
    book: Arc<ResultBook>,
    config: Arc<EngineConfig>,
) -> anyhow::Result<Vec<TicketReport>> {
    let table = Arc::new(config.prize_table());
    let settler = Arc::new(config.settler());

    let mut tasks = JoinSet::new();
    for (index, ticket) in tickets.into_iter().enumerate() {
        let book = Arc::clone(&book);
        let table = Arc::clone(&table);
        let settler = Arc::clone(&settler);

        tasks.spawn(async move {
            let plays = ticket.plays(settler.regions());
            let mut winners = Vec::new();
            let mut missing_results = 0;

            for date in &ticket.dates {
                for track in &ticket.tracks {
                    let Some(result) = book.get(*date, track) else {
                        tracing::warn!("No result for {} on {}", track, date);
                        missing_results += 1;
                        continue;
                    };
                    winners.extend(
                        settler
                            .settle_batch(&plays, result, &table)
                            .into_iter()
                            .map(|win| DatedWin { date: *date, win }),
                    );
                }
            }

            let report = TicketReport {
                ticket_id: ticket.id,
                winners,
                missing_results,
            };
            (index, report)
        });
    }

    let mut reports = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        reports.push(joined.context("Settlement task failed")?);
    }
    // keep input order
    reports.sort_by_key(|(index, _)| *index);

    Ok(reports.into_iter().map(|(_, report)| report).collect())
}

pub async fn handle_settle(
    tickets_path: &Path,
    results_path: &Path,
    json: bool,
    config: EngineConfig,
) -> anyhow::Result<()> {
    let tickets = load_tickets(tickets_path).await?;
    let book = load_results(results_path).await?;
    if book.is_empty() {
        tracing::warn!("Results file {} has no dated results", results_path.display());
    }

    tracing::info!("Settling {} tickets against {} results", tickets.len(), book.len());
    let reports = settle_tickets(tickets, Arc::new(book), Arc::new(config)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Ticket", "Date", "Track", "Bet", "Game", "Wager", "Amount", "Match", "Prize",
    ]);

    let mut grand_total = 0.0;
    for report in &reports {
        for dated in &report.winners {
            let win = &dated.win;
            table.add_row(vec![
                report.ticket_id.to_string()[..8].to_string(),
                dated.date.to_string(),
                win.track.clone(),
                win.bet_number.clone(),
                win.game_mode.to_string(),
                win.wager_type.to_string(),
                format!("{:.2}", win.wager_amount),
                win.match_type.clone(),
                format!("{:.2}", win.prize),
            ]);
        }
        if report.missing_results > 0 {
            println!(
                "Ticket {}: {} draw(s) without a published result",
                report.ticket_id, report.missing_results
            );
        }
        grand_total += report.total_prize();
    }

    let winning_tickets = reports.iter().filter(|r| !r.winners.is_empty()).count();
    if winning_tickets == 0 {
        println!("No winning plays.");
    } else {
        println!("{}", table);
    }
    println!(
        "Winning tickets: {} of {}, total prizes: {:.2}",
        winning_tickets,
        reports.len(),
        grand_total
    );

    Ok(())
}

pub async fn handle_total(tickets_path: &Path, config: &EngineConfig) -> anyhow::Result<()> {
    let tickets = load_tickets(tickets_path).await?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Ticket", "Plays", "Tracks", "Dates", "Total"]);

    for ticket in &tickets {
        table.add_row(vec![
            ticket.id.to_string(),
            ticket.plays.len().to_string(),
            ticket.tracks.len().to_string(),
            ticket.dates.len().to_string(),
            format!("{:.2}", ticket.total(&config.regions)),
        ]);
    }

    println!("{}", table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickets() -> Vec<Ticket> {
        serde_json::from_str(
            r#"[
                {
                    "tracks": ["New York", "Florida"],
                    "dates": ["2026-10-18", "2026-10-19"],
                    "plays": [{ "betNumber": "1234", "straightAmount": 1 }]
                },
                {
                    "tracks": ["Nacional"],
                    "dates": ["2026-10-18"],
                    "plays": [{ "betNumber": "12x34", "straightAmount": 1 }]
                }
            ]"#,
        )
        .unwrap()
    }

    fn book() -> ResultBook {
        serde_json::from_str::<Vec<LotteryResult>>(
            r#"[
                { "track": "New York", "date": "2026-10-18", "pick3": "001", "pick4": "1234" },
                { "track": "Florida", "date": "2026-10-18", "pick3": "001", "pick4": "1234" },
                { "track": "Nacional", "date": "2026-10-18", "first": "12", "second": "34", "third": "56" }
            ]"#,
        )
        .map(ResultBook::new)
        .unwrap()
    }

    #[tokio::test]
    async fn test_settle_tickets_in_order() {
        let reports = settle_tickets(tickets(), Arc::new(book()), Arc::new(EngineConfig::default()))
            .await
            .unwrap();

        assert_eq!(reports.len(), 2);

        // New York pays full, Florida half; the 19th has no results
        assert_eq!(reports[0].winners.len(), 2);
        assert_eq!(reports[0].total_prize(), 7500.0);
        assert_eq!(reports[0].missing_results, 2);

        assert_eq!(reports[1].winners.len(), 1);
        assert_eq!(reports[1].winners[0].win.match_type, "Palé Full");
        assert_eq!(reports[1].total_prize(), 1300.0);
    }

    #[tokio::test]
    async fn test_negative_amounts_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"[{"tracks": ["Florida"], "dates": ["2026-10-18"], "plays": [{"betNumber": "123", "boxAmount": -2}]}]"#,
        )
        .unwrap();

        assert!(load_tickets(file.path()).await.is_err());
    }
}
