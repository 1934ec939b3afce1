use bolita_core::{classify, price, EngineConfig, GameMode};
use clap::Args;
use std::collections::BTreeSet;

/// Track and Pulito selection shared by `classify` and `price`.
#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    /// Track selected on the slip (repeatable)
    #[arg(short, long = "track")]
    pub tracks: Vec<String>,

    /// Pulito position toggled, 1-4 (repeatable)
    #[arg(short, long = "pulito", value_parser = clap::value_parser!(u8).range(1..=4))]
    pub pulito_positions: Vec<u8>,
}

impl Selection {
    pub fn classify(&self, bet: &str, config: &EngineConfig) -> GameMode {
        let tracks: BTreeSet<String> = self.tracks.iter().cloned().collect();
        classify(bet, &tracks, &self.pulito_positions, &config.regions)
    }
}

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Bet number as keyed in
    pub bet: String,

    /// Game tag, e.g. "Pick 3" or "Pulito-1,3"; inferred from the selection when omitted
    #[arg(short, long)]
    pub mode: Option<GameMode>,

    #[command(flatten)]
    pub selection: Selection,

    /// Straight amount
    #[arg(long, value_parser = parse_amount)]
    pub straight: Option<f64>,

    /// Box amount
    #[arg(long = "box", value_parser = parse_amount)]
    pub boxed: Option<f64>,

    /// Combo amount
    #[arg(long, value_parser = parse_amount)]
    pub combo: Option<f64>,
}

pub fn handle_classify(
    bet: &str,
    selection: &Selection,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let mode = selection.classify(bet, config);
    tracing::debug!("Classified '{}' as {}", bet, mode);
    println!("{}", mode);
    Ok(())
}

pub fn handle_price(args: PriceArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let mode = match args.mode {
        Some(mode) => mode,
        None => args.selection.classify(&args.bet, config),
    };

    let total = price(&args.bet, &mode, args.straight, args.boxed, args.combo);

    println!("Bet:   {}", args.bet);
    println!("Game:  {}", mode);
    println!("Price: {:.2}", total);
    Ok(())
}

/// Wager amounts must be finite and non-negative.
pub fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid amount", s))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("amount must be non-negative, got {}", s));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("2.5"), Ok(2.5));
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_selection_classifies_with_config_regions() {
        let selection = Selection {
            tracks: vec!["Nacional".to_string()],
            pulito_positions: vec![],
        };
        let mode = selection.classify("12-34", &EngineConfig::default());
        assert_eq!(mode, GameMode::PaleRd);
    }
}
