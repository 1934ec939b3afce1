//! Matches plays against published results and computes what each wager won.
//!
//! Settlement is a pure function of the play, the result and the prize table.
//! A wager that does not match, or a result too short to compare against,
//! simply produces no [`CalculationResult`].

use crate::digits::{
    digits_only, first_two, is_permutation, is_triple, last_two, permutation_count,
};
use crate::{
    CalculationResult, GameMode, LotteryResult, Play, PrizeTable, RegionConfig, WagerType,
};
use std::collections::BTreeSet;

/// Settlement engine configured with a region table.
#[derive(Debug, Clone)]
pub struct Settler {
    regions: RegionConfig,
    single_action_position: u8,
}

impl Default for Settler {
    fn default() -> Self {
        Self::new(RegionConfig::default(), 1)
    }
}

impl Settler {
    pub const SINGLE_ACTION_POSITIONS: std::ops::RangeInclusive<u8> = 1..=7;

    /// `single_action_position` picks the digit a Single Action bet is
    /// compared with: 1-3 are the Pick 3 digits, 4-7 the Win 4 digits.
    pub fn new(regions: RegionConfig, single_action_position: u8) -> Self {
        Self {
            regions,
            single_action_position,
        }
    }

    pub fn regions(&self) -> &RegionConfig {
        &self.regions
    }

    /// Every winning wager of `play` against `result`.
    pub fn settle(
        &self,
        play: &Play,
        result: &LotteryResult,
        table: &PrizeTable,
    ) -> Vec<CalculationResult> {
        let mode = &play.game_mode;
        if !mode.is_classified() {
            return Vec::new();
        }

        let key = mode.prize_key();
        if !table.has_mode(key) {
            tracing::debug!("No prize entry for {}, play {} cannot win", key, play.bet_number);
            return Vec::new();
        }

        if *mode == GameMode::Venezuela && self.regions.is_horses(&result.track) {
            tracing::debug!(
                "Track {} does not run Venezuela, skipping play {}",
                result.track,
                play.bet_number
            );
            return Vec::new();
        }

        let bet = digits_only(&play.bet_number);
        let mut ledger = Ledger {
            play,
            track: &result.track,
            table,
            key,
            wins: Vec::new(),
        };

        match mode {
            GameMode::Pick3 => settle_pick3(&mut ledger, &bet, result),
            GameMode::Win4 => {
                let scale = if self.regions.is_new_york(&result.track) {
                    1.0
                } else {
                    0.5
                };
                settle_win4(&mut ledger, &bet, result, scale)
            }
            GameMode::Venezuela | GameMode::RdQuiniela => {
                settle_quiniela(&mut ledger, &bet, result)
            }
            GameMode::Pale => settle_pale(&mut ledger, result),
            GameMode::PaleRd => settle_pale_rd(&mut ledger, result),
            GameMode::Pulito { positions } => settle_pulito(&mut ledger, &bet, result, positions),
            GameMode::SingleAction => {
                settle_single_action(&mut ledger, &bet, result, self.single_action_position)
            }
            GameMode::Pick2 | GameMode::Unclassified => {}
        }

        ledger.wins
    }

    /// Settle several plays against the same result, flattening the winners.
    pub fn settle_batch(
        &self,
        plays: &[Play],
        result: &LotteryResult,
        table: &PrizeTable,
    ) -> Vec<CalculationResult> {
        plays
            .iter()
            .flat_map(|play| self.settle(play, result, table))
            .collect()
    }
}

/// Settle with the stock region table.
pub fn settle(play: &Play, result: &LotteryResult, table: &PrizeTable) -> Vec<CalculationResult> {
    Settler::default().settle(play, result, table)
}

struct Ledger<'a> {
    play: &'a Play,
    track: &'a str,
    table: &'a PrizeTable,
    key: &'static str,
    wins: Vec<CalculationResult>,
}

impl Ledger<'_> {
    fn award(&mut self, wager: WagerType, label: &str, scale: f64, match_type: impl Into<String>) {
        let amount = self.play.amount(wager);
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }

        let Some(multiplier) = self.table.multiplier(self.key, label) else {
            tracing::debug!("Prize table has no {}.{}", self.key, label);
            return;
        };

        let match_type = match_type.into();
        let prize = amount * multiplier * scale;
        tracing::trace!(
            "{} {} on {} wins {} ({})",
            self.play.game_mode,
            wager,
            self.play.bet_number,
            prize,
            match_type
        );

        self.wins.push(CalculationResult {
            track: self.track.to_string(),
            bet_number: self.play.bet_number.clone(),
            game_mode: self.play.game_mode.clone(),
            wager_type: wager,
            wager_amount: amount,
            prize,
            match_type,
        });
    }
}

fn settle_pick3(ledger: &mut Ledger<'_>, bet: &str, result: &LotteryResult) {
    let winning = result.pick3_digits();
    if bet.len() != 3 || winning.len() != 3 {
        return;
    }

    let triple = is_triple(bet);
    let (straight_label, straight_name) = if triple {
        ("STRAIGHT_TRIPLE", "Straight Triple")
    } else {
        ("STRAIGHT", "Straight")
    };

    if bet == winning {
        ledger.award(WagerType::Straight, straight_label, 1.0, straight_name);
    }

    if !is_permutation(bet, &winning) {
        return;
    }

    if !triple {
        match permutation_count(&winning) {
            6 => ledger.award(WagerType::Box, "BOX_6WAY", 1.0, "Box 6-Way"),
            3 => ledger.award(WagerType::Box, "BOX_3WAY", 1.0, "Box 3-Way"),
            _ => {}
        }
    }

    // combo pays at the straight rate
    ledger.award(WagerType::Combo, straight_label, 1.0, "Combo");
}

fn settle_win4(ledger: &mut Ledger<'_>, bet: &str, result: &LotteryResult, scale: f64) {
    let winning = result.pick4_digits();
    if bet.len() != 4 || winning.len() != 4 {
        return;
    }

    if bet == winning {
        ledger.award(WagerType::Straight, "STRAIGHT", scale, "Straight");
    }

    if !is_permutation(bet, &winning) {
        return;
    }

    let tier = match permutation_count(&winning) {
        24 => Some(("BOX_24WAY", "Box 24-Way")),
        12 => Some(("BOX_12WAY", "Box 12-Way")),
        6 => Some(("BOX_6WAY", "Box 6-Way")),
        4 => Some(("BOX_4WAY", "Box 4-Way")),
        _ => None,
    };
    if let Some((label, name)) = tier {
        ledger.award(WagerType::Box, label, scale, name);
    }

    ledger.award(WagerType::Combo, "STRAIGHT", scale, "Combo");
}

fn settle_quiniela(ledger: &mut Ledger<'_>, bet: &str, result: &LotteryResult) {
    let Some(bet) = last_two(bet) else {
        return;
    };

    let positions = result.positions();
    let places = [
        (&positions.first, "FIRST", "FIRST_BOX", "1st"),
        (&positions.second, "SECOND", "SECOND_BOX", "2nd"),
        (&positions.third, "THIRD", "THIRD_BOX", "3rd"),
    ];

    for (winning, straight_label, box_label, place) in places {
        if bet == winning.as_str() {
            ledger.award(WagerType::Straight, straight_label, 1.0, format!("{} Place", place));
        }
        if is_permutation(bet, winning) {
            ledger.award(WagerType::Box, box_label, 1.0, format!("{} Place Box", place));
        }
    }
}

fn settle_pale(ledger: &mut Ledger<'_>, result: &LotteryResult) {
    let Some((a, b)) = split_pair(&ledger.play.bet_number) else {
        return;
    };

    let p = result.positions();
    let pairs = [(&p.first, &p.second), (&p.first, &p.third), (&p.second, &p.third)];

    if pairs.iter().any(|(x, y)| pair_matches(&a, &b, x, y, exact)) {
        ledger.award(WagerType::Straight, "WIN_FULL", 1.0, "Palé");
    }
    if pairs
        .iter()
        .any(|(x, y)| pair_matches(&a, &b, x, y, is_permutation))
    {
        ledger.award(WagerType::Box, "WIN_BOX", 1.0, "Palé Box");
    }
}

fn settle_pale_rd(ledger: &mut Ledger<'_>, result: &LotteryResult) {
    let Some((a, b)) = split_pair(&ledger.play.bet_number) else {
        return;
    };

    let p = result.positions();
    let tiers: [(WagerType, fn(&str, &str) -> bool, [(&str, &str); 2]); 2] = [
        (
            WagerType::Straight,
            exact,
            [("WIN_FULL", "Palé Full"), ("WIN_PARCIAL", "Palé Parcial")],
        ),
        (
            WagerType::Box,
            is_permutation,
            [("BOX_FULL", "Palé Box Full"), ("BOX_PARCIAL", "Palé Box Parcial")],
        ),
    ];

    for (wager, eq, [full, parcial]) in tiers {
        // Full and Parcial are exclusive, Full first
        if pair_matches(&a, &b, &p.first, &p.second, eq) {
            ledger.award(wager, full.0, 1.0, full.1);
        } else if pair_matches(&a, &b, &p.first, &p.third, eq)
            || pair_matches(&a, &b, &p.second, &p.third, eq)
        {
            ledger.award(wager, parcial.0, 1.0, parcial.1);
        }
    }
}

fn settle_pulito(
    ledger: &mut Ledger<'_>,
    bet: &str,
    result: &LotteryResult,
    positions: &BTreeSet<u8>,
) {
    let Some(bet) = last_two(bet) else {
        return;
    };

    let pick3 = result.pick3_digits();
    let pick4 = result.pick4_digits();

    for &position in positions {
        let winning = match position {
            1 => first_two(&pick3),
            2 => last_two(&pick3),
            3 => first_two(&pick4),
            4 => last_two(&pick4),
            _ => None,
        };
        let Some(winning) = winning else {
            continue;
        };

        if bet == winning {
            ledger.award(WagerType::Straight, "STRAIGHT", 1.0, format!("Pulito Pos {}", position));
        }
        if is_permutation(bet, winning) {
            ledger.award(WagerType::Box, "BOX", 1.0, format!("Pulito Box Pos {}", position));
        }
    }
}

fn settle_single_action(ledger: &mut Ledger<'_>, bet: &str, result: &LotteryResult, position: u8) {
    if bet.len() != 1 {
        return;
    }

    let winning = match position {
        1..=3 => result.pick3_digits().chars().nth(usize::from(position - 1)),
        4..=7 => result.pick4_digits().chars().nth(usize::from(position - 4)),
        _ => None,
    };

    if winning.is_some_and(|digit| bet.starts_with(digit)) {
        ledger.award(
            WagerType::Straight,
            "STRAIGHT",
            1.0,
            format!("Single Action Pos {}", position),
        );
    }
}

fn exact(a: &str, b: &str) -> bool {
    a == b
}

/// Unordered comparison of the bet pair `{a, b}` with the result pair `{x, y}`.
fn pair_matches(a: &str, b: &str, x: &str, y: &str, eq: fn(&str, &str) -> bool) -> bool {
    if x.len() != 2 || y.len() != 2 {
        return false;
    }
    (eq(a, x) && eq(b, y)) || (eq(a, y) && eq(b, x))
}

/// Two 2-digit tokens separated by `-`, `x` or `X`.
fn split_pair(bet: &str) -> Option<(String, String)> {
    let tokens: Vec<String> = bet
        .split(['-', 'x', 'X'])
        .map(digits_only)
        .collect();

    match tokens.as_slice() {
        [a, b] if a.len() == 2 && b.len() == 2 => Some((a.clone(), b.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(track: &str, pick3: &str, pick4: &str) -> LotteryResult {
        LotteryResult {
            pick3: Some(pick3.to_string()),
            pick4: Some(pick4.to_string()),
            ..LotteryResult::new(track)
        }
    }

    fn quiniela(track: &str, first: &str, second: &str, third: &str) -> LotteryResult {
        LotteryResult {
            first: Some(first.to_string()),
            second: Some(second.to_string()),
            third: Some(third.to_string()),
            ..LotteryResult::new(track)
        }
    }

    fn run(play: &Play, result: &LotteryResult) -> Vec<CalculationResult> {
        settle(play, result, &PrizeTable::default())
    }

    #[test]
    fn test_pick3_triple_straight() {
        let play = Play::new("555", GameMode::Pick3).with_straight(2.0);
        let wins = run(&play, &result("New York", "555", "1234"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].prize, 1000.0);
        assert_eq!(wins[0].wager_type, WagerType::Straight);
    }

    #[test]
    fn test_pick3_box_six_way() {
        let play = Play::new("123", GameMode::Pick3).with_box(1.0);
        let wins = run(&play, &result("Florida", "321", ""));
        assert_eq!(wins.len(), 1);
        assert!((wins[0].prize - 116.67).abs() < 0.01);
        assert_eq!(wins[0].match_type, "Box 6-Way");
    }

    #[test]
    fn test_pick3_box_three_way_and_triple_box() {
        let play = Play::new("122", GameMode::Pick3).with_box(3.0);
        let wins = run(&play, &result("Florida", "212", ""));
        assert_eq!(wins[0].match_type, "Box 3-Way");
        assert!((wins[0].prize - 700.0).abs() < 1e-9);

        let triple = Play::new("444", GameMode::Pick3).with_box(1.0);
        assert!(run(&triple, &result("Florida", "444", "")).is_empty());
    }

    #[test]
    fn test_pick3_straight_box_and_combo_together() {
        let play = Play::new("123", GameMode::Pick3)
            .with_straight(1.0)
            .with_box(1.0)
            .with_combo(1.0);
        let wins = run(&play, &result("Georgia", "123", ""));
        let kinds: Vec<WagerType> = wins.iter().map(|w| w.wager_type).collect();
        assert_eq!(kinds, vec![WagerType::Straight, WagerType::Box, WagerType::Combo]);
        assert_eq!(wins[2].prize, 700.0);
    }

    #[test]
    fn test_win4_non_ny_halving() {
        let play = Play::new("1234", GameMode::Win4).with_straight(1.0);
        let wins = run(&play, &result("Florida", "", "1234"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].prize, 2500.0);

        let wins = run(&play, &result("New York", "", "1234"));
        assert_eq!(wins[0].prize, 5000.0);
    }

    #[test]
    fn test_pick3_triple_combo_pays_triple_rate() {
        let play = Play::new("555", GameMode::Pick3).with_combo(1.0);
        let wins = run(&play, &result("Georgia", "555", ""));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].wager_type, WagerType::Combo);
        assert_eq!(wins[0].prize, 500.0);
    }

    #[test]
    fn test_win4_box_halved_off_new_york() {
        let play = Play::new("4321", GameMode::Win4).with_box(1.0);
        let wins = run(&play, &result("Florida", "", "1234"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].match_type, "Box 24-Way");
        assert_eq!(wins[0].prize, 100.0);
    }

    #[test]
    fn test_win4_combo_pays_straight_rate() {
        let play = Play::new("4321", GameMode::Win4).with_combo(1.0);

        let wins = run(&play, &result("New York", "", "1234"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].wager_type, WagerType::Combo);
        assert_eq!(wins[0].prize, 5000.0);

        let wins = run(&play, &result("Florida", "", "1234"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].prize, 2500.0);
    }

    #[test]
    fn test_non_finite_wager_never_wins() {
        let play = Play::new("123", GameMode::Pick3)
            .with_straight(f64::NAN)
            .with_box(f64::INFINITY);
        assert!(run(&play, &result("Florida", "123", "")).is_empty());
    }

    #[test]
    fn test_win4_box_tiers() {
        let cases = [
            ("4321", "1234", 200.0),
            ("2113", "1123", 400.0),
            ("2121", "1122", 800.0),
            ("2111", "1112", 1200.0),
        ];
        for (bet, winning, expected) in cases {
            let play = Play::new(bet, GameMode::Win4).with_box(1.0);
            let wins = run(&play, &result("New York", "", winning));
            assert_eq!(wins.len(), 1, "bet {}", bet);
            assert_eq!(wins[0].prize, expected);
        }

        let quad = Play::new("7777", GameMode::Win4).with_box(1.0);
        assert!(run(&quad, &result("New York", "", "7777")).is_empty());
    }

    #[test]
    fn test_venezuela_positions() {
        let play = Play::new("93", GameMode::Venezuela).with_straight(1.0).with_box(1.0);
        let wins = run(&play, &quiniela("Venezuela", "93", "39", "11"));
        let types: Vec<&str> = wins.iter().map(|w| w.match_type.as_str()).collect();
        assert_eq!(types, vec!["1st Place", "1st Place Box", "2nd Place Box"]);
        assert_eq!(wins[0].prize, 55.0);
        assert_eq!(wins[2].prize, 7.5);
    }

    #[test]
    fn test_rd_quiniela_uses_its_own_table() {
        let play = Play::new("34", GameMode::RdQuiniela).with_straight(2.0);
        let wins = run(&play, &quiniela("Nacional", "10", "20", "34"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].prize, 8.0);
        assert_eq!(wins[0].match_type, "3rd Place");
    }

    #[test]
    fn test_horses_excludes_venezuela() {
        let play = Play::new("34", GameMode::Venezuela).with_straight(1.0);
        assert!(run(&play, &quiniela("NY Horses R1", "34", "34", "34")).is_empty());
    }

    #[test]
    fn test_pale_usa_any_pair_flat() {
        let play = Play::new("34-10", GameMode::Pale).with_straight(1.0).with_box(1.0);
        let wins = run(&play, &quiniela("New York", "10", "20", "34"));
        assert_eq!(wins.len(), 2);
        assert_eq!(wins[0].prize, 700.0);
        assert_eq!(wins[1].prize, 175.0);

        let boxed = Play::new("43x01", GameMode::Pale).with_box(2.0);
        let wins = run(&boxed, &quiniela("New York", "10", "20", "34"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].prize, 350.0);
    }

    #[test]
    fn test_pale_rd_full_and_parcial() {
        let table = quiniela("Nacional", "10", "20", "34");

        let full = Play::new("20-10", GameMode::PaleRd).with_straight(1.0);
        let wins = run(&full, &table);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].match_type, "Palé Full");
        assert_eq!(wins[0].prize, 1300.0);

        let parcial = Play::new("34-20", GameMode::PaleRd).with_straight(1.0);
        let wins = run(&parcial, &table);
        assert_eq!(wins[0].match_type, "Palé Parcial");
        assert_eq!(wins[0].prize, 200.0);

        let boxed = Play::new("02-01", GameMode::PaleRd).with_box(1.0);
        let wins = run(&boxed, &table);
        assert_eq!(wins[0].match_type, "Palé Box Full");
        assert_eq!(wins[0].prize, 325.0);
    }

    #[test]
    fn test_pale_rd_full_excludes_parcial() {
        let play = Play::new("10-20", GameMode::PaleRd).with_straight(1.0);
        let wins = run(&play, &quiniela("Nacional", "10", "20", "10"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].match_type, "Palé Full");
    }

    #[test]
    fn test_pulito_multi_position() {
        let mode = GameMode::pulito([1, 3]).unwrap();
        let play = Play::new("12", mode).with_straight(1.0);
        let wins = run(&play, &result("New York", "125", "1299"));
        assert_eq!(wins.len(), 2);
        assert_eq!(wins[0].match_type, "Pulito Pos 1");
        assert_eq!(wins[1].match_type, "Pulito Pos 3");
        assert!(wins.iter().all(|w| w.prize == 80.0));
    }

    #[test]
    fn test_pulito_box_per_position() {
        let mode = GameMode::pulito([2, 4]).unwrap();
        let play = Play::new("93", mode).with_box(1.0);
        let wins = run(&play, &result("Georgia", "539", "1239"));
        assert_eq!(wins.len(), 2);
        assert!(wins.iter().all(|w| w.prize == 40.0));
    }

    #[test]
    fn test_single_action_default_position() {
        let play = Play::new("5", GameMode::SingleAction).with_straight(2.0);
        let wins = run(&play, &result("Georgia", "593", "1234"));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].prize, 18.0);

        let settler = Settler::new(RegionConfig::default(), 5);
        let wins = settler.settle(&play, &result("Georgia", "593", "1534"), &PrizeTable::default());
        assert_eq!(wins[0].match_type, "Single Action Pos 5");
    }

    #[test]
    fn test_missing_mode_and_unclassified_never_win() {
        let play = Play::new("12", GameMode::Pick2).with_straight(1.0);
        assert!(run(&play, &quiniela("Florida", "12", "12", "12")).is_empty());

        let play = Play::new("123", GameMode::Unclassified).with_straight(1.0);
        assert!(run(&play, &result("Florida", "123", "")).is_empty());

        let table = PrizeTable::from_entries(Default::default());
        let play = Play::new("123", GameMode::Pick3).with_straight(1.0);
        assert!(settle(&play, &result("Florida", "123", ""), &table).is_empty());
    }

    #[test]
    fn test_short_results_do_not_match() {
        let play = Play::new("123", GameMode::Pick3).with_straight(1.0);
        assert!(run(&play, &result("Florida", "12", "")).is_empty());

        let pale = Play::new("12-03", GameMode::Pale).with_straight(1.0);
        assert!(run(&pale, &quiniela("New York", "12", "3", "")).is_empty());
    }

    #[test]
    fn test_settlement_is_idempotent() {
        let play = Play::new("93", GameMode::Venezuela).with_straight(1.0).with_box(1.0);
        let res = result("Venezuela", "593", "9312");
        let table = PrizeTable::default();
        assert_eq!(settle(&play, &res, &table), settle(&play, &res, &table));
    }

    #[test]
    fn test_derived_positions_match_explicit() {
        let derived = result("New York", "593", "1234");
        let explicit = LotteryResult {
            first: Some("93".into()),
            second: Some("12".into()),
            third: Some("34".into()),
            ..derived.clone()
        };

        let plays = [
            Play::new("93", GameMode::Venezuela).with_straight(1.0).with_box(1.0),
            Play::new("21", GameMode::RdQuiniela).with_box(1.0),
            Play::new("34", GameMode::pulito([1, 2, 3, 4]).unwrap()).with_straight(1.0),
        ];
        let table = PrizeTable::default();
        let settler = Settler::default();
        assert_eq!(
            settler.settle_batch(&plays, &derived, &table),
            settler.settle_batch(&plays, &explicit, &table)
        );
        assert_eq!(settler.settle_batch(&plays, &derived, &table).len(), 4);
    }
}
