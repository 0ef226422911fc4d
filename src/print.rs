use std::fmt::Display;

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::Player;
use crate::mc::{Frequency, SimulationSummary};

pub fn tabulate_summary(summary: &SimulationSummary, reference: Option<f64>) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(24)).with(Left)),
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec!["Measure".into(), "Value".into()],
        ));
    let mut push = |label: String, value: String| {
        table.push_row(Row::new(Styles::default(), vec![label.into(), value.into()]));
    };
    push("Trials".into(), format!("{}", summary.trials()));
    for player in [Player::P1, Player::P2] {
        push(
            format!("{player} win probability"),
            format!("{:.4}", summary.win_probability(player)),
        );
    }
    push(
        format!("{:.0}% Wilson interval (P1)", summary.confidence_level * 100.0),
        format!("{}", summary.confidence_interval),
    );
    push("P1 fair price".into(), fair_price(summary.win_probability_p1));
    push(
        "Tiebreaks per match".into(),
        format!("{:.3}", summary.tiebreaks_per_match()),
    );
    if let Some(reference) = reference {
        push("Markov reference (P1)".into(), format!("{reference:.4}"));
    }
    table
}

/// The decimal price implied by a win probability, or `-` if the player never won.
fn fair_price(prob: f64) -> String {
    if prob > 0.0 {
        format!("{:.3}", 1.0 / prob)
    } else {
        "-".into()
    }
}

/// Tabulates the `limit` most frequent outcomes.
pub fn tabulate_distribution<K: Display>(
    frequencies: &[Frequency<K>],
    heading: &str,
    limit: usize,
) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(16)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![heading.into(), "Count".into(), "%".into()],
        ));
    for frequency in frequencies.iter().take(limit) {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", frequency.outcome).into(),
                format!("{}", frequency.count).into(),
                format!("{:.2}", frequency.percentage).into(),
            ],
        ));
    }
    table
}
