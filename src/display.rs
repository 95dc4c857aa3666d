use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::advisor::{Action, Decision};
use crate::cards::{Card, Suit};
use crate::equity::EquityResult;
use crate::hand_evaluator::EvaluatedHand;

pub fn equity_bar(equity: f64, width: usize) -> String {
    let filled = ((equity.clamp(0.0, 1.0)) * width as f64) as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", equity * 100.0);

    if equity >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn board_display(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".dimmed().to_string();
    }
    cards
        .iter()
        .map(|card| {
            let text = card.pretty();
            match card.suit {
                Suit::Spades => text.white().to_string(),
                Suit::Hearts => text.red().to_string(),
                Suit::Diamonds => text.blue().to_string(),
                Suit::Clubs => text.green().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn metric_table(rows: Vec<(&str, String)>) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name.bold().to_string()),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

pub fn hand_table(hand: &EvaluatedHand) -> String {
    metric_table(vec![
        ("Category", hand.category.to_string()),
        ("Tiebreak", format!("{:?}", hand.tiebreak())),
    ])
}

pub fn equity_table(result: &EquityResult) -> String {
    metric_table(vec![
        ("Win", format!("{:.1}%", result.win_rate() * 100.0)),
        ("Tie", format!("{:.1}%", result.tie_rate() * 100.0)),
        ("Lose", format!("{:.1}%", result.lose_rate() * 100.0)),
        ("Pot share", format!("{:.1}%", result.equity() * 100.0)),
        ("Trials", result.trials.to_string()),
    ])
}

pub fn odds_table(to_call: f64, pot: f64, pot_odds: f64, implied: Option<f64>) -> String {
    let mut rows = vec![
        ("Pot", format!("{:.1}", pot)),
        ("To Call", format!("{:.1}", to_call)),
        ("Pot Odds", format!("{:.1}%", pot_odds * 100.0)),
    ];
    if let Some(implied) = implied {
        rows.push(("Implied Odds", format!("{:.2}x", implied)));
        rows.push(("Equity Needed", format!("{:.1}%", pot_odds / implied * 100.0)));
    }
    metric_table(rows)
}

pub fn styled_action(action: Action) -> String {
    let text = action.to_string();
    match action {
        Action::Raise => text.red().bold().to_string(),
        Action::Call => text.green().bold().to_string(),
        Action::Fold => text.dimmed().bold().to_string(),
        Action::Check => text.yellow().bold().to_string(),
    }
}

pub fn print_decision(decision: &Decision) {
    let styled = styled_action(decision.action);
    if decision.amount > 0.0 {
        println!("  {}  {:.1} bb", styled, decision.amount);
    } else {
        println!("  {}", styled);
    }
    println!("  Confidence: {:.2}", decision.confidence);
    println!();
    println!("{}", "Reasoning:".bold());
    for reason in &decision.reasoning {
        println!("  - {}", reason);
    }
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("  {}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
