use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;

use crate::advisor::{advise, Position, Spot, Stage};
use crate::cards::{parse_cards, simplify_hand, Card};
use crate::display::{
    board_display, equity_bar, equity_table, hand_table, odds_table, print_decision,
    print_error, print_section,
};
use crate::equity::{simulate_equity, SimulationConfig, DEFAULT_TRIALS};
use crate::error::{AdvisorError, AdvisorResult};
use crate::hand_evaluator::evaluate;
use crate::math_engine::{implied_odds, pot_odds};
use crate::preflop::score_preflop;

#[derive(Parser)]
#[command(
    name = "poker-advisor",
    version,
    about = "Hold'em hand ranking, Monte Carlo equity and action advice."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the best five-card hand among five or more cards
    Rank {
        /// Cards (e.g., AhKhQhJhTh2c2d)
        cards: String,
    },
    /// Estimate win probability against random opponents
    Equity {
        /// Your hole cards (e.g., AhAd)
        hand: String,
        /// Board cards (e.g., AsKd5c)
        #[arg(short, long, default_value = "")]
        board: String,
        /// Number of opponents
        #[arg(short, long, default_value = "1")]
        opponents: usize,
        /// Number of simulated trials
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Score a two-card starting hand
    Preflop {
        /// Your hole cards (e.g., AhKh)
        hand: String,
    },
    /// Pot odds and implied odds for a call
    Odds {
        /// Amount to call
        to_call: f64,
        /// Current pot size
        pot: f64,
        /// Effective stack, enables implied odds
        #[arg(short, long)]
        stack: Option<f64>,
    },
    /// Recommend an action for the current spot
    Advise {
        /// Your hole cards (e.g., AhKh)
        hand: String,
        /// Your position (UTG, MP, CO, BTN, SB, BB)
        position: Position,
        /// Board cards (e.g., AsKd5c)
        #[arg(short, long, default_value = "")]
        board: String,
        /// Current pot size in bb
        #[arg(long, default_value = "0")]
        pot: f64,
        /// Amount to call in bb (0 when nobody has bet)
        #[arg(long, default_value = "0")]
        to_call: f64,
        /// Your stack in bb
        #[arg(long, default_value = "100")]
        stack: f64,
        /// Number of opponents still in the hand
        #[arg(short, long, default_value = "1")]
        opponents: usize,
        /// Number of simulated trials for postflop equity
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    init_logging(cli.verbose);
    let result = match cli.command {
        Commands::Rank { cards } => cmd_rank(&cards),
        Commands::Equity {
            hand,
            board,
            opponents,
            trials,
            seed,
        } => cmd_equity(&hand, &board, opponents, trials, seed),
        Commands::Preflop { hand } => cmd_preflop(&hand),
        Commands::Odds {
            to_call,
            pot,
            stack,
        } => cmd_odds(to_call, pot, stack),
        Commands::Advise {
            hand,
            position,
            board,
            pot,
            to_call,
            stack,
            opponents,
            trials,
            seed,
        } => {
            let config = SimulationConfig { trials, seed };
            cmd_advise(&hand, position, &board, pot, to_call, stack, opponents, &config)
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn parse_hand(notation: &str) -> AdvisorResult<Vec<Card>> {
    let cards = parse_cards(notation)?;
    if cards.len() != 2 {
        return Err(AdvisorError::InvalidHandSize(cards.len()));
    }
    Ok(cards)
}

fn cmd_rank(cards: &str) -> AdvisorResult<()> {
    let cards = parse_cards(cards)?;
    let result = evaluate(&cards)?;

    println!();
    println!("  Cards: {}", board_display(&cards));
    println!();
    println!("{}", hand_table(&result));
    println!();
    Ok(())
}

fn cmd_equity(
    hand: &str,
    board: &str,
    opponents: usize,
    trials: usize,
    seed: Option<u64>,
) -> AdvisorResult<()> {
    let hand = parse_hand(hand)?;
    let board = parse_cards(board)?;
    let result = simulate_equity(&hand, &board, opponents, trials, seed)?;

    println!();
    println!(
        "  {} ({}) vs {} random hand(s) on {}",
        board_display(&hand),
        simplify_hand(&hand)?,
        opponents,
        board_display(&board)
    );
    println!();
    println!("  {}", equity_bar(result.win_rate(), 30));
    println!();
    println!("{}", equity_table(&result));
    println!();
    Ok(())
}

fn cmd_preflop(hand: &str) -> AdvisorResult<()> {
    let hand = parse_hand(hand)?;
    let score = score_preflop(&hand)?;

    print_section(
        &format!("Preflop score for {}", simplify_hand(&hand)?),
        &equity_bar(score, 30),
    );
    println!();
    Ok(())
}

fn cmd_odds(to_call: f64, pot: f64, stack: Option<f64>) -> AdvisorResult<()> {
    let odds = pot_odds(to_call, pot)?;
    let implied = match stack {
        Some(stack) => Some(implied_odds(to_call, pot, stack)?),
        None => None,
    };

    println!();
    println!("{}", odds_table(to_call, pot, odds, implied));
    println!();
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_advise(
    hand: &str,
    position: Position,
    board: &str,
    pot: f64,
    to_call: f64,
    stack: f64,
    opponents: usize,
    config: &SimulationConfig,
) -> AdvisorResult<()> {
    let spot = Spot {
        hand: parse_hand(hand)?,
        board: parse_cards(board)?,
        position,
        stack,
        to_call,
        pot,
        opponents,
    };
    let stage = Stage::from_board(&spot.board)?;
    let decision = advise(&spot, config)?;

    println!();
    println!(
        "  {} {} from {} | board {} | pot {:.1} | to call {:.1}",
        stage.to_string().cyan().bold(),
        board_display(&spot.hand),
        position,
        board_display(&spot.board),
        pot,
        to_call
    );
    println!();
    print_decision(&decision);
    println!();
    Ok(())
}
