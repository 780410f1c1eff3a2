//! CLI blackjack example.
//!
//! Logs go to stderr; set `RUST_LOG=bjtable=debug` to see the engine's
//! decisions.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjtable::storage::MemoryStore;
use bjtable::{
    Action, Card, DealerHand, GameConfig, GameState, Hand, Phase, Suit, SystemClock, Table,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let store = MemoryStore::new();
    let mut table = Table::new(GameConfig::default(), &store, SystemClock, seed);

    loop {
        let state = table.state();
        let balance = state.balance();
        let min_bet = state.config().min_bet;
        if balance < min_bet {
            println!("You are out of money. Game over.");
            break;
        }

        if state.phase() == Phase::GameOver && !dispatch(&mut table, &Action::NewGame) {
            break;
        }

        let max = balance.min(table.state().config().max_bet);
        let Some(bet) = prompt_u64(&format!("Bet amount ({min_bet}-{max}, 0 to quit): ")) else {
            break;
        };
        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if !dispatch(&mut table, &Action::PlaceBet { amount: bet }) {
            break;
        }
        if table.state().phase() == Phase::Betting {
            println!("Bet refused.");
            continue;
        }
        if !dispatch(&mut table, &Action::DealInitial) {
            break;
        }

        while table.state().phase() == Phase::PlayerTurn {
            let state = table.state();
            print_table(state);

            let action = if state.is_insurance_offered() {
                println!("Dealer shows an Ace. Insurance offered.");
                match prompt_line("Take insurance? (y/n): ").as_str() {
                    "y" | "yes" => Action::Insurance,
                    "q" | "quit" => return,
                    _ => Action::DeclineInsurance,
                }
            } else {
                println!("{}", format_actions(state));
                match prompt_line("Action: ").as_str() {
                    "h" | "hit" => Action::Hit,
                    "s" | "stand" => Action::Stand,
                    "d" | "double" => Action::Double,
                    "p" | "split" => Action::Split,
                    "u" | "surrender" => Action::Surrender,
                    "?" | "hint" => {
                        print_advice(state);
                        continue;
                    }
                    "q" | "quit" => return,
                    _ => {
                        println!("Unknown action.");
                        continue;
                    }
                }
            };

            let before = table.state().clone();
            if !dispatch(&mut table, &action) {
                return;
            }
            if unchanged(&before, table.state()) {
                println!("That action is not allowed here.");
            }
        }

        if table.state().phase() == Phase::DealerTurn && !dispatch(&mut table, &Action::DealerPlay) {
            break;
        }

        if table.state().phase() == Phase::GameOver {
            print_table(table.state());
            println!("{}", table.state().result_message());
            for id in table.state().recent_unlocks() {
                let def = id.definition();
                println!("Achievement unlocked: {} {}", def.icon, def.name);
            }
            println!("Balance: {}", table.state().balance());
        }
    }

    let session = &table.state().statistics().session;
    println!(
        "Played {} rounds, net {}, win rate {:.1}%",
        session.hands_played,
        session.net_profit,
        session.win_rate()
    );
}

/// Applies `action`, reporting a fatal engine error. Returns whether play can go on.
fn dispatch(table: &mut Table<&MemoryStore, SystemClock>, action: &Action) -> bool {
    match table.dispatch(action) {
        Ok(_) => true,
        Err(err) => {
            println!("Engine error: {err}");
            false
        }
    }
}

fn unchanged(before: &GameState, after: &GameState) -> bool {
    before.player_hands() == after.player_hands()
        && before.phase() == after.phase()
        && before.is_insurance_offered() == after.is_insurance_offered()
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_u64(prompt: &str) -> Option<u64> {
    loop {
        let input = prompt_line(prompt);
        if input.is_empty() || input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<u64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(state: &GameState) {
    println!("\nShoe: {} cards remaining", state.cards_remaining());

    let dealer = state.dealer_hand();
    let dealer_value = if dealer.is_hole_revealed() {
        dealer.value()
    } else {
        dealer.visible_value()
    };
    println!("\nDealer: {} (value {dealer_value})", format_dealer(dealer));

    for (index, hand) in state.player_hands().iter().enumerate() {
        let marker = if index == state.active_hand_index() && hand.is_active() {
            "*"
        } else {
            " "
        };
        println!(
            "{} Hand {}: {} | value {} | bet {} | {:?}",
            marker,
            index + 1,
            format_hand(hand),
            hand.value(),
            hand.bet(),
            hand.status()
        );
    }
    println!();
}

fn print_advice(state: &GameState) {
    match state.advice() {
        Some(advice) => println!(
            "{}: {:?}. {}",
            advice.explanation, advice.primary_action, advice.reasoning
        ),
        None => println!("No advice right now."),
    }
}

fn format_actions(state: &GameState) -> String {
    let availability = state.availability();
    let parts = [
        format_action("hit", "h", true),
        format_action("stand", "s", true),
        format_action("double", "d", availability.can_double),
        format_action("split", "p", availability.can_split),
        format_action("surrender", "u", availability.can_surrender),
        format_action("hint", "?", true),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_empty() {
        return "(no cards)".to_string();
    }

    let mut parts: Vec<String> = dealer.visible_cards().iter().map(format_card).collect();
    if !dealer.is_hole_revealed() && dealer.len() > 1 {
        parts.push("??".to_string());
    }
    parts.join(" ")
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
