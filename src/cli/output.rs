//! Output formatting for CLI

use crate::{
    environment::{EnvironmentConfig, Tally},
    pipeline::RunResult,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a count together with its share of `total`
pub fn format_share(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

pub fn print_config(config: &EnvironmentConfig) {
    print_subsection("Rewards");
    let r = &config.rewards;
    print_kv("Win / draw / loss", &format!("{} / {} / {}", r.win, r.draw, r.loss));
    print_kv(
        "Optimal / suboptimal",
        &format!("{} / {}", r.optimal_move_bonus, r.suboptimal_move_penalty),
    );
    print_kv(
        "Retry / exhausted",
        &format!("{} / {}", r.retry_penalty, r.exhausted_penalty),
    );
    print_kv("Max attempts", &config.max_attempts.to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }
}

pub fn print_run_result(result: &RunResult) {
    print_subsection("Outcomes");
    print_kv("Episodes", &format_number(result.episodes));
    print_kv("Wins", &format_share(result.wins, result.win_rate));
    print_kv("Draws", &format_share(result.draws, result.draw_rate));
    print_kv("Losses", &format_share(result.losses, result.loss_rate));

    print_subsection("Moves");
    let steps = result.total_steps.max(1) as f64;
    print_kv("Actor moves", &format_number(result.total_steps));
    print_kv(
        "Optimal",
        &format_share(result.optimal_moves, result.optimal_moves as f64 / steps),
    );
    print_kv(
        "Recovered",
        &format_share(result.recovered_steps, result.recovered_steps as f64 / steps),
    );
    print_kv(
        "Exhausted",
        &format_share(result.exhausted_steps, result.exhausted_steps as f64 / steps),
    );

    print_subsection("Reward");
    print_kv("Total", &format!("{:.2}", result.total_reward));
    print_kv("Mean per episode", &format!("{:.3}", result.mean_reward));
}

/// One-line tally summary
pub fn format_tally(tally: &Tally) -> String {
    format!("W:{} D:{} L:{}", tally.wins, tally.draws, tally.losses)
}
