//! TELIOS terminal front end
//!
//! Usage:
//!   telios                                   # Interactive session
//!   telios --answers "AABACABDAB"            # Score ten answers and exit
//!   telios --answers "AABACABDAB" --json     # JSON output
//!   telios --stage app --screen assessment   # Start past the gate

use std::io::Write;

use chrono::{DateTime, Utc};
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use telios::config::FlowConfig;
use telios::core::{BootstrapOverrides, ScoringEngine, Session, SystemClock};
use telios::types::{CategoryTag, GateState, Role, ScoreResult, ScreenState, UserProfile, QUESTIONS};
use telios::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "telios",
    version = VERSION,
    about = "TELIOS - oath gate, purpose assessment and the ATLAS mentor",
    long_about = "TELIOS walks you through the oath and the commitment fund, a ten-question\n\
                  purpose assessment, and a short conversation with ATLAS, a rule-based mentor.\n\n\
                  Answers are tagged A-D:\n  \
                  A  Builder\n  \
                  B  Warrior\n  \
                  C  Teacher\n  \
                  D  Reflective\n\n\
                  Timing can be tuned with TELIOS_CONFIRM_DELAY_MS, TELIOS_AUTO_ROUTE_DELAY_MS,\n\
                  TELIOS_INACTIVITY_MS and TELIOS_HIGH_CLARITY."
)]
struct Args {
    /// Ten answer tags (A-D) to score, e.g. "AABACABDAB"
    #[arg(short, long)]
    answers: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Start at this gate: oath, fund, stopped, app
    #[arg(long)]
    stage: Option<String>,

    /// Start on this screen: landing, assessment, results, atlas
    #[arg(long)]
    screen: Option<String>,

    /// Unlock the gate when no stage is given
    #[arg(long)]
    dev: bool,
}

/// What the input loop should do after a line
enum Control {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match FlowConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Configuration error: {e}").red());
            std::process::exit(2);
        }
    };

    if let Some(ref answers) = args.answers {
        run_score(answers, &args);
    } else {
        run_interactive(config, &args).await;
    }
}

/// Score a fixed answer string
fn run_score(answers: &str, args: &Args) {
    let tags = CategoryTag::parse_many(answers).unwrap_or_default();
    let Some(result) = ScoringEngine::new().score_tags(&tags) else {
        eprintln!(
            "{}",
            format!("Expected exactly 10 answers (A-D), got {:?}", answers).red()
        );
        std::process::exit(1);
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to encode result: {e}"),
        }
    } else {
        print_score(&result);
    }
}

/// Run the interactive session until EOF or `quit`
async fn run_interactive(config: FlowConfig, args: &Args) {
    let mut session = Session::new(config);
    let overrides = BootstrapOverrides {
        stage: args.stage.clone(),
        screen: args.screen.clone(),
        dev: args.dev,
    };
    if !overrides.is_empty() {
        session.apply_bootstrap(&overrides);
    }

    print_header();
    let mut shown = 0;
    render(&session, args, &mut shown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session);

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!("stdin closed: {e}");
                        break;
                    }
                };
                match handle_line(&mut session, line.trim()) {
                    Control::Quit => break,
                    Control::Continue => render(&session, args, &mut shown),
                }
            }
            _ = sleep_until(session.next_deadline()) => {
                if session.run_due_tasks() > 0 {
                    println!();
                    render(&session, args, &mut shown);
                }
            }
        }
    }
    println!("\nSession ended.");
}

/// Resolve at `deadline`, or never when nothing is pending
async fn sleep_until(deadline: Option<DateTime<Utc>>) {
    match deadline {
        Some(at) => {
            let wait = (at - Utc::now()).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;
        }
        None => std::future::pending().await,
    }
}

/// Map one input line onto a session entry point
fn handle_line(session: &mut Session<SystemClock>, line: &str) -> Control {
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return Control::Quit;
    }
    if line.is_empty() {
        return Control::Continue;
    }
    let command = line.to_ascii_lowercase();

    let applied = match (session.gate(), session.screen()) {
        // The gate is answered first, whatever screen is underneath
        (GateState::Oath | GateState::FundingPledge, _) => match command.as_str() {
            "accept" | "a" => session.accept_oath(),
            "decline" | "d" => session.decline_oath(),
            "skip" | "s" => session.skip_gates(),
            _ => false,
        },
        (GateState::Stopped, _) => false,
        (_, ScreenState::Landing) => match command.as_str() {
            "start" => session.start_assessment(),
            "results" => session.revisit_results(),
            "mentor" | "atlas" => session.enter_conversation(),
            _ => false,
        },
        (_, ScreenState::Assessment) => match command.as_str() {
            "restart" => session.restart(),
            "1" | "2" | "3" | "4" => command
                .parse::<usize>()
                .map(|n| session.answer_option(n - 1))
                .unwrap_or(false),
            _ => match CategoryTag::parse_many(&command).as_deref() {
                Some([tag]) => session.submit_answer(*tag),
                _ => false,
            },
        },
        (_, ScreenState::Results) => match command.as_str() {
            "mentor" | "atlas" => session.enter_conversation(),
            "retake" => session.retake(),
            "restart" => session.restart(),
            _ => false,
        },
        (_, ScreenState::Conversation) => match command.as_str() {
            "/home" => session.go_home(),
            "/assessment" => session.revisit_assessment(),
            "/results" | "/back" => session.revisit_results(),
            "/clear" => session.clear_chat(),
            "/restart" => session.restart(),
            _ => session.submit_message(line),
        },
    };

    if !applied {
        println!("{}", "(nothing happened)".dimmed());
    }
    Control::Continue
}

// =============================================================================
// RENDERING
// =============================================================================

fn print_header() {
    println!("{}", "========================================".bold());
    println!("{}", format!("  TELIOS v{}", VERSION).bold());
    println!("{}", "========================================".bold());
    println!("Type 'quit' to exit.");
    println!();
}

fn prompt(session: &Session<SystemClock>) {
    let label = match session.screen() {
        _ if session.gate() != GateState::AppUnlocked => session.gate().to_string(),
        ScreenState::Conversation => "you".to_string(),
        ScreenState::Assessment => format!("q{}", session.answers().len() + 1),
        screen => screen.to_string(),
    };
    print!("{} > ", label.cyan());
    // A failed flush only delays the prompt
    let _ = std::io::stdout().flush();
}

/// Draw the current screen. `shown` counts chat messages already printed.
fn render(session: &Session<SystemClock>, args: &Args, shown: &mut usize) {
    if args.json {
        match serde_json::to_string(&session.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to encode snapshot: {e}"),
        }
        return;
    }

    if session.screen() != ScreenState::Conversation {
        *shown = 0;
    }

    match (session.gate(), session.screen()) {
        (GateState::Oath, _) => {
            println!("{}", "The TELIOS Oath".bold());
            println!("I declare that I am responsible for my life, my actions, and my outcomes.");
            println!("I choose to live with purpose, clarity, and discipline.");
            println!("{}", "accept | decline | skip".dimmed());
        }
        (GateState::FundingPledge, _) => {
            println!("{}", "TELIOS Commitment Fund".bold());
            println!("You contribute $100. This contribution is fully refundable.");
            println!("{}", "accept | decline | skip".dimmed());
        }
        (GateState::Stopped, _) => {
            println!("{}", "Access denied. You must accept the Oath to proceed.".red());
        }
        (_, ScreenState::Landing) => {
            println!("{}", "TELIOS".bold());
            println!("You don't have a discipline problem. You have a purpose problem.");
            println!("{}", "start | results | mentor".dimmed());
        }
        (_, ScreenState::Assessment) => match session.current_question() {
            Some(question) => {
                println!(
                    "{} {}",
                    format!("[{}/{}]", question.index + 1, QUESTIONS.len()).dimmed(),
                    question.prompt.bold()
                );
                for (i, option) in question.options.iter().enumerate() {
                    println!("  {}) {}", i + 1, option.text);
                }
            }
            None => println!("{}", "Assessment complete.".dimmed()),
        },
        (_, ScreenState::Results) => {
            if let Some(score) = session.score() {
                print_score(score);
            }
            println!("{}", "mentor | retake | restart".dimmed());
        }
        (_, ScreenState::Conversation) => {
            let messages = session.messages().messages();
            if messages.len() < *shown {
                *shown = 0;
            }
            if messages.is_empty() {
                if let Some(profile) = session.profile() {
                    print_readiness(profile);
                }
            }
            for message in &messages[*shown..] {
                let speaker = match message.role {
                    Role::Mentor => message.role.to_string().yellow().bold(),
                    Role::User => message.role.to_string().cyan(),
                };
                println!("{speaker}: {}", message.text);
            }
            *shown = messages.len();
        }
    }

    let output = session.snapshot();
    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

/// Header above an empty chat
fn print_readiness(profile: &UserProfile) {
    println!("{}", "ATLAS - Your Purpose Mentor".yellow().bold());
    println!("Your clarity score: {}", format!("{}%", profile.clarity).bold());
    println!("{}", profile.readiness_prompt().dimmed());
}

fn print_score(score: &ScoreResult) {
    let clarity = format!("{}%", score.clarity);
    let clarity = match score.clarity {
        80.. => clarity.green(),
        60..=79 => clarity.yellow(),
        _ => clarity.red(),
    };
    println!("Clarity: {} | Primary: {}", clarity.bold(), score.primary);
    for (archetype, pct) in score.distribution() {
        println!("  {:<8} {:>3}%", archetype.to_string(), pct);
    }
    println!("{}", score.band().message());
}
