use std::fmt;
use std::io::BufRead;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use engine::{
    AdvanceOutcome, AnswerFeedback, AnswerOutcome, QuizSession, SessionError, SessionPhase,
    SessionView, TickEvent,
};
use quiz_core::model::{Difficulty, Mode, SessionSettings};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMode { raw: String },
    InvalidDifficulty { raw: String },
    InvalidQuestions { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid --mode value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw}")
            }
            ArgsError::InvalidQuestions { raw } => {
                write!(f, "invalid --questions value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn mode_from_arg(arg: &str) -> Option<Mode> {
    match arg {
        "arithmetic" => Some(Mode::Arithmetic),
        "equation" => Some(Mode::Equation),
        "sequence" => Some(Mode::Sequence),
        _ => None,
    }
}

fn difficulty_from_arg(arg: &str) -> Option<Difficulty> {
    match arg {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

struct Args {
    mode: Mode,
    difficulty: Difficulty,
    questions: u32,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut mode = std::env::var("QUIZ_MODE")
            .ok()
            .and_then(|value| mode_from_arg(&value))
            .unwrap_or(Mode::Arithmetic);
        let mut difficulty = std::env::var("QUIZ_DIFFICULTY")
            .ok()
            .and_then(|value| difficulty_from_arg(&value))
            .unwrap_or(Difficulty::Medium);
        let mut questions = 10;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mode" => {
                    let value = require_value(args, "--mode")?;
                    mode = mode_from_arg(&value).ok_or(ArgsError::InvalidMode { raw: value })?;
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    difficulty = difficulty_from_arg(&value)
                        .ok_or(ArgsError::InvalidDifficulty { raw: value })?;
                }
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    questions = value
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or(ArgsError::InvalidQuestions { raw: value })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            mode,
            difficulty,
            questions,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--mode <arithmetic|equation|sequence>]");
    eprintln!("                      [--difficulty <easy|medium|hard>]");
    eprintln!("                      [--questions <n>]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_MODE, QUIZ_DIFFICULTY");
}

fn print_commands() {
    println!("Commands:");
    println!("  start                     begin a new quiz");
    println!("  <number>                  submit an answer");
    println!("  next                      advance to the next question");
    println!("  mode <m>                  switch mode (arithmetic|equation|sequence)");
    println!("  difficulty <d>            switch difficulty (easy|medium|hard)");
    println!("  reset                     discard the current quiz");
    println!("  quit                      leave");
}

/// Reads stdin lines on a dedicated thread so the tick loop stays free.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_question(view: &SessionView) {
    let Some(prompt) = view.prompt.as_deref() else {
        return;
    };
    println!();
    println!(
        "Question {}/{} [{} / {}]",
        view.question_index,
        view.total_questions,
        view.mode.label(),
        view.difficulty.label()
    );
    println!("  {prompt}  ({}s)", view.time_remaining_secs);
}

fn print_stats(view: &SessionView) {
    println!(
        "  score {} | streak {} | accuracy {}%",
        view.score, view.streak, view.accuracy_percent
    );
}

fn print_feedback(feedback: &AnswerFeedback) {
    match feedback.outcome {
        AnswerOutcome::Correct => {
            println!("Correct! Well done. +{} points.", feedback.points_earned);
        }
        AnswerOutcome::Incorrect => {
            println!("Incorrect. The correct answer is {}.", feedback.expected);
        }
        AnswerOutcome::TimedOut => {
            println!("Time's up! The correct answer was {}.", feedback.expected);
        }
    }
}

fn print_summary(session: &QuizSession) {
    let Some(summary) = session.summary() else {
        return;
    };
    println!();
    println!("── Results ──────────────────────────");
    println!("  final score   {}", summary.score());
    println!(
        "  correct       {}/{}",
        summary.correct(),
        summary.answered()
    );
    println!("  accuracy      {}%", summary.accuracy_percent());
    println!("  best streak   {}", summary.best_streak());
    println!();
    println!(
        "Share: I scored {} points in the math quiz with {}/{} correct answers and a {} answer streak!",
        summary.score(),
        summary.correct(),
        summary.answered(),
        summary.best_streak()
    );
    println!("Type 'start' to play again.");
}

fn handle_tick(session: &mut QuizSession) {
    match session.tick() {
        Some(TickEvent::Running {
            remaining_secs,
            low_time,
        }) => {
            // Don't narrate every second; call out checkpoints and the
            // final stretch.
            if low_time && remaining_secs <= 5 {
                println!("  {remaining_secs}s left — hurry!");
            } else if remaining_secs % 10 == 0 {
                println!("  {remaining_secs}s left");
            }
        }
        Some(TickEvent::Expired(feedback)) => {
            print_feedback(&feedback);
            print_stats(&session.view());
            println!("Type 'next' to continue.");
        }
        None => {}
    }
}

fn handle_line(session: &mut QuizSession, line: &str) -> bool {
    let input = line.trim();
    let (command, value) = match input.split_once(' ') {
        Some((head, tail)) => (head, tail.trim()),
        None => (input, ""),
    };

    match command {
        "" => {}
        "quit" | "exit" => return false,
        "help" => print_commands(),
        "start" | "play" => {
            session.start();
            print_question(&session.view());
        }
        "next" => match session.advance() {
            Ok(AdvanceOutcome::NextQuestion) => print_question(&session.view()),
            Ok(AdvanceOutcome::Finished(_)) => print_summary(session),
            Err(err) => eprintln!("{err}"),
        },
        "reset" => {
            session.reset();
            println!("Quiz reset. Type 'start' when ready.");
        }
        "mode" => match mode_from_arg(value) {
            Some(mode) => {
                session.set_mode(mode);
                println!("Mode set to {}.", mode.label());
                if session.phase() == SessionPhase::InProgress {
                    print_question(&session.view());
                }
            }
            None => eprintln!("unknown mode: {value}"),
        },
        "difficulty" => match difficulty_from_arg(value) {
            Some(difficulty) => {
                session.set_difficulty(difficulty);
                println!("Difficulty set to {}.", difficulty.label());
                if session.phase() == SessionPhase::InProgress {
                    print_question(&session.view());
                }
            }
            None => eprintln!("unknown difficulty: {value}"),
        },
        _ => match session.submit_answer(input) {
            Ok(feedback) => {
                print_feedback(&feedback);
                print_stats(&session.view());
                println!("Type 'next' to continue.");
            }
            Err(SessionError::EmptyAnswer) => {}
            Err(err) => eprintln!("{err}"),
        },
    }

    true
}

async fn run(args: Args) {
    let settings = SessionSettings::new(args.questions, 30)
        .unwrap_or_default();
    let mut session = QuizSession::new(settings, args.mode, args.difficulty);

    println!("Math quiz — {} questions per round.", args.questions);
    print_commands();

    let mut lines = spawn_stdin_reader();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => handle_tick(&mut session),
            line = lines.recv() => {
                let Some(line) = line else { break };
                if !handle_line(&mut session, &line) {
                    break;
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut argv = std::env::args().skip(1);
    let args = match Args::parse(&mut argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(2);
        }
    };

    run(args).await;
}
