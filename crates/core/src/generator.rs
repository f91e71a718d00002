//! Question generation.
//!
//! Pure functions: the caller supplies the randomness and receives a
//! self-consistent prompt/answer pair. The answer is always derived
//! from the drawn operands, never from re-parsing the prompt, so a
//! generated question can be graded without any evaluator.

use rand::Rng;

use crate::model::{Difficulty, Mode, Question};

//
// ─── ENTRY POINT ───────────────────────────────────────────────────────────────
//

/// Generate one question for the given mode and difficulty.
pub fn generate(mode: Mode, difficulty: Difficulty, rng: &mut impl Rng) -> Question {
    let (prompt, answer) = match mode {
        Mode::Arithmetic => arithmetic(difficulty, rng),
        Mode::Equation => equation(difficulty, rng),
        Mode::Sequence => sequence(difficulty, rng),
    };
    Question::new(mode, difficulty, prompt, answer)
}

//
// ─── ARITHMETIC ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '×',
            Op::Div => '÷',
        }
    }

    fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            // Medium resynthesizes the dividend, so this is always exact.
            Op::Div => lhs / rhs,
        }
    }
}

/// Operators available at the hard tier. Division is excluded so the
/// two-operator expressions stay integral without forced divisibility.
const HARD_OPS: [Op; 3] = [Op::Add, Op::Sub, Op::Mul];

fn arithmetic(difficulty: Difficulty, rng: &mut impl Rng) -> (String, i64) {
    match difficulty {
        Difficulty::Easy => {
            let a = rng.random_range(1..=10);
            let b = rng.random_range(1..=10);
            let op = if rng.random_bool(0.5) { Op::Add } else { Op::Sub };

            (
                format!("What is {a} {} {b}?", op.symbol()),
                op.apply(a, b),
            )
        }
        Difficulty::Medium => {
            let mut a = rng.random_range(10..30);
            let b = rng.random_range(5..25);
            let op = [Op::Mul, Op::Div, Op::Add, Op::Sub][rng.random_range(0..4)];

            if op == Op::Div {
                // Resynthesize the dividend as a multiple of the divisor
                // so the quotient is a whole number.
                a = b * rng.random_range(1..=10);
            }

            (
                format!("Calculate {a} {} {b}", op.symbol()),
                op.apply(a, b),
            )
        }
        Difficulty::Hard => {
            let a = rng.random_range(20..70);
            let b = rng.random_range(10..40);
            let c = rng.random_range(5..25);
            let op1 = HARD_OPS[rng.random_range(0..3)];
            let op2 = HARD_OPS[rng.random_range(0..3)];

            let prompt = format!("Calculate {a} {} {b} {} {c}", op1.symbol(), op2.symbol());
            (prompt, eval_two_ops(a, op1, b, op2, c))
        }
    }
}

/// Standard precedence: `×` binds before `+` and `-`; equal precedence
/// applies left to right in display order.
fn eval_two_ops(a: i64, op1: Op, b: i64, op2: Op, c: i64) -> i64 {
    if op2 == Op::Mul && op1 != Op::Mul {
        op1.apply(a, Op::Mul.apply(b, c))
    } else {
        op2.apply(op1.apply(a, b), c)
    }
}

//
// ─── EQUATION ──────────────────────────────────────────────────────────────────
//

/// Equations are built backwards: draw the root, then display the
/// constant that makes the root satisfy the shown equation. The hard
/// tier's quadratic may have a second real root, but the accepted
/// answer is always the generating one.
fn equation(difficulty: Difficulty, rng: &mut impl Rng) -> (String, i64) {
    match difficulty {
        Difficulty::Easy => {
            let x = rng.random_range(1..=10);
            let a = rng.random_range(1..=5);
            let b = rng.random_range(0..20);

            (
                format!("Find the value of x: {a}x + {b} = {}", a * x + b),
                x,
            )
        }
        Difficulty::Medium => {
            // Wider root range than easy; the displayed form is still
            // linear with the constant back-computed from the root.
            let x = rng.random_range(1..=12);
            let a = rng.random_range(1..=5);
            let b = rng.random_range(1..=10);

            (format!("Solve for x: {a}x + {b} = {}", a * x + b), x)
        }
        Difficulty::Hard => {
            let x = rng.random_range(1..=10);
            let a = rng.random_range(1..=5);
            let b = rng.random_range(1..=10);
            let c = rng.random_range(0..20);
            let d = a * x * x + b * x + c;

            (
                format!("Find the positive value of x where {a}x² + {b}x + {c} = {d}"),
                x,
            )
        }
    }
}

//
// ─── SEQUENCE ──────────────────────────────────────────────────────────────────
//

/// Four displayed terms; the answer is the fifth under the same rule.
fn sequence(difficulty: Difficulty, rng: &mut impl Rng) -> (String, i64) {
    match difficulty {
        Difficulty::Easy => {
            let start = rng.random_range(0..10);
            let diff = rng.random_range(1..=5);
            let terms: Vec<i64> = (0..4).map(|i| start + diff * i).collect();

            (
                format!("What comes next in the sequence? {}, ?", join(&terms)),
                start + diff * 4,
            )
        }
        Difficulty::Medium => {
            let (terms, next) = if rng.random_bool(0.5) {
                geometric_terms(rng)
            } else {
                alternating_terms(rng)
            };

            (format!("Find the next number: {}, ?", join(&terms)), next)
        }
        Difficulty::Hard => {
            let a = rng.random_range(1..=2);
            let b = rng.random_range(0..5);
            let c = rng.random_range(0..10);
            let terms: Vec<i64> = (1..=4).map(|n| a * n * n + b * n + c).collect();

            (
                format!("Continue the sequence: {}, ?", join(&terms)),
                a * 25 + b * 5 + c,
            )
        }
    }
}

fn geometric_terms(rng: &mut impl Rng) -> (Vec<i64>, i64) {
    let start: i64 = rng.random_range(1..=5);
    let ratio: i64 = rng.random_range(2..=4);
    let terms: Vec<i64> = (0..4_u32).map(|i| start * ratio.pow(i)).collect();
    (terms, start * ratio.pow(4))
}

/// Two-phase pattern: the step alternates between `d1` and `d2`, so the
/// fifth term continues with `d2`.
fn alternating_terms(rng: &mut impl Rng) -> (Vec<i64>, i64) {
    let start: i64 = rng.random_range(0..10);
    let d1: i64 = rng.random_range(1..=5);
    let d2: i64 = rng.random_range(1..=5);

    let terms = vec![start, start + d1, start + d1 + d2, start + 2 * d1 + d2];
    let next = terms[3] + d2;
    (terms, next)
}

fn join(terms: &[i64]) -> String {
    terms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
