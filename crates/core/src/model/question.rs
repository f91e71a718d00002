use serde::{Deserialize, Serialize};

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// Question family the generator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plain integer arithmetic with one or two operators.
    Arithmetic,
    /// Solve for `x` in a linear or quadratic equation.
    Equation,
    /// Continue a four-term number sequence.
    Sequence,
}

impl Mode {
    /// All modes, in menu order.
    pub const ALL: [Mode; 3] = [Mode::Arithmetic, Mode::Equation, Mode::Sequence];

    /// Stable lowercase label, matching the serde representation.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::Arithmetic => "arithmetic",
            Mode::Equation => "equation",
            Mode::Sequence => "sequence",
        }
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier. Controls operand ranges and the score multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Stable lowercase label, matching the serde representation.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Base points for a correct answer: `floor(10 × multiplier)`
    /// with multipliers 1 / 1.5 / 2.
    #[must_use]
    pub fn base_points(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single generated prompt together with its expected answer.
///
/// Every generator produces an exact integer answer, so the expected
/// value is stored as `i64`. The prompt is display-ready text; graders
/// must not re-derive the answer from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    mode: Mode,
    difficulty: Difficulty,
    prompt: String,
    answer: i64,
}

impl Question {
    #[must_use]
    pub fn new(mode: Mode, difficulty: Difficulty, prompt: String, answer: i64) -> Self {
        Self {
            mode,
            difficulty,
            prompt,
            answer,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> i64 {
        self.answer
    }

    /// Whether a submitted answer is accepted as correct.
    ///
    /// Exact text match first. Equation questions additionally accept
    /// any numeric form within `1e-3` of the expected value, so "5.0"
    /// matches an expected 5. Non-numeric input on that fallback path
    /// is simply incorrect.
    #[must_use]
    pub fn accepts(&self, submitted: &str) -> bool {
        if submitted == self.answer.to_string() {
            return true;
        }

        if self.mode == Mode::Equation {
            if let Ok(value) = submitted.parse::<f64>() {
                #[allow(clippy::cast_precision_loss)]
                return (value - self.answer as f64).abs() < 1e-3;
            }
        }

        false
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(mode: Mode, answer: i64) -> Question {
        Question::new(mode, Difficulty::Easy, "Q".into(), answer)
    }

    #[test]
    fn exact_text_match_is_accepted_for_every_mode() {
        for mode in Mode::ALL {
            assert!(question(mode, 42).accepts("42"));
            assert!(question(mode, -7).accepts("-7"));
        }
    }

    #[test]
    fn arithmetic_rejects_decimal_notation() {
        assert!(!question(Mode::Arithmetic, 5).accepts("5.0"));
    }

    #[test]
    fn equation_accepts_numeric_forms_within_tolerance() {
        let q = question(Mode::Equation, 5);
        assert!(q.accepts("5.0"));
        assert!(q.accepts("5.0005"));
        assert!(!q.accepts("5.01"));
    }

    #[test]
    fn equation_treats_non_numeric_fallback_as_incorrect() {
        let q = question(Mode::Equation, 5);
        assert!(!q.accepts("five"));
        assert!(!q.accepts("5x"));
    }
}
