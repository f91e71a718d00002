//! Scoring rules for graded answers.

use crate::model::Difficulty;

/// Divisor mapping remaining seconds to bonus points.
const TIME_BONUS_DIVISOR: u32 = 5;

/// Points for a correct answer:
/// `floor(10 × difficulty multiplier) + max(1, time_remaining / 5)`.
///
/// The multiplier is 1 / 1.5 / 2 for easy / medium / hard, so the base
/// term is exactly 10 / 15 / 20. Even an answer at the buzzer earns a
/// one-point time bonus.
#[must_use]
pub fn points_awarded(difficulty: Difficulty, time_remaining_secs: u32) -> u32 {
    let time_bonus = (time_remaining_secs / TIME_BONUS_DIVISOR).max(1);
    difficulty.base_points() + time_bonus
}

/// Rounded percentage of correct answers, 0 when nothing was answered.
#[must_use]
pub fn accuracy_percent(correct: u32, answered: u32) -> u32 {
    if answered == 0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        ((f64::from(correct) / f64::from(answered)) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_answer_with_25_seconds_left_earns_25_points() {
        assert_eq!(points_awarded(Difficulty::Hard, 25), 25);
    }

    #[test]
    fn base_points_follow_the_difficulty_multiplier() {
        assert_eq!(points_awarded(Difficulty::Easy, 30), 16);
        assert_eq!(points_awarded(Difficulty::Medium, 30), 21);
        assert_eq!(points_awarded(Difficulty::Hard, 30), 26);
    }

    #[test]
    fn time_bonus_never_drops_below_one() {
        assert_eq!(points_awarded(Difficulty::Easy, 0), 11);
        assert_eq!(points_awarded(Difficulty::Easy, 4), 11);
        assert_eq!(points_awarded(Difficulty::Easy, 5), 11);
        assert_eq!(points_awarded(Difficulty::Easy, 10), 12);
    }

    #[test]
    fn accuracy_rounds_to_nearest_percent() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(10, 10), 100);
    }
}
