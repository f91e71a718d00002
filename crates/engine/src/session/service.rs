use chrono::{DateTime, Utc};
use std::fmt;
use tracing::debug;

use quiz_core::generator;
use quiz_core::model::{Difficulty, Mode, Question, SessionSettings, SessionSummary};
use quiz_core::scoring;
use quiz_core::Clock;

use super::countdown::{Countdown, CountdownTick};
use super::view::{AdvanceOutcome, AnswerFeedback, AnswerOutcome, SessionPhase, SessionView, TickEvent};
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz play-through, driven by discrete commands.
///
/// The session reacts to `start`, `submit_answer`, `tick`, `advance`,
/// `reset`, and mode/difficulty changes; each runs to completion before
/// the next. Exactly one question is in flight while the phase is
/// `InProgress`, and both grading and time-out close it through the
/// same transition, which is the only place the countdown is cancelled.
pub struct QuizSession {
    settings: SessionSettings,
    clock: Clock,
    mode: Mode,
    difficulty: Difficulty,
    phase: SessionPhase,
    question_index: u32,
    score: u32,
    streak: u32,
    best_streak: u32,
    correct: u32,
    answered: u32,
    countdown: Countdown,
    current: Option<Question>,
    feedback: Option<AnswerFeedback>,
    started_at: Option<DateTime<Utc>>,
    summary: Option<SessionSummary>,
}

impl QuizSession {
    /// Create an idle session. Nothing happens until `start()`.
    #[must_use]
    pub fn new(settings: SessionSettings, mode: Mode, difficulty: Difficulty) -> Self {
        Self {
            settings,
            clock: Clock::default_clock(),
            mode,
            difficulty,
            phase: SessionPhase::Idle,
            question_index: 0,
            score: 0,
            streak: 0,
            best_streak: 0,
            correct: 0,
            answered: 0,
            countdown: Countdown::new(settings.question_time_secs()),
            current: None,
            feedback: None,
            started_at: None,
            summary: None,
        }
    }

    /// Replace the wall clock, for deterministic timestamps in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    //
    // ─── COMMANDS ──────────────────────────────────────────────────────────
    //

    /// Begin a fresh play-through: counters zeroed, index at 1, first
    /// question generated, countdown running.
    ///
    /// Valid from any phase; starting mid-session discards it, exactly
    /// like the reset/play-again flow.
    pub fn start(&mut self) {
        self.question_index = 1;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.correct = 0;
        self.answered = 0;
        self.summary = None;
        self.started_at = Some(self.clock.now());
        self.phase = SessionPhase::InProgress;
        self.next_question();

        debug!(
            mode = self.mode.label(),
            difficulty = self.difficulty.label(),
            total = self.settings.total_questions(),
            "session started"
        );
    }

    /// Grade a submitted answer against the in-flight question.
    ///
    /// Correct answers bump streak, correct count, and score (base
    /// points for the tier plus the time bonus); wrong answers reset
    /// the streak. Either way the question closes and the countdown is
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAcceptingAnswers` unless a question is
    /// in flight, and `SessionError::EmptyAnswer` for empty or
    /// whitespace-only input; neither changes any state.
    pub fn submit_answer(&mut self, submitted: &str) -> Result<AnswerFeedback, SessionError> {
        if self.phase != SessionPhase::InProgress {
            return Err(SessionError::NotAcceptingAnswers);
        }
        let trimmed = submitted.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        let Some(question) = self.current.as_ref() else {
            return Err(SessionError::NotAcceptingAnswers);
        };

        let feedback = if question.accepts(trimmed) {
            let points = scoring::points_awarded(
                question.difficulty(),
                self.countdown.remaining_secs(),
            );
            self.score += points;
            self.streak += 1;
            self.correct += 1;
            self.best_streak = self.best_streak.max(self.streak);

            AnswerFeedback {
                outcome: AnswerOutcome::Correct,
                expected: question.answer(),
                points_earned: points,
            }
        } else {
            self.streak = 0;
            AnswerFeedback {
                outcome: AnswerOutcome::Incorrect,
                expected: question.answer(),
                points_earned: 0,
            }
        };

        self.close_question(feedback);
        Ok(feedback)
    }

    /// Deliver one second of elapsed time.
    ///
    /// Only meaningful while a question is in flight; a tick in any
    /// other phase is a stale timer callback and is ignored. Expiry
    /// closes the question as timed out — the session does not advance
    /// on its own.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }

        match self.countdown.tick() {
            CountdownTick::Running { remaining_secs } => Some(TickEvent::Running {
                remaining_secs,
                low_time: self.countdown.is_low(),
            }),
            CountdownTick::Expired => {
                let expected = self.current.as_ref().map_or(0, Question::answer);
                self.streak = 0;
                let feedback = AnswerFeedback {
                    outcome: AnswerOutcome::TimedOut,
                    expected,
                    points_earned: 0,
                };
                self.close_question(feedback);
                Some(TickEvent::Expired(feedback))
            }
            CountdownTick::Idle => None,
        }
    }

    /// Step past a closed question: either open the next one or, after
    /// the last, freeze the final statistics.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingToAdvance` unless the current
    /// question has closed.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        if self.phase != SessionPhase::QuestionClosed {
            return Err(SessionError::NothingToAdvance);
        }

        if self.question_index >= self.settings.total_questions() {
            let completed_at = self.clock.now();
            let summary = SessionSummary::from_counts(
                self.started_at.unwrap_or(completed_at),
                completed_at,
                self.score,
                self.correct,
                self.answered,
                self.best_streak,
            )?;
            self.current = None;
            self.phase = SessionPhase::Finished;
            self.summary = Some(summary.clone());

            debug!(
                score = self.score,
                correct = self.correct,
                answered = self.answered,
                "session finished"
            );
            return Ok(AdvanceOutcome::Finished(summary));
        }

        self.question_index += 1;
        self.phase = SessionPhase::InProgress;
        self.next_question();
        Ok(AdvanceOutcome::NextQuestion)
    }

    /// Discard everything and return to `Idle`. Valid from any phase.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.question_index = 0;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.correct = 0;
        self.answered = 0;
        self.countdown.cancel();
        self.current = None;
        self.feedback = None;
        self.started_at = None;
        self.summary = None;

        debug!("session reset");
    }

    /// Switch question family. Mid-question, the in-flight prompt is
    /// discarded and regenerated under the new mode with a fresh
    /// countdown; nothing is forfeited and nothing counts as answered.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if self.phase == SessionPhase::InProgress {
            self.next_question();
        }
    }

    /// Switch difficulty tier, with the same mid-question regeneration
    /// rule as `set_mode`.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        if self.phase == SessionPhase::InProgress {
            self.next_question();
        }
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────
    //

    fn next_question(&mut self) {
        let mut rng = rand::rng();
        let question = generator::generate(self.mode, self.difficulty, &mut rng);

        debug!(
            index = self.question_index,
            prompt = question.prompt(),
            "question opened"
        );

        self.current = Some(question);
        self.feedback = None;
        self.countdown.start();
    }

    /// The single close-question transition. Both grading and time-out
    /// funnel through here, so the countdown is cancelled in exactly
    /// one place.
    fn close_question(&mut self, feedback: AnswerFeedback) {
        self.countdown.cancel();
        self.answered += 1;
        self.feedback = Some(feedback);
        self.phase = SessionPhase::QuestionClosed;

        debug!(
            index = self.question_index,
            outcome = ?feedback.outcome,
            points = feedback.points_earned,
            "question closed"
        );
    }

    //
    // ─── OBSERVATIONS ──────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
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
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// 1-based index of the current question; 0 while idle.
    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        scoring::accuracy_percent(self.correct, self.answered)
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    /// Frozen final statistics, present only once `Finished`.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Assemble the full read-only projection for the presentation
    /// layer.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            mode: self.mode,
            difficulty: self.difficulty,
            prompt: self.current.as_ref().map(|q| q.prompt().to_string()),
            question_index: self.question_index,
            total_questions: self.settings.total_questions(),
            score: self.score,
            streak: self.streak,
            best_streak: self.best_streak,
            accuracy_percent: self.accuracy_percent(),
            time_remaining_secs: self.countdown.remaining_secs(),
            time_fraction: self.countdown.fraction(),
            low_time: self.phase == SessionPhase::InProgress && self.countdown.is_low(),
            feedback: self.feedback,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("mode", &self.mode)
            .field("difficulty", &self.difficulty)
            .field("question_index", &self.question_index)
            .field("score", &self.score)
            .field("streak", &self.streak)
            .field("answered", &self.answered)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    fn session() -> QuizSession {
        QuizSession::new(
            SessionSettings::default(),
            Mode::Arithmetic,
            Difficulty::Medium,
        )
        .with_clock(fixed_clock())
    }

    fn correct_answer(session: &QuizSession) -> String {
        session
            .current_question()
            .expect("a question should be in flight")
            .answer()
            .to_string()
    }

    #[test]
    fn starts_idle_and_opens_first_question_on_start() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(s.current_question().is_none());

        s.start();
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert_eq!(s.question_index(), 1);
        assert!(s.current_question().is_some());
        assert_eq!(s.time_remaining_secs(), 30);
    }

    #[test]
    fn correct_answer_scores_and_closes_the_question() {
        let mut s = session();
        s.start();

        let answer = correct_answer(&s);
        let feedback = s.submit_answer(&answer).unwrap();

        assert_eq!(feedback.outcome, AnswerOutcome::Correct);
        assert_eq!(s.phase(), SessionPhase::QuestionClosed);
        assert_eq!(s.streak(), 1);
        assert_eq!(s.best_streak(), 1);
        assert_eq!(s.correct(), 1);
        assert_eq!(s.answered(), 1);
        // Medium at the full 30 seconds: 15 base + 6 bonus.
        assert_eq!(feedback.points_earned, 21);
        assert_eq!(s.score(), 21);
    }

    #[test]
    fn hard_answer_after_five_ticks_earns_25_points() {
        let mut s = QuizSession::new(
            SessionSettings::default(),
            Mode::Arithmetic,
            Difficulty::Hard,
        );
        s.start();
        for _ in 0..5 {
            s.tick();
        }
        assert_eq!(s.time_remaining_secs(), 25);

        let answer = correct_answer(&s);
        let feedback = s.submit_answer(&answer).unwrap();
        assert_eq!(feedback.points_earned, 25);
    }

    #[test]
    fn wrong_answer_resets_streak_and_earns_nothing() {
        let mut s = session();
        s.start();
        let answer = correct_answer(&s);
        s.submit_answer(&answer).unwrap();
        s.advance().unwrap();

        // An answer no generator produces.
        let feedback = s.submit_answer("999999999").unwrap();
        assert_eq!(feedback.outcome, AnswerOutcome::Incorrect);
        assert_eq!(feedback.points_earned, 0);
        assert_eq!(s.streak(), 0);
        assert_eq!(s.best_streak(), 1);
        assert_eq!(s.correct(), 1);
        assert_eq!(s.answered(), 2);
    }

    #[test]
    fn empty_or_whitespace_answers_are_rejected_without_state_change() {
        let mut s = session();
        s.start();

        assert_eq!(s.submit_answer("").unwrap_err(), SessionError::EmptyAnswer);
        assert_eq!(
            s.submit_answer("   ").unwrap_err(),
            SessionError::EmptyAnswer
        );
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert_eq!(s.answered(), 0);
    }

    #[test]
    fn misordered_commands_are_rejected_and_leave_state_alone() {
        let mut s = session();
        assert_eq!(
            s.submit_answer("1").unwrap_err(),
            SessionError::NotAcceptingAnswers
        );
        assert_eq!(s.advance().unwrap_err(), SessionError::NothingToAdvance);

        s.start();
        assert_eq!(s.advance().unwrap_err(), SessionError::NothingToAdvance);

        let answer = correct_answer(&s);
        s.submit_answer(&answer).unwrap();
        assert_eq!(
            s.submit_answer(&answer).unwrap_err(),
            SessionError::NotAcceptingAnswers
        );
        assert_eq!(s.answered(), 1);
    }

    #[test]
    fn timeout_closes_the_question_as_timed_out() {
        let mut s = session();
        s.start();
        let answer = correct_answer(&s);
        s.submit_answer(&answer).unwrap();
        s.advance().unwrap();
        assert_eq!(s.streak(), 1);

        let mut expired = None;
        for _ in 0..30 {
            expired = s.tick();
        }
        let Some(TickEvent::Expired(feedback)) = expired else {
            panic!("countdown should have expired");
        };

        assert_eq!(feedback.outcome, AnswerOutcome::TimedOut);
        assert_eq!(s.phase(), SessionPhase::QuestionClosed);
        assert_eq!(s.streak(), 0);
        assert_eq!(s.answered(), 2);
        assert_eq!(s.correct(), 1);

        // Stale timer callbacks after the close are ignored.
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn tick_reports_low_time_at_the_threshold() {
        let mut s = session();
        s.start();

        let mut events = Vec::new();
        for _ in 0..20 {
            events.push(s.tick().unwrap());
        }
        assert_eq!(
            events[18],
            TickEvent::Running {
                remaining_secs: 11,
                low_time: false
            }
        );
        assert_eq!(
            events[19],
            TickEvent::Running {
                remaining_secs: 10,
                low_time: true
            }
        );
    }

    #[test]
    fn mode_change_mid_question_regenerates_without_counting() {
        let mut s = session();
        s.start();
        for _ in 0..7 {
            s.tick();
        }
        let before = s.current_question().unwrap().clone();

        s.set_mode(Mode::Sequence);
        let after = s.current_question().unwrap();

        assert_eq!(after.mode(), Mode::Sequence);
        assert_ne!(before.prompt(), after.prompt());
        assert_eq!(s.answered(), 0);
        assert_eq!(s.question_index(), 1);
        // Fresh countdown for the regenerated question.
        assert_eq!(s.time_remaining_secs(), 30);
    }

    #[test]
    fn difficulty_change_while_closed_waits_for_the_next_question() {
        let mut s = session();
        s.start();
        let answer = correct_answer(&s);
        s.submit_answer(&answer).unwrap();

        s.set_difficulty(Difficulty::Hard);
        assert_eq!(s.phase(), SessionPhase::QuestionClosed);
        assert!(s.current_question().is_some());

        s.advance().unwrap();
        assert_eq!(s.current_question().unwrap().difficulty(), Difficulty::Hard);
    }

    #[test]
    fn reset_returns_to_idle_from_any_phase() {
        let mut s = session();
        s.reset();
        assert_eq!(s.phase(), SessionPhase::Idle);

        s.start();
        s.reset();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.score(), 0);
        assert_eq!(s.streak(), 0);
        assert_eq!(s.answered(), 0);
        assert!(s.current_question().is_none());

        s.start();
        let answer = correct_answer(&s);
        s.submit_answer(&answer).unwrap();
        s.reset();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.answered(), 0);
    }

    #[test]
    fn view_projects_the_session_state() {
        let mut s = session();
        s.start();
        for _ in 0..3 {
            s.tick();
        }

        let view = s.view();
        assert_eq!(view.phase, SessionPhase::InProgress);
        assert_eq!(view.question_index, 1);
        assert_eq!(view.total_questions, 10);
        assert_eq!(view.time_remaining_secs, 27);
        assert!((view.time_fraction - 0.9).abs() < 1e-6);
        assert!(!view.low_time);
        assert_eq!(view.prompt.as_deref(), s.current_question().map(|q| q.prompt()));
    }
}
