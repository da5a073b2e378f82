use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::element::ElementRecord;
use crate::scheduler::{ManualScheduler, Scheduler, TimerEvent};

/// Wrong options shown next to the correct one.
pub const DISTRACTOR_COUNT: usize = 2;

/// Timing knobs for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    /// Countdown budget per question, in ticks.
    pub question_seconds: u32,
    /// Pause between locking an answer and moving on.
    pub reveal_delay: Duration,
    /// Length of one countdown tick.
    pub tick: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_seconds: 10,
            reveal_delay: Duration::from_millis(1500),
            tick: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("the quiz has no questions; the element list was empty")]
    NoQuestions,
    #[error("a quiz can only be restarted from its result summary")]
    NotFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Nothing to ask: the session was started with no elements. Can only be closed.
    Loading,
    /// A question is on screen and the countdown is running.
    InProgress,
    /// The answer is locked and the session waits to move on.
    AnswerRevealed,
    /// Result summary.
    Finished,
}

/// One question: name the element shown by its symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub element: ElementRecord,
    /// Korean names in display order. Always contains the correct one.
    pub options: Vec<String>,
    /// Index in `options` that holds the correct answer.
    pub correct_index: usize,
}

impl Question {
    pub fn prompt(&self) -> &str {
        &self.element.symbol
    }

    pub fn correct_label(&self) -> &str {
        &self.element.name_ko
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_label: String,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: u32,
    /// Questions presented before the session ended.
    pub attempted: u32,
    /// `round(score / attempted * 100)`
    pub percentage: u32,
}

impl QuizSummary {
    pub fn new(score: u32, attempted: u32) -> Self {
        let percentage = if attempted == 0 {
            0
        } else {
            (f64::from(score) / f64::from(attempted) * 100.0).round() as u32
        };

        Self {
            score,
            attempted,
            percentage,
        }
    }
}

/// Colour band of the countdown bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBand {
    Plenty,
    Low,
    Critical,
}

impl TimerBand {
    pub fn for_remaining(seconds: u32) -> Self {
        if seconds > 5 {
            TimerBand::Plenty
        } else if seconds > 2 {
            TimerBand::Low
        } else {
            TimerBand::Critical
        }
    }
}

/// Uniformly shuffled copy of `elements`.
pub fn shuffle_questions<R: Rng + ?Sized>(
    rng: &mut R,
    elements: &[ElementRecord],
) -> Vec<ElementRecord> {
    let mut order = elements.to_vec();
    order.shuffle(rng);
    order
}

/// Builds the option set for `element`.
///
/// Distractors are drawn without replacement from `pool`, skipping any record
/// whose Korean name equals the correct one. A small pool gives fewer options,
/// never an error.
pub fn build_question<R: Rng + ?Sized>(
    rng: &mut R,
    element: &ElementRecord,
    pool: &[ElementRecord],
) -> Question {
    let correct = element.name_ko.as_str();

    let eligible: Vec<&ElementRecord> = pool
        .iter()
        .filter(|candidate| candidate.name_ko != correct)
        .collect();

    let mut options: Vec<String> = eligible
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .map(|candidate| candidate.name_ko.clone())
        .collect();
    options.push(correct.to_string());
    options.shuffle(rng);

    let correct_index = options
        .iter()
        .position(|option| option == correct)
        .unwrap_or_default();

    Question {
        element: element.clone(),
        options,
        correct_index,
    }
}

/// A timed multiple-choice run over a fixed element list.
///
/// Timer ticks and answer submissions are the only inputs that change state.
/// Once an answer is locked both become no-ops until the session moves on.
pub struct QuizSession<R: Rng, S: Scheduler> {
    rng: R,
    scheduler: S,
    settings: QuizSettings,
    pool: Vec<ElementRecord>,
    order: Vec<ElementRecord>,
    index: usize,
    score: u32,
    remaining: u32,
    question: Option<Question>,
    selected: Option<String>,
    locked: bool,
    phase: QuizPhase,
}

impl<R: Rng, S: Scheduler> QuizSession<R, S> {
    /// Starts a session over a random permutation of `elements`.
    pub fn start(elements: Vec<ElementRecord>, rng: R, scheduler: S, settings: QuizSettings) -> Self {
        let mut session = Self::idle(elements, rng, scheduler, settings);
        let order = shuffle_questions(&mut session.rng, &session.pool);
        session.begin(order);
        session
    }

    /// Starts a session that asks `order` as given, drawing distractors from
    /// `pool`. Restarting reshuffles `pool`.
    pub fn with_question_order(
        order: Vec<ElementRecord>,
        pool: Vec<ElementRecord>,
        rng: R,
        scheduler: S,
        settings: QuizSettings,
    ) -> Self {
        let mut session = Self::idle(pool, rng, scheduler, settings);
        session.begin(order);
        session
    }

    fn idle(pool: Vec<ElementRecord>, rng: R, scheduler: S, settings: QuizSettings) -> Self {
        Self {
            rng,
            scheduler,
            settings,
            pool,
            order: Vec::new(),
            index: 0,
            score: 0,
            remaining: settings.question_seconds,
            question: None,
            selected: None,
            locked: false,
            phase: QuizPhase::Loading,
        }
    }

    fn begin(&mut self, order: Vec<ElementRecord>) {
        self.order = order;
        self.score = 0;

        if self.order.is_empty() {
            log::warn!("quiz started without any elements");
            self.phase = QuizPhase::Loading;
            return;
        }

        log::info!("quiz started with {} questions", self.order.len());
        self.enter_question(0);
    }

    fn enter_question(&mut self, index: usize) {
        self.index = index;
        self.question = Some(build_question(
            &mut self.rng,
            &self.order[index],
            &self.pool,
        ));
        self.selected = None;
        self.locked = false;
        self.remaining = self.settings.question_seconds;
        self.phase = QuizPhase::InProgress;
        self.scheduler.start_countdown(self.settings.tick);
        log::debug!("question {} of {}", index + 1, self.order.len());
    }

    /// Records `choice` (or a timeout for `None`) for the current question.
    ///
    /// Returns `None` when the answer was already locked or no question is
    /// active.
    pub fn submit_answer(&mut self, choice: Option<&str>) -> Option<AnswerOutcome> {
        if self.phase != QuizPhase::InProgress || self.locked {
            return None;
        }

        let question = self.question.as_ref()?;
        let correct_label = question.correct_label().to_string();
        let correct = choice == Some(correct_label.as_str());

        self.locked = true;
        self.selected = choice.map(str::to_string);
        if correct {
            self.score += 1;
        }

        self.scheduler.stop_countdown();
        self.scheduler.schedule_advance(self.settings.reveal_delay);
        self.phase = QuizPhase::AnswerRevealed;

        Some(AnswerOutcome {
            correct,
            correct_label,
            selected: self.selected.clone(),
        })
    }

    /// One countdown step. Reaching zero submits a timeout.
    pub fn tick(&mut self) {
        if self.phase != QuizPhase::InProgress || self.locked {
            return;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            log::debug!("question {} timed out", self.index + 1);
            self.submit_answer(None);
        }
    }

    /// Moves past a revealed answer to the next question or the summary.
    pub fn advance(&mut self) {
        if self.phase != QuizPhase::AnswerRevealed {
            return;
        }

        if self.index + 1 < self.order.len() {
            self.enter_question(self.index + 1);
        } else {
            self.finish();
        }
    }

    pub fn dispatch(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick => self.tick(),
            TimerEvent::Advance => self.advance(),
        }
    }

    /// Ends the run early. The summary counts only questions presented so far.
    pub fn exit(&mut self) -> Option<QuizSummary> {
        match self.phase {
            QuizPhase::InProgress | QuizPhase::AnswerRevealed => {
                self.finish();
                self.summary()
            }
            QuizPhase::Finished => self.summary(),
            QuizPhase::Loading => None,
        }
    }

    /// Starts over with a fresh permutation of the same elements.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::Finished => {
                let order = shuffle_questions(&mut self.rng, &self.pool);
                self.begin(order);
                Ok(())
            }
            QuizPhase::Loading => Err(QuizError::NoQuestions),
            QuizPhase::InProgress | QuizPhase::AnswerRevealed => Err(QuizError::NotFinished),
        }
    }

    /// Cancels every outstanding timer and hands the scheduler back.
    pub fn close(mut self) -> S {
        self.cancel_timers();
        self.scheduler
    }

    fn finish(&mut self) {
        self.cancel_timers();
        self.phase = QuizPhase::Finished;
        log::info!(
            "quiz finished: {} of {} correct",
            self.score,
            self.attempted()
        );
    }

    fn cancel_timers(&mut self) {
        self.scheduler.stop_countdown();
        self.scheduler.cancel_advance();
    }

    fn attempted(&self) -> u32 {
        if self.order.is_empty() {
            0
        } else {
            self.index as u32 + 1
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::InProgress | QuizPhase::AnswerRevealed => self.question.as_ref(),
            QuizPhase::Loading | QuizPhase::Finished => None,
        }
    }

    pub fn question_order(&self) -> &[ElementRecord] {
        &self.order
    }

    /// 0-based index of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.remaining
    }

    pub fn timer_band(&self) -> TimerBand {
        TimerBand::for_remaining(self.remaining)
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn summary(&self) -> Option<QuizSummary> {
        (self.phase == QuizPhase::Finished).then(|| QuizSummary::new(self.score, self.attempted()))
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<R: Rng> QuizSession<R, ManualScheduler> {
    /// Advances the virtual clock by `span`, delivering every timer event due
    /// on the way.
    pub fn elapse(&mut self, span: Duration) {
        let deadline = self.scheduler.now() + span;
        while let Some(event) = self.scheduler.next_due(deadline) {
            self.dispatch(event);
        }
        self.scheduler.settle(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::builtin_elements;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn first(count: usize) -> Vec<ElementRecord> {
        builtin_elements().into_iter().take(count).collect()
    }

    fn session(elements: Vec<ElementRecord>, seed: u64) -> QuizSession<StdRng, ManualScheduler> {
        QuizSession::start(
            elements,
            StdRng::seed_from_u64(seed),
            ManualScheduler::new(),
            QuizSettings::default(),
        )
    }

    fn correct_label(session: &QuizSession<StdRng, ManualScheduler>) -> String {
        session
            .question()
            .expect("question should be active")
            .correct_label()
            .to_string()
    }

    #[test]
    fn question_order_is_a_permutation() {
        let elements = first(30);
        let session = session(elements.clone(), 11);

        let asked: HashSet<u32> = session
            .question_order()
            .iter()
            .map(|record| record.number)
            .collect();

        assert_eq!(session.total(), 30);
        assert_eq!(asked.len(), 30);
        assert!(elements.iter().all(|record| asked.contains(&record.number)));
    }

    #[test]
    fn options_contain_correct_label_and_two_distractors() {
        let elements = builtin_elements();
        let mut rng = StdRng::seed_from_u64(4);

        for element in elements.iter().take(20) {
            let question = build_question(&mut rng, element, &elements);

            assert_eq!(question.options.len(), 3);
            assert_eq!(question.options[question.correct_index], element.name_ko);
            let correct_count = question
                .options
                .iter()
                .filter(|option| **option == element.name_ko)
                .count();
            assert_eq!(correct_count, 1);
        }
    }

    #[test]
    fn tiny_pool_yields_fewer_options() {
        let elements = first(2);
        let mut rng = StdRng::seed_from_u64(8);

        let question = build_question(&mut rng, &elements[0], &elements);
        assert_eq!(question.options.len(), 2);

        let alone = build_question(&mut rng, &elements[0], &elements[..1]);
        assert_eq!(alone.options, vec!["수소".to_string()]);
        assert_eq!(alone.correct_index, 0);
    }

    #[test]
    fn duplicate_korean_names_never_become_distractors() {
        let mut elements = first(3);
        elements[1].name_ko = elements[0].name_ko.clone();
        let mut rng = StdRng::seed_from_u64(3);

        let question = build_question(&mut rng, &elements[0], &elements);

        assert_eq!(question.options.len(), 2);
        assert!(question.options.contains(&"리튬".to_string()));
    }

    #[test]
    fn second_submission_is_ignored() {
        let mut session = session(first(5), 21);
        let correct = correct_label(&session);

        let first = session.submit_answer(Some("틀린 답"));
        let second = session.submit_answer(Some(&correct));

        assert_eq!(first.map(|outcome| outcome.correct), Some(false));
        assert!(second.is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_answer(), Some("틀린 답"));
    }

    #[test]
    fn correct_answer_scores_exactly_one() {
        let mut session = session(first(5), 22);
        let correct = correct_label(&session);

        let outcome = session
            .submit_answer(Some(&correct))
            .expect("first answer is accepted");

        assert!(outcome.correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.phase(), QuizPhase::AnswerRevealed);
        assert!(!session.scheduler().countdown_running());
    }

    #[test]
    fn countdown_resets_on_each_question() {
        let mut session = session(first(5), 5);
        session.elapse(Duration::from_secs(4));
        assert_eq!(session.time_remaining(), 6);

        session.submit_answer(None);
        session.elapse(Duration::from_millis(1500));

        assert_eq!(session.index(), 1);
        assert_eq!(session.time_remaining(), 10);
        assert_eq!(session.phase(), QuizPhase::InProgress);
    }

    #[test]
    fn timeout_counts_as_wrong_and_advances() {
        let mut session = session(first(5), 6);

        session.elapse(Duration::from_secs(10));
        assert_eq!(session.phase(), QuizPhase::AnswerRevealed);
        assert_eq!(session.selected_answer(), None);
        assert_eq!(session.score(), 0);

        session.elapse(Duration::from_millis(1500));
        assert_eq!(session.index(), 1);
        assert!(!session.is_locked());
    }

    #[test]
    fn ticks_after_lock_do_not_change_time() {
        let mut session = session(first(5), 7);
        session.elapse(Duration::from_secs(3));
        session.submit_answer(Some("아무거나"));

        session.tick();
        session.tick();

        assert_eq!(session.time_remaining(), 7);
    }

    #[test]
    fn exit_reports_attempted_questions_only() {
        let mut session = session(first(10), 9);
        let correct = correct_label(&session);
        session.submit_answer(Some(&correct));
        session.elapse(Duration::from_millis(1500));

        let summary = session.exit().expect("exit from a running quiz yields a summary");

        assert_eq!(summary, QuizSummary::new(1, 2));
        assert_eq!(summary.percentage, 50);
        assert!(session.scheduler().is_idle());
    }

    #[test]
    fn exit_during_reveal_cancels_pending_advance() {
        let mut session = session(first(10), 10);
        session.submit_answer(None);
        session.exit();

        session.elapse(Duration::from_secs(5));

        assert_eq!(session.phase(), QuizPhase::Finished);
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn restart_only_from_summary() {
        let mut session = session(first(4), 12);
        assert_eq!(session.restart(), Err(QuizError::NotFinished));

        session.exit();
        session.restart().expect("restart from summary");

        assert_eq!(session.phase(), QuizPhase::InProgress);
        assert_eq!(session.index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_remaining(), 10);
        assert_eq!(session.total(), 4);
    }

    #[test]
    fn empty_list_stays_loading() {
        let mut session = session(Vec::new(), 1);

        assert_eq!(session.phase(), QuizPhase::Loading);
        assert!(session.question().is_none());
        assert!(session.submit_answer(Some("수소")).is_none());
        assert!(session.exit().is_none());
        assert_eq!(session.restart(), Err(QuizError::NoQuestions));
        assert!(session.scheduler().is_idle());

        let scheduler = session.close();
        assert!(scheduler.is_idle());
    }

    #[test]
    fn close_cancels_timers() {
        let mut session = session(first(3), 13);
        session.submit_answer(None);
        assert!(session.scheduler().advance_pending());

        let scheduler = session.close();
        assert!(scheduler.is_idle());
    }

    #[test]
    fn percentage_is_rounded() {
        assert_eq!(QuizSummary::new(2, 3).percentage, 67);
        assert_eq!(QuizSummary::new(1, 3).percentage, 33);
        assert_eq!(QuizSummary::new(0, 0).percentage, 0);
    }

    #[test]
    fn timer_band_thresholds() {
        assert_eq!(TimerBand::for_remaining(10), TimerBand::Plenty);
        assert_eq!(TimerBand::for_remaining(6), TimerBand::Plenty);
        assert_eq!(TimerBand::for_remaining(5), TimerBand::Low);
        assert_eq!(TimerBand::for_remaining(3), TimerBand::Low);
        assert_eq!(TimerBand::for_remaining(2), TimerBand::Critical);
        assert_eq!(TimerBand::for_remaining(0), TimerBand::Critical);
    }
}
