use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender, select};

/// Timer callbacks a quiz session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One countdown period elapsed.
    Tick,
    /// The post-answer reveal delay elapsed.
    Advance,
}

/// Timing capability injected into a quiz session.
///
/// The session only asks for timers to be started or cancelled. Whoever owns
/// the real clock feeds the resulting [`TimerEvent`]s back through
/// `QuizSession::dispatch`.
pub trait Scheduler {
    /// Starts a repeating `Tick`, replacing any countdown already running.
    fn start_countdown(&mut self, period: Duration);
    fn stop_countdown(&mut self);
    /// Schedules a single `Advance`, replacing any pending one.
    fn schedule_advance(&mut self, delay: Duration);
    fn cancel_advance(&mut self);
}

/// A virtual clock that only moves when asked to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    now: Duration,
    /// (period, next due time)
    countdown: Option<(Duration, Duration)>,
    advance_at: Option<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn advance_pending(&self) -> bool {
        self.advance_at.is_some()
    }

    pub fn is_idle(&self) -> bool {
        !self.countdown_running() && !self.advance_pending()
    }

    /// Removes and returns the earliest event due no later than `deadline`,
    /// moving the clock to its due time.
    pub fn next_due(&mut self, deadline: Duration) -> Option<TimerEvent> {
        let tick_at = self.countdown.map(|(_, due)| due);

        match (tick_at, self.advance_at) {
            (Some(tick), advance) if tick <= deadline && advance.is_none_or(|at| tick <= at) => {
                self.now = tick;
                if let Some((period, due)) = self.countdown.as_mut() {
                    *due += *period;
                }
                Some(TimerEvent::Tick)
            }
            (_, Some(advance)) if advance <= deadline => {
                self.now = advance;
                self.advance_at = None;
                Some(TimerEvent::Advance)
            }
            _ => None,
        }
    }

    /// Moves the clock forward to `deadline` without firing anything.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl Scheduler for ManualScheduler {
    fn start_countdown(&mut self, period: Duration) {
        self.countdown = Some((period, self.now + period));
    }

    fn stop_countdown(&mut self) {
        self.countdown = None;
    }

    fn schedule_advance(&mut self, delay: Duration) {
        self.advance_at = Some(self.now + delay);
    }

    fn cancel_advance(&mut self) {
        self.advance_at = None;
    }
}

/// Real-time scheduler running on one background timer thread.
///
/// The thread waits on crossbeam `tick`/`after` channels next to a command
/// channel and forwards each firing as `E::from(TimerEvent)` to the event
/// sender. Commands are applied in the order they are issued, so once
/// `stop_countdown` or `cancel_advance` is handled no further event of that
/// kind is sent. Dropping the scheduler stops the thread.
pub struct ThreadScheduler {
    commands: Sender<TimerCommand>,
}

#[derive(Debug, Clone, Copy)]
enum TimerCommand {
    StartCountdown(Duration),
    StopCountdown,
    ScheduleAdvance(Duration),
    CancelAdvance,
}

enum Wake {
    Command(Option<TimerCommand>),
    Tick,
    Advance,
}

impl ThreadScheduler {
    pub fn new<E>(events: Sender<E>) -> Self
    where
        E: From<TimerEvent> + Send + 'static,
    {
        let (commands, control) = channel::unbounded();
        thread::spawn(move || run_timers(control, events));
        Self { commands }
    }

    fn send(&self, command: TimerCommand) {
        if self.commands.send(command).is_err() {
            log::warn!("timer thread is gone, dropped {:?}", command);
        }
    }
}

fn run_timers<E: From<TimerEvent>>(control: Receiver<TimerCommand>, events: Sender<E>) {
    let mut countdown: Receiver<Instant> = channel::never();
    let mut advance: Receiver<Instant> = channel::never();

    loop {
        let wake = select! {
            recv(control) -> command => Wake::Command(command.ok()),
            recv(countdown) -> _ => Wake::Tick,
            recv(advance) -> _ => Wake::Advance,
        };

        let event = match wake {
            Wake::Command(None) => break,
            Wake::Command(Some(command)) => {
                match command {
                    TimerCommand::StartCountdown(period) => countdown = channel::tick(period),
                    TimerCommand::StopCountdown => countdown = channel::never(),
                    TimerCommand::ScheduleAdvance(delay) => advance = channel::after(delay),
                    TimerCommand::CancelAdvance => advance = channel::never(),
                }
                continue;
            }
            Wake::Tick => TimerEvent::Tick,
            Wake::Advance => {
                advance = channel::never();
                TimerEvent::Advance
            }
        };

        if events.send(E::from(event)).is_err() {
            break;
        }
    }

    log::debug!("timer thread stopped");
}

impl Scheduler for ThreadScheduler {
    fn start_countdown(&mut self, period: Duration) {
        self.send(TimerCommand::StartCountdown(period));
    }

    fn stop_countdown(&mut self) {
        self.send(TimerCommand::StopCountdown);
    }

    fn schedule_advance(&mut self, delay: Duration) {
        self.send(TimerCommand::ScheduleAdvance(delay));
    }

    fn cancel_advance(&mut self) {
        self.send(TimerCommand::CancelAdvance);
    }
}
