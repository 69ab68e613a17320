use std::collections::BTreeMap;
use std::time::Duration;

/// The self-expiring effects a session can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Hides the transient feedback message.
    Feedback,
    /// Ends the victory particle burst.
    ParticleBurst,
    /// Steps the ambient track's fade-out.
    AmbientFade,
}

#[derive(Debug, Clone, Copy)]
struct Task {
    due: Duration,
    every: Option<Duration>,
}

/// Frame-driven scheduler with at most one task per [`TimerKind`].
///
/// Scheduling a kind that is already pending replaces the old task, so two
/// feedback messages never race to hide each other.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    tasks: BTreeMap<TimerKind, Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time accumulated through [`Scheduler::advance`].
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `kind` once after `delay`, replacing any pending task of that kind.
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        let replaced = self
            .tasks
            .insert(
                kind,
                Task {
                    due: self.now + delay,
                    every: None,
                },
            )
            .is_some();
        tracing::debug!(?kind, ?delay, replaced, "timer scheduled");
    }

    /// Fire `kind` every `interval` until cancelled.
    pub fn schedule_repeating(&mut self, kind: TimerKind, interval: Duration) {
        let interval = interval.max(Duration::from_millis(1));
        self.tasks.insert(
            kind,
            Task {
                due: self.now + interval,
                every: Some(interval),
            },
        );
        tracing::debug!(?kind, ?interval, "repeating timer scheduled");
    }

    /// Cancel a pending task. Returns true if one was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.tasks.remove(&kind).is_some()
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.tasks.contains_key(&kind)
    }

    /// Advance the clock by `dt` and return every firing, in time order.
    ///
    /// A repeating task that falls several intervals behind fires once per
    /// missed interval.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerKind> {
        self.now += dt;
        let mut fired: Vec<(Duration, TimerKind)> = Vec::new();
        let mut expired = Vec::new();
        for (kind, task) in &mut self.tasks {
            while task.due <= self.now {
                fired.push((task.due, *kind));
                match task.every {
                    Some(every) => task.due += every,
                    None => {
                        expired.push(*kind);
                        break;
                    }
                }
            }
        }
        for kind in expired {
            self.tasks.remove(&kind);
        }
        fired.sort_by_key(|(due, _)| *due);
        fired.into_iter().map(|(_, kind)| kind).collect()
    }
}
