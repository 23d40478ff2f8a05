use crate::defines::*;

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use std::io::Write;

/// The shim only ever moves Pending -> Fired, once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Pending,
    Fired,
}

/// A single future trigger at a local wall-clock time. Blocks the process
/// until due; there is no cancellation surface and no persistence, killing
/// the process simply loses the job.
pub struct OneShotSchedule {
    fire_at: NaiveDateTime,
    state: ScheduleState,
}

/// Next occurrence of `at` strictly after `now`. A time already reached
/// today rolls over to the same time tomorrow, never into the past.
pub fn next_occurrence(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

impl OneShotSchedule {
    pub fn new(at: NaiveTime, now: NaiveDateTime) -> OneShotSchedule {
        OneShotSchedule {
            fire_at: next_occurrence(now, at),
            state: ScheduleState::Pending,
        }
    }

    pub fn fire_at(&self) -> NaiveDateTime {
        self.fire_at
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    /// Advance the state machine against `now`. Returns whether the
    /// trigger has fired; once Fired it stays Fired.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        if self.state == ScheduleState::Pending && now >= self.fire_at {
            self.state = ScheduleState::Fired;
        }
        self.state == ScheduleState::Fired
    }

    /// Block until the trigger time, rewriting a countdown line once per
    /// second. This wait is the entire lifetime of a scheduled run.
    pub fn wait(&mut self) {
        while !self.poll(Local::now().naive_local()) {
            let remaining = self.fire_at - Local::now().naive_local();
            let total_secs = remaining.num_seconds().max(0);
            print!(
                "\r{}time left before submitting: {:02}:{:02}:{:02}{}",
                COLOR_MAGENTA,
                total_secs / 3600,
                (total_secs % 3600) / 60,
                total_secs % 60,
                COLOR_RESET
            );
            let _ = std::io::stdout().flush();
            std::thread::sleep(std::time::Duration::from_secs(1));
        }
        println!();
    }
}
