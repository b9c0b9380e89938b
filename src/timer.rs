use crate::calendar::CalendarLog;
use crate::domain::{CalendarEntry, Item, TimeSpent};
use crate::id::next_id;
use crate::notifications::{NullNotifier, TimerNotifier};
use crate::persistence::{KvStore, TIMER_PRESET_KEY, TIMER_STATE_KEY};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

/// Wall-clock seam so timer behavior is testable with simulated time
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;
}

/// The real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        crate::id::now_ms()
    }
}

/// The persisted countdown record.
///
/// `end_time` is the single source of truth for completion; elapsed-tick
/// counting is never trusted because polls can be delayed or dropped
/// while the app is backgrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStateRecord {
    /// Epoch milliseconds at which the countdown ends
    pub end_time: i64,
    pub hours: u32,
    pub minutes: u32,
    pub is_active: bool,
}

impl TimerStateRecord {
    fn duration_ms(&self) -> i64 {
        (i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60) * 1000
    }

    fn total_minutes(&self) -> i64 {
        i64::from(self.hours) * 60 + i64::from(self.minutes)
    }
}

/// Last configured duration, independent of any specific item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPreset {
    pub hours: u32,
    pub minutes: u32,
}

impl Default for DurationPreset {
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 25,
        }
    }
}

struct ActiveTimer {
    record: TimerStateRecord,
    /// Snapshot of the bound item, taken at start. Not persisted, so a
    /// restored timer completes without a binding.
    attached: Option<Item>,
}

/// Single process-wide countdown that survives restarts.
///
/// Exactly one timer runs at a time; starting a new one overwrites the
/// previous persisted state (last start wins). Stopping or completing
/// always produces a calendar entry.
pub struct TimerEngine {
    kv: Box<dyn KvStore>,
    clock: Box<dyn Clock>,
    notifier: Box<dyn TimerNotifier>,
    active: Option<ActiveTimer>,
}

impl TimerEngine {
    pub fn new(kv: Box<dyn KvStore>, clock: Box<dyn Clock>) -> Self {
        Self::with_notifier(kv, clock, Box::new(NullNotifier))
    }

    pub fn with_notifier(
        kv: Box<dyn KvStore>,
        clock: Box<dyn Clock>,
        notifier: Box<dyn TimerNotifier>,
    ) -> Self {
        Self {
            kv,
            clock,
            notifier,
            active: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Milliseconds until the countdown ends, when one is running
    pub fn remaining_ms(&self) -> Option<i64> {
        self.active
            .as_ref()
            .map(|active| (active.record.end_time - self.clock.now_ms()).max(0))
    }

    /// Start a countdown, optionally bound to an item.
    ///
    /// A zero duration is ignored. A running timer is overwritten: its
    /// notifications are cancelled and its persisted state replaced, with
    /// no calendar bookkeeping for the superseded run.
    pub fn start(&mut self, hours: u32, minutes: u32, item: Option<&Item>) {
        let duration_ms = (i64::from(hours) * 3600 + i64::from(minutes) * 60) * 1000;
        if duration_ms == 0 {
            return;
        }

        if self.active.is_some() {
            self.notifier.cancel();
        }

        let record = TimerStateRecord {
            end_time: self.clock.now_ms() + duration_ms,
            hours,
            minutes,
            is_active: true,
        };
        self.persist_state(&record);
        self.notifier.timer_progress(duration_ms);
        self.active = Some(ActiveTimer {
            record,
            attached: item.cloned(),
        });
    }

    /// Stop the running countdown early.
    ///
    /// Always logs a calendar entry; the one-minute floor guarantees even
    /// a sub-minute run leaves a record.
    pub fn stop(&mut self, log: &mut CalendarLog) {
        let Some(active) = self.active.take() else {
            return;
        };

        let now = self.clock.now_ms();
        let started = active.record.end_time - active.record.duration_ms();
        let elapsed_minutes = ((now - started) as f64 / 60_000.0).round().max(1.0) as i64;

        self.clear_state();
        self.notifier.cancel();
        log.append(self.make_entry(&active, elapsed_minutes, false));
    }

    /// Advisory tick: emit progress, and complete the countdown when the
    /// persisted end time has passed.
    ///
    /// Returns true when this poll observed completion. Polls may be
    /// skipped or delayed without affecting correctness.
    pub fn poll(&mut self, log: &mut CalendarLog) -> bool {
        let now = self.clock.now_ms();
        match &self.active {
            None => return false,
            Some(active) if now < active.record.end_time => {
                self.notifier.timer_progress(active.record.end_time - now);
                return false;
            }
            Some(_) => {}
        }

        let Some(active) = self.active.take() else {
            return false;
        };
        let elapsed_minutes = active.record.total_minutes().max(1);

        self.clear_state();
        let entry = self.make_entry(&active, elapsed_minutes, true);
        let title = entry.todo.text.clone();
        log.append(entry);
        self.notifier.timer_complete(&title);
        true
    }

    /// Re-enter the running state from persisted data after a restart.
    ///
    /// Only a still-active record whose end time lies in the future is
    /// honored; anything else is discarded silently. Time that passed
    /// while the process was down still counts against the countdown.
    pub fn restore(&mut self) -> bool {
        let raw = match self.kv.get(TIMER_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                warn!("failed to read timer state: {}", e);
                return false;
            }
        };

        let record: TimerStateRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("unreadable timer state, discarding: {}", e);
                self.clear_state();
                return false;
            }
        };

        if record.is_active && self.clock.now_ms() < record.end_time {
            self.active = Some(ActiveTimer {
                record,
                attached: None,
            });
            true
        } else {
            self.clear_state();
            false
        }
    }

    /// Last configured duration; defaults to 25 minutes and seeds the
    /// stored value on first read
    pub fn preset(&self) -> DurationPreset {
        match self.kv.get(TIMER_PRESET_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            Ok(None) => {
                let preset = DurationPreset::default();
                self.persist_preset(&preset);
                preset
            }
            Err(e) => {
                warn!("failed to read timer preset: {}", e);
                DurationPreset::default()
            }
        }
    }

    pub fn set_preset(&mut self, hours: u32, minutes: u32) {
        self.persist_preset(&DurationPreset { hours, minutes });
    }

    fn make_entry(&self, active: &ActiveTimer, elapsed_minutes: i64, completed: bool) -> CalendarEntry {
        let todo = active.attached.clone().unwrap_or_else(|| {
            let mut item = Item::new();
            item.text = "Timer".to_string();
            item.is_editing = false;
            item
        });
        let printed_at = DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms())
            .unwrap_or_else(Utc::now);
        CalendarEntry {
            id: next_id(),
            todo,
            printed_at,
            time_spent: Some(TimeSpent {
                elapsed: elapsed_minutes,
            }),
            timer_completed: Some(completed),
        }
    }

    fn persist_state(&self, record: &TimerStateRecord) {
        match serde_json::to_string(record) {
            Ok(raw) => {
                if let Err(e) = self.kv.set(TIMER_STATE_KEY, &raw) {
                    warn!("failed to persist timer state: {}", e);
                }
            }
            Err(e) => warn!("failed to serialize timer state: {}", e),
        }
    }

    fn clear_state(&self) {
        if let Err(e) = self.kv.remove(TIMER_STATE_KEY) {
            warn!("failed to clear timer state: {}", e);
        }
    }

    fn persist_preset(&self, preset: &DurationPreset) {
        match serde_json::to_string(preset) {
            Ok(raw) => {
                if let Err(e) = self.kv.set(TIMER_PRESET_KEY, &raw) {
                    warn!("failed to persist timer preset: {}", e);
                }
            }
            Err(e) => warn!("failed to serialize timer preset: {}", e),
        }
    }
}
