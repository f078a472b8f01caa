//! `TaskQueue`: per-agent queue of delayed tasks keyed by due time.
//!
//! `BTreeMap` keeps tasks ordered by due time; tasks due at the same
//! millisecond fire in the order they were scheduled.

use std::collections::BTreeMap;

use tracing::warn;

use ai_core::{Millis, TaskId};

/// Lifetime of a scheduled task.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Survives state changes; removed only by firing, `cancel` or `clear`.
    Agent,
    /// Valid only while the owner is still in the state activation `epoch`.
    State(u64),
}

impl Scope {
    #[inline]
    fn is_live(self, current_epoch: u64) -> bool {
        match self {
            Scope::Agent => true,
            Scope::State(epoch) => epoch == current_epoch,
        }
    }
}

/// One queued task.
#[derive(Clone, Debug)]
pub struct ScheduledTask<T> {
    pub id:      TaskId,
    pub scope:   Scope,
    pub payload: T,
}

/// Delayed tasks owned by a single agent.
pub struct TaskQueue<T> {
    inner:   BTreeMap<Millis, Vec<ScheduledTask<T>>>,
    next_id: u64,
    /// Cached total task count for O(1) `len()`.
    total:   usize,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), next_id: 0, total: 0 }
    }
}

impl<T: std::fmt::Debug> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `payload` to fire at `now + delay_ms`.
    pub fn schedule(&mut self, now: Millis, delay_ms: u64, scope: Scope, payload: T) -> TaskId {
        self.schedule_at(now + delay_ms, scope, payload)
    }

    /// Queue `payload` to fire at the absolute time `due`.
    pub fn schedule_at(&mut self, due: Millis, scope: Scope, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.inner.entry(due).or_default().push(ScheduledTask { id, scope, payload });
        self.total += 1;
        id
    }

    /// Remove the task `id`.  Returns `false` if it already fired or never
    /// existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let mut emptied = None;
        let mut found = false;
        for (due, tasks) in self.inner.iter_mut() {
            if let Some(pos) = tasks.iter().position(|t| t.id == id) {
                tasks.remove(pos);
                found = true;
                if tasks.is_empty() {
                    emptied = Some(*due);
                }
                break;
            }
        }
        if let Some(due) = emptied {
            self.inner.remove(&due);
        }
        if found {
            self.total -= 1;
        }
        found
    }

    /// Drop every queued task.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }

    /// Remove and return the payloads of every task due at or before `now`,
    /// earliest first.
    ///
    /// State-scoped tasks whose epoch differs from `current_epoch` are
    /// dropped with a warning instead of being returned.
    pub fn drain_due(&mut self, now: Millis, current_epoch: u64) -> Vec<T> {
        let later = self.inner.split_off(&(now + 1));
        let due = std::mem::replace(&mut self.inner, later);

        let mut fired = Vec::new();
        for (at, tasks) in due {
            self.total -= tasks.len();
            for task in tasks {
                if task.scope.is_live(current_epoch) {
                    fired.push(task.payload);
                } else {
                    warn!(
                        task = %task.id,
                        due = %at,
                        scope = ?task.scope,
                        current_epoch,
                        payload = ?task.payload,
                        "stale task dropped"
                    );
                }
            }
        }
        fired
    }

    /// Due time of the earliest queued task, or `None` if empty.
    pub fn next_due(&self) -> Option<Millis> {
        self.inner.keys().next().copied()
    }

    /// `true` if any queued task satisfies `pred`.
    pub fn any(&self, mut pred: impl FnMut(&ScheduledTask<T>) -> bool) -> bool {
        self.inner.values().flatten().any(|t| pred(t))
    }

    /// Total number of queued tasks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
