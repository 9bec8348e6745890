/// Handle to a pending deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// A task waiting for the host clock to reach `at`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask<T> {
    pub id: TaskId,
    pub at: f64,
    pub task: T,
}

/// Timeline of deferred work, keyed by host time.
///
/// Nothing here sleeps or spawns: the owner asks for everything that is due
/// at a given time and runs it. Tasks due at the same time come out in the
/// order they were scheduled. Anything still pending can be cancelled.
#[derive(Debug)]
pub struct Scheduler<T> {
    pending: Vec<ScheduledTask<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Queue `task` to run once the clock reaches `at`.
    pub fn schedule(&mut self, at: f64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let slot = self.pending.partition_point(|entry| entry.at <= at);
        self.pending.insert(slot, ScheduledTask { id, at, task });
        id
    }

    /// Drop a pending task. Returns false if it already ran or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|entry| entry.id == id) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        let due = self.pending.partition_point(|entry| entry.at <= now);
        self.pending.drain(..due).map(|entry| entry.task).collect()
    }

    /// Time of the earliest pending task.
    pub fn next_due(&self) -> Option<f64> {
        self.pending.first().map(|entry| entry.at)
    }

    pub fn pending(&self) -> &[ScheduledTask<T>] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_time_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(2.0, "late");
        scheduler.schedule(0.5, "early");
        scheduler.schedule(1.0, "middle");

        assert_eq!(scheduler.next_due(), Some(0.5));
        assert_eq!(scheduler.drain_due(1.0), vec!["early", "middle"]);
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.drain_due(1.5).is_empty());
        assert_eq!(scheduler.drain_due(2.0), vec!["late"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1.0, 1);
        scheduler.schedule(1.0, 2);
        scheduler.schedule(1.0, 3);
        assert_eq!(scheduler.drain_due(1.0), vec![1, 2, 3]);
    }

    #[test]
    fn cancel_removes_only_pending() {
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule(1.0, "keep");
        let drop = scheduler.schedule(1.0, "drop");

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop));
        assert_eq!(scheduler.pending()[0].id, keep);
        assert_eq!(scheduler.drain_due(5.0), vec!["keep"]);
        assert!(!scheduler.cancel(keep));
    }
}
