//! Fitness histories: every `(fitness, position)` pair a particle or a
//! swarm has observed, with the running best recovered by scanning.

use crate::vector::Vec3;

/// Record of visited `(fitness, position)` pairs.
///
/// Fitness values key the record: recording a bit-equal fitness again
/// overwrites the stored position instead of growing the history, so a
/// stationary particle re-reporting the same value does not accumulate
/// entries. The best entry is the one with the smallest fitness.
///
/// With a capacity limit the history evicts its worst (largest
/// fitness) entry once the limit is exceeded. The best entry can never
/// be the one evicted, so the reported best still only improves over
/// time.
#[derive(Clone, Debug, Default)]
pub struct FitnessHistory {
    entries: Vec<(f64, Vec3)>,
    /// Maximum retained entries; 0 means unbounded.
    capacity: usize,
}

impl FitnessHistory {
    /// Unbounded history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            capacity: 0,
        }
    }

    /// History limited to `capacity` entries, worst evicted first.
    /// A capacity of 0 is unbounded.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Change the capacity limit. Applies from the next [`Self::record`];
    /// entries already on record are not trimmed retroactively.
    pub fn set_capacity_limit(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Record one observation and return the best position now on
    /// record. Infallible: the observation just recorded guarantees a
    /// non-empty history, and eviction keeps the best entry.
    pub fn record(&mut self, fitness: f64, position: Vec3) -> Vec3 {
        match self.entries.iter_mut().find(|(key, _)| *key == fitness) {
            Some(entry) => entry.1 = position,
            None => self.entries.push((fitness, position)),
        }
        if self.capacity > 0 && self.entries.len() > self.capacity {
            self.evict_worst();
        }
        match self.best() {
            Some((_, best)) => best,
            // Unreachable: at least one entry survives eviction.
            None => position,
        }
    }

    /// Best `(fitness, position)` on record, or `None` while empty.
    /// Scans in insertion order, keeping the first strict minimum.
    pub fn best(&self) -> Option<(f64, Vec3)> {
        let mut best: Option<(f64, Vec3)> = None;
        for &(fitness, position) in &self.entries {
            let replace = match best {
                None => true,
                Some((best_fitness, _)) => fitness < best_fitness,
            };
            if replace {
                best = Some((fitness, position));
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_worst(&mut self) {
        let mut worst = 0;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.0 > self.entries[worst].0 {
                worst = index;
            }
        }
        self.entries.remove(worst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_is_none_while_empty() {
        let history = FitnessHistory::new();
        assert!(history.best().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn record_returns_running_minimum() {
        let mut history = FitnessHistory::new();
        let far = Vec3::new(0.0, 0.0, 0.0);
        let near = Vec3::new(50.0, 20.0, 10.0);
        assert_eq!(history.record(49_500.0, far), far);
        // A better observation takes over as best.
        assert_eq!(history.record(1_500.0, near), near);
        // A worse one does not.
        assert_eq!(history.record(60_000.0, Vec3::new(-5.0, 0.0, 0.0)), near);
        assert_eq!(history.best(), Some((1_500.0, near)));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn equal_fitness_overwrites_instead_of_growing() {
        let mut history = FitnessHistory::new();
        let first = Vec3::new(1.0, 2.0, 3.0);
        let second = Vec3::new(9.0, 9.0, 9.0);
        history.record(250.0, first);
        history.record(250.0, second);
        assert_eq!(history.len(), 1);
        assert_eq!(history.best(), Some((250.0, second)));
    }

    #[test]
    fn distinct_fitness_values_each_add_an_entry() {
        let mut history = FitnessHistory::new();
        for step in 0..10 {
            history.record(f64::from(step) * 3.5 + 1.0, Vec3::new(f64::from(step), 0.0, 0.0));
        }
        assert_eq!(history.len(), 10);
    }

    #[test]
    fn best_never_regresses_over_a_recording_sequence() {
        let mut history = FitnessHistory::new();
        let fitness_values = [900.0, 400.0, 650.0, 120.0, 120.5, 3000.0];
        let mut previous_best = f64::INFINITY;
        for (index, fitness) in fitness_values.into_iter().enumerate() {
            history.record(fitness, Vec3::new(index as f64, 0.0, 0.0));
            let (best_fitness, _) = history.best().unwrap();
            assert!(best_fitness <= previous_best);
            previous_best = best_fitness;
        }
        assert_eq!(previous_best, 120.0);
    }

    #[test]
    fn capacity_limit_evicts_worst_entry() {
        let mut history = FitnessHistory::with_capacity_limit(3);
        history.record(500.0, Vec3::new(1.0, 0.0, 0.0));
        history.record(100.0, Vec3::new(2.0, 0.0, 0.0));
        history.record(900.0, Vec3::new(3.0, 0.0, 0.0));
        // Fourth record pushes the history over capacity; 900 goes.
        history.record(300.0, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(history.len(), 3);
        assert_eq!(history.best(), Some((100.0, Vec3::new(2.0, 0.0, 0.0))));
    }

    #[test]
    fn capacity_limit_preserves_best_under_sustained_pressure() {
        let mut history = FitnessHistory::with_capacity_limit(2);
        history.record(10.0, Vec3::new(0.0, 1.0, 0.0));
        for step in 0..50 {
            // Every later observation is worse than the initial best.
            history.record(1_000.0 + f64::from(step), Vec3::new(f64::from(step), 0.0, 0.0));
            assert!(history.len() <= 2);
            assert_eq!(history.best().unwrap().0, 10.0);
        }
    }

    #[test]
    fn eviction_can_drop_the_incoming_entry_itself() {
        let mut history = FitnessHistory::with_capacity_limit(1);
        history.record(5.0, Vec3::new(1.0, 1.0, 1.0));
        let best = history.record(80.0, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(history.len(), 1);
        assert_eq!(best, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn zero_capacity_means_unbounded() {
        let mut history = FitnessHistory::with_capacity_limit(0);
        for step in 0..100 {
            history.record(f64::from(step), Vec3::default());
        }
        assert_eq!(history.len(), 100);
    }

    #[test]
    fn set_capacity_limit_applies_to_later_records() {
        let mut history = FitnessHistory::new();
        history.record(1.0, Vec3::default());
        history.record(2.0, Vec3::default());
        history.set_capacity_limit(2);
        history.record(3.0, Vec3::default());
        assert_eq!(history.len(), 2);
    }
}
