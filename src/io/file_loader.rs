//! Background task loading state.

/// Whether a task file is being read on the background thread.
///
/// Shared through `Arc<Mutex<>>` between the GUI thread and the loader
/// thread; results travel separately through a channel. Every load gets a
/// generation number so a superseded load cannot clear the flag of the
/// load that replaced it.
#[derive(Debug, Default)]
pub struct LoadingState {
    pub in_progress: bool,
    generation: u64,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a new load as running and returns its generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.in_progress = true;
        self.generation
    }

    /// Marks the load of `generation` as done. Ignored if a newer load started since.
    pub fn finish(&mut self, generation: u64) {
        if generation == self.generation {
            self.in_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_clears_current_load() {
        let mut state = LoadingState::new();
        let generation = state.begin();
        assert!(state.in_progress);

        state.finish(generation);
        assert!(!state.in_progress);
    }

    #[test]
    fn test_superseded_load_keeps_flag() {
        let mut state = LoadingState::new();
        let first = state.begin();
        let second = state.begin();

        state.finish(first);
        assert!(state.in_progress);

        state.finish(second);
        assert!(!state.in_progress);
    }
}
