//! Asynchronous task file loading.
//!
//! Task files are parsed on a background thread so the GUI keeps
//! repainting (and rolling) while a large file is read.

use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tdg::{DemoTaskReader, Item, JsonTaskReader, TaskReader, Timestamp};
use crate::io::LoadingState;

/// Result of a completed loading operation.
pub enum LoadResult {
    /// Loading completed successfully
    Success {
        items: Vec<Item>,
        /// Path of the loaded file (None for demo tasks)
        path: Option<PathBuf>,
    },
    /// Loading failed with an error
    Error(String),
    /// No loading operation finished since the last check
    None,
}

/// Runs task file reads on a background thread and hands the items back
/// to the GUI thread.
pub struct AsyncLoader {
    loading_state: Arc<Mutex<LoadingState>>,
    loading_receiver: Option<Receiver<Result<Vec<Item>, String>>>,
    pending_load_path: Option<PathBuf>,
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            loading_receiver: None,
            pending_load_path: None,
        }
    }

    /// Checks if a loading operation is currently in progress.
    pub fn is_loading(&self) -> bool {
        self.loading_state
            .lock()
            .map(|state| state.in_progress)
            .unwrap_or(false)
    }

    /// Starts reading a task file in the background.
    ///
    /// Call `check_completion()` once per frame to pick up the result.
    pub fn start_file_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        let generation = match self.loading_state.lock() {
            Ok(mut state) => state.begin(),
            Err(_) => 0,
        };
        self.pending_load_path = Some(path.clone());

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();
        let path_string = path.to_string_lossy().into_owned();

        log::info!("Loading tasks from {}", path_string);

        thread::spawn(move || {
            let result = JsonTaskReader::new()
                .read(&path_string)
                .map_err(|e| format!("{:#}", e));

            let _ = sender.send(result);

            if let Ok(mut state) = loading_state.lock() {
                state.finish(generation);
            }

            ctx_handle.request_repaint();
        });
    }

    /// Generates demo tasks around `now` synchronously.
    pub fn load_demo_tasks(&self, now: Timestamp) -> Result<Vec<Item>, String> {
        DemoTaskReader::new(now).read("").map_err(|e| format!("{:#}", e))
    }

    /// Returns the result of a finished background load, if any.
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };
        let Ok(result) = receiver.try_recv() else {
            return LoadResult::None;
        };

        self.loading_receiver = None;
        match result {
            Ok(items) => LoadResult::Success {
                items,
                path: self.pending_load_path.take(),
            },
            Err(error_msg) => {
                self.pending_load_path = None;
                LoadResult::Error(error_msg)
            }
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_async_loader_creation() {
        let loader = AsyncLoader::new();
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_demo_tasks_loading() {
        let loader = AsyncLoader::new();
        let items = loader.load_demo_tasks(1_000_000.0).expect("demo tasks should load");
        assert!(!items.is_empty());
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut loader = AsyncLoader::new();
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }

    #[test]
    fn test_newer_load_replaces_older() {
        let mut loader = AsyncLoader::new();
        let ctx = egui::Context::default();
        loader.start_file_load(PathBuf::from("/nonexistent/first.json"), &ctx);
        loader.start_file_load(PathBuf::from("/nonexistent/second.json"), &ctx);

        let mut result = LoadResult::None;
        for _ in 0..200 {
            result = loader.check_completion();
            if !matches!(result, LoadResult::None) {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        match result {
            LoadResult::Error(message) => assert!(message.contains("second.json")),
            _ => panic!("expected a load error"),
        }
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut loader = AsyncLoader::new();
        let ctx = egui::Context::default();
        loader.start_file_load(PathBuf::from("/nonexistent/tasks.json"), &ctx);

        let mut result = LoadResult::None;
        for _ in 0..200 {
            result = loader.check_completion();
            if !matches!(result, LoadResult::None) {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        match result {
            LoadResult::Error(message) => assert!(message.contains("tasks.json")),
            _ => panic!("expected a load error"),
        }
    }
}
