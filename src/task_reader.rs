use std::fs::File;
use std::io::{BufReader, Read};

use anyhow::{Context, Result};
use brotli::Decompressor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::item::{Item, ItemId};
use crate::timeline::Timestamp;

/// Trait for producing the task list shown on the timeline
pub trait TaskReader {
    /// Reads tasks from `file_path`. Readers that generate data may ignore the path.
    fn read(&self, file_path: &str) -> Result<Vec<Item>>;
}

/// Accepted layouts of a task file.
#[derive(Deserialize)]
#[serde(untagged)]
enum TaskFile {
    List(Vec<Item>),
    Document { tasks: Vec<Item> },
}

/// Reads JSON task files, optionally brotli compressed (`.br`).
#[derive(Debug, Default)]
pub struct JsonTaskReader;

impl JsonTaskReader {
    pub fn new() -> Self {
        Self
    }
}

impl TaskReader for JsonTaskReader {
    fn read(&self, file_path: &str) -> Result<Vec<Item>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open task file '{}'", file_path))?;

        let mut reader: Box<dyn Read> = if file_path.ends_with(".br") {
            Box::new(BufReader::new(Decompressor::new(file, 4096)))
        } else {
            Box::new(BufReader::new(file))
        };

        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .with_context(|| format!("Failed to read task file '{}'", file_path))?;

        parse_tasks(&contents).with_context(|| format!("Invalid task file '{}'", file_path))
    }
}

/// Parses a JSON task list: either an array of items or `{"tasks": [...]}`.
pub fn parse_tasks(json: &str) -> Result<Vec<Item>> {
    let file: TaskFile = serde_json::from_str(json)?;
    let items = match file {
        TaskFile::List(items) => items,
        TaskFile::Document { tasks } => tasks,
    };
    Ok(items)
}

const DEMO_STAGES: [&str; 4] = ["fetch", "build", "test", "deploy"];
const DEFAULT_TASKS_PER_STAGE: usize = 4;

/// Generates a reproducible pipeline of tasks ending around `anchor`.
///
/// Earlier stages are finished, the last started task is still running and
/// the remaining ones have not started.
pub struct DemoTaskReader {
    seed: u64,
    anchor: Timestamp,
    tasks_per_stage: usize,
}

impl DemoTaskReader {
    pub fn new(anchor: Timestamp) -> Self {
        Self::with_config(42, anchor, DEFAULT_TASKS_PER_STAGE)
    }

    pub fn with_config(seed: u64, anchor: Timestamp, tasks_per_stage: usize) -> Self {
        Self {
            seed,
            anchor,
            tasks_per_stage: tasks_per_stage.max(1),
        }
    }
}

impl TaskReader for DemoTaskReader {
    fn read(&self, _file_path: &str) -> Result<Vec<Item>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let total = DEMO_STAGES.len() * self.tasks_per_stage;

        // Lay tasks out back to back, then shift so the running one straddles the anchor
        let running_index = total - self.tasks_per_stage / 2 - 1;
        let mut items = Vec::with_capacity(total);
        let mut cursor = 0.0;
        let mut previous_stage: Vec<ItemId> = Vec::new();
        let mut next_id: ItemId = 1;

        for stage in DEMO_STAGES {
            let mut current_stage = Vec::with_capacity(self.tasks_per_stage);
            for n in 0..self.tasks_per_stage {
                let duration = rng.gen_range(5_000.0..60_000.0);
                let start = cursor + rng.gen_range(0.0..2_000.0);
                cursor = start + duration * 0.5;

                let dependencies = if previous_stage.is_empty() {
                    Vec::new()
                } else {
                    vec![previous_stage[rng.gen_range(0..previous_stage.len())]]
                };

                items.push(
                    Item::new(next_id, format!("{} #{}", stage, n + 1), Some(start), Some(start + duration))
                        .with_group(stage)
                        .with_dependencies(dependencies),
                );
                current_stage.push(next_id);
                next_id += 1;
            }
            previous_stage = current_stage;
        }

        let offset = match items[running_index].start {
            Some(start) => self.anchor - start - 1_000.0,
            None => self.anchor,
        };
        for (index, item) in items.iter_mut().enumerate() {
            if index > running_index {
                item.start = None;
                item.end = None;
            } else {
                item.start = item.start.map(|t| t + offset);
                item.end = if index == running_index {
                    None
                } else {
                    item.end.map(|t| t + offset)
                };
            }
        }

        Ok(items)
    }
}
