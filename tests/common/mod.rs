// Shared fixtures for replaystat integration tests
#![allow(dead_code)]

use replaystat::core::{Category, Game, GameType};
use replaystat::filters::Filter;
use replaystat::metrics::Metric;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Render one boardspace-style replay record.
pub fn record(setup: &str, result: &str, moves: &[(&str, &str)]) -> String {
    let mut text = format!(
        "(;FF[4]GM[Hive]SU[{setup}]\n\
         P0[id \"alice\"]P0[rating 1720]\n\
         P1[id \"bob\"]P1[rating 1650]\n\
         RE[{result}]\n"
    );
    for (i, (token, position)) in moves.iter().enumerate() {
        let (slot, color) = if i % 2 == 0 { ("P0", "W") } else { ("P1", "B") };
        text.push_str(&format!(";{slot}[{i} move {color} {token} {position}]\n"));
    }
    text.push(')');
    text
}

/// A well-formed base-variant game opened with the queen, `n_moves` long.
pub fn base_record(n_moves: usize) -> String {
    let mut moves: Vec<(&str, &str)> = vec![("Q", "."), ("Q", "Q-")];
    while moves.len() < n_moves {
        moves.push(("G1", "-Q"));
    }
    moves.truncate(n_moves.max(1));
    record("hive", "white", &moves)
}

/// Record cut off mid-transfer; must fail parsing, not crash the run.
pub const TRUNCATED_RECORD: &str = "(;FF[4]GM[Hive]SU[hive]P0[id \"alice\"";

/// Write `files` (relative path, content) under `root`, creating directories.
pub fn write_corpus(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Metric stub that journals every call into a shared event log.
///
/// Events are `"<name>:game"` / `"<name>:save"`, so cross-metric ordering can
/// be asserted from one log. Each observed game is captured with its category,
/// variant and replay flag at the moment of receipt.
pub struct RecordingMetric {
    name: String,
    pub events: Arc<Mutex<Vec<String>>>,
    pub seen: Arc<Mutex<Vec<(Category, GameType, bool)>>>,
}

impl RecordingMetric {
    pub fn new(name: &str, events: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            events,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen_handle(&self) -> Arc<Mutex<Vec<(Category, GameType, bool)>>> {
        Arc::clone(&self.seen)
    }
}

impl Metric for RecordingMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze_game(
        &mut self,
        category: Category,
        game_type: GameType,
        game: &Game,
    ) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:game", self.name));
        self.seen
            .lock()
            .unwrap()
            .push((category, game_type, game.replay_mode()));
        Ok(())
    }

    fn save(&self) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:save", self.name));
        Ok(())
    }
}

/// Metric stub that fails on demand.
pub struct FailingMetric {
    pub fail_update: bool,
    pub fail_save: bool,
}

impl Metric for FailingMetric {
    fn name(&self) -> &str {
        "failing"
    }

    fn analyze_game(
        &mut self,
        _category: Category,
        _game_type: GameType,
        _game: &Game,
    ) -> anyhow::Result<()> {
        if self.fail_update {
            anyhow::bail!("synthetic update failure");
        }
        Ok(())
    }

    fn save(&self) -> anyhow::Result<()> {
        if self.fail_save {
            anyhow::bail!("synthetic save failure");
        }
        Ok(())
    }
}

/// Filter stub that counts invocations and answers a fixed verdict.
pub struct RecordingFilter {
    name: String,
    accept: bool,
    pub invocations: Arc<AtomicUsize>,
}

impl RecordingFilter {
    pub fn new(name: &str, accept: bool) -> Self {
        Self {
            name: name.to_string(),
            accept,
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn invocations_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.invocations)
    }
}

impl Filter for RecordingFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, _category: Category, _game: &Game) -> bool {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.accept
    }
}
