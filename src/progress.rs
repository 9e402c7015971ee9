// src/progress.rs
use crate::runner::Stage;

/// Lightweight progress reporting used by the analysis runner.
/// The CLI implements this to print stage changes; tests use it to observe them.
pub trait Progress {
    /// Called on every state-machine transition, including the final one.
    fn stage(&mut self, _stage: Stage) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one projection (or output artifact) completes.
    fn item_done(&mut self, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints stage changes and status lines to stderr.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn stage(&mut self, stage: Stage) {
        eprintln!("[{stage}]");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, name: &str) {
        eprintln!("  done: {name}");
    }
}

/// Records everything it is told; handy for asserting on the run sequence.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub stages: Vec<Stage>,
    pub lines: Vec<String>,
    pub done: Vec<String>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn stage(&mut self, stage: Stage) { self.stages.push(stage); }
    fn log(&mut self, msg: &str) { self.lines.push(s!(msg)); }
    fn item_done(&mut self, name: &str) { self.done.push(s!(name)); }
    fn finish(&mut self) { self.finished = true; }
}
