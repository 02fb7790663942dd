use std::sync::{Arc, Mutex};

use stepdag::engine::ClockBackend;

/// A clock that never ticks on its own.
///
/// It records every start/stop request so tests can assert on them; ticks
/// are delivered by sending `SessionEvent::Tick` into the channel directly,
/// using the generation of the latest start.
#[derive(Clone, Default)]
pub struct ManualClock {
    log: Arc<Mutex<Vec<&'static str>>>,
    running: Arc<Mutex<bool>>,
    generation: Arc<Mutex<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"start"` / `"stop"` in the order they were requested.
    pub fn requests(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }

    /// Generation passed to the most recent `start`.
    pub fn generation(&self) -> u64 {
        *self.generation.lock().unwrap()
    }
}

impl ClockBackend for ManualClock {
    fn start(&mut self, generation: u64) {
        self.log.lock().unwrap().push("start");
        *self.generation.lock().unwrap() = generation;
        *self.running.lock().unwrap() = true;
    }

    fn stop(&mut self) {
        self.log.lock().unwrap().push("stop");
        *self.running.lock().unwrap() = false;
    }

    fn is_running(&self) -> bool {
        *self.running.lock().unwrap()
    }
}
