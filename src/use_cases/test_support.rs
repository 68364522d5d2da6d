use crate::domain::{DisplayError, DisplayFrame, DisplaySink};
use std::sync::Mutex;

// In-memory display that records every accepted frame.
pub(crate) struct RecordingSink {
    frames: Mutex<Vec<DisplayFrame>>,
    // Frames accepted before every further write fails.
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self {
            frames: Mutex::new(Vec::new()),
            fail_after: None,
        }
    }

    pub(crate) fn failing_after(accepted: usize) -> Self {
        Self {
            frames: Mutex::new(Vec::new()),
            fail_after: Some(accepted),
        }
    }

    pub(crate) fn frames(&self) -> Vec<DisplayFrame> {
        self.frames.lock().expect("frames mutex poisoned").clone()
    }

    pub(crate) fn count(&self) -> usize {
        self.frames.lock().expect("frames mutex poisoned").len()
    }
}

impl DisplaySink for RecordingSink {
    fn show(&self, frame: DisplayFrame) -> Result<(), DisplayError> {
        let mut frames = self.frames.lock().expect("frames mutex poisoned");
        if self.fail_after.is_some_and(|limit| frames.len() >= limit) {
            return Err(DisplayError::Backend("test sink closed".to_string()));
        }
        frames.push(frame);
        Ok(())
    }
}
