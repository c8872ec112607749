use super::{SpeechError, SpeechOptions, SpeechRecognizer, SpeechSynthesizer};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Recognizer double that counts start/stop calls
#[derive(Default)]
pub struct MockRecognizer {
    starts: AtomicUsize,
    stops: AtomicUsize,
    fail_with: Mutex<Option<SpeechError>>,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `start` calls fail with `error`
    pub fn fail_with(&self, error: SpeechError) {
        *self.fail_with.lock() = Some(error);
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl SpeechRecognizer for MockRecognizer {
    fn start(&self, _language: &str) -> Result<(), SpeechError> {
        if let Some(error) = self.fail_with.lock().clone() {
            return Err(error);
        }
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Synthesizer double that records what it was asked to say
#[derive(Default)]
pub struct MockSynthesizer {
    spoken: Mutex<Vec<String>>,
    cancels: AtomicUsize,
    fail_with: Mutex<Option<SpeechError>>,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, error: SpeechError) {
        *self.fail_with.lock() = Some(error);
    }

    /// Everything passed to `speak`, in order
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn speak(&self, text: &str, _options: &SpeechOptions) -> Result<(), SpeechError> {
        if let Some(error) = self.fail_with.lock().clone() {
            return Err(error);
        }
        self.spoken.lock().push(text.to_string());
        Ok(())
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}
