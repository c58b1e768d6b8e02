use std::sync::{Arc, Mutex};

/// A region of the page that displays rendered markup
pub trait View {
    fn show(&mut self, markup: String);
}

/// Remembers only the most recently shown fragment. Clones share it.
#[derive(Default, Clone, Debug)]
pub struct LatestFragment {
    markup: Arc<Mutex<Option<String>>>,
}

impl LatestFragment {
    pub fn take(&self) -> Option<String> {
        self.markup.lock().unwrap().take()
    }
}

impl View for LatestFragment {
    fn show(&mut self, markup: String) {
        *self.markup.lock().unwrap() = Some(markup);
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::{Arc, Mutex};

    use super::View;

    /// Keeps everything it was asked to show. Clones share the same history.
    #[derive(Default, Clone, Debug)]
    pub struct RecordingView {
        shown: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingView {
        pub fn last(&self) -> Option<String> {
            self.shown.lock().unwrap().last().cloned()
        }

        pub fn count(&self) -> usize {
            self.shown.lock().unwrap().len()
        }
    }

    impl View for RecordingView {
        fn show(&mut self, markup: String) {
            self.shown.lock().unwrap().push(markup);
        }
    }
}
