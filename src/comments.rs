use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    constants::COMMENTS_KEY,
    error::SiteResult,
    forms::{Field, FieldError, FieldErrors, Submission},
    page_compilers::compile_comments,
    storage::{load_snapshot, save_snapshot, SharedStorage, Storage},
    utils::today,
    view::View,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub name: String,
    pub content: String,
    pub date: String,
}

/// Reads the stored comments, newest first
pub fn load_comments<S: Storage + ?Sized>(storage: &S) -> Vec<Comment> {
    load_snapshot(storage, COMMENTS_KEY)
}

struct BoardState<V> {
    comments: Vec<Comment>,
    view: V,
    is_submitting: bool,
}

/// Marks the board as submitting for as long as it lives, so a dropped submission frees it too
struct InFlight<'a, V>(&'a Mutex<BoardState<V>>);

impl<'a, V> InFlight<'a, V> {
    fn take(state: &'a Mutex<BoardState<V>>) -> Option<Self> {
        let mut guarded = state.lock().unwrap();
        if guarded.is_submitting {
            return None;
        }
        guarded.is_submitting = true;
        Some(Self(state))
    }
}

impl<V> Drop for InFlight<'_, V> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.lock() {
            state.is_submitting = false;
        }
    }
}

/// The comment list with its form. Clones share the same board.
pub struct CommentBoard<S, V> {
    storage: SharedStorage<S>,
    state: Arc<Mutex<BoardState<V>>>,
    delay: Duration,
    date_format: String,
}

impl<S, V> Clone for CommentBoard<S, V> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            state: self.state.clone(),
            delay: self.delay,
            date_format: self.date_format.clone(),
        }
    }
}

impl<S, V> CommentBoard<S, V>
where
    S: Storage,
    V: View,
{
    /// Loads the stored comments and shows them
    pub fn new(
        storage: SharedStorage<S>,
        mut view: V,
        delay: Duration,
        date_format: impl Into<String>,
    ) -> Self {
        let comments = load_comments(&*storage.lock().unwrap());
        debug!("Loaded {} comment(s)", comments.len());
        view.show(compile_comments(&comments));
        Self {
            storage,
            state: Arc::new(Mutex::new(BoardState {
                comments,
                view,
                is_submitting: false,
            })),
            delay,
            date_format: date_format.into(),
        }
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state.lock().unwrap().comments.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.lock().unwrap().is_submitting
    }

    /// Posts a comment after the submission delay. While one submission is in flight, others
    /// are ignored.
    pub async fn submit(&self, name: &str, content: &str) -> SiteResult<Submission> {
        let (name, content) = (name.trim(), content.trim());
        let mut errors = FieldErrors::default();
        if name.is_empty() {
            errors.show(FieldError::Missing(Field::Name));
        }
        if content.is_empty() {
            errors.show(FieldError::Missing(Field::Message));
        }
        if !errors.is_empty() {
            return Ok(Submission::Rejected(errors));
        }

        let _in_flight = match InFlight::take(&self.state) {
            Some(in_flight) => in_flight,
            None => {
                debug!("A comment is already being submitted, ignoring another one");
                return Ok(Submission::Ignored);
            }
        };

        tokio::time::sleep(self.delay).await;

        let comment = Comment {
            name: name.into(),
            content: content.into(),
            date: today(&self.date_format),
        };
        let mut comments = self.comments();
        comments.insert(0, comment);
        save_snapshot(&mut *self.storage.lock().unwrap(), COMMENTS_KEY, &comments)?;
        let mut state = self.state.lock().unwrap();
        state.view.show(compile_comments(&comments));
        state.comments = comments;
        drop(state);
        info!("{} left a comment", name);
        Ok(Submission::Accepted)
    }
}
