use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    constants::CONTACT_MESSAGES_KEY,
    error::SiteResult,
    forms::{
        character_count, ContactFields, Field, FieldErrors, FormRules, FormValidator, Submission,
    },
    storage::{load_snapshot, save_snapshot, SharedStorage, Storage},
    utils::timestamp,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    /// RFC 3339 UTC timestamp
    pub date: String,
}

pub fn load_contact_messages<S: Storage + ?Sized>(storage: &S) -> Vec<ContactMessage> {
    load_snapshot(storage, CONTACT_MESSAGES_KEY)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    /// The form is hidden and the success message is shown
    Sent,
}

struct ContactFormState {
    validator: FormValidator,
    state: FormState,
    message_length: usize,
}

/// Puts a form that is still submitting back into editing once dropped
struct InFlight<'a>(&'a Mutex<ContactFormState>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.lock() {
            if inner.state == FormState::Submitting {
                inner.state = FormState::Editing;
            }
        }
    }
}

/// A contact form. Both the home page and the contact page use this, with different rules.
pub struct ContactForm<S> {
    storage: SharedStorage<S>,
    inner: Arc<Mutex<ContactFormState>>,
    delay: Duration,
}

impl<S> Clone for ContactForm<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            inner: self.inner.clone(),
            delay: self.delay,
        }
    }
}

impl<S: Storage> ContactForm<S> {
    pub fn new(rules: FormRules, storage: SharedStorage<S>, delay: Duration) -> Self {
        Self {
            storage,
            inner: Arc::new(Mutex::new(ContactFormState {
                validator: FormValidator::new(rules),
                state: FormState::Editing,
                message_length: 0,
            })),
            delay,
        }
    }

    pub fn state(&self) -> FormState {
        self.inner.lock().unwrap().state
    }

    pub fn errors(&self) -> FieldErrors {
        self.inner.lock().unwrap().validator.errors().clone()
    }

    pub fn message_length(&self) -> usize {
        self.inner.lock().unwrap().message_length
    }

    /// Updates the character counter as the message is typed, returning the new count
    pub fn on_message_input(&self, message: &str) -> usize {
        let length = character_count(message);
        self.inner.lock().unwrap().message_length = length;
        length
    }

    pub fn on_blur(&self, field: Field, value: &str) {
        self.inner.lock().unwrap().validator.on_blur(field, value);
    }

    /// Validates the fields and, after the submission delay, stores the message. Ignored while
    /// another submission is in flight or once the form was sent.
    pub async fn submit(&self, fields: &ContactFields) -> SiteResult<Submission> {
        let fields = {
            let mut inner = self.inner.lock().unwrap();
            if inner.state != FormState::Editing {
                debug!("The contact form isn't editable right now, ignoring the submission");
                return Ok(Submission::Ignored);
            }
            let fields = match inner.validator.validate(fields) {
                Ok(fields) => fields,
                Err(errors) => return Ok(Submission::Rejected(errors)),
            };
            inner.state = FormState::Submitting;
            fields
        };
        let _in_flight = InFlight(&self.inner);

        tokio::time::sleep(self.delay).await;

        let message = ContactMessage {
            name: fields.name,
            email: fields.email,
            message: fields.message,
            date: timestamp(),
        };
        let saving_result = {
            let mut storage = self.storage.lock().unwrap();
            let mut messages = load_contact_messages(&*storage);
            messages.push(message);
            save_snapshot(&mut *storage, CONTACT_MESSAGES_KEY, &messages)
        };
        saving_result?;
        self.inner.lock().unwrap().state = FormState::Sent;
        info!("A contact message was sent");
        Ok(Submission::Accepted)
    }

    /// Brings the form back after a successful submission
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == FormState::Sent {
            inner.state = FormState::Editing;
            inner.validator.clear();
            inner.message_length = 0;
        }
    }
}
