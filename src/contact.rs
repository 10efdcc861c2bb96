use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("email address looks invalid")]
    InvalidEmail,
}

impl ContactFields {
    pub fn validate(&self) -> Result<(), FieldError> {
        for (label, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(FieldError::Required(label));
            }
        }
        match self.email.trim().split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(FieldError::InvalidEmail),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("message rejected: {0}")]
    Rejected(String),
    #[error("messaging service unavailable")]
    Unavailable,
}

/// Whatever actually delivers a contact message.
pub trait Messenger: Send + Sync {
    fn submit(&self, fields: &ContactFields) -> Result<(), DeliveryError>;
}

/// Accepts every message without sending anything anywhere.
#[derive(Debug, Default)]
pub struct SimulatedMessenger {
    submissions: AtomicUsize,
}

impl SimulatedMessenger {
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::Relaxed)
    }
}

impl Messenger for SimulatedMessenger {
    fn submit(&self, fields: &ContactFields) -> Result<(), DeliveryError> {
        self.submissions.fetch_add(1, Ordering::Relaxed);
        log::debug!("simulated contact message from {}", fields.email);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTimings {
    pub submitting: Duration,
    pub result: Duration,
}

impl Default for FormTimings {
    fn default() -> Self {
        Self {
            submitting: Duration::from_millis(1500),
            result: Duration::from_millis(3000),
        }
    }
}

/// idle -> submitting -> submitted (or failed) -> idle, on fixed timings.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    phase: FormPhase,
    timings: FormTimings,
    phase_started: Duration,
    outcome: Option<Result<(), DeliveryError>>,
}

impl ContactForm {
    pub fn new(timings: FormTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != FormPhase::Idle
    }

    /// Validates and hands the message to `messenger`. Submits while a
    /// previous one is still in flight are dropped.
    pub fn submit(
        &mut self,
        now: Duration,
        fields: &ContactFields,
        messenger: &dyn Messenger,
    ) -> Result<(), FieldError> {
        if self.is_busy() {
            log::debug!("contact form busy, ignoring submit");
            return Ok(());
        }
        fields.validate()?;
        self.outcome = Some(messenger.submit(fields));
        self.phase = FormPhase::Submitting;
        self.phase_started = now;
        Ok(())
    }

    /// When the current phase ends, if it ends on its own.
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.phase {
            FormPhase::Idle => None,
            FormPhase::Submitting => Some(self.phase_started + self.timings.submitting),
            FormPhase::Submitted | FormPhase::Failed(_) => {
                Some(self.phase_started + self.timings.result)
            }
        }
    }

    /// Moves through every phase whose deadline has passed. Returns true if
    /// the phase changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let before = self.phase.clone();
        while let Some(deadline) = self.next_deadline() {
            if now < deadline {
                break;
            }
            self.phase = match self.phase {
                FormPhase::Submitting => match self.outcome.take() {
                    Some(Err(e)) => {
                        log::warn!("contact message not delivered: {e}");
                        FormPhase::Failed(e.to_string())
                    }
                    _ => FormPhase::Submitted,
                },
                _ => FormPhase::Idle,
            };
            self.phase_started = deadline;
        }
        self.phase != before
    }
}
