//! Interview flow controller — the client-side state machine that drives a
//! session from résumé upload through timed Q&A to finalization.
//!
//! Embedders (a UI shell) own the countdown clock and call `tick` once per
//! second; the controller owns all state transitions. There is exactly one
//! authoritative expiry path: a tick that reaches zero performs the
//! auto-submit itself, and any duplicate safety-net auto-submit for an index
//! that has already advanced is a no-op.

pub mod snapshot;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::evaluation::EvaluationResult;
use crate::models::session::{Answer, Candidate, Question, Session};

/// Hard ceiling on any per-question countdown, regardless of the question's
/// own time limit.
pub const MAX_COUNTDOWN_SECS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    Idle,
    /// Résumé parsed; contact fields shown for editing.
    AwaitingConfirmation,
    QuestionsGenerating,
    ReadyToStart,
    InProgress { index: usize },
    Finishing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("invalid transition from current state: {0}")]
    InvalidTransition(&'static str),

    #[error("name, email and phone are required")]
    MissingContactFields,
}

/// What a one-second tick did.
#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown still running; seconds remaining.
    Counting(u32),
    /// Timer hit zero: the draft was auto-submitted and the interview moved
    /// to the next question.
    AutoAdvanced { next_index: usize },
    /// Timer hit zero on the last question: session is ready to finalize.
    Finishing,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Advanced { next_index: usize },
    /// A stale auto-submit for an index that already advanced; nothing was
    /// recorded and the current question is unaffected.
    AlreadyAdvanced { current_index: usize },
    Finishing,
}

/// Drives one interview attempt. Exclusively owns the in-progress `Session`
/// until `finalize` hands the completed record to the caller for persistence.
#[derive(Debug)]
pub struct FlowController {
    state: FlowState,
    candidate: Option<Candidate>,
    session: Option<Session>,
    remaining: u32,
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowController {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            candidate: None,
            session: None,
            remaining: 0,
        }
    }

    pub(crate) fn from_parts(
        state: FlowState,
        candidate: Candidate,
        session: Session,
        remaining: u32,
    ) -> Self {
        Self {
            state,
            candidate: Some(candidate),
            session: Some(session),
            remaining,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    /// Idle → AwaitingConfirmation, on successful document parse.
    pub fn resume_parsed(&mut self, candidate: Candidate) -> Result<(), FlowError> {
        if self.state != FlowState::Idle {
            return Err(FlowError::InvalidTransition("resume_parsed requires Idle"));
        }
        self.candidate = Some(candidate);
        self.state = FlowState::AwaitingConfirmation;
        Ok(())
    }

    /// AwaitingConfirmation → QuestionsGenerating. The (possibly edited)
    /// contact fields must all be non-empty.
    pub fn confirm_contact(&mut self, candidate: Candidate) -> Result<(), FlowError> {
        if self.state != FlowState::AwaitingConfirmation {
            return Err(FlowError::InvalidTransition(
                "confirm_contact requires AwaitingConfirmation",
            ));
        }
        if candidate.name.trim().is_empty()
            || candidate.email.trim().is_empty()
            || candidate.phone.trim().is_empty()
        {
            return Err(FlowError::MissingContactFields);
        }
        self.candidate = Some(candidate);
        self.state = FlowState::QuestionsGenerating;
        Ok(())
    }

    /// QuestionsGenerating → ReadyToStart, with the generated question set.
    pub fn questions_ready(&mut self, questions: Vec<Question>) -> Result<(), FlowError> {
        if self.state != FlowState::QuestionsGenerating {
            return Err(FlowError::InvalidTransition(
                "questions_ready requires QuestionsGenerating",
            ));
        }
        self.session = Some(Session {
            candidate: self.candidate.clone().unwrap_or_default(),
            questions,
            ..Session::default()
        });
        self.state = FlowState::ReadyToStart;
        Ok(())
    }

    /// ReadyToStart → Idle. Discards the prepared session.
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::ReadyToStart {
            return Err(FlowError::InvalidTransition("cancel requires ReadyToStart"));
        }
        self.reset();
        Ok(())
    }

    /// ReadyToStart → InProgress(0), arming the first question's countdown.
    pub fn start(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::ReadyToStart {
            return Err(FlowError::InvalidTransition("start requires ReadyToStart"));
        }
        self.state = FlowState::InProgress { index: 0 };
        self.remaining = self.clamped_time_limit(0);
        Ok(())
    }

    /// One-second countdown step. Reaching zero auto-submits the draft text
    /// exactly once and advances.
    pub fn tick(&mut self, draft_text: &str) -> Result<TickOutcome, FlowError> {
        let FlowState::InProgress { index } = self.state else {
            return Err(FlowError::InvalidTransition("tick requires InProgress"));
        };
        if self.remaining > 1 {
            self.remaining -= 1;
            return Ok(TickOutcome::Counting(self.remaining));
        }
        self.remaining = 0;
        // tick always targets the current index, so a stale outcome cannot
        // come back here
        match self.auto_submit(index, draft_text)? {
            SubmitOutcome::Advanced { next_index }
            | SubmitOutcome::AlreadyAdvanced {
                current_index: next_index,
            } => Ok(TickOutcome::AutoAdvanced { next_index }),
            SubmitOutcome::Finishing => Ok(TickOutcome::Finishing),
        }
    }

    /// Manual submit for the current question; records the answer with a
    /// fresh timestamp and advances.
    pub fn submit_answer(&mut self, text: String) -> Result<SubmitOutcome, FlowError> {
        let FlowState::InProgress { index } = self.state else {
            return Err(FlowError::InvalidTransition("submit_answer requires InProgress"));
        };
        let session = self
            .session
            .as_mut()
            .expect("InProgress state always holds a session");
        session.answers.insert(
            index,
            Answer {
                text,
                submitted_at: Some(Utc::now()),
            },
        );
        Ok(self.advance(index))
    }

    /// Auto-submit for a question index, idempotent per index: an existing
    /// answer keeps its text and only a missing timestamp is backfilled, and
    /// a stale call for a non-current index changes nothing.
    pub fn auto_submit(&mut self, index: usize, draft_text: &str) -> Result<SubmitOutcome, FlowError> {
        let FlowState::InProgress { index: current } = self.state else {
            return Err(FlowError::InvalidTransition("auto_submit requires InProgress"));
        };
        if index != current {
            // Duplicate safety net fired after the index already advanced.
            return Ok(SubmitOutcome::AlreadyAdvanced {
                current_index: current,
            });
        }
        let session = self
            .session
            .as_mut()
            .expect("InProgress state always holds a session");
        match session.answers.get_mut(&index) {
            Some(existing) => {
                if existing.submitted_at.is_none() {
                    existing.submitted_at = Some(Utc::now());
                }
            }
            None => {
                session.answers.insert(
                    index,
                    Answer {
                        text: draft_text.to_string(),
                        submitted_at: Some(Utc::now()),
                    },
                );
            }
        }
        Ok(self.advance(index))
    }

    /// Finishing → Idle. Attaches the evaluation, stamps completion, and
    /// returns the finished session for persistence.
    pub fn finalize(&mut self, result: EvaluationResult) -> Result<Session, FlowError> {
        if self.state != FlowState::Finishing {
            return Err(FlowError::InvalidTransition("finalize requires Finishing"));
        }
        let mut session = self
            .session
            .take()
            .expect("Finishing state always holds a session");
        session.ai_result = Some(result);
        session.completed_at = Some(Utc::now());
        self.reset();
        Ok(session)
    }

    fn advance(&mut self, index: usize) -> SubmitOutcome {
        let question_count = self
            .session
            .as_ref()
            .map(|s| s.questions.len())
            .unwrap_or(0);
        if index + 1 < question_count {
            let next_index = index + 1;
            self.state = FlowState::InProgress { index: next_index };
            self.remaining = self.clamped_time_limit(next_index);
            SubmitOutcome::Advanced { next_index }
        } else {
            self.state = FlowState::Finishing;
            self.remaining = 0;
            SubmitOutcome::Finishing
        }
    }

    fn clamped_time_limit(&self, index: usize) -> u32 {
        self.session
            .as_ref()
            .and_then(|s| s.questions.get(index))
            .map(|q| q.time_limit.min(MAX_COUNTDOWN_SECS))
            .unwrap_or(0)
    }

    fn reset(&mut self) {
        self.state = FlowState::Idle;
        self.candidate = None;
        self.session = None;
        self.remaining = 0;
    }
}
