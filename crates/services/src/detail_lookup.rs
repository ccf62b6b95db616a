use std::sync::Arc;

use fitness_core::model::{ActionTask, TaskId};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::exercise_guide::{ExerciseGuide, ExerciseGuideProvider};

/// What the task detail view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState<'a> {
    Closed,
    Loading {
        task: &'a TaskId,
        exercise: &'a str,
    },
    Ready {
        task: &'a TaskId,
        exercise: &'a str,
        guide: &'a ExerciseGuide,
    },
}

struct InFlight {
    ticket: u64,
    task: TaskId,
    exercise: String,
    /// `None` once the task has been joined.
    handle: Option<JoinHandle<()>>,
    guide: Option<ExerciseGuide>,
}

enum Wake {
    Received(Option<(u64, ExerciseGuide)>),
    Joined(Result<(), JoinError>),
}

/// Guide lookup for the single open task detail.
///
/// Opening another task or closing aborts the pending lookup. A result that
/// arrives for anything but the current lookup is dropped.
pub struct ExerciseDetailLookup {
    provider: Arc<dyn ExerciseGuideProvider>,
    current: Option<InFlight>,
    results_tx: mpsc::UnboundedSender<(u64, ExerciseGuide)>,
    results_rx: mpsc::UnboundedReceiver<(u64, ExerciseGuide)>,
    next_ticket: u64,
}

impl ExerciseDetailLookup {
    #[must_use]
    pub fn new(provider: Arc<dyn ExerciseGuideProvider>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            current: None,
            results_tx,
            results_rx,
            next_ticket: 0,
        }
    }

    /// Open the detail for `task` and start its lookup.
    ///
    /// Returns `false`, leaving the detail closed, for tasks without an
    /// exercise to look up.
    pub fn open(&mut self, task: &ActionTask) -> bool {
        self.close();
        let Some(exercise) = task.lookup_exercise() else {
            return false;
        };

        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);

        let provider = Arc::clone(&self.provider);
        let results = self.results_tx.clone();
        let name = exercise.to_string();
        let handle = tokio::spawn(async move {
            let guide = provider.guide(&name).await;
            // Receiver lives as long as the lookup; a send error means it is gone.
            let _ = results.send((ticket, guide));
        });

        debug!(task = %task.id(), exercise, ticket, "opened exercise detail");
        self.current = Some(InFlight {
            ticket,
            task: task.id().clone(),
            exercise: exercise.to_string(),
            handle: Some(handle),
            guide: None,
        });
        true
    }

    /// Close the detail, aborting any pending lookup.
    pub fn close(&mut self) {
        if let Some(previous) = self.current.take() {
            if let Some(handle) = &previous.handle {
                handle.abort();
            }
            debug!(task = %previous.task, ticket = previous.ticket, "closed exercise detail");
        }
    }

    #[must_use]
    pub fn state(&self) -> DetailState<'_> {
        match &self.current {
            None => DetailState::Closed,
            Some(InFlight {
                task,
                exercise,
                guide: None,
                ..
            }) => DetailState::Loading { task, exercise },
            Some(InFlight {
                task,
                exercise,
                guide: Some(guide),
                ..
            }) => DetailState::Ready {
                task,
                exercise,
                guide,
            },
        }
    }

    /// Apply results that have already arrived, without waiting.
    pub fn try_poll(&mut self) -> DetailState<'_> {
        while let Ok((ticket, guide)) = self.results_rx.try_recv() {
            self.accept(ticket, guide);
        }
        self.state()
    }

    /// Wait for the open lookup to finish.
    ///
    /// A lookup task that dies without a result resolves to
    /// [`ExerciseGuide::unavailable`]. Returns `None` if the detail is closed.
    pub async fn wait_ready(&mut self) -> Option<&ExerciseGuide> {
        loop {
            let current = self.current.as_mut()?;
            if current.guide.is_some() {
                break;
            }
            let wake = match current.handle.as_mut() {
                Some(handle) => tokio::select! {
                    biased;
                    received = self.results_rx.recv() => Wake::Received(received),
                    joined = handle => Wake::Joined(joined),
                },
                None => Wake::Received(self.results_rx.recv().await),
            };

            match wake {
                Wake::Received(Some((ticket, guide))) => self.accept(ticket, guide),
                Wake::Received(None) => return None,
                Wake::Joined(joined) => self.finish(joined),
            }
        }
        self.current.as_ref().and_then(|c| c.guide.as_ref())
    }

    /// Record that the current lookup task has ended.
    ///
    /// A clean exit has already queued its result; a failed one gets the
    /// fallback guide.
    fn finish(&mut self, joined: Result<(), JoinError>) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        current.handle = None;
        if let Err(err) = joined {
            warn!(task = %current.task, error = %err, "exercise guide lookup task failed");
            if current.guide.is_none() {
                current.guide = Some(ExerciseGuide::unavailable(&current.exercise));
            }
        }
    }

    fn accept(&mut self, ticket: u64, guide: ExerciseGuide) {
        match self.current.as_mut() {
            Some(current) if current.ticket == ticket => current.guide = Some(guide),
            _ => debug!(ticket, "discarding stale exercise guide"),
        }
    }
}

impl Drop for ExerciseDetailLookup {
    fn drop(&mut self) {
        self.close();
    }
}
