//! Main orchestrator for hunt generation.
//!
//! Runs the four steps in order against a [`LanguageModel`], reports
//! progress over a channel, and always finishes with exactly one
//! `Complete` or `Error` event.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::adapters::{LanguageModel, ModelError, ModelOutput};
use crate::domain::{HuntRequest, ProgressEvent};

use super::format::{reformat_items, render_hunt};
use super::pipeline::{Pipeline, Step, StepId};

/// Capacity of the progress channel; a run emits at most five events
pub const EVENT_BUFFER: usize = 8;

/// Message carried by the error event when nothing was generated
pub const NO_HUNT_MESSAGE: &str = "No scavenger hunt could be generated for this museum.";

/// Failures inside a single pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{source}")]
    Model {
        step: StepId,
        #[source]
        source: ModelError,
    },

    #[error("Step '{step}' depends on '{dependency}', which does not run before it")]
    InvalidContext { step: StepId, dependency: StepId },

    #[error("{}", NO_HUNT_MESSAGE)]
    NoOutput,
}

/// Hunt generation orchestrator
pub struct Orchestrator {
    model: Arc<dyn LanguageModel>,
}

impl Orchestrator {
    /// Create a new orchestrator around a model backend
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Run a request on its own task, returning the event stream and the
    /// task handle
    pub fn spawn(
        self: &Arc<Self>,
        request: HuntRequest,
    ) -> (mpsc::Receiver<ProgressEvent>, JoinHandle<()>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let orchestrator = Arc::clone(self);

        let handle = tokio::spawn(async move { orchestrator.run(request, event_tx).await });

        (event_rx, handle)
    }

    /// Generate a hunt, sending progress events to `event_tx`.
    ///
    /// Emits a start event, one progress event before each announced step,
    /// and a single terminal event.
    #[instrument(skip(self, request, event_tx), fields(museum = %request.museum_name, num_items = request.num_items))]
    pub async fn run(&self, request: HuntRequest, event_tx: mpsc::Sender<ProgressEvent>) {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            backend = self.model.name(),
            model = self.model.model_id(),
            "Starting scavenger hunt generation"
        );

        self.send_event(
            &event_tx,
            ProgressEvent::start(
                run_id,
                "Starting generation of scavenger hunt",
                format!("Generating scavenger hunt for: {}", request.museum_name),
            ),
        )
        .await;

        let terminal = match self.generate(run_id, &request, &event_tx).await {
            Ok(hunt) => {
                info!(%run_id, chars = hunt.len(), "Scavenger hunt generated");
                ProgressEvent::complete(run_id, "Completed scavenger hunt generation", hunt)
            }
            Err(PipelineError::NoOutput) => {
                error!(%run_id, "Pipeline finished without a scavenger hunt");
                ProgressEvent::error(
                    run_id,
                    "Error encountered. No scavenger hunt generated",
                    NO_HUNT_MESSAGE,
                )
            }
            Err(e) => {
                error!(%run_id, error = %e, "Scavenger hunt generation failed");
                ProgressEvent::error(
                    run_id,
                    "Exception caught",
                    format!("Error generating scavenger hunt: {}", e),
                )
            }
        };

        self.send_event(&event_tx, terminal).await;
    }

    /// Execute all steps and render the hunt
    async fn generate(
        &self,
        run_id: Uuid,
        request: &HuntRequest,
        event_tx: &mpsc::Sender<ProgressEvent>,
    ) -> Result<String, PipelineError> {
        let pipeline = Pipeline::for_request(request);
        pipeline.validate()?;

        let mut outputs: HashMap<StepId, ModelOutput> = HashMap::new();

        for step in &pipeline.steps {
            if let Some((step_desc, message)) = step.id.announcement() {
                self.send_event(event_tx, ProgressEvent::progress(run_id, step_desc, message))
                    .await;
            }

            let output = self.execute_step(step, &outputs).await?;
            outputs.insert(step.id, output);
        }

        let hunt = outputs
            .get(&StepId::Description)
            .filter(|o| !o.is_blank())
            .ok_or(PipelineError::NoOutput)?;

        Ok(render_hunt(
            &request.museum_name,
            &reformat_items(&hunt.content),
        ))
    }

    /// Run one step against the model
    async fn execute_step(
        &self,
        step: &Step,
        outputs: &HashMap<StepId, ModelOutput>,
    ) -> Result<ModelOutput, PipelineError> {
        let context = self.resolve_context(step, outputs)?;
        let prompt = step.prompt(&context);

        debug!(step = %step.id, role = step.role.name, prompt_chars = prompt.user.len(), "Running step");
        let started = Instant::now();

        let output = self
            .model
            .complete(&prompt)
            .await
            .map_err(|source| PipelineError::Model {
                step: step.id,
                source,
            })?;

        info!(
            step = %step.id,
            duration_ms = started.elapsed().as_millis() as u64,
            chars = output.content.len(),
            tokens = ?output.tokens_used,
            "Step completed"
        );

        Ok(output)
    }

    /// Collect the outputs a step reads as context, in declaration order
    fn resolve_context<'a>(
        &self,
        step: &Step,
        outputs: &'a HashMap<StepId, ModelOutput>,
    ) -> Result<Vec<&'a str>, PipelineError> {
        step.context
            .iter()
            .map(|dep| {
                outputs
                    .get(dep)
                    .map(|o| o.content.as_str())
                    .ok_or(PipelineError::InvalidContext {
                        step: step.id,
                        dependency: *dep,
                    })
            })
            .collect()
    }

    /// Sends an event through the channel, ignoring send errors.
    async fn send_event(&self, event_tx: &mpsc::Sender<ProgressEvent>, event: ProgressEvent) {
        // Receiver may have been dropped
        let _ = event_tx.send(event).await;
    }
}
