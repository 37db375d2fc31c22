//! Shared test doubles for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use museum_hunt::adapters::{LanguageModel, ModelError, ModelOutput, Prompt};
use museum_hunt::domain::{HuntRequest, ProgressEvent};
use museum_hunt::Orchestrator;

pub const CURATOR_OUTPUT: &str = "Gallery 12 holds Spanish Golden Age painting; Rooms 32-39 hold Goya.";
pub const SELECTOR_OUTPUT: &str = "Las Meninas, Velázquez, Room 12\nThe Third of May 1808, Goya, Room 64";
pub const HISTORIAN_OUTPUT: &str = "Velázquez was court painter to Philip IV.";

/// Describer output with `n` numbered items
pub fn describer_output(n: usize) -> String {
    (1..=n)
        .map(|i| {
            format!(
                "{}. 🎨 Artwork {} by Artist {}\n  Location: Room {}\n  Historical Context: Painted for the Spanish court.\n\n  What to Look For: The mirror on the back wall.\n",
                i, i, i, i
            )
        })
        .collect()
}

/// Language model that replays canned responses and records every prompt.
///
/// Once the script runs out it answers with empty text.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<String, ModelError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Four successful steps, describer producing `n` items
    pub fn succeeding(n: usize) -> Self {
        Self::new(vec![
            Ok(CURATOR_OUTPUT.to_string()),
            Ok(SELECTOR_OUTPUT.to_string()),
            Ok(HISTORIAN_OUTPUT.to_string()),
            Ok(describer_output(n)),
        ])
    }

    /// Succeeds until step `failing_step` (0-based), which returns an error
    pub fn failing_at(failing_step: usize, message: &str) -> Self {
        let mut responses: Vec<Result<String, ModelError>> = vec![
            Ok(CURATOR_OUTPUT.to_string()),
            Ok(SELECTOR_OUTPUT.to_string()),
            Ok(HISTORIAN_OUTPUT.to_string()),
            Ok(describer_output(5)),
        ];
        responses[failing_step] = Err(ModelError::RequestFailed(message.to_string()));
        Self::new(responses)
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().expect("lock not poisoned").clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("lock not poisoned").len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<ModelOutput, ModelError> {
        self.prompts
            .lock()
            .expect("lock not poisoned")
            .push(prompt.clone());

        let next = self
            .responses
            .lock()
            .expect("lock not poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()));

        next.map(ModelOutput::new)
    }

    async fn health_check(&self) -> Result<(), ModelError> {
        Ok(())
    }
}

/// Language model whose backend crashes outright
pub struct PanickingModel;

#[async_trait]
impl LanguageModel for PanickingModel {
    fn name(&self) -> &str {
        "panicking"
    }

    fn model_id(&self) -> &str {
        "panicking-model"
    }

    async fn complete(&self, _prompt: &Prompt) -> Result<ModelOutput, ModelError> {
        panic!("model backend crashed");
    }

    async fn health_check(&self) -> Result<(), ModelError> {
        Ok(())
    }
}

pub fn orchestrator(model: Arc<dyn LanguageModel>) -> Arc<Orchestrator> {
    Arc::new(Orchestrator::new(model))
}

/// Run a request to completion and return every event it produced
pub async fn collect_events(orchestrator: &Arc<Orchestrator>, request: HuntRequest) -> Vec<ProgressEvent> {
    let (mut event_rx, handle) = orchestrator.spawn(request);

    let mut events = Vec::new();
    while let Some(event) = event_rx.recv().await {
        events.push(event);
    }

    handle.await.expect("orchestrator task completed");
    events
}

/// Count Markdown lines that look like numbered list entries ("3. ...")
pub fn count_numbered_entries(markdown: &str) -> usize {
    markdown
        .lines()
        .map(str::trim_start)
        .filter(|line| {
            let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
            digits > 0 && line[digits..].starts_with(". ")
        })
        .count()
}
