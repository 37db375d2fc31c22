//! Step definitions for the scavenger hunt pipeline.
//!
//! The four step templates are static. Each request renders them into
//! concrete [`Step`]s with the museum name and item count filled in.

use std::fmt;

use crate::adapters::Prompt;
use crate::domain::{HuntRequest, Role, CURATOR, DESCRIBER, HISTORIAN, SELECTOR};

use super::orchestrator::PipelineError;

/// Identifies one of the four fixed steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    /// Survey exhibitions and collections on view
    Research,
    /// Pick the artworks for the hunt
    Selection,
    /// Historical background per artwork
    HistoricalContext,
    /// Final numbered hunt text
    Description,
}

impl StepId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Research => "museum_search",
            Self::Selection => "artwork_selection",
            Self::HistoricalContext => "historical_context",
            Self::Description => "scavenger_hunt",
        }
    }

    /// Progress notice sent before this step runs: `(step_desc, message)`.
    ///
    /// Selection runs under the research notice and has none of its own.
    pub fn announcement(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Research => Some((
                "Searching museum collections",
                "Researching exhibitions and currently displayed artworks...",
            )),
            Self::Selection => None,
            Self::HistoricalContext => Some((
                "Researching historical context",
                "Gathering historical and cultural context for artworks...",
            )),
            Self::Description => Some((
                "Creating scavenger hunt clues",
                "Crafting engaging descriptions and clues for verified artworks...",
            )),
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a step before it is bound to a request.
///
/// `description` and `expected_output` may contain the placeholders
/// `{museum_name}` and `{num_items}`.
#[derive(Debug)]
pub struct StepTemplate {
    pub id: StepId,
    pub role: &'static Role,
    pub description: &'static str,
    pub expected_output: &'static str,
    /// Earlier steps whose output is passed along as context
    pub context: &'static [StepId],
}

impl StepTemplate {
    /// Bind this template to a request
    pub fn render(&self, request: &HuntRequest) -> Step {
        Step {
            id: self.id,
            role: self.role,
            description: fill(self.description, request),
            expected_output: fill(self.expected_output, request),
            context: self.context,
        }
    }
}

fn fill(template: &str, request: &HuntRequest) -> String {
    // num_items first so a museum name containing a placeholder stays literal
    template
        .replace("{num_items}", &request.num_items.to_string())
        .replace("{museum_name}", &request.museum_name)
}

/// The four steps in execution order
pub static STEP_TEMPLATES: [StepTemplate; 4] = [
    StepTemplate {
        id: StepId::Research,
        role: &CURATOR,
        description: "Research the {museum_name} to identify current exhibitions and permanent collections that are on view.
Focus on identifying galleries, wings, or exhibition areas that contain notable artworks, enough to build a scavenger hunt of {num_items} items.
Provide a comprehensive overview of what visitors can currently see in the museum.
Please be sure to find only current and permanent works on view.",
        expected_output: "A detailed list of permanent exhibitions and collections on view at the museum",
        context: &[],
    },
    StepTemplate {
        id: StepId::Selection,
        role: &SELECTOR,
        description: "Based on the museum research, select exactly {num_items} of the most famous, interesting, and diverse artworks for a scavenger hunt.
Choose works that span different time periods, styles, and media when possible.
For each artwork, include its title, artist, location in the museum, and a brief description.
Only select artworks that are currently confirmed to be on view.",
        expected_output: "A curated list of {num_items} artworks with their basic information",
        context: &[StepId::Research],
    },
    StepTemplate {
        id: StepId::HistoricalContext,
        role: &HISTORIAN,
        description: "For each of the exactly {num_items} artworks, provide rich historical context including:
1. Artist biography and significance
2. Historical period and cultural context
3. Artistic techniques and innovations
4. Symbolic elements and their meanings
5. Historical significance and influence",
        expected_output: "Interesting historical context, brief artist biography, artistic techniques, and symbolism for each artwork",
        context: &[StepId::Selection],
    },
    StepTemplate {
        id: StepId::Description,
        role: &DESCRIBER,
        description: "Format the response as a numbered scavenger hunt with items equal to exactly {num_items} artworks.
For each item, prefix the Item Title with an emoji.
Format your response following the OUTLINE below for each artwork. Your response should be easily legible, with an emoji prefix and one main bullet point for (1) in OUTLINE and sub-bullet points for (2-4) in OUTLINE.
Each artwork should have the following OUTLINE: <
(1) [Title] by [Artist]

(2) Location: [GENERALIZED location information to help visitors navigate to the artwork]

(3) Historical Context: [The historical context provided in the previous step. EMPHASIZE SYMBOLS IN THE WORK.]

(4) What to Look For: [A vivid description of the scene or artwork]>

Only include artworks that have been confirmed to be on view or have acceptable substitutes.",
        expected_output: "A complete scavenger hunt with verified artworks",
        // Reads the selection, not the historian's notes.
        context: &[StepId::Selection],
    },
];

/// A step bound to a specific request
#[derive(Debug, Clone)]
pub struct Step {
    pub id: StepId,
    pub role: &'static Role,
    pub description: String,
    pub expected_output: String,
    pub context: &'static [StepId],
}

impl Step {
    /// Build the model prompt from this step and the outputs it depends on
    pub fn prompt(&self, context: &[&str]) -> Prompt {
        let mut user = format!(
            "Current task: {}\n\nThis is the expected criteria for your final answer: {}",
            self.description, self.expected_output
        );

        if !context.is_empty() {
            user.push_str("\n\nThis is the context you're working with:\n");
            user.push_str(&context.join("\n\n"));
        }

        Prompt::new(self.role.system_prompt(), user)
    }
}

/// All steps of one hunt, in execution order
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub steps: Vec<Step>,
}

impl Pipeline {
    /// Render the static templates for a request
    pub fn for_request(request: &HuntRequest) -> Self {
        Self {
            steps: STEP_TEMPLATES.iter().map(|t| t.render(request)).collect(),
        }
    }

    /// Check that every context reference points at an earlier step
    pub fn validate(&self) -> Result<(), PipelineError> {
        for (i, step) in self.steps.iter().enumerate() {
            for dep in step.context {
                match self.step_index(*dep) {
                    Some(idx) if idx < i => {}
                    _ => {
                        return Err(PipelineError::InvalidContext {
                            step: step.id,
                            dependency: *dep,
                        })
                    }
                }
            }
        }

        Ok(())
    }

    /// Get a step by id
    pub fn get_step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Get the index of a step by id
    pub fn step_index(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(num_items: u32) -> HuntRequest {
        HuntRequest::new("Museo Reina Sofia", num_items).unwrap()
    }

    #[test]
    fn test_fixed_step_order() {
        let pipeline = Pipeline::for_request(&request(5));
        let ids: Vec<StepId> = pipeline.steps.iter().map(|s| s.id).collect();

        assert_eq!(
            ids,
            [
                StepId::Research,
                StepId::Selection,
                StepId::HistoricalContext,
                StepId::Description
            ]
        );
        assert!(pipeline.validate().is_ok());
    }

    #[test]
    fn test_item_count_in_every_description() {
        let pipeline = Pipeline::for_request(&request(25));

        for step in &pipeline.steps {
            assert!(
                step.description.contains("25"),
                "{} description is missing the item count",
                step.id
            );
            assert!(!step.description.contains("{num_items}"));
        }
    }

    #[test]
    fn test_museum_name_rendered() {
        let pipeline = Pipeline::for_request(&request(5));
        let research = pipeline.get_step(StepId::Research).unwrap();

        assert!(research.description.starts_with("Research the Museo Reina Sofia"));
        assert_eq!(research.role.name, "Museum Curator");
    }

    #[test]
    fn test_placeholder_in_museum_name_is_literal() {
        let request = HuntRequest::new("The {num_items} Gallery", 10).unwrap();
        let pipeline = Pipeline::for_request(&request);
        let research = pipeline.get_step(StepId::Research).unwrap();

        assert!(research.description.contains("The {num_items} Gallery"));
    }

    #[test]
    fn test_describer_reads_selection() {
        let pipeline = Pipeline::for_request(&request(5));
        let describer = pipeline.get_step(StepId::Description).unwrap();

        assert_eq!(describer.context, &[StepId::Selection]);
    }

    #[test]
    fn test_forward_reference_rejected() {
        let mut pipeline = Pipeline::for_request(&request(5));
        pipeline.steps.swap(0, 1);

        let err = pipeline.validate().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidContext {
                step: StepId::Selection,
                dependency: StepId::Research
            }
        ));
    }

    #[test]
    fn test_prompt_includes_context() {
        let pipeline = Pipeline::for_request(&request(5));
        let selection = pipeline.get_step(StepId::Selection).unwrap();

        let prompt = selection.prompt(&["Gallery 206: Guernica"]);
        assert!(prompt.system.starts_with("You are Art Selector."));
        assert!(prompt.user.contains("select exactly 5"));
        assert!(prompt.user.ends_with("This is the context you're working with:\nGallery 206: Guernica"));

        let research = pipeline.get_step(StepId::Research).unwrap();
        assert!(!research.prompt(&[]).user.contains("context you're working with"));
    }

    #[test]
    fn test_announcements() {
        let announced = STEP_TEMPLATES
            .iter()
            .filter(|t| t.id.announcement().is_some())
            .count();
        assert_eq!(announced, 3);
        assert!(StepId::Selection.announcement().is_none());
    }
}
