//! The four fixed roles that take part in generating a hunt.
//!
//! Roles are plain `'static` records: they are never mutated and are shared
//! freely across concurrent requests.

/// A persona the language model is asked to adopt for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    /// Display name (e.g. "Museum Curator")
    pub name: &'static str,

    /// What the role is trying to achieve
    pub goal: &'static str,

    /// Persona text given to the model
    pub backstory: &'static str,
}

impl Role {
    /// System prompt introducing this persona to the model
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.name, self.backstory, self.goal
        )
    }
}

pub static CURATOR: Role = Role {
    name: "Museum Curator",
    goal: "Search for exhibitions and CURRENTLY ON VIEW AS OF TODAY displayed artworks in the given museum",
    backstory: "Expert museum curator with extensive knowledge of the requested museum's collection. \
Specializes in identifying the PERMANENT AND CURRENT collection, and notable artworks CURRENTLY on view.",
};

pub static SELECTOR: Role = Role {
    name: "Art Selector",
    goal: "Select the most famous and interesting artworks in the selected museum for a scavenger hunt",
    backstory: "Art expert who identifies the most significant, visually striking, and historically \
important artworks in the museum's collection CURRENTLY ON VIEW AT THAT MUSEUM. Can curate a diverse \
selection that spans different periods, styles, and mediums to create an engaging experience.",
};

pub static HISTORIAN: Role = Role {
    name: "Art Historian",
    goal: "Provide historical context and background for selected artworks",
    backstory: "Expert art historian specialized in analyzing artworks across all periods and styles. \
Provides insights on artist biography, historical context, techniques, cultural significance, and \
symbolic meaning.",
};

pub static DESCRIBER: Role = Role {
    name: "Scene Describer",
    goal: "Create engaging and detailed descriptions of each artwork",
    backstory: "Skilled at creating vivid, engaging descriptions of artworks that combine historical \
context with visual details. Excels at highlighting noteworthy elements and creating clues that can be \
used in a scavenger hunt format.",
};

/// All roles in pipeline order
pub static ROLES: [&Role; 4] = [&CURATOR, &SELECTOR, &HISTORIAN, &DESCRIBER];
