/// A narrative preset. Selecting one starts a fresh story.
#[derive(Debug, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub seed_text: &'static str,
}

impl Template {
    /// Transcript text shown right after the template is applied.
    pub fn opening(&self) -> String {
        format!(
            "Narrative Nexus!\nTemplate: {}\n{}\nWhat do you do?\n",
            self.name, self.seed_text
        )
    }

    /// Description handed to the narrator prompt.
    pub fn description(&self) -> String {
        format!("{} ({})", self.name, self.seed_text)
    }
}

pub static TEMPLATES: [Template; 4] = [
    Template {
        name: "Fantasy",
        seed_text: "A classic fantasy world with magic, dragons, and quests. You awaken in a mysterious forest. A path leads north to a castle, and south to a dark cave.",
    },
    Template {
        name: "Sci-Fi",
        seed_text: "A futuristic sci-fi universe with spaceships, aliens, and technology. You wake up on a derelict spaceship drifting through space. Alarms blare as an unknown vessel approaches.",
    },
    Template {
        name: "Mystery",
        seed_text: "A detective mystery in a noir city. You are a private investigator in a rainy metropolis. A shadowy figure knocks on your door with a case about a missing heirloom.",
    },
    Template {
        name: "Horror",
        seed_text: "A chilling horror story with supernatural elements. You find yourself in an abandoned mansion during a storm. Strange noises echo from the attic.",
    },
];

pub fn default_template() -> &'static Template {
    &TEMPLATES[0]
}

pub fn template_by_name(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name == name)
}

/// Content constraint injected into every prompt.
#[derive(Debug, PartialEq, Eq)]
pub struct MaturityPolicy {
    pub name: &'static str,
    pub policy_text: &'static str,
}

pub static MATURITY_LEVELS: [MaturityPolicy; 2] = [
    MaturityPolicy {
        name: "Safe",
        policy_text: "Keep all content family-friendly and appropriate for all ages. Avoid violence, explicit language, or mature themes.",
    },
    MaturityPolicy {
        name: "Mature",
        policy_text: "Allow mature themes, including violence, explicit language, and adult content where appropriate to the story.",
    },
];

pub fn default_maturity() -> &'static MaturityPolicy {
    &MATURITY_LEVELS[0]
}

pub fn maturity_by_name(name: &str) -> Option<&'static MaturityPolicy> {
    MATURITY_LEVELS.iter().find(|m| m.name == name)
}

/// How the player's input should be read. Passed through to the narrator
/// as a label; nothing is enforced locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Story,
    Edit,
    Continue,
    #[default]
    Do,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Story, Mode::Edit, Mode::Continue, Mode::Do];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Story => "Story",
            Mode::Edit => "Edit",
            Mode::Continue => "Continue",
            Mode::Do => "Do",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_by_name() {
        assert_eq!(template_by_name("Horror").map(|t| t.name), Some("Horror"));
        assert!(template_by_name("Western").is_none());
        assert_eq!(maturity_by_name("Mature").map(|m| m.name), Some("Mature"));
        assert!(maturity_by_name("Extreme").is_none());
    }

    #[test]
    fn defaults_are_fantasy_safe_do() {
        assert_eq!(default_template().name, "Fantasy");
        assert_eq!(default_maturity().name, "Safe");
        assert_eq!(Mode::default(), Mode::Do);
    }

    #[test]
    fn opening_wraps_seed_text() {
        let t = template_by_name("Mystery").unwrap();
        let opening = t.opening();
        assert!(opening.starts_with("Narrative Nexus!\nTemplate: Mystery\n"));
        assert!(opening.contains(t.seed_text));
        assert!(opening.ends_with("What do you do?\n"));
    }
}
