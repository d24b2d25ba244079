use crate::{Persona, ScenarioPreset, DEFAULT_SCENARIO};

pub struct CatalogController;

impl CatalogController {
    pub fn new() -> Self {
        Self
    }

    pub fn personas(&self) -> String {
        let mut output = "Personas:\n\n".to_string();
        for persona in Persona::all() {
            let marker = if persona == Persona::default() {
                " (default)"
            } else {
                ""
            };
            output.push_str(&format!(
                "  {} - {}{}\n",
                persona.label(),
                persona.figure(),
                marker
            ));
        }
        output
    }

    pub fn scenarios(&self) -> String {
        let mut output = "Scenarios:\n\n".to_string();
        for (i, preset) in ScenarioPreset::all().iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, preset));
        }
        output.push_str(&format!(
            "\nAny other text is used as a custom scenario. Without one, \"{}\" is assumed.\n",
            DEFAULT_SCENARIO
        ));
        output
    }
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new()
    }
}
