pub mod ask_controller;
pub mod catalog_controller;
pub mod chat_controller;

pub use ask_controller::AskController;
pub use catalog_controller::CatalogController;
pub use chat_controller::ChatController;

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::{ImageBlob, Persona, ScenarioPreset};

/// Persona label for a user-supplied name; the default persona when absent.
pub(crate) fn resolve_persona(input: Option<&str>) -> Result<Persona> {
    match input {
        None => Ok(Persona::default()),
        Some(name) => Persona::parse(name).ok_or_else(|| {
            let known: Vec<_> = Persona::all().iter().map(|p| p.label()).collect();
            anyhow!("Unknown persona '{}'. Choose one of: {}", name, known.join(", "))
        }),
    }
}

/// Preset label when `input` names or numbers a preset, otherwise the free text itself.
pub(crate) fn resolve_scenario(input: &str) -> String {
    ScenarioPreset::lookup(input)
        .map(|preset| preset.as_str().to_string())
        .unwrap_or_else(|| input.trim().to_string())
}

/// Reads an image attachment, rejecting files that are not a recognised image format.
pub(crate) async fn load_image(path: &Path) -> Result<ImageBlob> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    image::guess_format(&bytes)
        .with_context(|| format!("{} is not a supported image", path.display()))?;
    Ok(ImageBlob::new(bytes))
}
