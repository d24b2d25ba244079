use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Ask for negotiation advice once and print the reply
    Ask {
        prompt: String,

        /// Persona name: diplomat, strategist or dealmaker
        #[arg(short, long)]
        persona: Option<String>,

        /// Preset number, preset name, or free-text scenario
        #[arg(short, long)]
        scenario: Option<String>,

        /// Attach an image (repeatable)
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,
    },

    /// Start an interactive negotiation session
    Chat {
        #[arg(short, long)]
        persona: Option<String>,

        #[arg(short, long)]
        scenario: Option<String>,
    },

    /// List available personas
    Personas,

    /// List preset scenarios
    Scenarios,
}
