use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::{Conversation, DomainError};

use super::super::Container;
use super::{load_image, resolve_persona, resolve_scenario};

const HELP: &str = "\
Commands:
  /image <path>     attach an image to the following messages
  /persona <name>   switch persona (diplomat, strategist, dealmaker)
  /scenario <text>  set the scenario (preset number, preset name, or free text)
  /history          show the conversation so far
  /help             show this help
  /quit             end the session";

/// One line of chat input.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Prompt(String),
    AttachImage(PathBuf),
    Persona(String),
    Scenario(String),
    History,
    Help,
    Quit,
    Unknown(String),
}

impl SessionCommand {
    /// `None` for blank lines, which are never sent.
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(Self::Prompt(line.to_string()));
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        let command = match (name, arg.is_empty()) {
            ("/quit" | "/exit", _) => Self::Quit,
            ("/help", _) => Self::Help,
            ("/history", _) => Self::History,
            ("/image", false) => Self::AttachImage(PathBuf::from(arg)),
            ("/persona", false) => Self::Persona(arg.to_string()),
            ("/scenario", false) => Self::Scenario(arg.to_string()),
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Interactive session on stdin/stdout.
    pub async fn interactive(
        &self,
        persona: Option<String>,
        scenario: Option<String>,
    ) -> Result<String> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.session(persona, scenario, stdin, &mut stdout).await
    }

    /// Runs a session until `/quit` or end of input and returns a summary line.
    pub async fn session<R, W>(
        &self,
        persona: Option<String>,
        scenario: Option<String>,
        input: R,
        output: &mut W,
    ) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let persona = resolve_persona(persona.as_deref())?;
        let mut conversation = Conversation::new(persona.label());
        if let Some(scenario) = scenario.as_deref() {
            conversation.select_scenario(resolve_scenario(scenario));
        }

        let use_case = self.container.negotiate_use_case()?;

        write_line(
            output,
            &format!(
                "Negotiating as {} ({}). Type /help for commands.",
                conversation.persona(),
                model_label(self.container)
            ),
        )
        .await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(command) = SessionCommand::parse(&line) else {
                continue;
            };
            debug!("Session command: {:?}", command);

            match command {
                SessionCommand::Quit => break,
                SessionCommand::Help => write_line(output, HELP).await?,
                SessionCommand::History => {
                    for message in conversation.messages() {
                        write_line(
                            output,
                            &format!("{}: {}", message.speaker(), message.content()),
                        )
                        .await?;
                    }
                }
                SessionCommand::Persona(name) => match resolve_persona(Some(&name)) {
                    Ok(persona) => {
                        conversation.set_persona(persona.label());
                        write_line(output, &format!("Persona set to {}.", persona.label())).await?;
                    }
                    Err(e) => write_line(output, &e.to_string()).await?,
                },
                SessionCommand::Scenario(text) => {
                    conversation.select_scenario(resolve_scenario(&text));
                    write_line(
                        output,
                        &format!("Scenario set to \"{}\".", conversation.effective_scenario()),
                    )
                    .await?;
                }
                SessionCommand::AttachImage(path) => match load_image(&path).await {
                    Ok(image) => {
                        conversation.attach_image(image);
                        write_line(
                            output,
                            &format!(
                                "Attached {} ({} image(s) total).",
                                path.display(),
                                conversation.pending_images().len()
                            ),
                        )
                        .await?;
                    }
                    Err(e) => write_line(output, &format!("{e:#}")).await?,
                },
                SessionCommand::Unknown(text) => {
                    write_line(output, &format!("Unknown command: {text}. Type /help.")).await?
                }
                SessionCommand::Prompt(prompt) => {
                    let outcome = use_case.execute(&mut conversation, &prompt).await;
                    write_line(output, &turn_outcome(&conversation, outcome)).await?;
                }
            }
        }

        Ok(format!(
            "Session ended after {} message(s).",
            conversation.len()
        ))
    }
}

/// Line to print after a turn. Completion failures were recorded as an
/// "Error: ..." entry; anything else never reached the conversation.
fn turn_outcome(conversation: &Conversation, outcome: Result<String, DomainError>) -> String {
    match outcome {
        Ok(_) | Err(DomainError::Completion(_)) => conversation
            .last()
            .map(|entry| format!("{}: {}", entry.speaker(), entry.content()))
            .unwrap_or_default(),
        Err(e) => e.to_string(),
    }
}

fn model_label(container: &Container) -> String {
    container
        .completion_service()
        .map(|service| service.model_name().to_string())
        .unwrap_or_else(|_| "unknown model".to_string())
}

async fn write_line<W>(output: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
