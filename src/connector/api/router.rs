use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, CatalogController, ChatController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    chat_controller: ChatController<'a>,
    catalog_controller: CatalogController,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            chat_controller: ChatController::new(container),
            catalog_controller: CatalogController::new(),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask {
                prompt,
                persona,
                scenario,
                images,
            } => {
                self.ask_controller
                    .ask(prompt, persona, scenario, images)
                    .await
            }
            Commands::Chat { persona, scenario } => {
                self.chat_controller.interactive(persona, scenario).await
            }
            Commands::Personas => Ok(self.catalog_controller.personas()),
            Commands::Scenarios => Ok(self.catalog_controller.scenarios()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContainerConfig;

    #[tokio::test]
    async fn test_catalog_commands_need_no_api_key() {
        let container = Container::new(ContainerConfig::default());
        let router = Router::new(&container);

        let personas = router.route(Commands::Personas).await.unwrap();
        assert!(personas.contains("The Diplomat"));

        let scenarios = router.route(Commands::Scenarios).await.unwrap();
        assert!(scenarios.contains("Salary Negotiation"));
    }

    #[tokio::test]
    async fn test_ask_routes_to_mock_service() {
        let container = Container::new(ContainerConfig {
            mock: true,
            ..Default::default()
        });
        let output = Router::new(&container)
            .route(Commands::Ask {
                prompt: "Counter-offer?".to_string(),
                persona: None,
                scenario: Some("Partnership Terms".to_string()),
                images: vec![],
            })
            .await
            .unwrap();
        assert!(output.contains("Advice for \"Partnership Terms\""));
    }
}
