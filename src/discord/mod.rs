use serenity::{
    all::{
        Command, CommandOptionType, CreateCommand, CreateCommandOption,
        CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
    },
    async_trait,
    client::{Context, EventHandler},
    model::{application::Interaction, channel::Message, gateway::Ready},
    prelude::*,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::DiscordConfig;
use crate::error::{DiscordError, Result};
use crate::lookup;
use crate::market::MarketClient;

/// Discord event handler for the price bot
pub struct PriceBot {
    market: Arc<MarketClient>,
    prefix: String,
}

impl PriceBot {
    pub fn new(market: Arc<MarketClient>, prefix: impl Into<String>) -> Self {
        Self {
            market,
            prefix: prefix.into(),
        }
    }

    /// Extract the query from a legacy `!price <item>` message.
    ///
    /// Returns `None` for messages that aren't the price command at all, and
    /// `Some("")` for a bare `!price` so the caller can prompt for input.
    fn parse_prefix_command<'a>(&self, content: &'a str) -> Option<&'a str> {
        let rest = content.strip_prefix(&self.prefix)?;
        let rest = rest.strip_prefix("price")?;

        if rest.is_empty() {
            return Some("");
        }
        // Reject "!prices" and friends
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some(rest.trim())
    }

    async fn handle_price_command(
        &self,
        ctx: &Context,
        command: &serenity::model::application::CommandInteraction,
    ) {
        // Defer the reply so the two API calls can exceed the interaction
        // acknowledgement window
        if let Err(why) = command
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
            )
            .await
        {
            error!("Cannot defer response: {:?}", why);
            return;
        }

        let item = command
            .data
            .options
            .iter()
            .find(|opt| opt.name == "item")
            .and_then(|opt| opt.value.as_str())
            .unwrap_or("");

        let reply = lookup::lookup(&self.market, item).await;

        if let Err(why) = command
            .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
            .await
        {
            error!("Cannot send followup: {:?}", why);
        }
    }
}

#[async_trait]
impl EventHandler for PriceBot {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        let command = CreateCommand::new("price")
            .description("Get the price of an item from the MarketHunt marketplace")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "item", "Name of the item")
                    .required(true),
            );

        if let Err(why) = Command::create_global_command(&ctx.http, command).await {
            error!("Cannot create slash command: {:?}", why);
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore bot's own messages
        if msg.author.bot {
            return;
        }

        let Some(query) = self.parse_prefix_command(&msg.content) else {
            return;
        };

        // Show typing indicator while the lookup runs
        let typing = msg.channel_id.start_typing(&ctx.http);

        let reply = lookup::lookup(&self.market, query).await;
        if let Err(why) = msg.reply(&ctx.http, reply).await {
            error!("Error sending reply: {:?}", why);
        }

        typing.stop();
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            info!(
                "Received slash command: {} from user {}",
                command.data.name, command.user.name
            );
            match command.data.name.as_str() {
                "price" => self.handle_price_command(&ctx, &command).await,
                _ => {
                    warn!("Unknown command: {}", command.data.name);
                }
            }
        }
    }
}

/// Create the Discord client (without starting it)
pub async fn create_discord_client(
    config: &DiscordConfig,
    market: Arc<MarketClient>,
) -> Result<serenity::Client> {
    if config.token.is_empty() {
        return Err(DiscordError::NoToken.into());
    }

    let handler = PriceBot::new(market, config.prefix.clone());

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client_builder = Client::builder(&config.token, intents).event_handler(handler);

    if let Some(app_id) = config.application_id {
        client_builder = client_builder.application_id(app_id.into());
    }

    let client = client_builder
        .await
        .map_err(|e| DiscordError::ConnectionFailed { source: e })?;

    Ok(client)
}

/// Create and run the Discord bot
pub async fn run_discord_bot(config: DiscordConfig, market: Arc<MarketClient>) -> Result<()> {
    let mut client = create_discord_client(&config, market).await?;

    info!("Starting Discord bot...");
    client
        .start()
        .await
        .map_err(|e| DiscordError::ConnectionFailed { source: e })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketConfig;
    use pretty_assertions::assert_eq;

    fn bot() -> PriceBot {
        let market = MarketClient::new(&MarketConfig::default()).unwrap();
        PriceBot::new(Arc::new(market), "!")
    }

    #[test]
    fn test_prefix_command_with_query() {
        assert_eq!(bot().parse_prefix_command("!price sb"), Some("sb"));
        assert_eq!(
            bot().parse_prefix_command("!price Empowered SUPER|brie+"),
            Some("Empowered SUPER|brie+")
        );
    }

    #[test]
    fn test_prefix_command_trims_whitespace() {
        assert_eq!(
            bot().parse_prefix_command("!price   Wild Tonic  "),
            Some("Wild Tonic")
        );
    }

    #[test]
    fn test_bare_prefix_command_is_empty_query() {
        assert_eq!(bot().parse_prefix_command("!price"), Some(""));
    }

    #[test]
    fn test_unrelated_messages_are_ignored() {
        assert_eq!(bot().parse_prefix_command("hello there"), None);
        assert_eq!(bot().parse_prefix_command("!prices sb"), None);
        assert_eq!(bot().parse_prefix_command("price sb"), None);
    }
}
