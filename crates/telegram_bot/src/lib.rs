//! Telegram bot.
//!
//! The bot is a thin shell: it routes commands and replies into the per-user
//! conversation flows and talks to the injected [`Ledger`] for persistence.

use ledger::Ledger;
use teloxide::prelude::*;

mod commands;
mod flow;
mod handlers;
mod state;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    ledger: Ledger,
    conversations: state::ConversationStore,
}

pub struct Bot {
    token: String,
    ledger: Ledger,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        let parameters = ConfigParameters {
            ledger: self.ledger.clone(),
            conversations: state::ConversationStore::default(),
        };

        let handler = Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<commands::Command>()
                    .endpoint(handlers::handle_command),
            )
            .branch(dptree::endpoint(handlers::handle_message));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    ledger: Option<Ledger>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn ledger(mut self, ledger: Ledger) -> BotBuilder {
        self.ledger = Some(ledger);
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        if self.token.is_empty() {
            return Err("telegram token must not be empty".to_string());
        }
        let ledger = self
            .ledger
            .ok_or_else(|| "missing ledger".to_string())?;

        Ok(Bot {
            token: self.token,
            ledger,
        })
    }
}
