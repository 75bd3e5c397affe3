use chrono::Utc;
use ledger::{Ledger, LedgerError};
use teloxide::{
    prelude::*,
    types::{ChatId, UserId},
    utils::command::BotCommands,
};

use crate::{
    ConfigParameters,
    commands::Command,
    flow::{self, CommitAction, Flow, Prompt, Transition},
    ui,
};

const WELCOME: &str =
    "Hi! I keep track of your incomes and expenses.\nUse /info to see what I can do.";
const STORE_FAILURE: &str = "Something went wrong, try again later.";

pub(crate) async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = from.id;
    let chat_id = msg.chat.id;

    match cmd {
        Command::Start => {
            bot.send_message(chat_id, WELCOME).await?;
            bot.send_message(chat_id, Command::descriptions().to_string())
                .await?;
        }
        Command::Info => {
            bot.send_message(chat_id, Command::descriptions().to_string())
                .await?;
        }
        Command::Records => match cfg.ledger.records(user_id.0 as i64).await {
            Ok(records) if records.is_empty() => {
                bot.send_message(chat_id, "You have no records yet.").await?;
            }
            Ok(records) => {
                bot.send_message(chat_id, ui::render_records(&records))
                    .await?;
            }
            Err(err) => {
                tracing::error!("listing records failed: {err}");
                bot.send_message(chat_id, STORE_FAILURE).await?;
            }
        },
        Command::NewIncome => start_flow(&bot, chat_id, user_id, &cfg, Flow::NewIncome).await?,
        Command::NewExpense => start_flow(&bot, chat_id, user_id, &cfg, Flow::NewExpense).await?,
        Command::Delete => start_flow(&bot, chat_id, user_id, &cfg, Flow::Delete).await?,
        Command::UpdateIncome => {
            start_flow(&bot, chat_id, user_id, &cfg, Flow::UpdateIncome).await?;
        }
        Command::UpdateExpense => {
            start_flow(&bot, chat_id, user_id, &cfg, Flow::UpdateExpense).await?;
        }
    }

    Ok(())
}

pub(crate) async fn handle_message(
    bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = from.id;
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Without an active flow there is nothing to do with free text.
    let Some(conversation) = cfg.conversations.get(user_id).await else {
        return Ok(());
    };

    let categories = if conversation.uses_categories() {
        match cfg.ledger.expense_categories().await {
            Ok(categories) => categories,
            Err(err) => {
                tracing::error!("loading expense categories failed: {err}");
                cfg.conversations.clear(user_id).await;
                bot.send_message(msg.chat.id, STORE_FAILURE)
                    .reply_markup(ui::remove_keyboard())
                    .await?;
                return Ok(());
            }
        }
    } else {
        Vec::new()
    };

    match flow::transition(conversation, text, &categories) {
        Transition::Continue(next, prompt) => {
            cfg.conversations.set(user_id, next).await;
            send_prompt(&bot, msg.chat.id, prompt).await?;
        }
        Transition::Cancelled => {
            cfg.conversations.clear(user_id).await;
            bot.send_message(
                msg.chat.id,
                "Cancelled. Use /info to see the available commands.",
            )
            .reply_markup(ui::remove_keyboard())
            .await?;
        }
        Transition::Commit(action) => {
            cfg.conversations.clear(user_id).await;
            let reply = execute_commit(&cfg.ledger, user_id.0 as i64, action).await;
            bot.send_message(msg.chat.id, reply)
                .reply_markup(ui::remove_keyboard())
                .await?;
        }
    }

    Ok(())
}

async fn start_flow(
    bot: &Bot,
    chat_id: ChatId,
    user_id: UserId,
    cfg: &ConfigParameters,
    flow: Flow,
) -> ResponseResult<()> {
    // Replaces whatever conversation was pending for this user.
    let (conversation, prompt) = flow::start(flow);
    cfg.conversations.set(user_id, conversation).await;
    send_prompt(bot, chat_id, prompt).await
}

async fn send_prompt(bot: &Bot, chat_id: ChatId, prompt: Prompt) -> ResponseResult<()> {
    let request = bot.send_message(chat_id, prompt.text);
    match prompt.options {
        Some(options) => {
            request
                .reply_markup(ui::category_keyboard(&options))
                .await?;
        }
        None => {
            request.await?;
        }
    }
    Ok(())
}

/// Runs the single store call a completed flow resolved to and maps the
/// result onto the user-facing reply. Store failures are logged here; the
/// user only sees a generic message.
async fn execute_commit(ledger: &Ledger, user_id: i64, action: CommitAction) -> String {
    let now = Utc::now();
    match action {
        CommitAction::InsertIncome {
            amount,
            description,
        } => match ledger.insert_income(user_id, &amount, &description, now).await {
            Ok(()) => "Income saved.".to_string(),
            Err(err) => store_failure("saving the income", err),
        },
        CommitAction::InsertExpense {
            amount,
            category,
            description,
        } => match ledger
            .insert_expense(user_id, &amount, &category, &description, now)
            .await
        {
            Ok(()) => "Expense saved.".to_string(),
            Err(err) => store_failure("saving the expense", err),
        },
        CommitAction::DeleteRecord { record_id } => match ledger.delete_record(record_id).await {
            Ok(true) => format!("Record {record_id} deleted."),
            Ok(false) => format!("No record with id {record_id}."),
            Err(err) => store_failure("deleting the record", err),
        },
        CommitAction::UpdateIncome {
            income_id,
            amount,
            description,
        } => match ledger
            .update_income(user_id, &amount, &description, income_id)
            .await
        {
            Ok(true) => format!("Income {income_id} updated."),
            Ok(false) => format!("No income with id {income_id}."),
            Err(err) => store_failure("updating the income", err),
        },
        CommitAction::UpdateExpense {
            expense_id,
            amount,
            category,
            description,
        } => match ledger
            .update_expense(user_id, &amount, &category, &description, expense_id)
            .await
        {
            Ok(true) => format!("Expense {expense_id} updated."),
            Ok(false) => format!("No expense with id {expense_id}."),
            Err(err) => store_failure("updating the expense", err),
        },
    }
}

fn store_failure(operation: &str, err: LedgerError) -> String {
    tracing::error!("{operation} failed: {err}");
    STORE_FAILURE.to_string()
}
