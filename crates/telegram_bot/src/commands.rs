//! Command structs

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "snake_case",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "show the welcome message.")]
    Start,
    #[command(description = "list the available commands.")]
    Info,
    #[command(description = "add a new income.")]
    NewIncome,
    #[command(description = "add a new expense.")]
    NewExpense,
    #[command(description = "show all your records.")]
    Records,
    #[command(description = "delete a record by its id.")]
    Delete,
    #[command(description = "update one of your incomes.")]
    UpdateIncome,
    #[command(description = "update one of your expenses.")]
    UpdateExpense,
}
