//! Default category catalogs inserted at provisioning time.

use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::{LedgerError, expense_categories, income_categories};

pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &["Salary", "Advance", "Bonus", "Other"];

pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] =
    &["Rent", "Groceries", "Transport", "Entertainment", "Other"];

/// Inserts the default catalogs into the `*_categories` tables.
///
/// Provisioning only: compose with `Migrator::fresh` so the tables start
/// empty. Normal operation never writes these tables, and the conversation
/// engine never reads them.
pub async fn insert_default_categories(db: &DatabaseConnection) -> Result<(), LedgerError> {
    let income_rows = DEFAULT_INCOME_CATEGORIES
        .iter()
        .map(|name| income_categories::ActiveModel {
            name: ActiveValue::Set((*name).to_string()),
            ..Default::default()
        });
    income_categories::Entity::insert_many(income_rows)
        .exec(db)
        .await?;

    let expense_rows = DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .map(|name| expense_categories::ActiveModel {
            name: ActiveValue::Set((*name).to_string()),
            ..Default::default()
        });
    expense_categories::Entity::insert_many(expense_rows)
        .exec(db)
        .await?;

    Ok(())
}
