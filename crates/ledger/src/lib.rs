//! Record store for income and expense entries.
//!
//! The two kinds live in parallel tables that share no primary-key space;
//! reads union them into tagged [`Record`]s. The usable expense category
//! list is derived from the rows themselves, not from the seeded catalog.

pub use error::LedgerError;
pub use records::{Record, RecordKind};
use sea_orm::{ActiveValue, QueryFilter, QuerySelect, prelude::*};

mod error;
mod expense;
mod expense_categories;
mod income;
mod income_categories;
mod records;
pub mod seed;

type ResultLedger<T> = Result<T, LedgerError>;

#[derive(Clone, Debug)]
pub struct Ledger {
    database: DatabaseConnection,
}

impl Ledger {
    /// Return a builder for `Ledger`.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    /// Insert a new income row for `user_id`.
    ///
    /// `amount` is the raw text the user entered; coercion failure is a
    /// store error, not a validation round-trip.
    pub async fn insert_income(
        &self,
        user_id: i64,
        amount: &str,
        description: &str,
        date: DateTimeUtc,
    ) -> ResultLedger<()> {
        let amount = parse_amount(amount)?;
        let row = income::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            amount: ActiveValue::Set(amount),
            description: ActiveValue::Set(description.to_string()),
            date: ActiveValue::Set(date),
            ..Default::default()
        };
        row.insert(&self.database).await?;
        Ok(())
    }

    /// Insert a new expense row for `user_id`.
    ///
    /// `category` was validated against [`expense_categories`] by the caller;
    /// the store trusts it as-is.
    ///
    /// [`expense_categories`]: Ledger::expense_categories
    pub async fn insert_expense(
        &self,
        user_id: i64,
        amount: &str,
        category: &str,
        description: &str,
        date: DateTimeUtc,
    ) -> ResultLedger<()> {
        let amount = parse_amount(amount)?;
        let row = expense::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            amount: ActiveValue::Set(amount),
            category: ActiveValue::Set(category.to_string()),
            description: ActiveValue::Set(description.to_string()),
            date: ActiveValue::Set(date),
            ..Default::default()
        };
        row.insert(&self.database).await?;
        Ok(())
    }

    /// Every record owned by `user_id`: income rows first, then expense rows.
    /// No further ordering is guaranteed.
    pub async fn records(&self, user_id: i64) -> ResultLedger<Vec<Record>> {
        let incomes = income::Entity::find()
            .filter(income::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?;
        let expenses = expense::Entity::find()
            .filter(expense::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?;

        Ok(incomes
            .into_iter()
            .map(Record::from)
            .chain(expenses.into_iter().map(Record::from))
            .collect())
    }

    /// Distinct category names currently present among expense rows, for any
    /// user. Empty until the first expense exists anywhere in the store.
    pub async fn expense_categories(&self) -> ResultLedger<Vec<String>> {
        let categories = expense::Entity::find()
            .select_only()
            .column(expense::Column::Category)
            .distinct()
            .into_tuple::<String>()
            .all(&self.database)
            .await?;
        Ok(categories)
    }

    /// Delete the record with `record_id` from whichever table holds it.
    ///
    /// The id spaces are independent, so the delete is attempted against
    /// both tables; `true` means at least one row went away.
    pub async fn delete_record(&self, record_id: i64) -> ResultLedger<bool> {
        let incomes = income::Entity::delete_many()
            .filter(income::Column::Id.eq(record_id))
            .exec(&self.database)
            .await?;
        let expenses = expense::Entity::delete_many()
            .filter(expense::Column::Id.eq(record_id))
            .exec(&self.database)
            .await?;
        Ok(incomes.rows_affected + expenses.rows_affected > 0)
    }

    /// Overwrite the mutable fields of the income row with `income_id`,
    /// reassigning it to `user_id`. Returns `false` when no row matched.
    pub async fn update_income(
        &self,
        user_id: i64,
        amount: &str,
        description: &str,
        income_id: i64,
    ) -> ResultLedger<bool> {
        let amount = parse_amount(amount)?;
        let Some(model) = income::Entity::find_by_id(income_id)
            .one(&self.database)
            .await?
        else {
            return Ok(false);
        };

        let mut row: income::ActiveModel = model.into();
        row.user_id = ActiveValue::Set(user_id);
        row.amount = ActiveValue::Set(amount);
        row.description = ActiveValue::Set(description.to_string());
        row.update(&self.database).await?;
        Ok(true)
    }

    /// Overwrite the mutable fields of the expense row with `expense_id`,
    /// reassigning it to `user_id`. Returns `false` when no row matched.
    pub async fn update_expense(
        &self,
        user_id: i64,
        amount: &str,
        category: &str,
        description: &str,
        expense_id: i64,
    ) -> ResultLedger<bool> {
        let amount = parse_amount(amount)?;
        let Some(model) = expense::Entity::find_by_id(expense_id)
            .one(&self.database)
            .await?
        else {
            return Ok(false);
        };

        let mut row: expense::ActiveModel = model.into();
        row.user_id = ActiveValue::Set(user_id);
        row.amount = ActiveValue::Set(amount);
        row.category = ActiveValue::Set(category.to_string());
        row.description = ActiveValue::Set(description.to_string());
        row.update(&self.database).await?;
        Ok(true)
    }
}

fn parse_amount(raw: &str) -> Result<f64, LedgerError> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(raw.to_string()))?;
    if !amount.is_finite() {
        return Err(LedgerError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

/// The builder for `Ledger`
#[derive(Default)]
pub struct LedgerBuilder {
    database: DatabaseConnection,
}

impl LedgerBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> LedgerBuilder {
        self.database = db;
        self
    }

    /// Construct `Ledger`
    pub fn build(self) -> Ledger {
        Ledger {
            database: self.database,
        }
    }
}
