//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for Tally:
//!
//! - `income`: income records, one row per entry
//! - `expense`: expense records, one row per entry (carries a category)
//! - `income_categories` / `expense_categories`: seed catalogs written at
//!   provisioning time and left alone afterwards

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Income {
    Table,
    Id,
    UserId,
    Amount,
    Description,
    Date,
}

#[derive(Iden)]
enum Expense {
    Table,
    Id,
    UserId,
    Amount,
    Category,
    Description,
    Date,
}

#[derive(Iden)]
enum IncomeCategories {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum ExpenseCategories {
    Table,
    Id,
    Name,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Income::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Income::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Income::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Income::Amount).double().not_null())
                    .col(ColumnDef::new(Income::Description).string().not_null())
                    .col(ColumnDef::new(Income::Date).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-income-user_id")
                    .table(Income::Table)
                    .col(Income::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expense::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expense::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expense::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Expense::Amount).double().not_null())
                    .col(ColumnDef::new(Expense::Category).string().not_null())
                    .col(ColumnDef::new(Expense::Description).string().not_null())
                    .col(ColumnDef::new(Expense::Date).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expense-user_id")
                    .table(Expense::Table)
                    .col(Expense::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IncomeCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IncomeCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IncomeCategories::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExpenseCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpenseCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExpenseCategories::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExpenseCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IncomeCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expense::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Income::Table).to_owned())
            .await?;
        Ok(())
    }
}
