//! Seeded expense category catalog. Written at provisioning time only.
//!
//! Note that [`Ledger::expense_categories`] does not read this table: the
//! usable category list is derived from the `expense` rows themselves.
//!
//! [`Ledger::expense_categories`]: crate::Ledger::expense_categories

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
