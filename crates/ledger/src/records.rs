//! The unioned read view over income and expense rows.

use sea_orm::prelude::DateTimeUtc;

use crate::{expense, income};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// One row of a user's combined history, tagged with its kind.
///
/// Expense rows fold the category into the description as
/// `"category - description"`, the same shape the union view has always
/// presented to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub kind: RecordKind,
    pub description: String,
    pub date: DateTimeUtc,
}

impl From<income::Model> for Record {
    fn from(model: income::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            kind: RecordKind::Income,
            description: model.description,
            date: model.date,
        }
    }
}

impl From<expense::Model> for Record {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            kind: RecordKind::Expense,
            description: format!("{} - {}", model.category, model.description),
            date: model.date,
        }
    }
}
