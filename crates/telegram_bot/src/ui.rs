use ledger::Record;
use teloxide::types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup};

use crate::flow::CANCEL_LABEL;

/// One-time reply keyboard: one category per row plus the cancel button.
pub(crate) fn category_keyboard(categories: &[String]) -> ReplyMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = categories
        .iter()
        .map(|name| vec![KeyboardButton::new(name.clone())])
        .collect();
    rows.push(vec![KeyboardButton::new(CANCEL_LABEL)]);

    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(rows)
            .resize_keyboard()
            .one_time_keyboard(),
    )
}

pub(crate) fn remove_keyboard() -> ReplyMarkup {
    ReplyMarkup::KeyboardRemove(KeyboardRemove::new())
}

pub(crate) fn render_records(records: &[Record]) -> String {
    let mut text = String::from("Your records:\n");
    for record in records {
        text.push_str(&format!(
            "\n#{id} • {kind} • {amount} • {description} • {date}",
            id = record.id,
            kind = record.kind.as_str(),
            amount = record.amount,
            description = record.description,
            date = record.date.format("%Y-%m-%d %H:%M"),
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ledger::RecordKind;

    use super::*;

    #[test]
    fn records_render_one_line_each_with_kind_tags() {
        let date = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
        let records = vec![
            Record {
                id: 1,
                user_id: 1,
                amount: 100.0,
                kind: RecordKind::Income,
                description: "salary".to_string(),
                date,
            },
            Record {
                id: 1,
                user_id: 1,
                amount: 20.0,
                kind: RecordKind::Expense,
                description: "food - lunch".to_string(),
                date,
            },
        ];

        let text = render_records(&records);
        assert!(text.contains("#1 • income • 100 • salary"));
        assert!(text.contains("#1 • expense • 20 • food - lunch"));
    }
}
