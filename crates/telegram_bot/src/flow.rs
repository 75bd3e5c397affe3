//! Per-user conversation flows.
//!
//! Each flow is a fixed sequence of steps and the sequence is data
//! ([`Flow::steps`]), not control flow. [`transition`] is a pure function
//! from `(conversation, inbound text, live categories)` to the next state,
//! so the whole machine is testable without a chat transport. Committing is
//! represented as a [`CommitAction`] value; the handler executes it against
//! the ledger exactly once.

/// Reserved keyboard input that aborts the active flow at category steps.
pub const CANCEL_LABEL: &str = "🚫 Cancel";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    NewIncome,
    NewExpense,
    Delete,
    UpdateIncome,
    UpdateExpense,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    RecordId,
    Amount,
    Category,
    Description,
}

impl Flow {
    /// The fixed step sequence of this flow.
    pub fn steps(self) -> &'static [Step] {
        match self {
            Flow::NewIncome => &[Step::Amount, Step::Description],
            Flow::NewExpense => &[Step::Amount, Step::Category, Step::Description],
            Flow::Delete => &[Step::RecordId],
            Flow::UpdateIncome => &[Step::RecordId, Step::Amount, Step::Description],
            Flow::UpdateExpense => &[
                Step::RecordId,
                Step::Amount,
                Step::Category,
                Step::Description,
            ],
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Flow::NewIncome | Flow::UpdateIncome => "income",
            Flow::NewExpense | Flow::UpdateExpense => "expense",
            Flow::Delete => "record",
        }
    }
}

/// The partially-entered record, one slot per step kind.
#[derive(Clone, Debug, Default, PartialEq)]
struct Draft {
    record_id: Option<i64>,
    amount: Option<String>,
    category: Option<String>,
    description: Option<String>,
}

/// A pending flow for one user: the flow, the step cursor and the draft.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    pub flow: Flow,
    cursor: usize,
    draft: Draft,
}

impl Conversation {
    /// Whether any step of this flow consults the live category list.
    pub fn uses_categories(&self) -> bool {
        self.flow.steps().contains(&Step::Category)
    }
}

/// What to send back to the user before waiting for the next message.
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    pub text: String,
    /// Category names to offer as a one-time keyboard (plus the cancel
    /// button); `None` for free-text steps.
    pub options: Option<Vec<String>>,
}

/// The single store call a completed flow resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum CommitAction {
    InsertIncome {
        amount: String,
        description: String,
    },
    InsertExpense {
        amount: String,
        category: String,
        description: String,
    },
    DeleteRecord {
        record_id: i64,
    },
    UpdateIncome {
        income_id: i64,
        amount: String,
        description: String,
    },
    UpdateExpense {
        expense_id: i64,
        amount: String,
        category: String,
        description: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Keep waiting on `Conversation` after sending `Prompt` (either the
    /// next step's prompt or a retry of the current one).
    Continue(Conversation, Prompt),
    /// The flow is complete; run exactly one store call.
    Commit(CommitAction),
    /// The cancel sentinel ended the flow; nothing is committed.
    Cancelled,
}

/// Begin `flow` with an empty draft, returning the first step's prompt.
pub fn start(flow: Flow) -> (Conversation, Prompt) {
    let conversation = Conversation {
        flow,
        cursor: 0,
        draft: Draft::default(),
    };
    let prompt = ask(flow, flow.steps()[0], &[]);
    (conversation, prompt)
}

/// Feed one inbound message into the conversation.
///
/// `categories` is the live expense category list; it validates category
/// input and is re-offered on a retry. Validation failure stays on the same
/// step and never discards fields accepted earlier.
pub fn transition(
    mut conversation: Conversation,
    input: &str,
    categories: &[String],
) -> Transition {
    let flow = conversation.flow;
    let steps = flow.steps();

    match steps[conversation.cursor] {
        Step::RecordId => match parse_record_id(input) {
            Some(id) => conversation.draft.record_id = Some(id),
            None => {
                let prompt = retry(flow, Step::RecordId, categories);
                return Transition::Continue(conversation, prompt);
            }
        },
        Step::Amount => conversation.draft.amount = Some(input.trim().to_string()),
        Step::Category => {
            if input == CANCEL_LABEL {
                return Transition::Cancelled;
            }
            if !categories.iter().any(|c| c == input) {
                let prompt = retry(flow, Step::Category, categories);
                return Transition::Continue(conversation, prompt);
            }
            conversation.draft.category = Some(input.to_string());
        }
        Step::Description => conversation.draft.description = Some(input.to_string()),
    }

    conversation.cursor += 1;
    if conversation.cursor < steps.len() {
        let prompt = ask(flow, steps[conversation.cursor], categories);
        return Transition::Continue(conversation, prompt);
    }

    // Every step before this point filled its draft slot; a miss means the
    // step table and the draft went out of sync, so abort rather than commit
    // a half-built record.
    match commit_action(flow, conversation.draft) {
        Some(action) => Transition::Commit(action),
        None => Transition::Cancelled,
    }
}

fn parse_record_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok().filter(|id| *id >= 0)
}

fn commit_action(flow: Flow, draft: Draft) -> Option<CommitAction> {
    match flow {
        Flow::NewIncome => Some(CommitAction::InsertIncome {
            amount: draft.amount?,
            description: draft.description?,
        }),
        Flow::NewExpense => Some(CommitAction::InsertExpense {
            amount: draft.amount?,
            category: draft.category?,
            description: draft.description?,
        }),
        Flow::Delete => Some(CommitAction::DeleteRecord {
            record_id: draft.record_id?,
        }),
        Flow::UpdateIncome => Some(CommitAction::UpdateIncome {
            income_id: draft.record_id?,
            amount: draft.amount?,
            description: draft.description?,
        }),
        Flow::UpdateExpense => Some(CommitAction::UpdateExpense {
            expense_id: draft.record_id?,
            amount: draft.amount?,
            category: draft.category?,
            description: draft.description?,
        }),
    }
}

fn ask(flow: Flow, step: Step, categories: &[String]) -> Prompt {
    let noun = flow.noun();
    let adjective = match flow {
        Flow::UpdateIncome | Flow::UpdateExpense => "new ",
        _ => "",
    };

    match step {
        Step::RecordId => {
            let verb = if flow == Flow::Delete { "delete" } else { "update" };
            Prompt {
                text: format!("Enter the id of the {noun} to {verb}:"),
                options: None,
            }
        }
        Step::Amount => Prompt {
            text: format!("Enter the {adjective}{noun} amount:"),
            options: None,
        },
        Step::Category => Prompt {
            text: format!("Pick the {adjective}{noun} category:"),
            options: Some(categories.to_vec()),
        },
        Step::Description => Prompt {
            text: format!("Enter the {adjective}{noun} description:"),
            options: None,
        },
    }
}

fn retry(flow: Flow, step: Step, categories: &[String]) -> Prompt {
    match step {
        Step::RecordId => Prompt {
            text: format!("The {} id must be a number. Try again:", flow.noun()),
            options: None,
        },
        Step::Category => Prompt {
            text: "That category is not in the list. Pick one of the buttons:".to_string(),
            options: Some(categories.to_vec()),
        },
        // Free-text steps accept anything and never retry.
        Step::Amount | Step::Description => ask(flow, step, categories),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats() -> Vec<String> {
        vec!["food".to_string(), "transport".to_string()]
    }

    #[test]
    fn new_income_walk_commits_an_insert() {
        let (conversation, prompt) = start(Flow::NewIncome);
        assert_eq!(prompt.text, "Enter the income amount:");
        assert!(prompt.options.is_none());

        let Transition::Continue(conversation, prompt) = transition(conversation, "100", &[])
        else {
            panic!("amount step should continue");
        };
        assert_eq!(prompt.text, "Enter the income description:");

        assert_eq!(
            transition(conversation, "salary", &[]),
            Transition::Commit(CommitAction::InsertIncome {
                amount: "100".to_string(),
                description: "salary".to_string(),
            })
        );
    }

    #[test]
    fn new_expense_walk_offers_the_category_keyboard() {
        let (conversation, _) = start(Flow::NewExpense);
        let Transition::Continue(conversation, prompt) =
            transition(conversation, "50", &cats())
        else {
            panic!("amount step should continue");
        };
        assert_eq!(prompt.text, "Pick the expense category:");
        assert_eq!(prompt.options, Some(cats()));

        let Transition::Continue(conversation, _) = transition(conversation, "food", &cats())
        else {
            panic!("valid category should continue");
        };

        assert_eq!(
            transition(conversation, "lunch", &cats()),
            Transition::Commit(CommitAction::InsertExpense {
                amount: "50".to_string(),
                category: "food".to_string(),
                description: "lunch".to_string(),
            })
        );
    }

    #[test]
    fn unknown_category_re_prompts_the_same_step() {
        let (conversation, _) = start(Flow::NewExpense);
        let Transition::Continue(conversation, _) = transition(conversation, "50", &cats())
        else {
            panic!("amount step should continue");
        };

        let before = conversation.clone();
        let Transition::Continue(conversation, prompt) =
            transition(conversation, "vacation", &cats())
        else {
            panic!("bad category should re-prompt");
        };
        assert_eq!(conversation, before);
        assert_eq!(prompt.options, Some(cats()));
        assert!(prompt.text.contains("not in the list"));
    }

    #[test]
    fn cancel_sentinel_aborts_at_the_category_step() {
        let (conversation, _) = start(Flow::NewExpense);
        let Transition::Continue(conversation, _) = transition(conversation, "50", &cats())
        else {
            panic!("amount step should continue");
        };

        assert_eq!(
            transition(conversation, CANCEL_LABEL, &cats()),
            Transition::Cancelled
        );
    }

    #[test]
    fn cancel_sentinel_is_plain_text_outside_category_steps() {
        let (conversation, _) = start(Flow::NewIncome);
        let Transition::Continue(conversation, _) = transition(conversation, CANCEL_LABEL, &[])
        else {
            panic!("amount step accepts any text");
        };

        assert_eq!(
            transition(conversation, "oops", &[]),
            Transition::Commit(CommitAction::InsertIncome {
                amount: CANCEL_LABEL.to_string(),
                description: "oops".to_string(),
            })
        );
    }

    #[test]
    fn empty_catalog_never_reaches_commit() {
        let (conversation, _) = start(Flow::NewExpense);
        let Transition::Continue(mut conversation, _) = transition(conversation, "50", &[])
        else {
            panic!("amount step should continue");
        };

        for input in ["food", "anything", "50"] {
            match transition(conversation.clone(), input, &[]) {
                Transition::Continue(next, prompt) => {
                    assert_eq!(next, conversation);
                    assert!(prompt.options.is_some_and(|options| options.is_empty()));
                    conversation = next;
                }
                other => panic!("expected a re-prompt, got {other:?}"),
            }
        }
    }

    #[test]
    fn delete_validates_the_record_id() {
        let (conversation, prompt) = start(Flow::Delete);
        assert_eq!(prompt.text, "Enter the id of the record to delete:");

        let Transition::Continue(conversation, prompt) = transition(conversation, "twelve", &[])
        else {
            panic!("bad id should re-prompt");
        };
        assert_eq!(prompt.text, "The record id must be a number. Try again:");

        let Transition::Continue(conversation, _) = transition(conversation, "-3", &[]) else {
            panic!("negative id should re-prompt");
        };

        assert_eq!(
            transition(conversation, " 12 ", &[]),
            Transition::Commit(CommitAction::DeleteRecord { record_id: 12 })
        );
    }

    #[test]
    fn update_income_walks_id_amount_description() {
        let (conversation, _) = start(Flow::UpdateIncome);
        let Transition::Continue(conversation, prompt) = transition(conversation, "7", &[])
        else {
            panic!("valid id should continue");
        };
        assert_eq!(prompt.text, "Enter the new income amount:");

        let Transition::Continue(conversation, _) = transition(conversation, "250", &[]) else {
            panic!("amount step should continue");
        };

        assert_eq!(
            transition(conversation, "late salary", &[]),
            Transition::Commit(CommitAction::UpdateIncome {
                income_id: 7,
                amount: "250".to_string(),
                description: "late salary".to_string(),
            })
        );
    }

    #[test]
    fn update_expense_retry_keeps_accepted_fields() {
        let (conversation, _) = start(Flow::UpdateExpense);
        let Transition::Continue(conversation, _) = transition(conversation, "3", &cats())
        else {
            panic!("valid id should continue");
        };
        let Transition::Continue(conversation, _) = transition(conversation, "18", &cats())
        else {
            panic!("amount step should continue");
        };

        // Wrong category first; the fields entered above must survive.
        let Transition::Continue(conversation, _) =
            transition(conversation, "vacation", &cats())
        else {
            panic!("bad category should re-prompt");
        };
        let Transition::Continue(conversation, _) = transition(conversation, "food", &cats())
        else {
            panic!("valid category should continue");
        };

        assert_eq!(
            transition(conversation, "dinner", &cats()),
            Transition::Commit(CommitAction::UpdateExpense {
                expense_id: 3,
                amount: "18".to_string(),
                category: "food".to_string(),
                description: "dinner".to_string(),
            })
        );
    }
}
