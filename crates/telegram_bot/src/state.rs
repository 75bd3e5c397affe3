use std::{collections::HashMap, sync::Arc};

use teloxide::types::UserId;
use tokio::sync::Mutex;

use crate::flow::Conversation;

/// Active conversations, one per user.
///
/// `set` on a user with a pending flow silently replaces it; nothing is
/// persisted across restarts.
#[derive(Clone, Default)]
pub(crate) struct ConversationStore {
    inner: Arc<Mutex<HashMap<UserId, Conversation>>>,
}

impl ConversationStore {
    pub(crate) async fn get(&self, user_id: UserId) -> Option<Conversation> {
        let guard = self.inner.lock().await;
        guard.get(&user_id).cloned()
    }

    pub(crate) async fn set(&self, user_id: UserId, conversation: Conversation) {
        let mut guard = self.inner.lock().await;
        guard.insert(user_id, conversation);
    }

    pub(crate) async fn clear(&self, user_id: UserId) {
        let mut guard = self.inner.lock().await;
        guard.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{self, Flow};

    #[tokio::test]
    async fn a_new_flow_replaces_the_pending_one() {
        let store = ConversationStore::default();
        let user = UserId(1);

        let (first, _) = flow::start(Flow::NewIncome);
        store.set(user, first).await;

        let (second, _) = flow::start(Flow::Delete);
        store.set(user, second.clone()).await;

        assert_eq!(store.get(user).await, Some(second));
    }

    #[tokio::test]
    async fn conversations_are_independent_per_user() {
        let store = ConversationStore::default();

        let (income, _) = flow::start(Flow::NewIncome);
        let (delete, _) = flow::start(Flow::Delete);
        store.set(UserId(1), income.clone()).await;
        store.set(UserId(2), delete.clone()).await;

        assert_eq!(store.get(UserId(1)).await, Some(income));
        assert_eq!(store.get(UserId(2)).await, Some(delete.clone()));

        store.clear(UserId(1)).await;
        assert_eq!(store.get(UserId(1)).await, None);
        assert_eq!(store.get(UserId(2)).await, Some(delete));
    }
}
