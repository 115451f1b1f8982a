//! GetConversationDetailHandler - Query handler for one saved conversation.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::clinic::{Conversation, SymptomRecord};
use crate::domain::foundation::ConversationId;
use crate::ports::ClinicStore;

use super::DashboardError;

#[derive(Debug, Clone)]
pub struct GetConversationDetailQuery {
    pub conversation_id: ConversationId,
}

/// Summary, full transcript and extracted symptoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub symptoms: Vec<SymptomRecord>,
}

pub struct GetConversationDetailHandler {
    store: Arc<dyn ClinicStore>,
}

impl GetConversationDetailHandler {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetConversationDetailQuery,
    ) -> Result<ConversationDetail, DashboardError> {
        let conversation = self
            .store
            .find_conversation(query.conversation_id)
            .await?
            .ok_or(DashboardError::ConversationNotFound(query.conversation_id))?;

        let symptoms = self
            .store
            .symptoms_for_conversation(conversation.id)
            .await?;

        Ok(ConversationDetail {
            conversation,
            symptoms,
        })
    }
}
