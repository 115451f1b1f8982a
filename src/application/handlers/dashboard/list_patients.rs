//! ListPatientsHandler - Query handler for the patient roster.

use std::sync::Arc;

use crate::domain::clinic::Patient;
use crate::ports::ClinicStore;

use super::DashboardError;

#[derive(Debug, Clone, Default)]
pub struct ListPatientsQuery;

pub struct ListPatientsHandler {
    store: Arc<dyn ClinicStore>,
}

impl ListPatientsHandler {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: ListPatientsQuery) -> Result<Vec<Patient>, DashboardError> {
        Ok(self.store.list_patients().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryClinicStore;

    #[tokio::test]
    async fn lists_seeded_patients() {
        let handler = ListPatientsHandler::new(Arc::new(InMemoryClinicStore::seeded(3)));

        let patients = handler.handle(ListPatientsQuery).await.unwrap();

        assert_eq!(patients.len(), 3);
        assert_eq!(patients[2].name, "Patient 3");
    }
}
