//! In-memory adapters.

mod in_memory_clinic_store;

pub use in_memory_clinic_store::InMemoryClinicStore;
