// Adapters layer: concrete implementations for external systems (storage, http, notifications).

pub mod http;
pub mod notify;
pub mod storage;
