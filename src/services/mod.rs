pub mod import_service;
pub mod quiz_engine;
pub mod score_sink;
