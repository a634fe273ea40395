pub mod ai_service;
pub mod export_service;
pub mod grading_service;
pub mod parser_service;
pub mod prompt_service;
