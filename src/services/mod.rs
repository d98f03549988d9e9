pub mod acceptance_service;
pub mod answer_service;
pub mod notification_service;
pub mod question_service;
pub mod user_service;
pub mod vote_service;
