pub mod models;
pub mod evaluator;
pub mod minimax;
pub mod bot_strategy;
pub mod bot_profiles;
pub mod controller;
pub mod arena;
