// Application layer - Use cases and service seams
pub mod chart_renderer;
pub mod demo_repository;
pub mod poll_service;
