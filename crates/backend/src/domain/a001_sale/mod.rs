pub mod mrr;
pub mod repository;
pub mod service;
