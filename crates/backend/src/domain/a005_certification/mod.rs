pub mod excel;
pub mod repository;
pub mod service;
