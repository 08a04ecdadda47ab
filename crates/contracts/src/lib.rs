//! Shared contracts between the backend and its clients:
//! domain aggregates and use-case request/response DTOs.

pub mod domain;
pub mod usecases;
