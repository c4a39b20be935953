//! # chat-service
//!
//! Application layer containing the account services, the shared service
//! context, and DTOs.

pub mod dto;
pub mod services;

pub use services::{AuthService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
