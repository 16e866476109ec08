// SPDX-License-Identifier: MIT

//! Application services: validation and the activity controller.

pub mod controller;
pub mod schemas;
pub mod validator;

pub use controller::TransportActivityController;
pub use validator::SchemaViolation;
