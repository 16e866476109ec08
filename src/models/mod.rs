// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod activity;

pub use activity::{
    datetime_millis, CalcMode, FuelType, TrainType, TransportActivity, TransportMode,
};
