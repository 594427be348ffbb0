//! Data Transfer Objects - For API boundaries

mod control;

pub use control::ControlResponseDto;
