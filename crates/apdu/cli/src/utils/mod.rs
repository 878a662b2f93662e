//! Utility functions for the APDU tool

pub(crate) mod display;
pub(crate) mod input;
