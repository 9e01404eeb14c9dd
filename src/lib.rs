#![no_std]

#[macro_use]
mod fmt;

mod peripherals;

pub use peripherals::*;
