mod macros;

pub mod config;
pub mod dom;
pub mod events;
pub mod gui;
pub mod sys;
pub mod timer;

#[cfg(test)]
mod test_helpers;
