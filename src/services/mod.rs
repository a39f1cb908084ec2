pub mod availability;
pub mod form_state;
pub mod sessions;
pub mod validation;

#[cfg(test)]
mod form_state_test;
