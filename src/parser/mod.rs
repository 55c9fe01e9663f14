pub mod agenda;
pub mod appointments;
pub mod codec;

#[cfg(test)]
mod parser_tests;
