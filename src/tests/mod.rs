#[cfg(test)]
pub mod common;

pub mod dlr_webhook;
