pub mod constants;
pub mod palette;
pub mod serde_ext;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
