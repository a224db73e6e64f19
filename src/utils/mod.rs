pub mod id;
pub mod validation;
