use crate::error::Result;
use crate::models::question::Question;
use validator::{Validate, ValidationError};

pub fn validate<T: Validate>(val: &T) -> Result<()> {
    val.validate()?;
    Ok(())
}

/// Schema check for `Question`: the answer key must point at one of its options.
pub fn correct_index_in_range(question: &Question) -> std::result::Result<(), ValidationError> {
    if question.correct_option_index < question.options.len() {
        Ok(())
    } else {
        let mut err = ValidationError::new("correct_option_index_out_of_range");
        err.add_param("correct_option_index".into(), &question.correct_option_index);
        err.add_param("option_count".into(), &question.options.len());
        Err(err)
    }
}
