use thiserror::Error;

/// Client-side rejection of a form submission. Shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a question")]
    EmptyQuestion,
    #[error("Please enter at least {0} options")]
    TooFewOptions(usize),
    #[error("A poll can have at most {0} options")]
    TooManyOptions(usize),
    #[error("Please fill in the {0}")]
    Required(&'static str),
    #[error("Still saving, please wait")]
    InFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(FormError::TooFewOptions(2).to_string(), "Please enter at least 2 options");
        assert_eq!(FormError::TooManyOptions(4).to_string(), "A poll can have at most 4 options");
        assert_eq!(FormError::Required("email").to_string(), "Please fill in the email");
    }
}
