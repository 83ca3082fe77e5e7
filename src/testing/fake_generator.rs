use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::{Directive, Generator};

/// Scripted generator recording every directive it receives.
#[derive(Clone)]
pub struct FakeGenerator {
    directives: Arc<Mutex<Vec<Directive>>>,
    response: Result<String, String>,
}

impl FakeGenerator {
    /// Fake that always succeeds with `output`.
    pub fn returning(output: impl Into<String>) -> Self {
        Self { directives: Arc::new(Mutex::new(Vec::new())), response: Ok(output.into()) }
    }

    /// Fake that always fails with a generation error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { directives: Arc::new(Mutex::new(Vec::new())), response: Err(message.into()) }
    }

    /// Directives recorded so far, in call order.
    pub fn recorded(&self) -> Vec<Directive> {
        self.directives.lock().unwrap().clone()
    }
}

impl Generator for FakeGenerator {
    fn complete(&self, directive: &Directive) -> Result<String, AppError> {
        self.directives.lock().unwrap().push(directive.clone());
        match &self.response {
            Ok(output) => Ok(output.clone()),
            Err(message) => Err(AppError::Generation { message: message.clone(), status: None }),
        }
    }
}
