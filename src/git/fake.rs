//! In-memory [`GitRunner`] returning canned output

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::runner::GitRunner;
use crate::error::{Error, Result};

/// Records every call and answers from a table keyed by the joined arguments
///
/// Unknown commands succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    responses: HashMap<String, std::result::Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `args` with `output`
    pub fn respond(mut self, args: &str, output: &str) -> Self {
        self.responses
            .insert(args.to_string(), Ok(output.to_string()));
        self
    }

    /// Fail `args` with `message`
    pub fn fail(mut self, args: &str, message: &str) -> Self {
        self.responses
            .insert(args.to_string(), Err(message.to_string()));
        self
    }

    /// Every call made so far, arguments joined with spaces
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitRunner for FakeRunner {
    async fn run(&self, args: &[&str]) -> Result<String> {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());

        match self.responses.get(&key) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(Error::ExecutionFailed {
                command: format!("git {}", key),
                message: message.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}
