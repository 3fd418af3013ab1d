//! Scripted [`ProcessRunner`] for testing without an interpreter.
//!
//! Each call to `run()` pops the next scripted response and records the
//! request. Responses may be closures so a fake trainer can drop artifacts
//! into the generation directory it was handed.

use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Result, ScriptExit};
use crate::port::outbound::process::{ProcessOutput, ProcessRequest, ProcessRunner};

type Responder = Box<dyn FnOnce(&ProcessRequest) -> Result<ProcessOutput> + Send>;

/// A fake process runner with a queue of scripted responses.
///
/// When the queue is exhausted `run()` fails as if the program could not be
/// started.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Responder>>,
    calls: Mutex<Vec<ProcessRequest>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response computed from the request.
    pub fn push_with<F>(&self, responder: F)
    where
        F: FnOnce(&ProcessRequest) -> Result<ProcessOutput> + Send + 'static,
    {
        self.responses.lock().push_back(Box::new(responder));
    }

    /// Queue a clean exit with the given stdout.
    pub fn push_ok(&self, stdout: &str) {
        self.push_exit(ScriptExit::Code(0), stdout, "");
    }

    /// Queue an arbitrary exit.
    pub fn push_exit(&self, exit: ScriptExit, stdout: &str, stderr: &str) {
        let output = ProcessOutput {
            exit,
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.to_string(),
        };
        self.push_with(move |_| Ok(output));
    }

    /// Queue a failure to start the process.
    pub fn push_spawn_error(&self, message: &str) {
        let message = message.to_string();
        self.push_with(move |_| Err(io::Error::new(io::ErrorKind::NotFound, message).into()));
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<ProcessRequest> {
        self.calls.lock().clone()
    }

    /// Number of responses not yet consumed.
    pub fn pending(&self) -> usize {
        self.responses.lock().len()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, request: &ProcessRequest) -> Result<ProcessOutput> {
        self.calls.lock().push(request.clone());
        let responder = self.responses.lock().pop_front();
        match responder {
            Some(respond) => respond(request),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no scripted response").into()),
        }
    }
}
