//! The external decision maker.
//!
//! The engine never talks to a terminal or window directly. Every message,
//! choice, and confirmation goes through an [`Actor`], which a presentation
//! layer implements. Calls block until the actor answers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Presentation-side hooks the engine calls during play.
pub trait Actor: Send {
    fn display_message(&mut self, message: &str);

    fn display_error(&mut self, message: &str);

    /// Pick one of `options`, returning its index.
    ///
    /// The caller validates the index and asks again if it is out of range.
    fn choose(&mut self, prompt: &str, options: &[String]) -> usize;

    fn input(&mut self, prompt: &str) -> String;

    fn confirm(&mut self, prompt: &str) -> bool;
}

/// What a [`ScriptedActor`] was shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    pub messages: Vec<String>,
    pub errors: Vec<String>,
    /// Every prompt passed to `choose`, in order.
    pub prompts: Vec<String>,
}

/// Actor that answers from a pre-loaded script.
///
/// Choices are popped front to back; once the script runs out every choice
/// is `0`. Everything shown is recorded in a shared [`Transcript`] that
/// stays readable after the actor is handed to the engine.
///
/// ```
/// use dice_race::engine::{Actor, ScriptedActor};
///
/// let mut actor = ScriptedActor::new().with_choices([2]);
/// let transcript = actor.transcript();
/// let options = vec!["a".to_string(), "b".to_string(), "c".to_string()];
///
/// assert_eq!(actor.choose("pick", &options), 2);
/// assert_eq!(actor.choose("pick", &options), 0);
/// assert_eq!(transcript.lock().unwrap().prompts.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedActor {
    choices: VecDeque<usize>,
    inputs: VecDeque<String>,
    confirm_answer: bool,
    transcript: Arc<Mutex<Transcript>>,
}

impl ScriptedActor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue choice indices, answered in order.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = usize>) -> Self {
        self.choices.extend(choices);
        self
    }

    #[must_use]
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = String>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    #[must_use]
    pub fn with_confirm(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }

    /// Shared handle to everything this actor has been shown.
    #[must_use]
    pub fn transcript(&self) -> Arc<Mutex<Transcript>> {
        Arc::clone(&self.transcript)
    }

    fn record(&self, f: impl FnOnce(&mut Transcript)) {
        if let Ok(mut transcript) = self.transcript.lock() {
            f(&mut transcript);
        }
    }
}

impl Actor for ScriptedActor {
    fn display_message(&mut self, message: &str) {
        self.record(|t| t.messages.push(message.to_string()));
    }

    fn display_error(&mut self, message: &str) {
        self.record(|t| t.errors.push(message.to_string()));
    }

    fn choose(&mut self, prompt: &str, _options: &[String]) -> usize {
        self.record(|t| t.prompts.push(prompt.to_string()));
        self.choices.pop_front().unwrap_or(0)
    }

    fn input(&mut self, _prompt: &str) -> String {
        self.inputs.pop_front().unwrap_or_default()
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.confirm_answer
    }
}
