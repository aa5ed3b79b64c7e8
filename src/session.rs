//! Re-runs the pipeline whenever the user's inputs change.

use crate::error::PowerRainError;
use crate::inputs::query::InputState;
use crate::power_rain::{PipelineRun, PowerRain};
use crate::weather_data::source::{HttpSource, RawSource};
use log::debug;

pub type PipelineOutcome = Result<PipelineRun, PowerRainError>;

/// One user session: the current inputs and the outcome computed for them.
///
/// Every call to [`Session::update`] with new inputs recomputes the outcome from
/// scratch; unchanged inputs return the previous outcome. Responses stay memoized
/// in the client across updates.
pub struct Session<S = HttpSource> {
    client: PowerRain<S>,
    inputs: InputState,
    outcome: Option<PipelineOutcome>,
}

impl<S: RawSource> Session<S> {
    pub fn new(client: PowerRain<S>) -> Self {
        Self {
            client,
            inputs: InputState::default(),
            outcome: None,
        }
    }

    /// The inputs the current outcome was computed for, or the defaults before the first update.
    pub fn inputs(&self) -> InputState {
        self.inputs
    }

    pub fn client(&self) -> &PowerRain<S> {
        &self.client
    }

    /// Applies `inputs` and returns the matching outcome.
    pub fn update(&mut self, inputs: InputState) -> &PipelineOutcome {
        let outcome = match self.outcome.take() {
            Some(previous) if self.inputs == inputs => {
                debug!("Inputs unchanged, keeping previous outcome");
                previous
            }
            _ => self.client.run(inputs),
        };
        self.inputs = inputs;
        self.outcome.insert(outcome)
    }
}
