use tracing::{info, warn};

use crate::error::{GenerationError, LoadError};
use crate::model::catalog::{
    default_maturity, default_template, maturity_by_name, template_by_name, MaturityPolicy, Mode,
    Template,
};
use crate::model::game_save::{GameSave, SAVE_VERSION};
use crate::model::generation_request::GenerationRequest;
use crate::model::memory::ConversationMemory;
use crate::model::params::GenerationParameters;
use crate::model::transcript::Transcript;

pub const NOTHING_TO_UNDO: &str = "Nothing to undo";

/// A turn sent to the engine and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub ticket: u64,
    pub input: String,
    pub mode: Mode,
}

/// All story state owned by the window: memory, transcript, the active
/// template/maturity/mode, slider values and the status line.
///
/// Exactly one template and one maturity policy are active at a time, and
/// memory only ever holds turns recorded since the last template change,
/// new game or load.
#[derive(Debug)]
pub struct Session {
    memory: ConversationMemory,
    transcript: Transcript,
    template: &'static Template,
    maturity: &'static MaturityPolicy,
    mode: Mode,
    params: GenerationParameters,
    status: String,
    next_ticket: u64,
    pending: Option<PendingTurn>,
}

impl Default for Session {
    fn default() -> Self {
        let template = default_template();
        Self {
            memory: ConversationMemory::default(),
            transcript: Transcript::new(template.opening()),
            template,
            maturity: default_maturity(),
            mode: Mode::default(),
            params: GenerationParameters::default(),
            status: "Ready".to_string(),
            next_ticket: 1,
            pending: None,
        }
    }
}

impl Session {
    /* ---------- Story selection ---------- */

    pub fn apply_template(&mut self, template: &'static Template) {
        self.template = template;
        self.restart();
        self.status = format!("Applied template: {}", template.name);
        info!(template = template.name, "Template applied");
    }

    /// Starts over with the current template.
    pub fn new_game(&mut self) {
        self.restart();
        self.status = format!("New game: {}", self.template.name);
        info!(template = self.template.name, "New game");
    }

    fn restart(&mut self) {
        self.memory.reset();
        self.transcript.reset(self.template.opening());
        self.pending = None;
    }

    pub fn set_maturity(&mut self, maturity: &'static MaturityPolicy) {
        self.maturity = maturity;
        self.status = format!("Maturity set to {}", maturity.name);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Stores new slider values, pulled back into range if needed.
    pub fn set_params(&mut self, params: GenerationParameters) -> GenerationParameters {
        self.params = params.clamped();
        self.status = "Parameters updated".to_string();
        self.params
    }

    /* ---------- Turns ---------- */

    /// Starts a turn for `input` in the current mode. Returns `None` for
    /// blank input or while another turn is still in flight.
    pub fn begin_turn(&mut self, input: &str) -> Option<(u64, GenerationRequest)> {
        if input.trim().is_empty() {
            return None;
        }
        if self.pending.is_some() {
            self.status = "Still waiting for the previous response".to_string();
            return None;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        self.pending = Some(PendingTurn {
            ticket,
            input: input.to_string(),
            mode: self.mode,
        });
        self.status = "Generating...".to_string();

        let request = GenerationRequest {
            input: input.to_string(),
            mode: self.mode,
            template: self.template,
            maturity: self.maturity,
            history: self.memory.snapshot(),
        };

        Some((ticket, request))
    }

    /// Records the narrator's reply. Replies for tickets that are no longer
    /// pending (template changed, undo, load) are dropped.
    pub fn complete_turn(&mut self, ticket: u64, output: &str) -> bool {
        let Some(pending) = self.take_pending(ticket) else {
            return false;
        };

        self.memory.record(pending.input.as_str(), output);
        self.transcript.append_turn(pending.mode, &pending.input, output);
        self.status = "Response generated successfully with RAG".to_string();
        true
    }

    /// A failed turn only touches the status line.
    pub fn fail_turn(&mut self, ticket: u64, error: &GenerationError) -> bool {
        if self.take_pending(ticket).is_none() {
            return false;
        }

        warn!(%error, "Generation failed");
        self.status = format!("Error: {error}");
        true
    }

    fn take_pending(&mut self, ticket: u64) -> Option<PendingTurn> {
        if self.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Removes the most recent turn from memory and transcript.
    pub fn undo(&mut self) -> bool {
        self.pending = None;

        if self.memory.undo().is_none() {
            self.status = NOTHING_TO_UNDO.to_string();
            return false;
        }

        self.transcript.pop_turn();
        self.status = "Undid last action".to_string();
        true
    }

    /* ---------- Save / load ---------- */

    pub fn to_save(&self) -> GameSave {
        GameSave {
            version: SAVE_VERSION,
            turns: self.memory.turns().to_vec(),
            transcript: self.transcript.text().to_string(),
            turn_offsets: self.transcript.turn_offsets().to_vec(),
            template: self.template.name.to_string(),
            maturity: self.maturity.name.to_string(),
            params: self.params,
        }
    }

    /// Replaces the whole story with `save`. On error nothing changes.
    pub fn load(&mut self, save: GameSave) -> Result<(), LoadError> {
        let template = template_by_name(&save.template)
            .ok_or_else(|| LoadError::UnknownTemplate(save.template.clone()))?;
        let maturity = maturity_by_name(&save.maturity)
            .ok_or_else(|| LoadError::UnknownMaturity(save.maturity.clone()))?;
        save.params
            .validate()
            .map_err(LoadError::InvalidParameters)?;

        if save.turn_offsets.len() != save.turns.len() {
            return Err(LoadError::TranscriptMismatch);
        }
        let transcript = Transcript::from_parts(save.transcript, save.turn_offsets)
            .ok_or(LoadError::TranscriptMismatch)?;

        self.memory = ConversationMemory::from_turns(save.turns);
        self.transcript = transcript;
        self.template = template;
        self.maturity = maturity;
        self.params = save.params;
        self.pending = None;
        self.status = "Game loaded".to_string();

        info!(
            template = template.name,
            turns = self.memory.len(),
            "Game loaded"
        );
        Ok(())
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /* ---------- Accessors ---------- */

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn transcript(&self) -> &str {
        self.transcript.text()
    }

    pub fn template(&self) -> &'static Template {
        self.template
    }

    pub fn maturity(&self) -> &'static MaturityPolicy {
        self.maturity
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn params(&self) -> GenerationParameters {
        self.params
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }
}
