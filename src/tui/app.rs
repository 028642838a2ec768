use crate::commands::load_roster;
use crate::config::Config;
use crate::draw::{DrawConfig, DrawSession, Winner};
use crate::engine::DrawEngine;
use crate::error::RaffleError;
use crate::export::export_results;
use crate::reveal::RevealAnimation;
use crate::roster::{AddOutcome, Participant, ParticipantEntry};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the roster
    Normal,
    /// Typing a `name, class, tickets` line
    AddParticipant,
    /// Typing the path of a roster file
    ImportFile,
    /// Waiting for y/N before removing everyone
    ConfirmClear,
    /// Reveal animation running
    Drawing,
    /// Draw finished, winners on screen
    Results,
}

pub struct App {
    pub engine: DrawEngine,
    pub draw_config: DrawConfig,
    pub mode: Mode,
    /// Currently selected roster index
    pub selected_index: usize,
    pub scroll_offset: usize,
    /// Text typed into the add/import prompt
    pub input: String,
    /// Temporary message to display
    pub message: Option<String>,
    pub export_dir: PathBuf,
    /// Terminal dimensions
    pub terminal_width: usize,
    pub terminal_height: usize,
    reveal_frames: u32,
    pause_frames: u32,
    session: Option<DrawSession>,
    animation: Option<RevealAnimation>,
    settled: bool,
    rng: StdRng,
}

impl App {
    pub fn new(engine: DrawEngine, config: &Config, terminal_width: usize, terminal_height: usize) -> Self {
        App {
            engine,
            draw_config: config.draw_config(),
            mode: Mode::Normal,
            selected_index: 0,
            scroll_offset: 0,
            input: String::new(),
            message: None,
            export_dir: config.export_dir(),
            terminal_width,
            terminal_height,
            reveal_frames: config.reveal_frames,
            pause_frames: config.pause_frames(),
            session: None,
            animation: None,
            settled: false,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed random source
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn participants(&self) -> &[Participant] {
        self.engine.participants()
    }

    pub fn winners(&self) -> &[Winner] {
        self.engine.winners()
    }

    pub fn animation(&self) -> Option<&RevealAnimation> {
        self.animation.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.mode == Mode::Drawing
    }

    pub fn selected_participant(&self) -> Option<&Participant> {
        self.participants().get(self.selected_index)
    }

    /// Move selection up
    pub fn select_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            if self.selected_index < self.scroll_offset {
                self.scroll_offset = self.selected_index;
            }
        }
    }

    /// Move selection down
    pub fn select_down(&mut self) {
        if self.selected_index < self.participants().len().saturating_sub(1) {
            self.selected_index += 1;
            let usable_height = self.get_list_height();
            if self.selected_index >= self.scroll_offset + usable_height {
                self.scroll_offset = self.selected_index + 1 - usable_height;
            }
        }
    }

    /// Get the height available for the roster list
    pub fn get_list_height(&self) -> usize {
        // Border: 2 lines, input/status bars: 2 lines
        let reserved = 4;
        self.terminal_height.saturating_sub(reserved).max(1)
    }

    /// Get visible participants for rendering
    pub fn get_visible_participants(&self) -> &[Participant] {
        let participants = self.participants();
        if self.scroll_offset >= participants.len() {
            return &[];
        }
        let end = (self.scroll_offset + self.get_list_height()).min(participants.len());
        &participants[self.scroll_offset..end]
    }

    pub fn get_roster_count_info(&self) -> String {
        let roster = self.engine.roster();
        format!("{} participants, {} tickets", roster.len(), roster.total_tickets())
    }

    fn clamp_selection(&mut self) {
        let len = self.participants().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        }
    }

    pub fn start_add(&mut self) {
        self.mode = Mode::AddParticipant;
        self.input.clear();
    }

    pub fn start_import(&mut self) {
        self.mode = Mode::ImportFile;
        self.input.clear();
    }

    pub fn input_push(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn input_pop(&mut self) {
        self.input.pop();
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.mode = self.idle_mode();
    }

    /// Submit whatever prompt is open
    pub fn submit_input(&mut self) {
        let input = std::mem::take(&mut self.input);
        match self.mode {
            Mode::AddParticipant => {
                if self.add_participant(&input) {
                    self.mode = self.idle_mode();
                } else {
                    self.input = input;
                }
            }
            Mode::ImportFile => {
                self.import_file(Path::new(input.trim()));
                self.mode = self.idle_mode();
            }
            _ => {}
        }
    }

    /// Add one participant from a `name, class, tickets` line
    pub fn add_participant(&mut self, line: &str) -> bool {
        let Some(entry) = ParticipantEntry::parse_line(line) else {
            self.show_message(RaffleError::EmptyName.to_string());
            return false;
        };

        match self
            .engine
            .add_or_merge_participant(&entry.name, &entry.class, entry.weight)
        {
            Ok(AddOutcome::Created { .. }) => {
                self.show_message(format!("Added {}", entry.name));
                true
            }
            Ok(AddOutcome::Merged { total, .. }) => {
                self.show_message(format!(
                    "Added {} ticket(s) to {}. Total tickets: {}",
                    entry.weight, entry.name, total
                ));
                true
            }
            Err(e) => {
                self.show_message(e.to_string());
                false
            }
        }
    }

    pub fn import_file(&mut self, path: &Path) {
        if path.as_os_str().is_empty() {
            self.show_message("Please enter at least one participant");
            return;
        }
        match load_roster(path, &mut self.engine) {
            Ok(summary) if summary.created + summary.merged == 0 => {
                self.show_message("Please enter at least one participant");
            }
            Ok(summary) => self.show_message(summary.message()),
            Err(e) => self.show_message(format!("Import failed: {}", e)),
        }
    }

    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected_participant().map(|p| p.id) else {
            self.show_message("No participant to remove");
            return;
        };
        match self.engine.remove_participant(id) {
            Ok(Some(p)) => self.show_message(format!("Removed {}", p.name)),
            Ok(None) => {}
            Err(e) => self.show_message(e.to_string()),
        }
        self.clamp_selection();
    }

    pub fn request_clear(&mut self) {
        if self.participants().is_empty() {
            return;
        }
        self.mode = Mode::ConfirmClear;
    }

    pub fn confirm_clear(&mut self, confirmed: bool) {
        self.mode = self.idle_mode();
        if !confirmed {
            return;
        }
        match self.engine.clear_all() {
            Ok(()) => self.show_message("All participants removed"),
            Err(e) => self.show_message(e.to_string()),
        }
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn adjust_winners(&mut self, delta: isize) {
        let current = self.draw_config.num_winners as isize;
        self.draw_config.num_winners = (current + delta).max(1) as usize;
    }

    pub fn toggle_duplicates(&mut self) {
        self.draw_config.allow_duplicates = !self.draw_config.allow_duplicates;
    }

    pub fn toggle_weights(&mut self) {
        self.draw_config.use_weights = !self.draw_config.use_weights;
    }

    pub fn start_draw(&mut self) {
        if self.mode == Mode::Results {
            self.show_message("Reset the draw (r) before drawing again");
            return;
        }
        match self.engine.begin_draw(self.draw_config) {
            Ok(session) => {
                self.session = Some(session);
                self.mode = Mode::Drawing;
                self.clear_message();
                self.next_reveal();
            }
            Err(e) => self.show_message(e.to_string()),
        }
    }

    fn next_reveal(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.finish_draw();
            return;
        };
        match self.engine.reveal_next(session, &mut self.rng) {
            Some(reveal) => {
                self.animation = Some(RevealAnimation::new(
                    reveal,
                    self.reveal_frames,
                    self.pause_frames,
                ));
                self.settled = false;
            }
            None => self.finish_draw(),
        }
    }

    fn finish_draw(&mut self) {
        self.session = None;
        self.animation = None;
        self.mode = Mode::Results;
        self.clamp_selection();
        self.show_message(format!("{} winner(s) drawn", self.winners().len()));
    }

    /// Advance the reveal by one frame
    pub fn on_tick(&mut self) {
        if self.mode != Mode::Drawing {
            return;
        }
        let Some(animation) = self.animation.as_mut() else {
            self.next_reveal();
            return;
        };

        animation.advance(&mut self.rng);

        if animation.winner_revealed() && !self.settled {
            self.settled = true;
            if let Some(session) = self.session.as_mut() {
                self.engine.settle(session);
            }
            self.clamp_selection();
        }

        if self.animation.as_ref().is_some_and(RevealAnimation::is_done) {
            self.next_reveal();
        }
    }

    pub fn reset_draw(&mut self) {
        if self.engine.is_drawing() {
            return;
        }
        match self.engine.reset() {
            Ok(()) => {
                self.mode = Mode::Normal;
                self.show_message("Draw reset");
            }
            Err(e) => self.show_message(e.to_string()),
        }
    }

    pub fn export(&mut self) {
        match export_results(self.engine.winners(), &self.export_dir, &Local::now()) {
            Ok(path) => self.show_message(format!("Exported to {}", path.display())),
            Err(e) => self.show_message(e.to_string()),
        }
    }

    fn idle_mode(&self) -> Mode {
        if self.winners().is_empty() {
            Mode::Normal
        } else {
            Mode::Results
        }
    }

    /// Show a message
    pub fn show_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Update terminal dimensions
    pub fn update_terminal_size(&mut self, width: usize, height: usize) {
        self.terminal_width = width;
        self.terminal_height = height;
    }
}
