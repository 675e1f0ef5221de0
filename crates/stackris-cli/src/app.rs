use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use stackris_ai::{best_placement, plan_moves};
use stackris_engine::engine::{GameSession, PieceBag, SessionState};

use crate::{tui::App, ui::widgets::SessionDisplay};

/// Frames advanced per tick while turbo is on.
const TURBO_FRAMES_PER_TICK: u64 = 240;

/// Self-playing session screen.
///
/// Every spawned piece gets one plan: the placement search runs against the
/// current board, the resulting actions are queued, and the session consumes
/// them one per frame until the piece locks.
pub struct AutoPlayApp {
    session: GameSession,
    turbo: bool,
    is_exiting: bool,
    planned_pieces: Option<usize>,
}

impl AutoPlayApp {
    pub fn new(fps: u64, bag: PieceBag, turbo: bool) -> Self {
        Self {
            session: GameSession::new(fps, bag),
            turbo,
            is_exiting: false,
            planned_pieces: None,
        }
    }

    fn step_frame(&mut self) {
        let completed = self.session.stats().completed_pieces();
        if self.session.pending_actions() == 0 && self.planned_pieces != Some(completed) {
            let field = self.session.field();
            if let Some(placement) = best_placement(field.board(), field.falling_piece().kind()) {
                let plan = plan_moves(field.falling_piece(), &placement);
                self.session.queue_actions(plan);
            }
            self.planned_pieces = Some(completed);
        }
        self.session.increment_frame();
    }
}

impl App for AutoPlayApp {
    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event) {
        let state = self.session.state();
        let can_toggle_pause = state.is_playing() || state.is_paused();

        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('t') if state.is_playing() => self.turbo = !self.turbo,
                KeyCode::Char('p') if can_toggle_pause => self.session.toggle_pause(),
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session).turbo(self.turbo);
        let turbo_text = if self.turbo {
            "T (Turbo: ON)"
        } else {
            "T (Turbo: OFF)"
        };
        let help_text = match self.session.state() {
            SessionState::Playing => format!("Controls: {turbo_text} | p (Pause) | q (Quit)"),
            SessionState::Paused => "Controls: p (Resume) | q (Quit)".to_owned(),
            SessionState::GameOver => "Controls: q (Quit)".to_owned(),
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(23), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self) {
        if !self.session.state().is_playing() {
            return;
        }
        let frames = if self.turbo { TURBO_FRAMES_PER_TICK } else { 1 };
        for _ in 0..frames {
            self.step_frame();
            if !self.session.state().is_playing() {
                break;
            }
        }
    }
}
