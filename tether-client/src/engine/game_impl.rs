use tether_core::SessionEvent;
use tether_core::game::{Move, RoundOutcome, RoundResult};

use crate::engine::ClientEngine;
use crate::logger::Logger;

fn round_text(outcome: RoundOutcome) -> &'static str {
    match outcome {
        RoundOutcome::Win => "You win this round!",
        RoundOutcome::Lose => "You lose this round!",
        RoundOutcome::Draw => "The round ended in a draw!",
    }
}

fn verdict_text(outcome: RoundOutcome) -> &'static str {
    match outcome {
        RoundOutcome::Win => "You win!",
        RoundOutcome::Lose => "You lose!",
        RoundOutcome::Draw => "It's a draw!",
    }
}

fn score_text((local, remote): (u32, u32)) -> String {
    format!("Your Score: {} | Opponent Score: {}", local, remote)
}

impl ClientEngine {
    pub(super) async fn on_local_move(&mut self, mv: Move) {
        if !self.session_open() || self.game.awaiting_remote() || self.game.is_over() {
            Logger::warn(&format!("Move {} ignored", mv));
            return;
        }
        let Some(dc) = &self.channel else {
            return;
        };
        if let Err(e) = dc.send_with_str(mv.as_str()) {
            Logger::error("Failed to send move", &e);
            return;
        }

        self.ui.set_game_status(&format!("You played: {}", mv));
        match self.game.play_local(mv) {
            Some(result) => self.finish_round(result).await,
            None => self.refresh_moves(),
        }
    }

    pub(super) async fn on_remote_move(&mut self, text: &str) {
        let mv = match text.parse::<Move>() {
            Ok(mv) => mv,
            Err(e) => {
                Logger::warn(&format!("Bad game message: {}", e));
                return;
            }
        };

        self.ui.append_game_status(" | Opponent played");
        if let Some(result) = self.game.play_remote(mv) {
            self.finish_round(result).await;
        }
    }

    async fn finish_round(&mut self, result: RoundResult) {
        self.show_round(result);
        if self.game.is_over() {
            self.close_session().await;
        }
    }

    fn show_round(&mut self, result: RoundResult) {
        self.ui.set_game_status(round_text(result.outcome));
        self.ui.set_score(&score_text(self.game.scores()));
        if let Some(verdict) = self.game.verdict() {
            self.ui.set_game_status(verdict_text(verdict));
        }
        self.refresh_moves();
    }

    async fn close_session(&mut self) {
        if let Some(dc) = self.channel.take() {
            dc.close();
        }
        self.dispatch(SessionEvent::Close).await;
    }

    pub(super) fn refresh_moves(&self) {
        let enabled = self.session_open() && !self.game.awaiting_remote() && !self.game.is_over();
        self.ui.set_moves_enabled(enabled);
    }
}
