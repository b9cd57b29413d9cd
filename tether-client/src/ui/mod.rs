use tether_core::SignalMessage;
use tether_core::game::Move;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::engine::{EventSender, ShellEvent};
use crate::logger::Logger;

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
}

/// Handles to the lobby and game panels of `index.html`.
pub struct Ui {
    lobby: HtmlElement,
    game: HtmlElement,
    room_input: HtmlInputElement,
    create_button: HtmlButtonElement,
    join_button: HtmlButtonElement,
    lobby_status: Element,
    game_status: Element,
    score: Element,
    move_buttons: Vec<HtmlButtonElement>,
}

impl Ui {
    pub fn bind(document: &Document) -> Result<Self, JsValue> {
        let nodes = document.query_selector_all(".move")?;
        let mut move_buttons = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(button) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlButtonElement>().ok()) {
                move_buttons.push(button);
            }
        }

        Ok(Self {
            lobby: element(document, "lobby")?,
            game: element(document, "game")?,
            room_input: element(document, "roomId")?,
            create_button: element(document, "createRoom")?,
            join_button: element(document, "joinRoom")?,
            lobby_status: element(document, "lobbyStatus")?,
            game_status: element(document, "gameStatus")?,
            score: element(document, "score")?,
            move_buttons,
        })
    }

    /// Turn clicks into shell events.
    pub fn wire(&self, events_tx: &EventSender) -> Result<(), JsValue> {
        for (button, create) in [(&self.create_button, true), (&self.join_button, false)] {
            let events_tx = events_tx.clone();
            let input = self.room_input.clone();
            let onclick = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                let room_id = input.value().into();
                let request = if create {
                    SignalMessage::CreateRoom { room_id }
                } else {
                    SignalMessage::JoinRoom { room_id }
                };
                let _ = events_tx.unbounded_send(ShellEvent::Request(request));
            }));
            button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
            onclick.forget();
        }

        for button in &self.move_buttons {
            let name = button.get_attribute("data-move").unwrap_or_default();
            let mv = match name.parse::<Move>() {
                Ok(mv) => mv,
                Err(e) => {
                    Logger::warn(&format!("Skipping move button: {}", e));
                    continue;
                }
            };
            let events_tx = events_tx.clone();
            let onclick = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                let _ = events_tx.unbounded_send(ShellEvent::Play(mv));
            }));
            button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
            onclick.forget();
        }
        Ok(())
    }

    pub fn show_game(&self) {
        let _ = self.lobby.style().set_property("display", "none");
        let _ = self.game.style().set_property("display", "block");
    }

    pub fn set_lobby_status(&self, text: &str) {
        self.lobby_status.set_text_content(Some(text));
    }

    pub fn set_game_status(&self, text: &str) {
        self.game_status.set_text_content(Some(text));
    }

    pub fn append_game_status(&self, text: &str) {
        let current = self.game_status.text_content().unwrap_or_default();
        self.game_status.set_text_content(Some(&format!("{}{}", current, text)));
    }

    pub fn set_score(&self, text: &str) {
        self.score.set_text_content(Some(text));
    }

    pub fn set_moves_enabled(&self, enabled: bool) {
        for button in &self.move_buttons {
            button.set_disabled(!enabled);
        }
    }
}
