//! Turns gestures on a card into state changes or collaborator calls.
//!
//! A card is a clickable region ("open detail view") with controls nested
//! inside it. A click is first offered to the innermost control; only when
//! that control does not claim it does the region handler run. Every nested
//! control claims its clicks, including controls whose feature is disabled.

use crate::card::{CardInput, CardPresentationState};
use crate::debug::debug_log;
use crate::links::LinkOpener;

/// Where inside a card a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Leftover area of the card region.
    Body,
    ReadMore,
    PlayPause,
    Comments,
    SourceIcon,
    SourceText,
}

impl Target {
    pub fn is_nested_control(self) -> bool {
        !matches!(self, Target::Body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    PointerEnter,
    PointerLeave,
    Click(Target),
    /// Raised by the comments view's own close control.
    CloseComments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Consumed,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    HoverChanged(bool),
    DetailRequested,
    PlaybackRequested,
    CommentsOpened,
    CommentsClosed,
    SourceOpened(String),
    SourceOpenFailed(String),
}

pub struct Dispatcher<'a> {
    input: &'a CardInput,
    state: &'a mut CardPresentationState,
    links: &'a dyn LinkOpener,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        input: &'a CardInput,
        state: &'a mut CardPresentationState,
        links: &'a dyn LinkOpener,
    ) -> Self {
        Self {
            input,
            state,
            links,
        }
    }

    pub fn dispatch(&mut self, gesture: Gesture) -> Effect {
        let effect = match gesture {
            Gesture::PointerEnter => self.set_hovered(true),
            Gesture::PointerLeave => self.set_hovered(false),
            Gesture::CloseComments => {
                if self.state.comments.close() {
                    Effect::CommentsClosed
                } else {
                    Effect::Nothing
                }
            }
            Gesture::Click(target) => match self.handle_control(target) {
                (Propagation::Consumed, effect) => effect,
                (Propagation::Continue, _) => self.handle_region(),
            },
        };
        if effect != Effect::Nothing {
            debug_log(format!(
                "card {}: {:?} -> {:?}",
                self.input.item.id, gesture, effect
            ));
        }
        effect
    }

    fn set_hovered(&mut self, hovered: bool) -> Effect {
        if self.state.hovered == hovered {
            return Effect::Nothing;
        }
        self.state.hovered = hovered;
        Effect::HoverChanged(hovered)
    }

    fn handle_control(&mut self, target: Target) -> (Propagation, Effect) {
        let effect = match target {
            Target::Body => return (Propagation::Continue, Effect::Nothing),
            Target::ReadMore => self.request_detail(),
            Target::PlayPause => match self.input.callbacks.playback.as_ref() {
                Some(playback) => {
                    let item = &self.input.item;
                    playback.toggle_playback(&item.id, &item.narration_text());
                    Effect::PlaybackRequested
                }
                None => Effect::Nothing,
            },
            Target::Comments => {
                self.state.comments.open();
                Effect::CommentsOpened
            }
            Target::SourceIcon | Target::SourceText => self.open_source(),
        };
        (Propagation::Consumed, effect)
    }

    fn handle_region(&mut self) -> Effect {
        self.request_detail()
    }

    fn request_detail(&self) -> Effect {
        match self.input.callbacks.detail.as_ref() {
            Some(detail) => {
                detail.request_detail(&self.input.item.id);
                Effect::DetailRequested
            }
            None => Effect::Nothing,
        }
    }

    fn open_source(&self) -> Effect {
        let Some(url) = self
            .input
            .item
            .original_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        else {
            return Effect::Nothing;
        };
        match self.links.open(url) {
            Ok(()) => Effect::SourceOpened(url.to_string()),
            Err(err) => {
                debug_log(format!("card {}: {err}", self.input.item.id));
                Effect::SourceOpenFailed(err.to_string())
            }
        }
    }
}
