//! The news card component.
//!
//! A [`Card`] owns its presentation state for as long as it is mounted.
//! Remounting (building a new `Card`) starts from a fresh state; nothing is
//! shared between cards.

use std::sync::Arc;

use crate::comments::{CommentsPanel, CommentsView};
use crate::data::{DetailViewService, NewsItem, PlaybackService};
use crate::debug::debug_log;
use crate::dispatch::{Dispatcher, Effect, Gesture};
use crate::image_state::{ImageLoad, ImagePhase, Transition};
use crate::links::LinkOpener;
use crate::resolver::{FallbackSource, ImageResolver};

#[derive(Clone, Default)]
pub struct CardCallbacks {
    pub detail: Option<Arc<dyn DetailViewService + Send + Sync>>,
    pub playback: Option<Arc<dyn PlaybackService + Send + Sync>>,
}

/// Everything the caller hands to a card.
#[derive(Clone)]
pub struct CardInput {
    pub item: NewsItem,
    /// Owned by the playback collaborator; only drives the control's icon.
    pub is_playing: bool,
    pub callbacks: CardCallbacks,
}

impl CardInput {
    pub fn new(item: NewsItem) -> Self {
        Self {
            item,
            is_playing: false,
            callbacks: CardCallbacks::default(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CardPresentationState {
    pub hovered: bool,
    pub image_failed: bool,
    pub image_loaded: bool,
    pub comments: CommentsPanel,
}

impl CardPresentationState {
    pub fn comments_open(&self) -> bool {
        self.comments.is_open()
    }
}

/// What the image slot of a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDisplay<'a> {
    Placeholder,
    Image(&'a str),
    Unavailable,
}

pub struct Card {
    input: CardInput,
    state: CardPresentationState,
    resolver: ImageResolver,
    load: ImageLoad,
    pending_fetch: Option<String>,
    links: Arc<dyn LinkOpener>,
}

impl Card {
    pub fn mount(input: CardInput, source: FallbackSource, links: Arc<dyn LinkOpener>) -> Self {
        let mut resolver = ImageResolver::new(source);
        let resolved = resolver
            .resolve(&input.item.id, input.item.image.as_deref(), false)
            .clone();
        let load = ImageLoad::start(resolved.reference.clone(), resolved.branch);
        Self {
            input,
            state: CardPresentationState::default(),
            resolver,
            load,
            pending_fetch: Some(resolved.reference),
            links,
        }
    }

    pub fn id(&self) -> &str {
        &self.input.item.id
    }

    pub fn input(&self) -> &CardInput {
        &self.input
    }

    pub fn item(&self) -> &NewsItem {
        &self.input.item
    }

    pub fn state(&self) -> &CardPresentationState {
        &self.state
    }

    /// Replaces the caller-supplied input. A different supplied image starts a
    /// fresh resolution cycle; anything else leaves the image untouched.
    pub fn set_input(&mut self, input: CardInput) {
        let image_changed = input.item.image != self.input.item.image;
        self.input = input;
        if image_changed {
            self.state.image_failed = false;
        }
        self.refresh_image();
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.input.is_playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.input.is_playing
    }

    /// Playback control is only present when a playback collaborator exists.
    pub fn has_playback_control(&self) -> bool {
        self.input.callbacks.playback.is_some()
    }

    pub fn has_source_link(&self) -> bool {
        self.input
            .item
            .original_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Resolves the image for the current props, restarting the load cycle
    /// only when the reference actually changed.
    pub fn refresh_image(&mut self) {
        let resolved = self.resolver.resolve(
            &self.input.item.id,
            self.input.item.image.as_deref(),
            self.state.image_failed,
        );
        if resolved.reference == self.load.reference() {
            return;
        }
        self.load = ImageLoad::start(resolved.reference.clone(), resolved.branch);
        self.state.image_loaded = false;
        self.pending_fetch = Some(resolved.reference.clone());
    }

    pub fn image_reference(&self) -> &str {
        self.load.reference()
    }

    pub fn image_phase(&self) -> ImagePhase {
        self.load.phase()
    }

    pub fn image_display(&self) -> ImageDisplay<'_> {
        match self.load.phase() {
            ImagePhase::Loaded => ImageDisplay::Image(self.load.reference()),
            ImagePhase::Loading => ImageDisplay::Placeholder,
            ImagePhase::Failed => ImageDisplay::Unavailable,
        }
    }

    /// The reference the image surface should fetch, handed out once per
    /// resolution cycle.
    pub fn take_fetch_request(&mut self) -> Option<String> {
        self.pending_fetch.take()
    }

    /// How many times the resolver memo recomputed for this card.
    pub fn resolver_computations(&self) -> usize {
        self.resolver.computations()
    }

    pub fn on_image_loaded(&mut self, reference: &str) -> Transition {
        let transition = self.load.on_loaded(reference);
        if transition == Transition::Loaded {
            self.state.image_loaded = true;
        }
        transition
    }

    pub fn on_image_error(&mut self, reference: &str) -> Transition {
        let transition = self.load.on_error(reference);
        match transition {
            Transition::Retry => {
                debug_log(format!(
                    "card {}: image {reference} failed, trying fallback",
                    self.input.item.id
                ));
                self.state.image_failed = true;
                self.state.image_loaded = false;
                self.refresh_image();
            }
            Transition::GaveUp => {
                debug_log(format!(
                    "card {}: fallback image {reference} failed, giving up",
                    self.input.item.id
                ));
                self.state.image_failed = true;
                self.state.image_loaded = false;
            }
            Transition::Loaded | Transition::Stale => {}
        }
        transition
    }

    pub fn dispatch(&mut self, gesture: Gesture) -> Effect {
        Dispatcher::new(&self.input, &mut self.state, self.links.as_ref()).dispatch(gesture)
    }

    /// Hands `(id, open)` to the comments view; returns true when the view
    /// closed itself.
    pub fn sync_comments(&mut self, view: &mut dyn CommentsView) -> bool {
        self.state.comments.sync(&self.input.item.id, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_feed, MockDetailService};
    use crate::dispatch::Target;
    use crate::links::BrowserOpener;
    use crate::resolver::fallback_index;

    fn card_for(item: NewsItem) -> Card {
        Card::mount(
            CardInput::new(item),
            FallbackSource::default(),
            Arc::new(BrowserOpener),
        )
    }

    fn item_with_image(image: Option<&str>) -> NewsItem {
        NewsItem {
            image: image.map(str::to_string),
            ..sample_feed().remove(0)
        }
    }

    #[test]
    fn mount_starts_loading_and_requests_one_fetch() {
        let mut card = card_for(item_with_image(Some("https://cdn.test/a.jpg")));
        assert_eq!(card.image_phase(), ImagePhase::Loading);
        assert_eq!(card.image_display(), ImageDisplay::Placeholder);
        assert_eq!(
            card.take_fetch_request().as_deref(),
            Some("https://cdn.test/a.jpg")
        );
        assert_eq!(card.take_fetch_request(), None);
    }

    #[test]
    fn supplied_failure_moves_to_fallback_then_stops() {
        let mut card = card_for(item_with_image(Some("https://cdn.test/a.jpg")));
        let first = card.take_fetch_request().unwrap();
        assert_eq!(card.on_image_error(&first), Transition::Retry);
        assert!(card.state().image_failed);
        assert!(!card.state().image_loaded);
        assert_eq!(card.image_phase(), ImagePhase::Loading);

        let fallback = card.take_fetch_request().unwrap();
        assert_eq!(
            fallback,
            format!(
                "https://picsum.photos/800/600?random={}",
                fallback_index("news-42")
            )
        );
        assert_eq!(card.on_image_error(&fallback), Transition::GaveUp);
        assert_eq!(card.image_phase(), ImagePhase::Failed);
        assert_eq!(card.image_display(), ImageDisplay::Unavailable);
        assert_eq!(card.take_fetch_request(), None);
        assert_eq!(card.on_image_error(&fallback), Transition::Stale);
    }

    #[test]
    fn late_signal_for_supplied_image_is_ignored() {
        let mut card = card_for(item_with_image(Some("https://cdn.test/a.jpg")));
        let first = card.take_fetch_request().unwrap();
        card.on_image_error(&first);
        assert_eq!(card.on_image_loaded(&first), Transition::Stale);
        assert!(!card.state().image_loaded);
    }

    #[test]
    fn toggles_keep_image_cycle() {
        let mut card = card_for(item_with_image(None));
        card.take_fetch_request();
        let reference = card.image_reference().to_string();
        let computations = card.resolver_computations();

        card.dispatch(Gesture::PointerEnter);
        card.refresh_image();
        card.dispatch(Gesture::Click(Target::Comments));
        card.refresh_image();
        card.dispatch(Gesture::CloseComments);
        card.dispatch(Gesture::PointerLeave);
        card.refresh_image();

        assert_eq!(card.image_reference(), reference);
        assert_eq!(card.image_phase(), ImagePhase::Loading);
        assert_eq!(card.take_fetch_request(), None);
        assert_eq!(card.resolver_computations(), computations);
    }

    #[test]
    fn changed_supplied_image_restarts_cycle() {
        let mut card = card_for(item_with_image(Some("https://cdn.test/a.jpg")));
        let first = card.take_fetch_request().unwrap();
        card.on_image_error(&first);
        card.take_fetch_request();

        let mut input = card.input().clone();
        input.item.image = Some("https://cdn.test/b.jpg".into());
        card.set_input(input);
        assert!(!card.state().image_failed);
        assert_eq!(
            card.take_fetch_request().as_deref(),
            Some("https://cdn.test/b.jpg")
        );
    }

    #[test]
    fn playing_flag_is_external() {
        let mut card = card_for(item_with_image(None));
        assert!(!card.has_playback_control());
        assert!(!card.is_playing());
        card.set_playing(true);
        assert!(card.is_playing());
        assert_eq!(card.state(), &CardPresentationState::default());
    }

    #[test]
    fn remount_starts_fresh() {
        let detail = Arc::new(MockDetailService::default());
        let mut input = CardInput::new(item_with_image(None));
        input.callbacks.detail = Some(detail.clone());
        let mut card = Card::mount(input.clone(), FallbackSource::default(), Arc::new(BrowserOpener));
        card.dispatch(Gesture::PointerEnter);
        card.dispatch(Gesture::Click(Target::Comments));
        drop(card);

        let card = Card::mount(input, FallbackSource::default(), Arc::new(BrowserOpener));
        assert_eq!(card.state(), &CardPresentationState::default());
        assert!(detail.calls().is_empty());
    }
}
