use std::sync::Arc;

use news_card::card::{Card, CardCallbacks, CardInput, ImageDisplay};
use news_card::data::{MockDetailService, MockPlaybackService, NewsItem};
use news_card::dispatch::{Effect, Gesture, Target};
use news_card::image_state::{ImagePhase, Transition};
use news_card::links::{LinkError, LinkOpener};
use news_card::resolver::{fallback_index, string_hash, FallbackSource};
use news_card::ui::{card_body, Palette};

#[derive(Default)]
struct NullOpener;

impl LinkOpener for NullOpener {
    fn open(&self, _url: &str) -> Result<(), LinkError> {
        Ok(())
    }
}

fn item(id: &str, image: Option<&str>) -> NewsItem {
    NewsItem {
        id: id.into(),
        title: "Title".into(),
        summary: "Summary".into(),
        author: "Author".into(),
        published: "Oct 18, 2026".into(),
        category: "World".into(),
        image: image.map(str::to_string),
        read_time: "1 min read".into(),
        original_url: Some("https://example.com/story".into()),
    }
}

struct Harness {
    card: Card,
    detail: Arc<MockDetailService>,
    playback: Arc<MockPlaybackService>,
}

fn harness(id: &str, image: Option<&str>) -> Harness {
    let detail = Arc::new(MockDetailService::default());
    let playback = Arc::new(MockPlaybackService::default());
    let input = CardInput {
        item: item(id, image),
        is_playing: false,
        callbacks: CardCallbacks {
            detail: Some(detail.clone()),
            playback: Some(playback.clone()),
        },
    };
    Harness {
        card: Card::mount(input, FallbackSource::default(), Arc::new(NullOpener)),
        detail,
        playback,
    }
}

#[test]
fn news_42_loads_its_fallback() {
    let mut h = harness("news-42", None);
    let index = string_hash("news-42").unsigned_abs() % 1000 + 1;
    assert_eq!(index, 225);
    let reference = h.card.take_fetch_request().unwrap();
    assert_eq!(
        reference,
        format!("https://picsum.photos/800/600?random={index}")
    );
    assert_eq!(h.card.image_display(), ImageDisplay::Placeholder);

    assert_eq!(h.card.on_image_loaded(&reference), Transition::Loaded);
    assert_eq!(h.card.image_phase(), ImagePhase::Loaded);
    assert!(h.card.state().image_loaded);
    assert_eq!(h.card.image_display(), ImageDisplay::Image(reference.as_str()));
}

#[test]
fn fallback_index_is_stable() {
    let first = fallback_index("abc");
    for _ in 0..10 {
        assert_eq!(fallback_index("abc"), first);
    }
    assert_eq!(first, 355);
}

#[test]
fn at_most_two_failures_then_stable() {
    let mut h = harness("n7", Some("https://cdn.test/broken.jpg"));
    let supplied = h.card.take_fetch_request().unwrap();
    assert_eq!(h.card.on_image_error(&supplied), Transition::Retry);
    let fallback = h.card.take_fetch_request().unwrap();
    assert_ne!(fallback, supplied);
    assert_eq!(h.card.on_image_error(&fallback), Transition::GaveUp);

    assert_eq!(h.card.image_phase(), ImagePhase::Failed);
    assert!(!h.card.state().image_loaded);
    for _ in 0..3 {
        h.card.refresh_image();
        assert_eq!(h.card.take_fetch_request(), None);
    }
}

#[test]
fn toggles_do_not_touch_the_image() {
    let mut h = harness("n8", Some("https://cdn.test/ok.jpg"));
    let reference = h.card.take_fetch_request().unwrap();
    let computations = h.card.resolver_computations();

    for gesture in [
        Gesture::PointerEnter,
        Gesture::Click(Target::Comments),
        Gesture::PointerLeave,
        Gesture::CloseComments,
    ] {
        h.card.dispatch(gesture);
        h.card.refresh_image();
        assert_eq!(h.card.image_reference(), reference);
        assert_eq!(h.card.image_phase(), ImagePhase::Loading);
        assert_eq!(h.card.take_fetch_request(), None);
    }
    assert_eq!(h.card.resolver_computations(), computations);
}

#[test]
fn controls_and_detail_are_isolated() {
    let mut h = harness("n9", None);
    assert_eq!(
        h.card.dispatch(Gesture::Click(Target::PlayPause)),
        Effect::PlaybackRequested
    );
    assert_eq!(
        h.card.dispatch(Gesture::Click(Target::Comments)),
        Effect::CommentsOpened
    );
    assert_eq!(
        h.card.dispatch(Gesture::Click(Target::SourceIcon)),
        Effect::SourceOpened("https://example.com/story".into())
    );
    assert!(h.detail.calls().is_empty());

    assert_eq!(
        h.card.dispatch(Gesture::Click(Target::Body)),
        Effect::DetailRequested
    );
    assert_eq!(h.detail.calls(), vec!["n9".to_string()]);
    assert_eq!(
        h.playback.calls(),
        vec![("n9".to_string(), "TitleSummary".to_string())]
    );
}

#[test]
fn no_playback_collaborator_means_no_control() {
    let input = CardInput::new(item("n10", None));
    let mut card = Card::mount(input, FallbackSource::default(), Arc::new(NullOpener));
    assert!(!card.has_playback_control());
    let body = card_body(&card, 60, &Palette::named("default"));
    assert!(body.controls.iter().all(|c| c.target != Target::PlayPause));
    assert_eq!(card.dispatch(Gesture::Click(Target::PlayPause)), Effect::Nothing);
}

#[test]
fn empty_identifier_uses_first_fallback() {
    let mut h = harness("", None);
    assert_eq!(
        h.card.take_fetch_request().unwrap(),
        "https://picsum.photos/800/600?random=1"
    );
}
