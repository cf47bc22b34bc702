use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossbeam_channel::unbounded;

use crate::card::{Card, CardCallbacks, CardInput};
use crate::config;
use crate::data::{self, ChannelDetailService, ChannelPlaybackService, DetailViewService, PlaybackService};
use crate::links::{BrowserOpener, LinkOpener};
use crate::media;
use crate::resolver::FallbackSource;
use crate::ui;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_file: Option<PathBuf>,
    pub feed_file: Option<PathBuf>,
}

pub fn run(options: RunOptions) -> Result<()> {
    let cfg = config::load(config::LoadOptions {
        config_file: options.config_file.clone(),
        env_prefix: None,
    })
    .context("load config")?;

    let source = FallbackSource::new(&cfg.fallback).context("configure fallback images")?;

    let items = match options.feed_file.as_deref() {
        Some(path) => data::load_feed_file(path).context("load feed")?,
        None => data::sample_feed(),
    };

    let (request_tx, request_rx) = unbounded();
    let detail: Arc<dyn DetailViewService + Send + Sync> =
        Arc::new(ChannelDetailService::new(request_tx.clone()));
    let playback: Arc<dyn PlaybackService + Send + Sync> =
        Arc::new(ChannelPlaybackService::new(request_tx));
    let links: Arc<dyn LinkOpener> = Arc::new(BrowserOpener);

    let cards = items
        .into_iter()
        .map(|item| {
            let input = CardInput {
                item,
                is_playing: false,
                callbacks: CardCallbacks {
                    detail: Some(detail.clone()),
                    playback: Some(playback.clone()),
                },
            };
            Card::mount(input, source.clone(), links.clone())
        })
        .collect::<Vec<_>>();

    let (loader, status) = match media::Loader::new(&cfg.media) {
        Ok(loader) => (Some(loader), ui::default_status()),
        Err(err) => (
            None,
            format!("Images disabled: {err:#}"),
        ),
    };

    let mut model = ui::Model::new(ui::Options {
        status_message: status,
        cards,
        requests: request_rx,
        loader,
        palette: ui::Palette::named(&cfg.ui.theme),
        tick_rate: cfg.ui.tick_rate,
    });
    model.run()?;

    Ok(())
}
