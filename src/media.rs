//! Image surface for the terminal host: downloads and decodes the reference a
//! card is attempting and reports back a load or error signal.

use std::fs;
use std::io::Read;
use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::config::MediaConfig;
use crate::debug::debug_log;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media: invalid url {0}")]
    InvalidUrl(String),
    #[error("media: unsupported scheme {0}")]
    UnsupportedScheme(String),
    #[error("media: download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("media: request failed with status {0}")]
    Status(u16),
    #[error("media: image is larger than {0} bytes")]
    TooLarge(u64),
    #[error("media: read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("media: decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub item_id: String,
    pub reference: String,
}

/// Outcome of one load attempt, tagged with the reference it was for.
#[derive(Debug)]
pub struct ImageSignal {
    pub item_id: String,
    pub reference: String,
    pub result: Result<ImageInfo, MediaError>,
}

struct Job {
    request: Request,
}

pub struct Loader {
    jobs: Sender<Job>,
    stop: Sender<()>,
    signals: Receiver<ImageSignal>,
    handles: Vec<thread::JoinHandle<()>>,
}

impl Loader {
    pub fn new(cfg: &MediaConfig) -> Result<Self> {
        let workers = if cfg.workers == 0 { 2 } else { cfg.workers };
        let client = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(format!("news-card/{}", crate::VERSION))
            .build()
            .context("media: build http client")?;

        let (job_tx, job_rx) = unbounded::<Job>();
        let (stop_tx, stop_rx) = unbounded::<()>();
        let (signal_tx, signal_rx) = unbounded();

        let mut handles = Vec::new();
        for _ in 0..workers {
            let worker = Worker {
                client: client.clone(),
                max_bytes: cfg.max_bytes,
                signals: signal_tx.clone(),
            };
            let rx_jobs = job_rx.clone();
            let rx_stop = stop_rx.clone();
            handles.push(thread::spawn(move || worker.run(rx_jobs, rx_stop)));
        }

        Ok(Self {
            jobs: job_tx,
            stop: stop_tx,
            signals: signal_rx,
            handles,
        })
    }

    pub fn enqueue(&self, request: Request) {
        let _ = self.jobs.send(Job { request });
    }

    /// Signals that arrived since the last call.
    pub fn drain(&self) -> Vec<ImageSignal> {
        self.signals.try_iter().collect()
    }

    fn shutdown(&mut self) {
        for _ in &self.handles {
            let _ = self.stop.send(());
        }
        while let Some(handle) = self.handles.pop() {
            let _ = handle.join();
        }
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker {
    client: Client,
    max_bytes: u64,
    signals: Sender<ImageSignal>,
}

impl Worker {
    fn run(&self, jobs: Receiver<Job>, stop: Receiver<()>) {
        loop {
            crossbeam_channel::select! {
                recv(stop) -> _ => break,
                recv(jobs) -> msg => {
                    match msg {
                        Ok(job) => self.process(job),
                        Err(_) => break,
                    }
                }
            }
        }
    }

    fn process(&self, job: Job) {
        let Request { item_id, reference } = job.request;
        let result = self.fetch(&reference).and_then(|bytes| decode(&bytes));
        if let Err(err) = &result {
            debug_log(format!("media {reference}: {err}"));
        }
        let _ = self.signals.send(ImageSignal {
            item_id,
            reference,
            result,
        });
    }

    fn fetch(&self, reference: &str) -> Result<Vec<u8>, MediaError> {
        let url = Url::parse(reference).map_err(|_| MediaError::InvalidUrl(reference.into()))?;
        match url.scheme() {
            "http" | "https" => {
                let response = self.client.get(url).send()?;
                if !response.status().is_success() {
                    return Err(MediaError::Status(response.status().as_u16()));
                }
                if response
                    .content_length()
                    .is_some_and(|len| len > self.max_bytes)
                {
                    return Err(MediaError::TooLarge(self.max_bytes));
                }
                read_limited(response, self.max_bytes)
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| MediaError::InvalidUrl(reference.into()))?;
                read_limited(fs::File::open(path)?, self.max_bytes)
            }
            other => Err(MediaError::UnsupportedScheme(other.into())),
        }
    }
}

fn read_limited(reader: impl Read, max_bytes: u64) -> Result<Vec<u8>, MediaError> {
    let mut bytes = Vec::new();
    reader.take(max_bytes + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        return Err(MediaError::TooLarge(max_bytes));
    }
    Ok(bytes)
}

/// Decodes the bytes fully; a decodable image is what counts as "loaded".
pub fn decode(bytes: &[u8]) -> Result<ImageInfo, MediaError> {
    let image = image::load_from_memory(bytes)?;
    Ok(ImageInfo {
        width: image.width(),
        height: image.height(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use image::{ImageFormat, RgbImage};
    use tempfile::tempdir;

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn decode_reports_dimensions() {
        let info = decode(&png_bytes(3, 2)).unwrap();
        assert_eq!(info, ImageInfo { width: 3, height: 2 });
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode(b"not an image"), Err(MediaError::Decode(_))));
    }

    #[test]
    fn read_limited_enforces_cap() {
        assert_eq!(read_limited(&b"abcd"[..], 4).unwrap(), b"abcd");
        assert!(matches!(
            read_limited(&b"abcde"[..], 4),
            Err(MediaError::TooLarge(4))
        ));
    }

    fn wait_for_signal(loader: &Loader) -> ImageSignal {
        for _ in 0..200 {
            if let Some(signal) = loader.drain().into_iter().next() {
                return signal;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("no signal from loader");
    }

    #[test]
    fn loader_decodes_local_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pic.png");
        fs::write(&path, png_bytes(4, 4)).unwrap();
        let reference = Url::from_file_path(&path).unwrap().to_string();

        let loader = Loader::new(&MediaConfig::default()).unwrap();
        loader.enqueue(Request {
            item_id: "n1".into(),
            reference: reference.clone(),
        });
        let signal = wait_for_signal(&loader);
        assert_eq!(signal.item_id, "n1");
        assert_eq!(signal.reference, reference);
        assert_eq!(signal.result.unwrap(), ImageInfo { width: 4, height: 4 });
    }

    #[test]
    fn loader_reports_unsupported_scheme() {
        let loader = Loader::new(&MediaConfig::default()).unwrap();
        loader.enqueue(Request {
            item_id: "n1".into(),
            reference: "ftp://example.test/a.png".into(),
        });
        let signal = wait_for_signal(&loader);
        assert!(matches!(
            signal.result,
            Err(MediaError::UnsupportedScheme(ref scheme)) if scheme == "ftp"
        ));
    }
}
