use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("link: empty url")]
    Empty,
    #[error("link: failed to open {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Opens a URL in a separate browsing context.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), LinkError>;
}

/// Hands the URL to the system browser. The browser runs as its own process,
/// so the opened page gets no handle back into this program.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&self, url: &str) -> Result<(), LinkError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(LinkError::Empty);
        }
        webbrowser::open(url).map_err(|source| LinkError::Launch {
            url: url.to_string(),
            source,
        })
    }
}
