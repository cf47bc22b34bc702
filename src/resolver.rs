//! Picks the image reference a card should attempt.
//!
//! A supplied image wins until it has failed once; after that, or when no
//! image was supplied, the card falls back to a substitute from an external
//! image service. The substitute is chosen by hashing the card identifier,
//! so the same card always lands on the same picture.

use thiserror::Error;
use url::Url;

use crate::config::FallbackConfig;

const FALLBACK_POOL: u32 = 1000;

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("fallback: invalid base url {url:?}: {source}")]
    InvalidBase {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("fallback: base url {0:?} cannot carry a path")]
    CannotBeABase(String),
    #[error("fallback: image dimensions must be non-zero")]
    ZeroDimension,
}

/// Java-style string hash over UTF-16 code units with 32-bit wraparound.
pub fn string_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Index in `1..=1000` derived from the identifier.
pub fn fallback_index(identifier: &str) -> u32 {
    string_hash(identifier).unsigned_abs() % FALLBACK_POOL + 1
}

/// The external image service used for substitutes, addressed as
/// `{base}/{width}/{height}?random={index}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSource {
    base: String,
    width: u32,
    height: u32,
}

impl FallbackSource {
    pub fn new(cfg: &FallbackConfig) -> Result<Self, FallbackError> {
        let parsed = Url::parse(cfg.base_url.trim()).map_err(|source| FallbackError::InvalidBase {
            url: cfg.base_url.clone(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(FallbackError::CannotBeABase(cfg.base_url.clone()));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FallbackError::ZeroDimension);
        }
        let base = parsed.as_str().trim_end_matches('/').to_string();
        Ok(Self {
            base,
            width: cfg.width,
            height: cfg.height,
        })
    }

    pub fn url_for(&self, index: u32) -> String {
        format!(
            "{}/{}/{}?random={}",
            self.base, self.width, self.height, index
        )
    }
}

impl Default for FallbackSource {
    fn default() -> Self {
        let cfg = FallbackConfig::default();
        Self {
            base: cfg.base_url,
            width: cfg.width,
            height: cfg.height,
        }
    }
}

/// Which branch of the resolver produced a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBranch {
    Supplied,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub reference: String,
    pub branch: ImageBranch,
}

/// Pure resolution: the supplied image unless it failed, otherwise the
/// identifier's substitute. Blank supplied images count as absent.
pub fn resolve(
    source: &FallbackSource,
    identifier: &str,
    supplied: Option<&str>,
    image_failed: bool,
) -> Resolved {
    match supplied.map(str::trim).filter(|image| !image.is_empty()) {
        Some(image) if !image_failed => Resolved {
            reference: image.to_string(),
            branch: ImageBranch::Supplied,
        },
        _ => Resolved {
            reference: source.url_for(fallback_index(identifier)),
            branch: ImageBranch::Fallback,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolveKey {
    identifier: String,
    supplied: Option<String>,
    image_failed: bool,
}

/// Memoized resolver owned by one card.
///
/// The memo is keyed on exactly `(identifier, supplied image, failed flag)`;
/// re-renders caused by anything else return the cached reference untouched.
#[derive(Debug, Default)]
pub struct ImageResolver {
    source: FallbackSource,
    memo: Option<(ResolveKey, Resolved)>,
    computations: usize,
}

impl ImageResolver {
    pub fn new(source: FallbackSource) -> Self {
        Self {
            source,
            memo: None,
            computations: 0,
        }
    }

    pub fn resolve(
        &mut self,
        identifier: &str,
        supplied: Option<&str>,
        image_failed: bool,
    ) -> &Resolved {
        let hit = matches!(
            &self.memo,
            Some((key, _))
                if key.identifier == identifier
                    && key.supplied.as_deref() == supplied
                    && key.image_failed == image_failed
        );
        if !hit {
            self.memo = None;
        }
        let (_, resolved) = self.memo.get_or_insert_with(|| {
            self.computations += 1;
            let key = ResolveKey {
                identifier: identifier.to_string(),
                supplied: supplied.map(str::to_string),
                image_failed,
            };
            (key, resolve(&self.source, identifier, supplied, image_failed))
        });
        resolved
    }

    /// How many times the memo had to recompute.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
