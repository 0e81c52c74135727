//! Tabbed sub-form loading.
//!
//! Each tab radio carries the URL of a form fragment. Selecting a tab fetches
//! the fragment and swaps it into the form container. Overlapping loads are
//! resolved in favour of the most recent selection: an older response that
//! arrives late is dropped instead of overwriting the newer tab.

use log::{debug, error};

use crate::api::FragmentSource;
use crate::error::Result;
use crate::sequence::RequestSequence;

/// The element whose content is replaced by a loaded fragment.
pub trait FragmentTarget {
    fn replace_content(&self, html: &str);

    /// Rebinds widgets inside freshly inserted markup.
    fn reinitialize(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started before this one finished.
    Superseded,
}

pub struct TabLoader<S, T> {
    source: S,
    target: T,
    sequence: RequestSequence,
}

impl<S: FragmentSource, T: FragmentTarget> TabLoader<S, T> {
    pub fn new(source: S, target: T) -> Self {
        Self {
            source,
            target,
            sequence: RequestSequence::new(),
        }
    }

    /// Loads `url` into the container.
    ///
    /// On error the container keeps its current content.
    pub async fn load(&self, url: &str) -> Result<LoadOutcome> {
        let ticket = self.sequence.issue();
        debug!("loading tab {}", url);

        let html = match self.source.fetch_fragment(url).await {
            Ok(html) => html,
            Err(e) => {
                error!("Error loading form {}: {}", url, e);
                return Err(e);
            }
        };

        if !self.sequence.is_current(ticket) {
            debug!("discarding stale tab response for {}", url);
            return Ok(LoadOutcome::Superseded);
        }

        self.target.replace_content(&html);
        self.target.reinitialize();
        Ok(LoadOutcome::Applied)
    }
}
