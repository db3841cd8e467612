//! Progress reporting for page embedding.
//!
//! The indexer shows an indicatif bar; library callers and tests pass
//! [`NoopProgress`].

use indicatif::{ProgressBar, ProgressStyle};

/// Receives one call per embedded page.
pub trait Progress: Send + Sync {
    /// Number of pages that will be embedded.
    fn set_total(&self, _pages: u64) {}
    /// `title` has been embedded.
    fn page_done(&self, _title: &str) {}
    fn finish(&self, _summary: &str) {}
}

#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Terminal bar with page counter and the last embedded title.
pub struct IndicatifProgress {
    pb: ProgressBar,
}

impl IndicatifProgress {
    pub fn pages(total: u64) -> Self {
        let pb = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>4}/{len:4} pages {elapsed} {msg}")
        {
            pb.set_style(style);
        }
        Self { pb }
    }
}

impl Progress for IndicatifProgress {
    fn set_total(&self, pages: u64) {
        self.pb.set_length(pages);
    }
    fn page_done(&self, title: &str) {
        self.pb.inc(1);
        self.pb.set_message(title.to_string());
    }
    fn finish(&self, summary: &str) {
        self.pb.finish_with_message(summary.to_string());
    }
}

#[cfg(test)]
mod tests {
    use indicatif::ProgressDrawTarget;

    use super::*;

    #[test]
    fn bar_counts_embedded_pages() {
        let progress = IndicatifProgress::pages(1);
        progress.pb.set_draw_target(ProgressDrawTarget::hidden());

        progress.set_total(3);
        progress.page_done("Page 1");
        progress.page_done("Page 2");
        assert_eq!(progress.pb.length(), Some(3));
        assert_eq!(progress.pb.position(), 2);
        assert_eq!(progress.pb.message(), "Page 2");

        progress.finish("done");
        assert!(progress.pb.is_finished());
    }
}
