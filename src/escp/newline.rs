//! CR/LF handling.
//!
//! [`NewlinePolicy::Direct`] applies every CR and LF as it arrives.
//! [`NewlinePolicy::Coalesce`] buffers runs of CR LF pairs: drivers that feed
//! paper to the next sheet with a long run of blank lines get a page break
//! instead of a page full of nothing.

use crate::config::NewlineMode;
use crate::layout::Layout;

#[derive(Debug, Clone)]
pub enum NewlinePolicy {
    Direct,
    Coalesce(Coalescer),
}

impl NewlinePolicy {
    pub fn new(mode: NewlineMode, threshold: usize) -> Self {
        match mode {
            NewlineMode::Direct => NewlinePolicy::Direct,
            NewlineMode::Coalesce => NewlinePolicy::Coalesce(Coalescer::new(threshold)),
        }
    }

    pub fn on_cr(&mut self, layout: &mut dyn Layout) {
        match self {
            NewlinePolicy::Direct => layout.carriage_return(),
            NewlinePolicy::Coalesce(c) => c.on_cr(layout),
        }
    }

    pub fn on_lf(&mut self, layout: &mut dyn Layout) {
        match self {
            NewlinePolicy::Direct => layout.line_feed(),
            NewlinePolicy::Coalesce(c) => c.on_lf(layout),
        }
    }

    /// Settle buffered newlines before any other byte takes effect.
    pub fn before_other(&mut self, layout: &mut dyn Layout) {
        if let NewlinePolicy::Coalesce(c) = self {
            c.before_other(layout);
        }
    }
}

/// Buffers consecutive CR LF pairs.
///
/// Buffered pairs are only released right before a non-newline byte is
/// processed, or when the run reaches the threshold.
#[derive(Debug, Clone)]
pub struct Coalescer {
    pending_cr: bool,
    consecutive: usize,
    threshold: usize,
    first_page: bool,
    /// The current run already produced its page break
    absorbing: bool,
}

impl Coalescer {
    pub const DEFAULT_THRESHOLD: usize = 11;

    pub fn new(threshold: usize) -> Self {
        Self {
            pending_cr: false,
            consecutive: 0,
            threshold: threshold.max(1),
            first_page: true,
            absorbing: false,
        }
    }

    pub fn pending_cr(&self) -> bool {
        self.pending_cr
    }

    /// Pairs buffered in the current run.
    pub fn consecutive(&self) -> usize {
        self.consecutive
    }

    pub fn on_cr(&mut self, layout: &mut dyn Layout) {
        if self.pending_cr {
            self.flush(layout);
            layout.carriage_return();
        } else {
            self.pending_cr = true;
        }
    }

    pub fn on_lf(&mut self, layout: &mut dyn Layout) {
        if self.pending_cr {
            self.pending_cr = false;
            if self.absorbing {
                return;
            }
            self.consecutive += 1;
            if self.consecutive >= self.threshold {
                self.flush(layout);
                self.absorbing = true;
            }
        } else {
            self.flush(layout);
            self.absorbing = false;
            layout.line_feed();
        }
    }

    pub fn before_other(&mut self, layout: &mut dyn Layout) {
        self.flush(layout);
        self.absorbing = false;
        if self.pending_cr {
            self.pending_cr = false;
            layout.carriage_return();
        }
    }

    /// Release buffered pairs: a page break for a run at the threshold,
    /// otherwise the pairs themselves.
    pub fn flush(&mut self, layout: &mut dyn Layout) {
        if self.first_page && layout.page_count() > 1 {
            self.first_page = false;
        }

        let count = std::mem::take(&mut self.consecutive);
        if count >= self.threshold {
            if self.first_page {
                log::debug!("leading paper feed of {} lines kept on first page", count);
                self.first_page = false;
                for _ in 0..self.threshold {
                    layout.new_line();
                }
            } else {
                log::debug!("{} blank lines coalesced into a page break", count);
                layout.new_page();
            }
        } else {
            for _ in 0..count {
                layout.new_line();
            }
        }
    }
}
