// src/matcher/word.rs
// =============================================================================
// This module counts whole-word occurrences of a literal word.
//
// How it works:
// - The word is escaped and wrapped in ASCII word boundaries: \bword\b
// - WordScanner scans a body chunk by chunk and never holds the whole body
//
// Streaming detail:
// A match that touches the end of the current window may still be broken
// by the next chunk ("cat" followed by "s"). Such a match is deferred and
// re-checked once more bytes arrive. The window keeps one byte in front of
// the search position so the left boundary can still be evaluated after
// older bytes are dropped.
//
// Rust concepts:
// - regex::bytes: matching on raw bytes, no UTF-8 validation needed
// - Lifetimes: WordScanner<'m> borrows the shared matcher
// =============================================================================

use regex::bytes::Regex;

use crate::error::TallyError;

/// Compiled whole-word matcher for one target word.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    regex: Regex,
    word_len: usize,
}

impl WordMatcher {
    /// Builds a matcher for `word`.
    ///
    /// An empty word would match at every boundary, so it is rejected with
    /// `TallyError::InvalidInput`.
    pub fn new(word: &str) -> Result<Self, TallyError> {
        if word.is_empty() {
            return Err(TallyError::InvalidInput(
                "the word to find must not be empty".to_string(),
            ));
        }

        let pattern = format!(r"(?-u:\b){}(?-u:\b)", regex::escape(word));
        let regex = Regex::new(&pattern)
            .map_err(|e| TallyError::InvalidInput(format!("cannot match {:?}: {}", word, e)))?;

        Ok(Self {
            regex,
            word_len: word.len(),
        })
    }

    /// Starts an incremental count over a stream of chunks.
    pub fn scanner(&self) -> WordScanner<'_> {
        WordScanner {
            matcher: self,
            window: Vec::new(),
            start: 0,
            count: 0,
        }
    }
}

/// Incremental counter fed one chunk at a time.
///
/// Memory use is bounded by the largest chunk plus the word length plus one
/// byte of boundary context.
#[derive(Debug)]
pub struct WordScanner<'m> {
    matcher: &'m WordMatcher,
    window: Vec<u8>,
    // Search position inside `window`. Bytes before it are context only.
    start: usize,
    count: usize,
}

impl WordScanner<'_> {
    /// Consumes the next chunk of the stream.
    pub fn feed(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        self.window.extend_from_slice(chunk);

        let len = self.window.len();
        let mut pos = self.start;
        while let Some(m) = self.matcher.regex.find_at(&self.window, pos) {
            if m.end() == len {
                // The next chunk decides whether the right boundary holds.
                break;
            }
            self.count += 1;
            pos = m.end();
        }

        // No match can begin before `keep` any more.
        let keep = pos.max(len.saturating_sub(self.matcher.word_len));
        let cut = keep.saturating_sub(1);
        self.window.drain(..cut);
        self.start = keep - cut;
    }

    /// Ends the stream and returns the total count.
    pub fn finish(mut self) -> usize {
        let mut pos = self.start;
        while let Some(m) = self.matcher.regex.find_at(&self.window, pos) {
            self.count += 1;
            pos = m.end();
        }
        self.count
    }
}
