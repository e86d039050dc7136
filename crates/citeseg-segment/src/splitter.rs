use regex::Regex;

use crate::config::SplitStrategy;
use crate::error::{Result, check_separators, check_sizes};
use crate::sentence::find_sentence_boundaries;
use crate::text::{CharBounds, char_len, char_tail};

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub max_chars: usize,
    pub overlap_chars: usize,
    pub separators: Vec<String>,
    pub strategy: SplitStrategy,
}

/// A piece of text with its character span in the text it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Atomic unit borrowed from the input; units tile the input exactly.
#[derive(Debug, Clone, Copy)]
struct Unit<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl Unit<'_> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

#[derive(Debug, Clone)]
pub struct TextSplitter {
    max_chars: usize,
    overlap_chars: usize,
    strategy: SplitStrategy,
    pattern: Option<Regex>,
}

impl TextSplitter {
    /// # Errors
    ///
    /// Returns an error if `max_chars` is zero, `overlap_chars` is not smaller
    /// than `max_chars`, or a separator is empty.
    pub fn new(config: SplitterConfig) -> Result<Self> {
        check_sizes(config.max_chars, config.overlap_chars)?;
        check_separators(&config.separators)?;

        // Leftmost-first alternation: at any position the earlier separator wins.
        let pattern = if config.separators.is_empty() {
            None
        } else {
            let alternation = config
                .separators
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation)?)
        };

        Ok(Self {
            max_chars: config.max_chars,
            overlap_chars: config.overlap_chars,
            strategy: config.strategy,
            pattern,
        })
    }

    #[must_use]
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    #[must_use]
    pub fn overlap_chars(&self) -> usize {
        self.overlap_chars
    }

    /// Split `text` into size-bounded segments.
    ///
    /// Text within `max_chars` comes back whole. Otherwise the text is cut into
    /// atomic units, greedily merged, and every segment after the first is
    /// extended backwards with the tail of its predecessor. Each segment's text
    /// equals `text[start..end]` in character coordinates.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<Segment> {
        let bounds = CharBounds::new(text);
        let total = bounds.len();
        if total <= self.max_chars {
            return vec![Segment {
                text: text.to_owned(),
                start: 0,
                end: total,
            }];
        }

        let units = match self.strategy {
            SplitStrategy::Separators => self.separator_units(text),
            SplitStrategy::Sentences => sentence_units(&bounds),
        };
        let merged = self.merge(&units);

        if self.overlap_chars > 0 {
            apply_overlap(merged, self.overlap_chars)
        } else {
            merged
        }
    }

    /// Cut after every separator match; the separator stays with the unit it
    /// terminates.
    fn separator_units<'a>(&self, text: &'a str) -> Vec<Unit<'a>> {
        let Some(pattern) = &self.pattern else {
            return vec![Unit {
                text,
                start: 0,
                end: char_len(text),
            }];
        };

        let mut units = Vec::new();
        let mut byte_start = 0;
        let mut char_start = 0;
        for m in pattern.find_iter(text) {
            let piece = &text[byte_start..m.end()];
            let len = char_len(piece);
            units.push(Unit {
                text: piece,
                start: char_start,
                end: char_start + len,
            });
            byte_start = m.end();
            char_start += len;
        }
        if byte_start < text.len() {
            let piece = &text[byte_start..];
            units.push(Unit {
                text: piece,
                start: char_start,
                end: char_start + char_len(piece),
            });
        }
        units
    }

    /// Merge consecutive units while they fit. A chunk that already holds
    /// content reserves room for the overlap it will receive.
    fn merge(&self, units: &[Unit<'_>]) -> Vec<Segment> {
        let mut merged = Vec::new();
        let mut current: Option<Segment> = None;

        for unit in units {
            let current_len = current.as_ref().map_or(0, |s| s.end - s.start);
            let budget = if current.is_some() {
                self.max_chars - self.overlap_chars
            } else {
                self.max_chars
            };

            if current_len + unit.len() <= budget {
                let segment = current.get_or_insert_with(|| Segment {
                    text: String::new(),
                    start: unit.start,
                    end: unit.start,
                });
                segment.text.push_str(unit.text);
                segment.end = unit.end;
                continue;
            }

            if unit.len() > self.max_chars {
                tracing::debug!(
                    unit_chars = unit.len(),
                    max_chars = self.max_chars,
                    "atomic unit exceeds chunk size, emitting oversized chunk"
                );
            }
            if let Some(done) = current.take() {
                merged.push(done);
            }
            current = Some(Segment {
                text: unit.text.to_owned(),
                start: unit.start,
                end: unit.end,
            });
        }

        if let Some(done) = current {
            merged.push(done);
        }
        merged
    }
}

/// One unit per sentence, each running up to the next sentence's start so the
/// units tile the text.
fn sentence_units<'a>(bounds: &CharBounds<'a>) -> Vec<Unit<'a>> {
    let total = bounds.len();
    let spans = find_sentence_boundaries(bounds.slice(0, total));
    if spans.is_empty() {
        return vec![Unit {
            text: bounds.slice(0, total),
            start: 0,
            end: total,
        }];
    }

    spans
        .iter()
        .enumerate()
        .map(|(i, &(span_start, _))| {
            let start = if i == 0 { 0 } else { span_start };
            let end = spans.get(i + 1).map_or(total, |next| next.0);
            Unit {
                text: bounds.slice(start, end),
                start,
                end,
            }
        })
        .collect()
}

/// Prepend the trailing `overlap` characters of each segment's predecessor,
/// pulling its start offset back by the borrowed length.
fn apply_overlap(segments: Vec<Segment>, overlap: usize) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());
    let mut previous: Option<String> = None;

    for segment in segments {
        let extended = match previous.as_deref() {
            None => segment.clone(),
            Some(prev) => {
                let borrowed = char_tail(prev, overlap);
                let text = format!("{borrowed}{}", segment.text);
                let start = segment.end.saturating_sub(char_len(&text));
                Segment {
                    text,
                    start,
                    end: segment.end,
                }
            }
        };
        previous = Some(segment.text);
        result.push(extended);
    }

    result
}
