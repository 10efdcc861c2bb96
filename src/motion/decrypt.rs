use std::time::Duration;

use rand::{rngs::SmallRng, Rng, SeedableRng};

pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

/// Order in which real characters replace the scramble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealDirection {
    #[default]
    Start,
    End,
    /// Middle character first, then alternating outwards.
    Center,
}

#[derive(Debug, Clone)]
pub struct DecryptOptions {
    /// Time between frames.
    pub speed: Duration,
    pub chars_per_tick: usize,
    /// When false the whole text resolves in a single frame.
    pub sequential: bool,
    pub direction: RevealDirection,
    pub alphabet: Vec<char>,
    /// Fixed seed for reproducible scrambles; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for DecryptOptions {
    fn default() -> Self {
        Self {
            speed: Duration::from_millis(50),
            chars_per_tick: 1,
            sequential: true,
            direction: RevealDirection::Start,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            seed: None,
        }
    }
}

impl DecryptOptions {
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_direction(mut self, direction: RevealDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_alphabet(mut self, alphabet: &str) -> Self {
        self.alphabet = alphabet.chars().collect();
        self
    }

    pub fn with_chars_per_tick(mut self, n: usize) -> Self {
        self.chars_per_tick = n;
        self
    }

    pub fn simultaneous(mut self) -> Self {
        self.sequential = false;
        self
    }
}

/// Indices of `len` characters in the order they get revealed.
pub fn reveal_order(len: usize, direction: RevealDirection) -> Vec<usize> {
    match direction {
        RevealDirection::Start => (0..len).collect(),
        RevealDirection::End => (0..len).rev().collect(),
        RevealDirection::Center => {
            let middle = len / 2;
            let mut order = Vec::with_capacity(len);
            let mut step = 0usize;
            while order.len() < len {
                let candidate = if step % 2 == 0 {
                    middle.checked_add(step / 2)
                } else {
                    middle.checked_sub(step.div_ceil(2))
                };
                if let Some(i) = candidate.filter(|i| *i < len) {
                    order.push(i);
                }
                step += 1;
            }
            order
        }
    }
}

fn clock_seed() -> u64 {
    let now = chrono::Utc::now();
    (now.timestamp_millis() as u64).rotate_left(20) ^ u64::from(now.timestamp_subsec_nanos())
}

/// One run of the decrypt effect over a source string.
///
/// Iterating yields each frame to render, one per tick. The last frame is
/// always the source text itself.
#[derive(Debug, Clone)]
pub struct DecryptionSession {
    source: Vec<char>,
    order: Vec<usize>,
    revealed: Vec<bool>,
    revealed_len: usize,
    options: DecryptOptions,
    rng: SmallRng,
}

impl DecryptionSession {
    pub fn new(text: &str, mut options: DecryptOptions) -> Self {
        let source: Vec<char> = text.chars().collect();
        if options.alphabet.is_empty() {
            options.alphabet = DEFAULT_ALPHABET.chars().collect();
        }
        options.chars_per_tick = options.chars_per_tick.max(1);
        let seed = options.seed.unwrap_or_else(clock_seed);
        Self {
            order: reveal_order(source.len(), options.direction),
            revealed: vec![false; source.len()],
            revealed_len: 0,
            source,
            options,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn source(&self) -> String {
        self.source.iter().collect()
    }

    pub fn tick_interval(&self) -> Duration {
        self.options.speed
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed_len
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_len == self.source.len()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Frames still to come.
    pub fn remaining_frames(&self) -> usize {
        let left = self.source.len() - self.revealed_len;
        if !self.options.sequential {
            return usize::from(left > 0);
        }
        left.div_ceil(self.options.chars_per_tick)
    }

    /// What to show before the first tick: everything scrambled.
    pub fn initial_frame(&mut self) -> String {
        self.render()
    }

    /// Starts over from nothing revealed, as on re-entering view.
    pub fn restart(&mut self) {
        self.revealed.fill(false);
        self.revealed_len = 0;
    }

    fn render(&mut self) -> String {
        let alphabet = &self.options.alphabet;
        let rng = &mut self.rng;
        self.source
            .iter()
            .zip(&self.revealed)
            .map(|(c, shown)| {
                if *shown || c.is_whitespace() {
                    *c
                } else {
                    alphabet[rng.random_range(0..alphabet.len())]
                }
            })
            .collect()
    }
}

impl Iterator for DecryptionSession {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        let target = if self.options.sequential {
            (self.revealed_len + self.options.chars_per_tick).min(self.source.len())
        } else {
            self.source.len()
        };
        for &i in &self.order[self.revealed_len..target] {
            self.revealed[i] = true;
        }
        self.revealed_len = target;
        if self.is_complete() {
            Some(self.source())
        } else {
            Some(self.render())
        }
    }
}
