// The uniform random stream: minimal standard generator plus shuffle table.
//
// `Stream` reproduces the Park-Miller "minimal standard" multiplicative
// congruential generator (multiplier 16807, modulus 2^31 - 1). The modular
// multiply uses Schrage's decomposition so nothing leaves the `i32` range, and
// a 32-entry Bays-Durham shuffle table breaks up the short-range serial
// correlation of the raw recurrence. The float and bounded-integer mappings
// sit on top of the raw draw.
//
// Warm-up is lazy: `set_seed` only records the seed and marks the stream cold,
// and the next draw rebuilds the shuffle table. A stream that was never seeded
// behaves exactly like one seeded with 0.
//
// **Critical constraint: bit-exact output.** Other implementations of this
// generator (servers, replay tools, ports in other languages) must agree on
// every value for the same seed and call sequence. Generator arithmetic is
// 32-bit signed and must never overflow. The float mappings are single
// precision with a separate multiply and add (no `mul_add`). Reordering any
// operation here breaks compatibility.

use log::trace;

/// Number of slots in the shuffle table.
pub const NTAB: usize = 32;
/// Multiplier of the base recurrence.
pub const IA: i32 = 16_807;
/// Modulus of the base recurrence, `2^31 - 1`.
pub const IM: i32 = 2_147_483_647;
/// Schrage quotient, `IM / IA`.
pub const IQ: i32 = IM / IA;
/// Schrage remainder, `IM % IA`.
pub const IR: i32 = IM % IA;
/// Divides a raw output down to a shuffle table index in `0..NTAB`.
pub const NDIV: i32 = 1 + (IM - 1) / NTAB as i32;
/// Largest span (`high - low`) that `Stream::random_int` will sample.
pub const MAX_RANDOM_RANGE: i32 = 0x7FFF_FFFF;
/// Scale from a raw output onto the unit interval, rounded to single precision.
pub const AM: f32 = (1.0 / IM as f64) as f32;
/// Gap kept between the largest unit draw and 1.0.
pub const EPS: f64 = 1.2e-7;
/// Largest unit value handed to the float mappings.
pub const RNMX: f32 = (1.0 - EPS) as f32;

/// Extra recurrence steps discarded before the shuffle table is filled.
const WARMUP_DISCARD: usize = 8;

/// A seedable, reproducible uniform random stream.
///
/// Each `Stream` is an independent generator. There is no shared or global
/// state: callers own their streams and pass `&mut Stream` to whatever needs
/// random draws. A stream is plain data, so `Copy` snapshots the exact
/// position in the sequence.
///
/// ```
/// use uniform_random::Stream;
///
/// let mut rng = Stream::with_seed(555);
/// assert_eq!(rng.random_int(0, 10), 6);
/// assert_eq!(rng.random_int(0, 10), 9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stream {
    /// Evolving state of the base recurrence. Non-positive only between
    /// `set_seed` and the next warm-up.
    seed_state: i32,
    /// Most recent output; 0 means the shuffle table must be rebuilt.
    last_output: i32,
    shuffle_table: [i32; NTAB],
}

impl Default for Stream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream {
    /// Create an unseeded stream. Its sequence is the one produced by seed 0.
    pub const fn new() -> Self {
        Self {
            seed_state: 0,
            last_output: 0,
            shuffle_table: [0; NTAB],
        }
    }

    /// Create a stream and seed it in one step.
    pub fn with_seed(seed: i32) -> Self {
        let mut stream = Self::new();
        stream.set_seed(seed);
        stream
    }

    /// Reseed the stream.
    ///
    /// Always discards the current shuffle table, so the draws after this call
    /// depend only on `seed` and never on how the stream was used before.
    /// A seed and its negation produce the same sequence.
    pub fn set_seed(&mut self, seed: i32) {
        trace!("uniform_random: set_seed({seed})");
        self.seed_state = if seed < 0 { seed } else { -seed };
        self.last_output = 0;
    }

    /// True once the shuffle table has been built for the current seed.
    pub fn is_warm(&self) -> bool {
        self.last_output != 0 && self.seed_state > 0
    }

    /// Draw the next raw value, in `[1, IM - 1]`.
    ///
    /// Every other draw method is built on this one. The seeds `IM` and `-IM`
    /// are the single exception to the range: they collapse the recurrence to
    /// zero, so their first draw returns 0 and the following draw restarts the
    /// stream as if seeded with 1.
    pub fn generate_random_number(&mut self) -> i32 {
        if self.seed_state <= 0 || self.last_output == 0 {
            self.warm_up();
        }

        self.seed_state = schrage_step(self.seed_state);

        let j = (self.last_output / NDIV) as usize;
        self.last_output = self.shuffle_table[j];
        self.shuffle_table[j] = self.seed_state;

        self.last_output
    }

    /// Draw a float in `[low, high)`.
    ///
    /// Bounds are not validated: with `high < low` the result lies in
    /// `(high, low]`, following the affine map.
    pub fn random_float(&mut self, low: f32, high: f32) -> f32 {
        let fl = self.next_unit();
        (fl * (high - low)) + low
    }

    /// Draw a float in `[min, max)`, shaped by `exponent`.
    ///
    /// The unit draw is raised to `exponent` before mapping, which skews
    /// results toward `min` for exponents above 1 and toward `max` for
    /// exponents between 0 and 1. An exponent of exactly 1.0 is identical to
    /// `random_float`.
    pub fn random_float_exp(&mut self, min: f32, max: f32, exponent: f32) -> f32 {
        let mut fl = self.next_unit();
        if exponent != 1.0 {
            fl = f64::from(fl).powf(f64::from(exponent)) as f32;
        }
        (fl * (max - min)) + min
    }

    /// Draw an integer in `[low, high]` (inclusive on both ends).
    ///
    /// Uses rejection sampling, so every value in the range is equally
    /// likely. Each call consumes one raw draw on average, and at most two on
    /// average even for the widest ranges.
    ///
    /// Ranges that cannot be sampled return `low` without drawing anything:
    /// a single value or an inverted range (`high <= low`), and spans wider
    /// than `MAX_RANDOM_RANGE`. Callers that can pass such ranges get a
    /// deterministic `low` back rather than an error.
    pub fn random_int(&mut self, low: i32, high: i32) -> i32 {
        // The span of two i32 bounds can exceed i32, so size it in i64.
        let x = i64::from(high) - i64::from(low) + 1;
        let max_range = i64::from(MAX_RANDOM_RANGE);

        if x <= 1 || x - 1 > max_range {
            return low;
        }

        // Largest raw value at which [0, max_acceptable] still holds a whole
        // number of copies of [0, x - 1].
        let max_acceptable = max_range - ((max_range + 1) % x);

        let n = loop {
            let n = i64::from(self.generate_random_number());
            if n <= max_acceptable {
                break n;
            }
        };

        // low + (n % x) is within [low, high].
        (i64::from(low) + n % x) as i32
    }

    /// Rebuild the shuffle table from the current seed state.
    fn warm_up(&mut self) {
        // Any non-negative state starts from 1; the recurrence is stuck at 0.
        self.seed_state = match self.seed_state.checked_neg() {
            Some(state) if state >= 1 => state,
            Some(_) => 1,
            // -i32::MIN is 2^31, which is congruent to 1 modulo IM.
            None => 1,
        };

        for j in (0..NTAB + WARMUP_DISCARD).rev() {
            self.seed_state = schrage_step(self.seed_state);
            if j < NTAB {
                self.shuffle_table[j] = self.seed_state;
            }
        }
        self.last_output = self.shuffle_table[0];

        trace!(
            "uniform_random: shuffle table rebuilt, first output {}",
            self.last_output
        );
    }

    /// Raw draw scaled into `[0, 1)`.
    fn next_unit(&mut self) -> f32 {
        unit_from_raw(self.generate_random_number())
    }
}

/// `(IA * state) mod IM` by Schrage's method.
///
/// With `state` in `[0, IM]`, `IA * (state mod IQ)` stays below `IM` and
/// `IR * (state / IQ)` stays below `IA * IR`, so neither term overflows.
#[inline]
fn schrage_step(state: i32) -> i32 {
    let k = state / IQ;
    let next = IA * (state - k * IQ) - IR * k;
    if next < 0 { next + IM } else { next }
}

/// Scale a raw draw into `[0, 1)`.
///
/// `IM - 1` rounds to exactly 1.0 in single precision, hence the clamp.
#[inline]
fn unit_from_raw(raw: i32) -> f32 {
    let fl = AM * raw as f32;
    if fl > RNMX { RNMX } else { fl }
}
