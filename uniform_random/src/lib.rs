// Reproducible uniform random streams.
//
// Provides `Stream`, a seedable generator that reproduces the Park-Miller
// "minimal standard" generator with a Bays-Durham shuffle bit for bit, plus
// the float and bounded-integer mappings built on it. Anything that must agree
// on "random" outcomes without exchanging random data (client and server
// simulations, replays, ports of the same game logic) seeds its own stream and
// draws the same sequence.
//
// Architecture:
// - `stream.rs`: `Stream`, the generator constants, and the draw methods
// - `vectors.rs`: JSON conformance vectors for checking any implementation
//   against recorded output
//
// There is no global stream. Callers construct a `Stream`, own it, and pass
// `&mut Stream` to whatever draws from it. A single stream is not meant to be
// shared between threads; give each thread its own or lock it externally.

pub mod stream;
pub mod vectors;

// Re-export key types at crate root for convenience.
pub use stream::Stream;
pub use vectors::{Call, Draw, ReferenceVector, VectorError, VectorSet, default_vectors};
