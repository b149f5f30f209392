//! Hash and seeded-RNG primitives.
//!
//! Practice sets replay exactly for the same learner, day and progress on any
//! platform: the stream comes from mulberry32 seeded by an FNV-1a hash of the
//! seed string. [`Mulberry32`] implements [`RngCore`], so helpers here are
//! generic over any `rand` generator.

use rand::{Error, RngCore, SeedableRng};

/// 32-bit FNV-1a over the UTF-8 bytes of `input`.
pub fn fnv1a32(input: &str) -> u32 {
    let mut hash: u32 = 0x811C_9DC5;
    for byte in input.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Zero-padded lowercase hex, always 8 characters.
pub fn to_hex(n: u32) -> String {
    format!("{:08x}", n)
}

/// `to_hex(fnv1a32(input))`, the digest used in ids and seed strings.
pub fn digest(input: &str) -> String {
    to_hex(fnv1a32(input))
}

/// The mulberry32 generator: 32 bits of state, one odd increment per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from an arbitrary string via [`fnv1a32`].
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(fnv1a32(seed))
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        unit(self)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut x = self.state;
        x = (x ^ (x >> 15)).wrapping_mul(x | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        x ^ (x >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Next float in `[0, 1)` from any generator: one `u32` scaled by 2^-32.
pub fn unit<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.next_u32()) / 4_294_967_296.0
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    let i = (unit(rng) * len as f64).floor() as usize;
    i.min(len - 1)
}

/// Fisher-Yates shuffle into a new vector; the input is left untouched.
pub fn shuffled<T: Clone, R: RngCore + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = index(rng, i + 1);
        out.swap(i, j);
    }
    out
}

/// Pick one element uniformly, or `None` for an empty slice.
pub fn pick_one<'a, T, R: RngCore + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[index(rng, items.len())])
}
