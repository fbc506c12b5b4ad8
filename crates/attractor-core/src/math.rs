use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]`.
pub fn remap(in_min: f32, in_max: f32, out_min: f32, out_max: f32, value: f32) -> f32 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// SplitMix64 finalizer.
#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Mix a run seed, tick number and particle index into one stream seed.
pub fn stream_seed(seed: u64, tick: u64, index: u64) -> u64 {
    splitmix64(splitmix64(splitmix64(seed) ^ tick) ^ index)
}

/// RNG for one particle during one tick.
///
/// Each particle draws from its own stream, so results do not depend on
/// the order particles are visited in.
pub fn particle_rng(seed: u64, tick: u64, index: usize) -> SmallRng {
    SmallRng::seed_from_u64(stream_seed(seed, tick, index as u64))
}
