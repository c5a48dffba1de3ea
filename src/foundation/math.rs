#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(Self::OFFSET_BASIS ^ seed)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Seeded FNV-1a over a single `u64` key.
pub(crate) fn stable_hash64(seed: u64, key: u64) -> u64 {
    let mut h = Fnv1a64::new(seed);
    h.write_u64(key);
    h.finish()
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Round half-up to the nearest integer (`2.5 -> 3`, `-2.5 -> -2`).
pub(crate) fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
