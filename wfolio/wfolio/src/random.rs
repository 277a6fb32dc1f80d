/// Source of uniform samples in `[0, 1)`.
pub trait UnitSampler {
    fn next_unit(&mut self) -> f32;
}

/// Non-cryptographic xorshift64* generator. Deterministic for a given seed.
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        let state = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state }
    }

    /// Seeds from the platform clock.
    pub fn from_clock() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "wasm32")] {
                let seed = js_sys::Date::now().to_bits();
            } else {
                let seed = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0);
            }
        }
        Self::new(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }
}

impl UnitSampler for XorShift64 {
    fn next_unit(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// `Math.random()` from the host page.
#[cfg(target_arch = "wasm32")]
pub struct BrowserRandom;

#[cfg(target_arch = "wasm32")]
impl UnitSampler for BrowserRandom {
    fn next_unit(&mut self) -> f32 {
        // f64 -> f32 can round up to 1.0; keep the half-open range.
        (js_sys::Math::random() as f32).min(1.0 - f32::EPSILON)
    }
}
