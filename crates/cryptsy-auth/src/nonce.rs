//! Request nonce

/// Strictly increasing per-session nonce
///
/// Every signed request carries the next value. The server rejects a nonce
/// that is not larger than the last one it accepted for the key, so the
/// counter only moves forward and `next` takes `&mut self`: one session owns
/// one counter and signs one request at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NonceCounter {
    last: u64,
}

impl NonceCounter {
    /// Counter whose first nonce is 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose first nonce is `last + 1`
    ///
    /// For keys shared with a previous session that already used nonces up
    /// to `last`.
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Advance and return the nonce for the next request
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// Last nonce handed out (0 if none yet)
    pub fn last(&self) -> u64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_nonce_is_one() {
        let mut nonce = NonceCounter::new();
        assert_eq!(nonce.last(), 0);
        assert_eq!(nonce.next(), 1);
        assert_eq!(nonce.last(), 1);
    }

    #[test]
    fn test_nonces_strictly_increase() {
        let mut nonce = NonceCounter::starting_after(1_000);
        let values: Vec<u64> = (0..100).map(|_| nonce.next()).collect();
        assert_eq!(values[0], 1_001);
        assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
    }
}
