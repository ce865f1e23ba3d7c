/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a creation-time-derived string ID for list entries.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER so the
/// decimal string survives a round-trip through any JSON consumer):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at this scale)
pub fn entry_id() -> String {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    ((ts << 12) | rand_bits).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_is_numeric() {
        let id = entry_id();
        assert!(id.parse::<i64>().is_ok());
    }

    #[test]
    fn test_entry_id_ordering() {
        // IDs generated later must never sort (numerically) before
        // IDs generated a full millisecond earlier.
        let a: i64 = entry_id().parse().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b: i64 = entry_id().parse().unwrap();
        assert!(b > a);
    }
}
