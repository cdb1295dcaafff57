use serde::Deserialize;

pub const DEFAULT_TOP_COUNT: u32 = 10;

/// Size of a popularity ranking. Negative requests clamp to zero.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize)]
pub struct TopCount(pub u32);

impl TopCount {
    pub fn clamped(requested: i64) -> Self {
        TopCount(requested.clamp(0, u32::MAX as i64) as u32)
    }

    pub fn resolve(requested: Option<i64>, default: u32) -> Self {
        requested.map_or(TopCount(default), TopCount::clamped)
    }
}

impl Default for TopCount {
    fn default() -> Self {
        TopCount(DEFAULT_TOP_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_requests_clamp_to_zero() {
        assert_eq!(TopCount::clamped(-5), TopCount(0));
        assert_eq!(TopCount::clamped(3), TopCount(3));
    }

    #[test]
    fn missing_request_uses_default() {
        assert_eq!(TopCount::resolve(None, 10), TopCount(10));
        assert_eq!(TopCount::resolve(Some(0), 10), TopCount(0));
    }
}
