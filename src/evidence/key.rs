use std::fmt;

/// Identity of one sequenced fragment (read pair) within a batch.
///
/// Built from the query name shared by both reads. Ordering and hashing
/// follow the raw bytes, so keys from non-UTF-8 names still compare.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EvidenceKey(Box<[u8]>);

impl EvidenceKey {
    pub fn new(name: &[u8]) -> Self {
        Self(name.into())
    }
}

impl From<&str> for EvidenceKey {
    fn from(name: &str) -> Self {
        Self::new(name.as_bytes())
    }
}

impl From<&[u8]> for EvidenceKey {
    fn from(name: &[u8]) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for EvidenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_equality_follows_bytes() {
        assert_eq!(EvidenceKey::from("frag1"), EvidenceKey::new(b"frag1"));
        assert_ne!(EvidenceKey::from("frag1"), EvidenceKey::from("frag2"));
        assert!(EvidenceKey::from("a") < EvidenceKey::from("b"));
    }

    #[test]
    fn test_key_display_is_lossy() {
        assert_eq!(EvidenceKey::from("HWI:1:2").to_string(), "HWI:1:2");
        let bad = EvidenceKey::new(&[0x66, 0xff]);
        assert_eq!(bad.to_string(), "f\u{fffd}");
    }
}
