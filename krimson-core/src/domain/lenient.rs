//! Restriction of free-form strings to closed value sets

/// A closed set of string values with a documented fallback.
///
/// Input is lower-cased and matched against [`LenientEnum::ALL`]; anything
/// else (including absent input) becomes [`LenientEnum::FALLBACK`].
pub trait LenientEnum: Copy + Sized + 'static {
    /// Every member of the set
    const ALL: &'static [Self];

    /// Value used when the input is missing or not a member
    const FALLBACK: Self;

    /// Canonical lower-case wire name
    fn as_str(&self) -> &'static str;

    /// Parse an exact (already lower-cased) wire name
    fn from_canonical(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == value)
    }

    /// Lower-case the input and keep it if allowed, otherwise fall back
    fn restrict(value: Option<&str>) -> Self {
        value
            .and_then(|raw| Self::from_canonical(&raw.to_lowercase()))
            .unwrap_or(Self::FALLBACK)
    }
}
