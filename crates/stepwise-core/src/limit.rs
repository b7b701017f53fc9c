use std::fmt;
use std::num::NonZeroUsize;

/// Upper bound on how many jobs a single run may execute.
///
/// `Limit::All` is the default and drains the whole queue. A count of zero
/// converts to `All`, so `Limit::from(0usize)` behaves like omitting the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Limit {
    #[default]
    All,
    Count(NonZeroUsize),
}

impl Limit {
    /// Number of entries to take from a source of `len` migrations.
    pub fn take(self, len: usize) -> usize {
        match self {
            Limit::All => len,
            Limit::Count(n) => n.get().min(len),
        }
    }

    pub fn is_all(self) -> bool {
        matches!(self, Limit::All)
    }
}

impl From<usize> for Limit {
    fn from(count: usize) -> Self {
        NonZeroUsize::new(count).map_or(Limit::All, Limit::Count)
    }
}

impl From<Option<usize>> for Limit {
    fn from(count: Option<usize>) -> Self {
        count.map_or(Limit::All, Limit::from)
    }
}

impl From<NonZeroUsize> for Limit {
    fn from(count: NonZeroUsize) -> Self {
        Limit::Count(count)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::All => f.write_str("all"),
            Limit::Count(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Limit::All, 5, 5)]
    #[case(Limit::from(2usize), 5, 2)]
    #[case(Limit::from(9usize), 5, 5)]
    #[case(Limit::from(3usize), 0, 0)]
    fn take_is_bounded_by_source(
        #[case] limit: Limit,
        #[case] len: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(limit.take(len), expected);
    }

    #[test]
    fn zero_and_none_mean_all() {
        assert_eq!(Limit::from(0usize), Limit::All);
        assert_eq!(Limit::from(None), Limit::All);
        assert_eq!(Limit::default(), Limit::All);
        assert!(Limit::from(Some(0usize)).is_all());
    }

    #[test]
    fn displays_count() {
        assert_eq!(Limit::from(4usize).to_string(), "4");
        assert_eq!(Limit::All.to_string(), "all");
    }
}
