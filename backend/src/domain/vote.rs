//! Vote direction applied to question and answer counters.

/// Direction of a single vote request.
///
/// Each request moves a counter by exactly one step; counters are never set
/// directly and may go negative.
///
/// # Examples
/// ```
/// use backend::domain::VoteDirection;
///
/// assert_eq!(VoteDirection::from_up(true).delta(), 1);
/// assert_eq!(VoteDirection::from_up(false).delta(), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Map the wire flag `up` onto a direction.
    #[must_use]
    pub const fn from_up(up: bool) -> Self {
        if up { Self::Up } else { Self::Down }
    }

    /// Signed counter adjustment for this direction.
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Counter value observed immediately after a vote was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    pub votes: i64,
}
