///
/// ValueRank
///
/// Stable rank used for cross-kind ordering.
///
/// IMPORTANT:
/// Rank order is part of deterministic sort behavior; `Int` and `Float`
/// share the numeric rank.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub(crate) enum ValueRank {
    Null = 0,
    Bool = 1,
    Number = 2,
    Text = 3,
    List = 4,
    Map = 5,
}
