mod ladder;
pub use ladder::Ladder;

mod compare;
pub use compare::Compare;
