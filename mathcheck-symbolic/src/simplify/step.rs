/// A single rewrite performed during simplification.
///
/// Steps are reported through a [`StepCollector`](crate::step_collector::StepCollector) as the
/// rules fire, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0 + a = a`
    AddZero,

    /// `2a + 3a = 5a`
    CombineLikeTerms,

    /// `0 * a = 0`
    MultiplyZero,

    /// `1 * a = a`
    MultiplyOne,

    /// `3/12 = 1/4`
    ReduceFraction,

    /// `a^b * a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    BaseOne,

    /// `2^10 = 1024`
    NumericPower,

    /// `(a^b)^c = a^(b*c)`
    PowerOfPower,

    /// `(a + b)^2 = a^2 + 2ab + b^2`
    ExpandPower,

    /// `a * (b + c) = a*b + a*c`
    DistributiveProperty,

    /// `(a * b)^c = a^c * b^c`
    DistributePower,

    /// `sqrt(12) = 2 * sqrt(3)`
    Root,
}
