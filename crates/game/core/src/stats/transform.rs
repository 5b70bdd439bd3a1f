//! Ordered value transforms contributed by equipment.
//!
//! Unlike a bonus stack, a transform chain is applied strictly in declaration
//! order, so `[Flat(5), Percent(100)]` and `[Percent(100), Flat(5)]` differ.

/// A single step in a transform chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueTransform {
    /// Add a flat amount.
    Flat(i32),

    /// Scale by a percentage delta (50 = ×1.5, -25 = ×0.75), truncating.
    Percent(i32),

    /// Raise the value to at least this amount.
    AtLeast(i32),

    /// Lower the value to at most this amount.
    AtMost(i32),
}

impl ValueTransform {
    /// Apply this step to a value.
    pub fn apply(self, value: i64) -> i64 {
        match self {
            ValueTransform::Flat(amount) => value.saturating_add(i64::from(amount)),
            ValueTransform::Percent(percent) => {
                value.saturating_mul(100 + i64::from(percent)) / 100
            }
            ValueTransform::AtLeast(floor) => value.max(i64::from(floor)),
            ValueTransform::AtMost(ceiling) => value.min(i64::from(ceiling)),
        }
    }
}

/// Run a value through a whole chain, first step first.
pub fn apply_chain(chain: &[ValueTransform], value: i64) -> i64 {
    chain.iter().fold(value, |acc, step| step.apply(acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_order_matters() {
        let add_then_double = [ValueTransform::Flat(5), ValueTransform::Percent(100)];
        let double_then_add = [ValueTransform::Percent(100), ValueTransform::Flat(5)];

        assert_eq!(apply_chain(&add_then_double, 10), 30);
        assert_eq!(apply_chain(&double_then_add, 10), 25);
    }

    #[test]
    fn empty_chain_is_identity() {
        assert_eq!(apply_chain(&[], 42), 42);
    }

    #[test]
    fn clamps_bound_the_value() {
        let chain = [
            ValueTransform::Percent(-50),
            ValueTransform::AtLeast(8),
            ValueTransform::AtMost(9),
        ];
        assert_eq!(apply_chain(&chain, 10), 8);
        assert_eq!(apply_chain(&chain, 40), 9);
    }

    #[test]
    fn huge_values_saturate() {
        let chain = [ValueTransform::Flat(i32::MAX), ValueTransform::Percent(i32::MAX)];
        assert_eq!(apply_chain(&chain, i64::MAX / 2), i64::MAX / 100);
        assert_eq!(ValueTransform::Flat(-1).apply(i64::MIN), i64::MIN);
    }
}
