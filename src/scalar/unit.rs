//! Minimal physical quantities.
//!
//! A `Quantity` is a magnitude in SI base units plus an exponent per base
//! dimension. Kernels that accept units (add, subtract, compare, equal)
//! require both operands to share a dimension vector and then operate on
//! the magnitudes; unit conversion itself lives outside this crate.

/// Exponents over the seven SI base dimensions, in the order
/// length, mass, time, current, temperature, amount, luminosity.
pub type Dimensions = [i8; 7];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quantity {
    /// Magnitude expressed in SI base units.
    pub value: f64,
    /// Base-dimension exponents.
    pub dims: Dimensions,
}

impl Quantity {
    pub fn new(value: f64, dims: Dimensions) -> Self {
        Self { value, dims }
    }

    pub fn dimensionless(value: f64) -> Self {
        Self { value, dims: [0; 7] }
    }

    /// Length in metres.
    pub fn length(value: f64) -> Self {
        Self { value, dims: [1, 0, 0, 0, 0, 0, 0] }
    }

    /// Mass in kilograms.
    pub fn mass(value: f64) -> Self {
        Self { value, dims: [0, 1, 0, 0, 0, 0, 0] }
    }

    /// Time in seconds.
    pub fn time(value: f64) -> Self {
        Self { value, dims: [0, 0, 1, 0, 0, 0, 0] }
    }

    pub fn same_dimension(&self, other: &Quantity) -> bool {
        self.dims == other.dims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_check() {
        assert!(Quantity::length(2.0).same_dimension(&Quantity::length(5.0)));
        assert!(!Quantity::length(2.0).same_dimension(&Quantity::time(2.0)));
    }
}
