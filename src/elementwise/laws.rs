//! Declared zero behavior of a scalar kernel.
//!
//! Every sparse traversal that skips cells does so under a licence: a law
//! the kernel must satisfy at the zero element. Each operation declares
//! its laws once, next to its kernel, and the suite builder refuses any
//! traversal member whose licence the declared laws do not cover. Wiring
//! a skip variant onto an operation where `op(x, 0) != 0` silently drops
//! nonzero results — the refusal turns that bug into a registration error.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ZeroLaws: u32 {
        /// `op(x, 0) = x` for all x.
        const RIGHT_IDENTITY = 0b00001;
        /// `op(0, y) = y` for all y.
        const LEFT_IDENTITY = 0b00010;
        /// `op(x, 0) = 0` for all x.
        const RIGHT_ANNIHILATES = 0b00100;
        /// `op(0, y) = 0` for all y.
        const LEFT_ANNIHILATES = 0b01000;
        /// `op(0, 0) = 0`.
        const ZERO_FIXED = 0b10000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment() {
        let add = ZeroLaws::RIGHT_IDENTITY | ZeroLaws::LEFT_IDENTITY | ZeroLaws::ZERO_FIXED;
        assert!(add.contains(ZeroLaws::ZERO_FIXED));
        assert!(!add.contains(ZeroLaws::RIGHT_ANNIHILATES));
    }
}
