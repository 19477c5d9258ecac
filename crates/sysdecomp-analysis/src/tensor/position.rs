//! Bit-string projection to row indices.

/// Which positions of a bit string take part in a row-index computation.
#[derive(Debug, Clone, Copy)]
pub enum Projection<'a> {
    /// Every position.
    Full,
    /// Only these positions.
    Mask(&'a [usize]),
    /// Every position except these.
    Unmask(&'a [usize]),
}

impl Projection<'_> {
    fn keeps(&self, position: usize) -> bool {
        match self {
            Self::Full => true,
            Self::Mask(mask) => mask.contains(&position),
            Self::Unmask(unmask) => !unmask.contains(&position),
        }
    }
}

/// Project `bits` and read the surviving bits as a little-endian integer.
///
/// The first surviving bit is the least significant one. An empty projection
/// yields 0.
pub fn binary_position(bits: &[bool], projection: Projection<'_>) -> usize {
    bits.iter()
        .enumerate()
        .filter(|(position, _)| projection.keeps(*position))
        .map(|(_, bit)| *bit)
        .enumerate()
        .fold(0, |acc, (k, bit)| if bit { acc | (1 << k) } else { acc })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn full_projection_is_little_endian() {
        assert_eq!(binary_position(&bits("100"), Projection::Full), 1);
        assert_eq!(binary_position(&bits("001"), Projection::Full), 4);
        assert_eq!(binary_position(&bits("110"), Projection::Full), 3);
    }

    #[test]
    fn mask_and_unmask_select_complementary_bits() {
        let b = bits("1011");
        assert_eq!(binary_position(&b, Projection::Mask(&[1, 2])), 0b10);
        assert_eq!(binary_position(&b, Projection::Unmask(&[1, 2])), 0b11);
    }

    #[test]
    fn empty_projection_is_zero() {
        assert_eq!(binary_position(&bits("111"), Projection::Mask(&[])), 0);
        assert_eq!(binary_position(&bits("111"), Projection::Unmask(&[0, 1, 2])), 0);
        assert_eq!(binary_position(&[], Projection::Full), 0);
    }
}
