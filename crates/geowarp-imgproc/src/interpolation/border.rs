use std::str::FromStr;

use crate::error::WarpError;

/// Policy producing a sample when a source index falls outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderMode {
    /// Substitute a constant value for out-of-range samples.
    ///
    /// Example: ...d c b a | v v v v...
    #[default]
    Constant,

    /// Clamp the index to the nearest valid edge.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// Mirror the index across the edge, repeating the edge pixel.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// Mirror the index across the edge pixel without repeating it.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,

    /// Take the index modulo the dimension.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl BorderMode {
    /// Maps index `i` to a valid index within `[0, len)`.
    ///
    /// Returns `None` for [`BorderMode::Constant`] when `i` is out of range, meaning
    /// the caller substitutes its border value. `len` must be non-zero.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&i) {
            return Some(i as usize);
        }
        match self {
            BorderMode::Constant => None,
            BorderMode::Replicate => Some(i.clamp(0, n - 1) as usize),
            BorderMode::Reflect => {
                let m = i.rem_euclid(2 * n);
                Some(if m >= n { 2 * n - 1 - m } else { m } as usize)
            }
            BorderMode::Reflect101 => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * (n - 1);
                let m = i.rem_euclid(period);
                Some(if m >= n { period - m } else { m } as usize)
            }
            BorderMode::Wrap => Some(i.rem_euclid(n) as usize),
        }
    }
}

impl FromStr for BorderMode {
    type Err = WarpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "constant" => Ok(BorderMode::Constant),
            "replicate" => Ok(BorderMode::Replicate),
            "reflect" => Ok(BorderMode::Reflect),
            "reflect101" | "reflect_101" => Ok(BorderMode::Reflect101),
            "wrap" => Ok(BorderMode::Wrap),
            _ => Err(WarpError::InvalidParameter(format!(
                "unknown border mode `{s}`"
            ))),
        }
    }
}

/// OpenCV `BORDER_*` codes.
impl TryFrom<i32> for BorderMode {
    type Error = WarpError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BorderMode::Constant),
            1 => Ok(BorderMode::Replicate),
            2 => Ok(BorderMode::Reflect),
            3 => Ok(BorderMode::Wrap),
            4 => Ok(BorderMode::Reflect101),
            _ => Err(WarpError::InvalidParameter(format!(
                "unknown border mode code {code}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BorderMode;
    use crate::error::WarpError;

    fn mapped(mode: BorderMode, range: std::ops::RangeInclusive<isize>, len: usize) -> Vec<Option<usize>> {
        range.map(|i| mode.map_index(i, len)).collect()
    }

    #[test]
    fn constant() {
        assert_eq!(
            mapped(BorderMode::Constant, -1..=3, 3),
            vec![None, Some(0), Some(1), Some(2), None]
        );
    }

    #[test]
    fn replicate() {
        assert_eq!(
            mapped(BorderMode::Replicate, -2..=4, 3),
            [0usize, 0, 0, 1, 2, 2, 2].map(Some).to_vec()
        );
    }

    #[test]
    fn reflect() {
        assert_eq!(
            mapped(BorderMode::Reflect, -4..=6, 3),
            [2usize, 2, 1, 0, 0, 1, 2, 2, 1, 0, 0].map(Some).to_vec()
        );
    }

    #[test]
    fn reflect101() {
        assert_eq!(
            mapped(BorderMode::Reflect101, -3..=5, 3),
            [1usize, 2, 1, 0, 1, 2, 1, 0, 1].map(Some).to_vec()
        );
        assert_eq!(BorderMode::Reflect101.map_index(-5, 1), Some(0));
    }

    #[test]
    fn wrap() {
        assert_eq!(
            mapped(BorderMode::Wrap, -4..=4, 3),
            [2usize, 0, 1, 2, 0, 1, 2, 0, 1].map(Some).to_vec()
        );
    }

    #[test]
    fn far_out_of_range() {
        // isize::MAX % 10 == 7, mirrored into the second half of the period
        assert_eq!(BorderMode::Reflect.map_index(isize::MAX, 5), Some(2));
        assert_eq!(BorderMode::Replicate.map_index(isize::MIN, 5), Some(0));
        assert!(BorderMode::Wrap.map_index(isize::MIN, 7).is_some());
    }

    #[test]
    fn parse() -> Result<(), WarpError> {
        assert_eq!("REPLICATE".parse::<BorderMode>()?, BorderMode::Replicate);
        assert_eq!("reflect_101".parse::<BorderMode>()?, BorderMode::Reflect101);
        assert_eq!(BorderMode::try_from(3)?, BorderMode::Wrap);
        assert!(matches!(
            "mirror".parse::<BorderMode>(),
            Err(WarpError::InvalidParameter(_))
        ));
        assert!(matches!(
            BorderMode::try_from(7),
            Err(WarpError::InvalidParameter(_))
        ));
        Ok(())
    }
}
