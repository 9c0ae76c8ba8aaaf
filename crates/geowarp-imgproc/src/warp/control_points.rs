use std::io::BufRead;

use crate::error::WarpError;

/// Number of header lines preceding the data rows of a GCP file.
const GCP_HEADER_LINES: usize = 2;

/// Paired point correspondences between a source image and a destination frame.
///
/// `source()[i]` is the `(x, y)` location in the source image of the feature found at
/// `target()[i]` in the destination (map) frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoints {
    source: Vec<[f64; 2]>,
    target: Vec<[f64; 2]>,
}

impl ControlPoints {
    /// Create a control point set from paired source and target locations.
    ///
    /// # Errors
    ///
    /// * [`WarpError::ShapeMismatch`] if the two lists have different lengths.
    /// * [`WarpError::InvalidParameter`] if a coordinate is not finite.
    pub fn new(source: Vec<[f64; 2]>, target: Vec<[f64; 2]>) -> Result<Self, WarpError> {
        if source.len() != target.len() {
            return Err(WarpError::ShapeMismatch(format!(
                "{} source points but {} target points",
                source.len(),
                target.len()
            )));
        }

        let all_finite = source
            .iter()
            .chain(target.iter())
            .flatten()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(WarpError::InvalidParameter(
                "control point coordinates must be finite".to_string(),
            ));
        }

        Ok(Self { source, target })
    }

    /// Read control points from a GCP text file.
    ///
    /// The first two lines are a header and are skipped. Every following non-blank
    /// line holds whitespace separated `srcX srcY mapX mapY` values; extra columns
    /// are ignored.
    ///
    /// # Errors
    ///
    /// * [`WarpError::Io`] if reading fails, header lines included.
    /// * [`WarpError::GcpParse`] if a data line has fewer than four numbers.
    ///
    /// # Example
    ///
    /// ```
    /// use geowarp_imgproc::warp::ControlPoints;
    ///
    /// let gcp = "ground control points\nsrcX srcY mapX mapY\n1 2 10 20\n3 4 30 40\n";
    /// let points = ControlPoints::from_gcp_reader(gcp.as_bytes()).unwrap();
    /// assert_eq!(points.len(), 2);
    /// assert_eq!(points.target()[1], [30.0, 40.0]);
    /// ```
    pub fn from_gcp_reader<R: BufRead>(reader: R) -> Result<Self, WarpError> {
        let mut source = Vec::new();
        let mut target = Vec::new();

        let mut lines = reader.lines();
        for header in lines.by_ref().take(GCP_HEADER_LINES) {
            header?;
        }

        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line_no = GCP_HEADER_LINES + idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let values = line
                .split_whitespace()
                .take(4)
                .map(|field| {
                    field.parse::<f64>().map_err(|e| WarpError::GcpParse {
                        line: line_no,
                        reason: format!("`{field}`: {e}"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let [src_x, src_y, map_x, map_y] = values[..] else {
                return Err(WarpError::GcpParse {
                    line: line_no,
                    reason: format!("expected 4 values, found {}", values.len()),
                });
            };
            source.push([src_x, src_y]);
            target.push([map_x, map_y]);
        }

        log::debug!("read {} control points", source.len());

        Self::new(source, target)
    }

    /// Number of correspondences.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns true when the set holds no correspondences.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Locations in the source image.
    pub fn source(&self) -> &[[f64; 2]] {
        &self.source
    }

    /// Locations in the destination frame.
    pub fn target(&self) -> &[[f64; 2]] {
        &self.target
    }

    /// Iterate over `(source, target)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64; 2], &[f64; 2])> + '_ {
        self.source.iter().zip(self.target.iter())
    }
}
