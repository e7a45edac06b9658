//! Dense distance matrix.

use crate::error::{TspError, TspResult};

/// Mean Earth radius in kilometres, used by [`DistanceMatrix::from_haversine`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Symmetry and diagonal tolerance used when a caller does not pick one.
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A dense n×n distance matrix stored in row-major order.
///
/// Both engines borrow the matrix read-only. It is expected to be symmetric,
/// non-negative, zero on the diagonal, and to satisfy the triangle
/// inequality; [`validate`](Self::validate) checks everything but the
/// triangle inequality.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// assert!((dm.tour_length(&[0, 1, 2]) - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from a flat row-major n×n grid.
    ///
    /// Fails if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> TspResult<Self> {
        if data.len() != size * size {
            return Err(TspError::invalid_input(format!(
                "expected {} entries for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Fails if any row length differs from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> TspResult<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(TspError::invalid_input(format!(
                    "matrix is not square: row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, size })
    }

    /// Computes a Euclidean distance matrix from planar `(x, y)` coordinates.
    pub fn from_euclidean(points: &[(f64, f64)]) -> Self {
        Self::from_fn(points, |a, b| {
            let dx = a.0 - b.0;
            let dy = a.1 - b.1;
            (dx * dx + dy * dy).sqrt()
        })
    }

    /// Computes a great-circle distance matrix (kilometres) from
    /// `(latitude, longitude)` pairs in degrees.
    pub fn from_haversine(points: &[(f64, f64)]) -> Self {
        Self::from_fn(points, |a, b| haversine_km(a.0, a.1, b.0, b.1))
    }

    fn from_fn<F>(points: &[(f64, f64)], distance: F) -> Self
    where
        F: Fn((f64, f64), (f64, f64)) -> f64,
    {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(points[i], points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Checks the matrix contract: at least two locations, finite
    /// non-negative entries, zero diagonal, and symmetry within `tol`.
    ///
    /// The triangle inequality is assumed, not checked.
    pub fn validate(&self, tol: f64) -> TspResult<()> {
        if self.size < 2 {
            return Err(TspError::invalid_input(format!(
                "need at least 2 locations, got {}",
                self.size
            )));
        }
        for i in 0..self.size {
            for j in 0..self.size {
                let d = self.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(TspError::invalid_input(format!(
                        "distance ({i}, {j}) = {d} is not a finite non-negative number"
                    )));
                }
            }
            if self.get(i, i) > tol {
                return Err(TspError::invalid_input(format!(
                    "diagonal entry ({i}, {i}) is {}",
                    self.get(i, i)
                )));
            }
        }
        if !self.is_symmetric(tol) {
            return Err(TspError::invalid_input(format!(
                "matrix is asymmetric beyond tolerance {tol}"
            )));
        }
        Ok(())
    }

    /// Length of the closed tour `order[0] → … → order[n-1] → order[0]`.
    ///
    /// Empty and single-location orders have length zero.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let open: f64 = order.windows(2).map(|w| self.get(w[0], w[1])).sum();
        open + self.get(order[order.len() - 1], order[0])
    }
}

/// Great-circle distance in kilometres between two `(lat, lon)` points in degrees.
fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_euclidean(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)])
    }

    #[test]
    fn test_from_euclidean() {
        let dm = sample();
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        let err = DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_from_rows_not_square() {
        let rows = vec![vec![0.0, 1.0], vec![1.0]];
        assert!(matches!(
            DistanceMatrix::from_rows(&rows),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![vec![0.0, 2.0], vec![2.0, 0.0]];
        let dm = DistanceMatrix::from_rows(&rows).expect("square");
        assert_eq!(dm.size(), 2);
        assert_eq!(dm.get(1, 0), 2.0);
        assert!(dm.validate(1e-9).is_ok());
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }

    #[test]
    fn test_validate_rejects_asymmetric() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
        assert!(matches!(dm.validate(1e-9), Err(TspError::InvalidInput(_))));
        // Within a generous tolerance the same matrix passes.
        assert!(dm.validate(10.0).is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, -1.0, -1.0, 0.0]).expect("2x2");
        assert!(dm.validate(1e-9).is_err());
        let dm = DistanceMatrix::from_data(2, vec![0.0, f64::NAN, f64::NAN, 0.0]).expect("2x2");
        assert!(dm.validate(1e-9).is_err());
    }

    #[test]
    fn test_validate_rejects_diagonal_and_tiny() {
        let dm = DistanceMatrix::from_data(2, vec![1.0, 1.0, 1.0, 0.0]).expect("2x2");
        assert!(dm.validate(1e-9).is_err());
        assert!(DistanceMatrix::new(1).validate(1e-9).is_err());
        assert!(DistanceMatrix::new(0).validate(1e-9).is_err());
    }

    #[test]
    fn test_tour_length_closes_cycle() {
        let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!((dm.tour_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-10);
        assert!((dm.tour_length(&[0, 2, 1, 3]) - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-10);
        assert_eq!(dm.tour_length(&[2]), 0.0);
        assert_eq!(dm.tour_length(&[]), 0.0);
    }

    #[test]
    fn test_haversine_paris_lyon() {
        // Paris (48.8566, 2.3522) to Lyon (45.7640, 4.8357): ~392 km.
        let dm = DistanceMatrix::from_haversine(&[(48.8566, 2.3522), (45.7640, 4.8357)]);
        assert!((dm.get(0, 1) - 392.0).abs() < 2.0);
        assert!(dm.validate(1e-9).is_ok());
    }
}
