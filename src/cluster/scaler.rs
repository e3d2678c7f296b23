use super::{Point, DIMS};

/// Per-column standardisation to zero mean and unit variance.
///
/// Uses the population standard deviation. Constant columns keep a scale
/// of 1 so they map to zero instead of NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub mean: Point,
    pub scale: Point,
}

impl StandardScaler {
    pub fn fit(data: &[Point]) -> Self {
        let mut mean = [0.0; DIMS];
        let mut scale = [1.0; DIMS];
        if data.is_empty() {
            return Self { mean, scale };
        }

        let n = data.len() as f64;
        for d in 0..DIMS {
            mean[d] = data.iter().map(|p| p[d]).sum::<f64>() / n;
            let var = data.iter().map(|p| (p[d] - mean[d]).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std > f64::EPSILON * mean[d].abs().max(1.0) {
                scale[d] = std;
            }
        }
        Self { mean, scale }
    }

    pub fn transform_point(&self, p: &Point) -> Point {
        std::array::from_fn(|d| (p[d] - self.mean[d]) / self.scale[d])
    }

    pub fn inverse_transform_point(&self, p: &Point) -> Point {
        std::array::from_fn(|d| p[d] * self.scale[d] + self.mean[d])
    }

    pub fn transform(&self, data: &[Point]) -> Vec<Point> {
        data.iter().map(|p| self.transform_point(p)).collect()
    }

    pub fn inverse_transform(&self, data: &[Point]) -> Vec<Point> {
        data.iter().map(|p| self.inverse_transform_point(p)).collect()
    }

    pub fn fit_transform(data: &[Point]) -> (Self, Vec<Point>) {
        let scaler = Self::fit(data);
        let scaled = scaler.transform(data);
        (scaler, scaled)
    }
}
