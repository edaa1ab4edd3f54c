//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn sum() {
        let data = [0.0, 0.1, 0.2];
        assert_f64_near!(0.3, data.sum(), 1);
    }

    #[test]
    fn sum_empty() {
        let data: [f64; 0] = [];
        assert_eq!(0.0, data.sum());
    }
}
