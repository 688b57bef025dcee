/// Convert a decibel value to a linear amplitude, `10^(db/20)`.
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_db_is_unity() {
        assert_eq!(db_to_linear(0.0), 1.0);
    }

    #[test]
    fn strictly_increasing() {
        let mut prev = db_to_linear(-200.0);
        for db in (-199..=20).map(f64::from) {
            let cur = db_to_linear(db);
            assert!(cur > prev, "not increasing at {db} dB");
            prev = cur;
        }
    }

    #[test]
    fn default_threshold_in_int16_units() {
        let linear = db_to_linear(-54.0);
        assert!((linear - 0.001995).abs() < 1e-5);
        assert_eq!((linear * 32767.0).round(), 65.0);
        assert!(db_to_linear(-1000.0) < 1e-40);
    }
}
