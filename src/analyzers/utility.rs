use crate::model::Average;

/// Percentage of `part` in `total`. Returns 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// The interval with the highest average; the first one wins a tie.
pub fn peak(averages: &[Average]) -> Option<&Average> {
    averages.iter().fold(None, |best, a| match best {
        Some(b) if b.average >= a.average => Some(b),
        _ => Some(a),
    })
}

/// Sum of raw readings folded into the averages.
pub fn total_measurements(averages: &[Average]) -> u64 {
    averages.iter().map(|a| a.measurement_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avg(date: &str, average: f64, measurement_count: u64) -> Average {
        Average {
            date: date.to_string(),
            average,
            measurement_count,
        }
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(pct(50, 100), 50.0);
        assert_eq!(pct(1, 4), 25.0);
    }

    #[test]
    fn test_peak_first_occurrence_wins() {
        let averages = vec![
            avg("2020-01", 3.0, 1),
            avg("2020-02", 9.0, 1),
            avg("2020-03", 9.0, 1),
            avg("2020-04", 2.0, 1),
        ];
        assert_eq!(peak(&averages).unwrap().date, "2020-02");
    }

    #[test]
    fn test_peak_empty() {
        assert!(peak(&[]).is_none());
    }

    #[test]
    fn test_total_measurements() {
        let averages = vec![avg("2019", 4.0, 100), avg("2020", 5.0, 250)];
        assert_eq!(total_measurements(&averages), 350);
        assert_eq!(total_measurements(&[]), 0);
    }
}
