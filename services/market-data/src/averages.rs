// Moving averages over daily closes
use crate::types::*;

/// Mean of the trailing `period` closes
pub fn simple_moving_average(closes: &[f64], period: usize) -> Result<f64> {
    if period == 0 || closes.len() < period {
        return Err(MarketDataError::InsufficientHistory {
            needed: period.max(1),
            available: closes.len(),
        });
    }

    let window = &closes[closes.len() - period..];
    Ok(window.iter().sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_uses_trailing_window() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(simple_moving_average(&closes, 2).unwrap(), 4.5);
        assert_eq!(simple_moving_average(&closes, 5).unwrap(), 3.0);
    }

    #[test]
    fn test_sma_200_over_linear_series() {
        let closes: Vec<f64> = (1..=250).map(|i| i as f64).collect();
        // mean of 51..=250
        assert_eq!(simple_moving_average(&closes, 200).unwrap(), 150.5);
    }

    #[test]
    fn test_sma_insufficient_history() {
        let closes = vec![100.0; 199];
        match simple_moving_average(&closes, 200) {
            Err(MarketDataError::InsufficientHistory { needed, available }) => {
                assert_eq!(needed, 200);
                assert_eq!(available, 199);
            }
            other => panic!("expected InsufficientHistory, got {:?}", other),
        }
        assert!(simple_moving_average(&closes, 0).is_err());
    }
}
