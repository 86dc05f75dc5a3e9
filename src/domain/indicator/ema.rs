//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) values produce nothing.

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    k: f64,
    seed_sum: f64,
    count: usize,
    value: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            k: 2.0 / (period as f64 + 1.0),
            seed_sum: 0.0,
            count: 0,
            value: None,
        }
    }

    pub fn push(&mut self, close: f64) -> Option<f64> {
        if self.period == 0 {
            return None;
        }
        self.value = match self.value {
            Some(prev) => Some(close * self.k + prev * (1.0 - self.k)),
            None => {
                self.seed_sum += close;
                self.count += 1;
                (self.count == self.period).then(|| self.seed_sum / self.period as f64)
            }
        };
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(ema: &mut Ema, prices: &[f64]) -> Vec<Option<f64>> {
        prices.iter().map(|&p| ema.push(p)).collect()
    }

    #[test]
    fn ema_warmup() {
        let mut ema = Ema::new(3);
        let out = feed(&mut ema, &[10.0, 20.0, 30.0, 40.0, 50.0]);

        assert!(out[0].is_none());
        assert!(out[1].is_none());
        assert!(out[2].is_some());
        assert!(out[3].is_some());
        assert!(out[4].is_some());
    }

    #[test]
    fn ema_period_1() {
        let mut ema = Ema::new(1);
        let out = feed(&mut ema, &[10.0, 20.0, 30.0]);
        assert_eq!(out, vec![Some(10.0), Some(20.0), Some(30.0)]);
    }

    #[test]
    fn ema_seed_is_sma() {
        let mut ema = Ema::new(3);
        let out = feed(&mut ema, &[10.0, 20.0, 30.0]);
        let expected_sma = (10.0 + 20.0 + 30.0) / 3.0;
        assert!((out[2].unwrap() - expected_sma).abs() < f64::EPSILON);
    }

    #[test]
    fn ema_recursive_calculation() {
        let mut ema = Ema::new(3);
        let out = feed(&mut ema, &[10.0, 20.0, 30.0, 40.0, 50.0]);

        let k = 2.0 / 4.0;
        let sma = (10.0 + 20.0 + 30.0) / 3.0;
        let ema_3 = 40.0 * k + sma * (1.0 - k);
        let ema_4 = 50.0 * k + ema_3 * (1.0 - k);

        assert!((out[3].unwrap() - ema_3).abs() < f64::EPSILON);
        assert!((out[4].unwrap() - ema_4).abs() < f64::EPSILON);
        assert_eq!(ema.value(), out[4]);
    }

    #[test]
    fn ema_equal_prices() {
        let mut ema = Ema::new(3);
        for v in feed(&mut ema, &[100.0; 5]).into_iter().skip(2) {
            assert!((v.unwrap() - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ema_period_0() {
        let mut ema = Ema::new(0);
        assert_eq!(feed(&mut ema, &[10.0, 20.0]), vec![None, None]);
    }
}
