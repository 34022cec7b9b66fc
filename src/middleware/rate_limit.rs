use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Instant;

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Token-bucket limiter keyed by client address.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: f64,
    refill_rate: f64,
    buckets: Mutex<HashMap<IpAddr, Bucket>>,
}

impl RateLimiter {
    /// `capacity` requests of burst, refilled at `refill_rate` per second.
    pub fn new(capacity: f64, refill_rate: f64) -> Self {
        Self {
            capacity,
            refill_rate,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    pub fn try_acquire(&self, key: IpAddr) -> bool {
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());

        let bucket = buckets.entry(key).or_insert_with(|| Bucket {
            tokens: self.capacity,
            last_refill: Instant::now(),
        });

        let elapsed = bucket.last_refill.elapsed().as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(self.capacity);
        bucket.last_refill = Instant::now();

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::thread;
    use std::time::Duration;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(127, 0, 0, last))
    }

    #[test]
    fn burst_is_bounded_by_capacity() {
        let limiter = RateLimiter::new(2.0, 0.0);

        assert!(limiter.try_acquire(ip(1)));
        assert!(limiter.try_acquire(ip(1)));
        assert!(!limiter.try_acquire(ip(1)));
    }

    #[test]
    fn tokens_refill_over_time() {
        let limiter = RateLimiter::new(1.0, 50.0);

        assert!(limiter.try_acquire(ip(1)));
        assert!(!limiter.try_acquire(ip(1)));

        thread::sleep(Duration::from_millis(100));
        assert!(limiter.try_acquire(ip(1)));
    }

    #[test]
    fn clients_have_independent_buckets() {
        let limiter = RateLimiter::new(1.0, 0.0);

        assert!(limiter.try_acquire(ip(1)));
        assert!(limiter.try_acquire(ip(2)));
        assert!(!limiter.try_acquire(ip(1)));
    }
}
