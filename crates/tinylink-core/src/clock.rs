use jiff::Timestamp;

/// Source of wall-clock time for stores that stamp records.
pub trait Clock: Send + Sync {
    /// Returns the current time of the clock.
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A manually driven clock for tests.
#[cfg(any(test, feature = "test-util"))]
pub mod test_clock {
    use super::Clock;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    pub struct TestClock {
        inner: Arc<Mutex<Timestamp>>,
    }

    impl TestClock {
        pub fn new(now: Timestamp) -> Self {
            Self {
                inner: Arc::new(Mutex::new(now)),
            }
        }

        /// Moves the clock forward by `delta`.
        pub fn advance(&self, delta: SignedDuration) {
            let mut now = self
                .inner
                .lock()
                .expect("test clock lock should not be poisoned");
            *now = *now + delta;
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> Timestamp {
            *self
                .inner
                .lock()
                .expect("test clock lock should not be poisoned")
        }
    }

    #[test]
    fn test_clock_works() {
        let base = Timestamp::from_second(0).unwrap();
        let clock = TestClock::new(base);
        assert_eq!(clock.now(), base);

        clock.advance(SignedDuration::from_secs(1000));
        assert_eq!(clock.now(), Timestamp::from_second(1000).unwrap());
    }
}
