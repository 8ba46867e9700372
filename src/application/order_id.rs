use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static GLOBAL_GENERATOR: OrderIdGenerator = OrderIdGenerator::new();

/// Generates a unique order id: millisecond timestamp followed by a
/// two-digit random suffix. Ids from one process are strictly increasing.
pub fn generate_order_id() -> String {
    GLOBAL_GENERATOR.next_id()
}

/// Order id source with a monotonic millisecond clock.
///
/// Two calls within the same millisecond get consecutive timestamps, so ids
/// never repeat inside a process. The random suffix separates processes that
/// start at the same instant. Ids are not secret and not meant to be.
#[derive(Debug)]
pub struct OrderIdGenerator {
    last_millis: AtomicU64,
}

impl OrderIdGenerator {
    pub const fn new() -> Self {
        Self {
            last_millis: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let millis = self.next_millis(now_millis());
        let suffix: u8 = rand::thread_rng().gen_range(10..100);
        format!("{millis}{suffix}")
    }

    fn next_millis(&self, now: u64) -> u64 {
        let mut last = self.last_millis.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self.last_millis.compare_exchange_weak(
                last,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
