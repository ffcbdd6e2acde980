//! Guard against double submission of write-triggering actions.
//!
//! A screen holds one [`SubmitGuard`]. Its submit handler calls
//! [`SubmitGuard::try_begin`]; while the returned ticket is alive every further
//! attempt gets `None` and the control renders disabled. Dropping the ticket,
//! on success or failure, re-arms the guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

impl PartialEq for SubmitGuard {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.busy, &other.busy)
    }
}

/// Proof that a submission is in flight.
#[must_use = "the guard is released when the ticket is dropped"]
#[derive(Debug)]
pub struct SubmitTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Option<SubmitTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(SubmitTicket {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use store::{Collection, Customer, MemoryStore};

    #[test]
    fn test_ticket_release_rearms() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin().unwrap();
        assert!(guard.is_busy());
        assert!(guard.try_begin().is_none());
        drop(ticket);
        assert!(!guard.is_busy());
        assert!(guard.try_begin().is_some());
    }

    #[tokio::test]
    async fn test_double_submit_adds_once() {
        let customers = Collection::<_, Customer>::new(MemoryStore::new());
        let guard = SubmitGuard::new();

        let submit = || async {
            let Some(_ticket) = guard.try_begin() else {
                return;
            };
            tokio::task::yield_now().await;
            customers
                .add(Customer {
                    name: "Lan".to_string(),
                    email: "lan@mail.test".to_string(),
                    phone: "0901234567".to_string(),
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        };
        tokio::join!(submit(), submit());

        let mut live = customers.live();
        assert_eq!(live.current().len(), 1);
        assert!(!guard.is_busy());
    }
}
