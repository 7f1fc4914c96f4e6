//! Exchange, companies and members.
//!
//! Control flow is a single synchronous call stack: a price update on a
//! [`Company`] notifies the [`Exchange`], which invokes every [`Subscriber`]
//! registered for that company in order. A [`Member`]'s subscription checks
//! its buy rule and asks the exchange to settle a purchase.

mod company;
mod exchange;
mod member;
mod subscriber;

pub use company::Company;
pub use exchange::{Exchange, Route};
pub use member::{Member, DEFAULT_ORDER_SIZE};
pub use subscriber::Subscriber;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// Every critical section in this crate leaves its data consistent before
/// any call that could panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
