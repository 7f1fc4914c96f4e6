//! Subscriber trait definition.

use crate::Company;
use bourse_core::ExchangeResult;

/// Receives price-change notifications for a company.
///
/// Any `Fn(&Company) -> ExchangeResult<()>` closure is a subscriber.
pub trait Subscriber: Send + Sync {
    /// Called once per notification, in subscription order.
    ///
    /// An error stops the fan-out and is returned from
    /// [`Exchange::notify`](crate::Exchange::notify).
    fn on_update(&self, company: &Company) -> ExchangeResult<()>;

    /// Whether this subscriber can still act. Dead subscribers are pruned
    /// from their route on the next notification.
    fn is_live(&self) -> bool {
        true
    }
}

impl<F> Subscriber for F
where
    F: Fn(&Company) -> ExchangeResult<()> + Send + Sync,
{
    fn on_update(&self, company: &Company) -> ExchangeResult<()> {
        self(company)
    }
}
