//! Tradable companies.

use crate::exchange::validate_identifier;
use crate::{lock, Exchange};
use bourse_core::error::{ExchangeError, ExchangeResult};
use bourse_core::types::PriceHistory;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Mutable state of a listed company.
#[derive(Debug)]
pub(crate) struct Listing {
    pub(crate) outstanding_shares: u64,
    pub(crate) current_price: Decimal,
    pub(crate) history: PriceHistory,
}

/// A company whose shares trade on an [`Exchange`].
///
/// Price moves only through [`Company::update_price`], which is also the
/// only thing that notifies watchers. Shares leave only through
/// [`Exchange::settle`].
pub struct Company {
    exchange: Arc<Exchange>,
    identifier: String,
    listing: Mutex<Listing>,
}

impl Company {
    /// List a new company on `exchange`.
    ///
    /// The price history is seeded with `initial_price`, so the first update
    /// can never look like a dip.
    pub fn new(
        exchange: &Arc<Exchange>,
        identifier: impl Into<String>,
        outstanding_shares: u64,
        initial_price: Decimal,
    ) -> ExchangeResult<Arc<Self>> {
        let identifier = identifier.into();
        validate_identifier(&identifier)?;
        validate_price(initial_price)?;
        exchange.list(&identifier)?;

        debug!(
            company = %identifier,
            shares = outstanding_shares,
            price = %initial_price,
            "Company created"
        );

        Ok(Arc::new(Self {
            exchange: Arc::clone(exchange),
            identifier,
            listing: Mutex::new(Listing {
                outstanding_shares,
                current_price: initial_price,
                history: PriceHistory::seeded(initial_price),
            }),
        }))
    }

    /// List a company with no shares to sell at a price of zero.
    ///
    /// Price updates will not notify anyone until inventory exists.
    pub fn with_defaults(
        exchange: &Arc<Exchange>,
        identifier: impl Into<String>,
    ) -> ExchangeResult<Arc<Self>> {
        Self::new(exchange, identifier, 0, Decimal::ZERO)
    }

    /// Move the price and notify watchers while shares remain.
    ///
    /// Errors from subscribers, including rejected settlements, are returned
    /// here. The new price is kept either way.
    pub fn update_price(&self, new_price: Decimal) -> ExchangeResult<()> {
        validate_price(new_price)?;

        let has_float = {
            let mut listing = lock(&self.listing);
            listing.history.push(new_price);
            listing.current_price = new_price;
            trace!(
                company = %self.identifier,
                history = ?listing.history.as_slice(),
                "Price updated"
            );
            listing.outstanding_shares > 0
        };

        if !has_float {
            debug!(company = %self.identifier, "Sold out; watchers not notified");
            return Ok(());
        }

        self.exchange.notify(self)
    }

    /// Identifier on the exchange.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Shares still available.
    pub fn outstanding_shares(&self) -> u64 {
        lock(&self.listing).outstanding_shares
    }

    /// Latest price.
    pub fn current_price(&self) -> Decimal {
        lock(&self.listing).current_price
    }

    /// Snapshot of the last three prices.
    pub fn history(&self) -> PriceHistory {
        lock(&self.listing).history
    }

    /// Exchange this company is listed on.
    pub fn exchange(&self) -> &Arc<Exchange> {
        &self.exchange
    }

    pub(crate) fn listing(&self) -> &Mutex<Listing> {
        &self.listing
    }
}

impl Drop for Company {
    fn drop(&mut self) {
        self.exchange.delist(&self.identifier);
    }
}

impl std::fmt::Debug for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listing = lock(&self.listing);
        f.debug_struct("Company")
            .field("identifier", &self.identifier)
            .field("outstanding_shares", &listing.outstanding_shares)
            .field("current_price", &listing.current_price)
            .field("history", &listing.history)
            .finish()
    }
}

fn validate_price(price: Decimal) -> ExchangeResult<()> {
    if price < Decimal::ZERO {
        return Err(ExchangeError::invalid(format!(
            "price must not be negative, got {}",
            price
        )));
    }
    Ok(())
}
