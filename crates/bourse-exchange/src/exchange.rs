//! Exchange: notification routing and trade settlement.

use crate::{lock, Company, Member, Subscriber};
use bourse_core::error::{ExchangeError, ExchangeResult};
use bourse_core::types::Settlement;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Ordered subscribers for one company identifier.
pub type Route = Vec<Arc<dyn Subscriber>>;

/// Central broker that routes price notifications and settles trades.
///
/// Routes are scoped to the instance; two exchanges never share subscribers.
pub struct Exchange {
    routes: Mutex<HashMap<String, Route>>,
    listings: Mutex<BTreeSet<String>>,
}

impl Exchange {
    /// Create an exchange with no routes.
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            listings: Mutex::new(BTreeSet::new()),
        }
    }

    /// Create an exchange from an initial route table.
    ///
    /// Every identifier must be non-empty and carry at least one subscriber.
    pub fn with_routes(routes: HashMap<String, Route>) -> ExchangeResult<Self> {
        for (identifier, route) in &routes {
            validate_identifier(identifier)?;
            if route.is_empty() {
                return Err(ExchangeError::invalid(format!(
                    "route for '{}' has no subscribers",
                    identifier
                )));
            }
        }

        Ok(Self {
            routes: Mutex::new(routes),
            listings: Mutex::new(BTreeSet::new()),
        })
    }

    /// Append `subscriber` to the route for `identifier`, creating the route
    /// if needed. The same subscriber may be registered more than once and
    /// then fires once per registration.
    pub fn subscribe(&self, identifier: &str, subscriber: Arc<dyn Subscriber>) -> ExchangeResult<()> {
        validate_identifier(identifier)?;

        let mut routes = lock(&self.routes);
        let route = routes.entry(identifier.to_string()).or_default();
        route.push(subscriber);

        debug!(company = identifier, subscribers = route.len(), "Subscribed");
        Ok(())
    }

    /// Subscribe a closure.
    pub fn subscribe_fn<F>(&self, identifier: &str, callback: F) -> ExchangeResult<()>
    where
        F: Fn(&Company) -> ExchangeResult<()> + Send + Sync + 'static,
    {
        self.subscribe(identifier, Arc::new(callback))
    }

    /// Invoke every subscriber for `company`, in subscription order.
    ///
    /// Subscribers run against a snapshot of the route, so they may
    /// subscribe, notify or settle re-entrantly. The first subscriber error
    /// ends the fan-out and is returned. Subscribers that are no longer
    /// live are dropped from the route before the snapshot is taken.
    pub fn notify(&self, company: &Company) -> ExchangeResult<()> {
        let identifier = company.identifier();
        let route: Route = {
            let mut routes = lock(&self.routes);
            let route = routes
                .get_mut(identifier)
                .ok_or_else(|| ExchangeError::UnknownEntity(identifier.to_string()))?;

            let before = route.len();
            route.retain(|subscriber| subscriber.is_live());
            if route.len() < before {
                debug!(
                    company = identifier,
                    pruned = before - route.len(),
                    "Pruned dead subscribers"
                );
            }
            route.clone()
        };

        debug!(company = identifier, subscribers = route.len(), "Notifying subscribers");

        for subscriber in &route {
            subscriber.on_update(company)?;
        }

        Ok(())
    }

    /// Sell `member.order_size()` shares of `company` to `member` at the
    /// company's current price.
    ///
    /// Both must belong to this exchange. Inventory is checked before funds.
    /// On error neither side changes.
    pub fn settle(&self, company: &Company, member: &Member) -> ExchangeResult<Settlement> {
        if !self.is_home_of(company.exchange()) {
            return Err(ExchangeError::invalid(format!(
                "company '{}' is not listed on this exchange",
                company.identifier()
            )));
        }
        if !self.is_home_of(member.exchange()) {
            return Err(ExchangeError::invalid("member does not trade on this exchange"));
        }

        // Lock order: company, then member.
        let mut listing = lock(company.listing());
        let mut account = lock(member.account());

        let quantity = member.order_size();
        if quantity > listing.outstanding_shares {
            warn!(
                company = company.identifier(),
                requested = quantity,
                outstanding = listing.outstanding_shares,
                "Settlement rejected: insufficient inventory"
            );
            return Err(ExchangeError::InsufficientInventory {
                company: company.identifier().to_string(),
                requested: quantity,
                outstanding: listing.outstanding_shares,
            });
        }

        let price = listing.current_price;
        // An unrepresentable total is more than any balance can cover.
        let total = Decimal::from(quantity).checked_mul(price);
        let total = match total {
            Some(total) if total <= account.cash_balance => total,
            _ => {
                let required = total.unwrap_or(Decimal::MAX);
                warn!(
                    company = company.identifier(),
                    required = %required,
                    available = %account.cash_balance,
                    "Settlement rejected: insufficient funds"
                );
                return Err(ExchangeError::InsufficientFunds {
                    required,
                    available: account.cash_balance,
                });
            }
        };

        listing.outstanding_shares -= quantity;
        account.cash_balance -= total;

        let receipt = Settlement::new(
            company.identifier(),
            quantity,
            price,
            total,
            listing.outstanding_shares,
            account.cash_balance,
        );
        account.settlements.push(receipt.clone());

        info!(
            company = company.identifier(),
            quantity,
            price = %price,
            total = %total,
            shares_remaining = listing.outstanding_shares,
            balance_remaining = %account.cash_balance,
            "Trade settled"
        );

        Ok(receipt)
    }

    /// Number of live subscribers registered for `identifier`.
    pub fn subscriber_count(&self, identifier: &str) -> usize {
        lock(&self.routes).get(identifier).map_or(0, |route| {
            route.iter().filter(|subscriber| subscriber.is_live()).count()
        })
    }

    /// Identifiers that have a route, sorted.
    pub fn routes(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = lock(&self.routes).keys().cloned().collect();
        identifiers.sort();
        identifiers
    }

    /// Whether a live company with this identifier is listed here.
    pub fn is_listed(&self, identifier: &str) -> bool {
        lock(&self.listings).contains(identifier)
    }

    /// Identifiers of all live companies listed here, sorted.
    pub fn listings(&self) -> Vec<String> {
        lock(&self.listings).iter().cloned().collect()
    }

    pub(crate) fn list(&self, identifier: &str) -> ExchangeResult<()> {
        if !lock(&self.listings).insert(identifier.to_string()) {
            return Err(ExchangeError::invalid(format!(
                "company '{}' is already listed",
                identifier
            )));
        }
        debug!(company = identifier, "Listed");
        Ok(())
    }

    pub(crate) fn delist(&self, identifier: &str) {
        lock(&self.listings).remove(identifier);
    }

    fn is_home_of(&self, exchange: &Arc<Exchange>) -> bool {
        std::ptr::eq(Arc::as_ptr(exchange), self)
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let routes: HashMap<String, usize> = lock(&self.routes)
            .iter()
            .map(|(id, route)| (id.clone(), route.len()))
            .collect();
        f.debug_struct("Exchange")
            .field("routes", &routes)
            .field("listings", &*lock(&self.listings))
            .finish()
    }
}

pub(crate) fn validate_identifier(identifier: &str) -> ExchangeResult<()> {
    if identifier.trim().is_empty() {
        return Err(ExchangeError::invalid("identifier must be a non-empty string"));
    }
    Ok(())
}
