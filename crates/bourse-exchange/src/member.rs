//! Exchange members that buy on price trends.

use crate::{lock, Company, Exchange, Subscriber};
use bourse_core::error::{ExchangeError, ExchangeResult};
use bourse_core::traits::BuyRule;
use bourse_core::types::Settlement;
use bourse_strategies::DipThenRise;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

/// Order size used when none is configured.
pub const DEFAULT_ORDER_SIZE: u64 = 10;

/// Cash side of a member, mutated only by settlement.
#[derive(Debug)]
pub(crate) struct Account {
    pub(crate) cash_balance: Decimal,
    pub(crate) settlements: Vec<Settlement>,
}

/// A capital-holding participant that buys `order_size` shares whenever its
/// buy rule fires for a watched company.
pub struct Member {
    exchange: Arc<Exchange>,
    order_size: u64,
    rule: Box<dyn BuyRule>,
    account: Mutex<Account>,
}

impl Member {
    /// Create a member using the dip-then-rise rule and subscribe it to
    /// every company in `watched`.
    pub fn new(
        exchange: &Arc<Exchange>,
        cash_balance: Decimal,
        watched: &[Arc<Company>],
        order_size: u64,
    ) -> ExchangeResult<Arc<Self>> {
        Self::with_rule(exchange, cash_balance, watched, order_size, Box::new(DipThenRise))
    }

    /// Create a member with a custom buy rule.
    ///
    /// All inputs are validated before any subscription is installed.
    pub fn with_rule(
        exchange: &Arc<Exchange>,
        cash_balance: Decimal,
        watched: &[Arc<Company>],
        order_size: u64,
        rule: Box<dyn BuyRule>,
    ) -> ExchangeResult<Arc<Self>> {
        if cash_balance < Decimal::ZERO {
            return Err(ExchangeError::invalid(format!(
                "cash balance must not be negative, got {}",
                cash_balance
            )));
        }
        if order_size == 0 {
            return Err(ExchangeError::invalid("order size must be positive"));
        }
        if let Some(foreign) = watched
            .iter()
            .find(|company| !Arc::ptr_eq(company.exchange(), exchange))
        {
            return Err(ExchangeError::invalid(format!(
                "company '{}' is listed on a different exchange",
                foreign.identifier()
            )));
        }

        let member = Arc::new(Self {
            exchange: Arc::clone(exchange),
            order_size,
            rule,
            account: Mutex::new(Account {
                cash_balance,
                settlements: Vec::new(),
            }),
        });

        for company in watched {
            let decision = Decision {
                member: Arc::downgrade(&member),
                company: Arc::downgrade(company),
            };
            exchange.subscribe(company.identifier(), Arc::new(decision))?;
        }

        debug!(
            balance = %cash_balance,
            order_size,
            watched = watched.len(),
            rule = member.rule.name(),
            "Member created"
        );

        Ok(member)
    }

    /// Create a member with the default order size.
    pub fn with_default_order_size(
        exchange: &Arc<Exchange>,
        cash_balance: Decimal,
        watched: &[Arc<Company>],
    ) -> ExchangeResult<Arc<Self>> {
        Self::new(exchange, cash_balance, watched, DEFAULT_ORDER_SIZE)
    }

    /// Cash left.
    pub fn cash_balance(&self) -> Decimal {
        lock(&self.account).cash_balance
    }

    /// The exchange this member trades on.
    pub fn exchange(&self) -> &Arc<Exchange> {
        &self.exchange
    }

    /// Shares requested per trade.
    pub fn order_size(&self) -> u64 {
        self.order_size
    }

    /// Name of the buy rule in use.
    pub fn rule_name(&self) -> &str {
        self.rule.name()
    }

    /// Receipts for every trade this member has settled, oldest first.
    pub fn settlements(&self) -> Vec<Settlement> {
        lock(&self.account).settlements.clone()
    }

    pub(crate) fn account(&self) -> &Mutex<Account> {
        &self.account
    }

    fn on_price_update(&self, company: &Company) -> ExchangeResult<()> {
        let history = company.history();
        if !self.rule.should_buy(&history) {
            return Ok(());
        }

        debug!(
            company = company.identifier(),
            rule = self.rule.name(),
            "Buy rule fired"
        );
        self.exchange.settle(company, self).map(|_| ())
    }
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let account = lock(&self.account);
        f.debug_struct("Member")
            .field("cash_balance", &account.cash_balance)
            .field("order_size", &self.order_size)
            .field("rule", &self.rule.name())
            .field("settlements", &account.settlements.len())
            .finish()
    }
}

/// Subscription installed for one watched company.
///
/// Holds the company the member originally watched rather than trusting the
/// notification argument, and holds both weakly so routes never keep
/// participants alive.
struct Decision {
    member: Weak<Member>,
    company: Weak<Company>,
}

impl Subscriber for Decision {
    fn on_update(&self, _notified: &Company) -> ExchangeResult<()> {
        let (Some(member), Some(company)) = (self.member.upgrade(), self.company.upgrade()) else {
            return Ok(());
        };
        member.on_price_update(&company)
    }

    fn is_live(&self) -> bool {
        self.member.strong_count() > 0 && self.company.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bourse_core::types::PriceHistory;
    use rust_decimal_macros::dec;

    fn green_bank() -> (Arc<Exchange>, Arc<Company>) {
        let exchange = Arc::new(Exchange::new());
        let company = Company::new(&exchange, "Green Bank", 100, dec!(100)).unwrap();
        (exchange, company)
    }

    struct Always;

    impl BuyRule for Always {
        fn name(&self) -> &str {
            "always"
        }

        fn should_buy(&self, _history: &PriceHistory) -> bool {
            true
        }
    }

    #[test]
    fn test_member_creation() {
        let (exchange, company) = green_bank();
        let member = Member::new(&exchange, dec!(10000), &[company], 10).unwrap();

        assert_eq!(member.cash_balance(), dec!(10000));
        assert_eq!(member.order_size(), 10);
        assert_eq!(member.rule_name(), "Dip Then Rise");
        assert_eq!(exchange.subscriber_count("Green Bank"), 1);
    }

    #[test]
    fn test_default_order_size() {
        let (exchange, company) = green_bank();
        let member = Member::with_default_order_size(&exchange, dec!(500), &[company]).unwrap();
        assert_eq!(member.order_size(), DEFAULT_ORDER_SIZE);
    }

    #[test]
    fn test_invalid_member() {
        let (exchange, company) = green_bank();

        let negative = Member::new(&exchange, dec!(-1), &[company.clone()], 10);
        assert!(matches!(negative, Err(ExchangeError::InvalidArgument(_))));

        let zero_size = Member::new(&exchange, dec!(100), &[company], 0);
        assert!(matches!(zero_size, Err(ExchangeError::InvalidArgument(_))));

        // Nothing was subscribed by the failed constructions.
        assert_eq!(exchange.subscriber_count("Green Bank"), 0);
    }

    #[test]
    fn test_rejects_company_from_other_exchange() {
        let (exchange, _company) = green_bank();
        let other_exchange = Arc::new(Exchange::new());
        let foreign = Company::new(&other_exchange, "Red Bank", 10, dec!(1)).unwrap();

        let result = Member::new(&exchange, dec!(100), &[foreign], 1);
        assert!(matches!(result, Err(ExchangeError::InvalidArgument(_))));
        assert_eq!(other_exchange.subscriber_count("Red Bank"), 0);
    }

    #[test]
    fn test_buys_on_dip_then_rise() {
        let (exchange, company) = green_bank();
        let member = Member::new(&exchange, dec!(10000), &[company.clone()], 10).unwrap();

        company.update_price(dec!(70)).unwrap();
        assert!(member.settlements().is_empty());

        company.update_price(dec!(73)).unwrap();

        assert_eq!(company.outstanding_shares(), 90);
        assert_eq!(member.cash_balance(), dec!(10000) - dec!(73) * dec!(10));
        assert_eq!(member.cash_balance(), dec!(9270));

        let receipts = member.settlements();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].price, dec!(73));
        assert_eq!(receipts[0].quantity, 10);
    }

    #[test]
    fn test_no_trade_on_steady_rise() {
        let (exchange, company) = green_bank();
        let member = Member::new(&exchange, dec!(10000), &[company.clone()], 10).unwrap();

        for price in [dec!(101), dec!(102), dec!(103), dec!(104)] {
            company.update_price(price).unwrap();
        }

        assert_eq!(company.outstanding_shares(), 100);
        assert_eq!(member.cash_balance(), dec!(10000));
    }

    #[test]
    fn test_insufficient_inventory_propagates() {
        let (exchange, company) = green_bank();
        let member = Member::new(&exchange, dec!(10000), &[company.clone()], 1000).unwrap();

        company.update_price(dec!(70)).unwrap();
        let result = company.update_price(dec!(73));

        assert!(matches!(
            result,
            Err(ExchangeError::InsufficientInventory { requested: 1000, outstanding: 100, .. })
        ));
        assert_eq!(company.outstanding_shares(), 100);
        assert_eq!(member.cash_balance(), dec!(10000));
    }

    #[test]
    fn test_insufficient_funds_propagates() {
        let (exchange, company) = green_bank();
        let member = Member::new(&exchange, dec!(10), &[company.clone()], 1).unwrap();

        company.update_price(dec!(70)).unwrap();
        let result = company.update_price(dec!(73));

        assert_eq!(
            result,
            Err(ExchangeError::InsufficientFunds {
                required: dec!(73),
                available: dec!(10),
            })
        );
        assert_eq!(member.cash_balance(), dec!(10));
        assert_eq!(company.outstanding_shares(), 100);
    }

    #[test]
    fn test_first_subscriber_is_served_first() {
        let exchange = Arc::new(Exchange::new());
        let company = Company::new(&exchange, "Scarce", 10, dec!(100)).unwrap();
        let first = Member::new(&exchange, dec!(10000), &[company.clone()], 10).unwrap();
        let second = Member::new(&exchange, dec!(10000), &[company.clone()], 10).unwrap();

        company.update_price(dec!(70)).unwrap();
        let result = company.update_price(dec!(73));

        assert!(matches!(
            result,
            Err(ExchangeError::InsufficientInventory { requested: 10, outstanding: 0, .. })
        ));
        assert_eq!(first.cash_balance(), dec!(9270));
        assert_eq!(second.cash_balance(), dec!(10000));
        assert_eq!(company.outstanding_shares(), 0);
    }

    #[test]
    fn test_watchers_go_quiet_when_sold_out() {
        let exchange = Arc::new(Exchange::new());
        let company = Company::new(&exchange, "Small", 10, dec!(5)).unwrap();
        let member =
            Member::with_rule(&exchange, dec!(1000), &[company.clone()], 10, Box::new(Always))
                .unwrap();

        company.update_price(dec!(6)).unwrap();
        assert_eq!(company.outstanding_shares(), 0);
        assert_eq!(member.cash_balance(), dec!(940));

        // Sold out: no notification, so no failed settlement either.
        company.update_price(dec!(7)).unwrap();
        assert_eq!(member.settlements().len(), 1);
    }

    #[test]
    fn test_watches_several_companies() {
        let exchange = Arc::new(Exchange::new());
        let green = Company::new(&exchange, "Green Bank", 100, dec!(100)).unwrap();
        let blue = Company::new(&exchange, "Blue Bank", 100, dec!(50)).unwrap();
        let member =
            Member::new(&exchange, dec!(10000), &[green.clone(), blue.clone()], 5).unwrap();

        blue.update_price(dec!(40)).unwrap();
        blue.update_price(dec!(45)).unwrap();
        green.update_price(dec!(110)).unwrap();

        assert_eq!(blue.outstanding_shares(), 95);
        assert_eq!(green.outstanding_shares(), 100);
        assert_eq!(member.cash_balance(), dec!(10000) - dec!(225));
        assert_eq!(member.settlements()[0].company, "Blue Bank");
    }

    #[test]
    fn test_dropped_member_stops_trading() {
        let (exchange, company) = green_bank();
        let member = Member::new(&exchange, dec!(10000), &[company.clone()], 10).unwrap();
        drop(member);

        company.update_price(dec!(70)).unwrap();
        company.update_price(dec!(73)).unwrap();
        assert_eq!(company.outstanding_shares(), 100);
    }

    #[test]
    fn test_dropped_member_is_pruned_from_route() {
        let (exchange, company) = green_bank();
        let gone = Member::new(&exchange, dec!(10000), &[company.clone()], 10).unwrap();
        let kept = Member::new(&exchange, dec!(10000), &[company.clone()], 10).unwrap();
        assert_eq!(exchange.subscriber_count("Green Bank"), 2);

        drop(gone);
        assert_eq!(exchange.subscriber_count("Green Bank"), 1);

        company.update_price(dec!(70)).unwrap();
        company.update_price(dec!(73)).unwrap();
        assert_eq!(kept.cash_balance(), dec!(9270));
        assert_eq!(exchange.subscriber_count("Green Bank"), 1);
        assert_eq!(exchange.routes(), vec!["Green Bank".to_string()]);
    }

    #[test]
    fn test_route_survives_when_every_member_is_gone() {
        let (exchange, company) = green_bank();
        drop(Member::new(&exchange, dec!(10000), &[company.clone()], 10).unwrap());
        assert_eq!(exchange.subscriber_count("Green Bank"), 0);

        // The route was registered once, so notify is still a no-op rather
        // than an unknown entity.
        company.update_price(dec!(70)).unwrap();
        assert_eq!(exchange.notify(&company), Ok(()));
    }
}
