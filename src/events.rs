use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::ChargeType;

/// all events that can be emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // accrual events
    InterestAccrued {
        account_id: String,
        denomination: String,
        amount: Money,
        number_of_days: u32,
        effective_date: NaiveDate,
    },
    FeeAccrued {
        account_id: String,
        denomination: String,
        fee_name: String,
        amount: Money,
        effective_date: NaiveDate,
    },

    // application events
    ChargeApplied {
        account_id: String,
        denomination: String,
        charge_type: ChargeType,
        accrued_address: String,
        application: Money,
        remainder: Money,
        effective_date: NaiveDate,
    },

    // reversal events
    AccrualReversed {
        account_id: String,
        denomination: String,
        accrued_address: String,
        amount: Money,
        effective_date: NaiveDate,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
