pub mod application;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod postings;
pub mod requests;
pub mod schedule;
pub mod types;

// re-export key types
pub use application::{apply_charges, reverse_interest};
pub use decimal::{format_fixed, round_decimal, Money, Rate, RoundingMode};
pub use errors::{EngineError, Result};
pub use events::{Event, EventStore};
pub use interest::{
    calculate_accruals, fee_accruals, yearly_to_daily_rate, DayCountBasis, TierAccrual,
};
pub use ledger::{
    post_all, LedgerBalances, LedgerPort, MemoryLedger, PostedEntry, PostingInstruction,
    PostingLeg,
};
pub use postings::{accrue_fees, accrue_interest, scenario_for, AccrualContext, Scenario};
pub use requests::{
    AccrualRequest, AddressMapping, ChargeApplicationRequest, FeeRequest, TierRange,
};
pub use schedule::AccrualScheduler;
pub use types::{ChargeType, InstructionDetails, Tside, DEFAULT_ADDRESS, DEFAULT_ASSET};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
