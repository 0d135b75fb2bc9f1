/// time control - catch-up accrual after downtime with controlled time
use accrual_engine_rs::{
    accrue_interest, post_all, AccrualContext, AccrualRequest, AccrualScheduler, AddressMapping,
    ChargeType, DayCountBasis, EventStore, MemoryLedger, SafeTimeProvider, TimeSource, Tside,
};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();
    let mut scheduler = AccrualScheduler::new(time.now());

    println!("starting date: {}", time.now().format("%Y-%m-%d"));

    // the accrual job was down for three days
    controller.advance(Duration::days(3));
    println!("resumed on:    {}", time.now().format("%Y-%m-%d"));

    let days = scheduler.mark_accrued(&time);
    println!("days to catch up: {days}\n");

    let mut ledger = MemoryLedger::new("Main account", "DEMO_HOOK", Tside::Liability);
    let mut events = EventStore::new();
    let mut request = AccrualRequest::flat_rate(
        "GBP",
        dec!(1000),
        dec!(0.031),
        AddressMapping::accrued_interest(),
    );
    request.day_count_basis = DayCountBasis::Fixed365;

    // one catch-up run covers all missed days
    let mut ctx = AccrualContext::new(
        Tside::Liability,
        time.now().date_naive(),
        "ACCRUE_INTEREST",
        "SAVINGS",
    );
    ctx.number_of_days = days;

    let instructions =
        accrue_interest(&ledger, &ctx, ChargeType::Interest, &[request], &mut events)?;
    post_all(&mut ledger, &instructions)?;

    println!(
        "accrued over {} days: {} GBP",
        days,
        ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP")
    );
    for event in events.take_events() {
        println!("event: {event:?}");
    }

    Ok(())
}
