//! Property tests for the booking and loyalty rules.

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use barbershop_engine::booking::is_slot_available;
use barbershop_engine::loyalty::{
    DEFAULT_FREE_CUT_CYCLE, calculate_loyalty_points, get_next_tier, get_tier_by_points,
    record_paid_cut, redeem_free_cut,
};
use barbershop_engine::models::{
    Appointment, AppointmentStatus, Customer, LoyaltyTier, NewCustomer, TierTable,
};

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..500).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Contiguous bands starting at zero with an open-ended top band.
fn tier_table() -> impl Strategy<Value = TierTable> {
    proptest::collection::vec(1u64..1_000, 0..5).prop_map(|widths| {
        let mut tiers = Vec::with_capacity(widths.len() + 1);
        let mut start = 0;
        for (i, width) in widths.iter().enumerate() {
            tiers.push(LoyaltyTier {
                name: format!("Tier {i}"),
                min_points: start,
                max_points: Some(start + width - 1),
            });
            start += width;
        }
        tiers.push(LoyaltyTier {
            name: "Top".to_string(),
            min_points: start,
            max_points: None,
        });
        TierTable::new(tiers).unwrap()
    })
}

fn status() -> impl Strategy<Value = AppointmentStatus> {
    prop_oneof![
        Just(AppointmentStatus::Pending),
        Just(AppointmentStatus::Confirmed),
        Just(AppointmentStatus::Completed),
        Just(AppointmentStatus::Cancelled),
    ]
}

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 10 + offset).unwrap()
}

fn slot(index: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(9 + index / 2, (index % 2) * 30, 0).unwrap()
}

/// Appointments drawn from a small key space so that collisions are common.
fn appointment() -> impl Strategy<Value = Appointment> {
    (0u32..3, 0u32..3, 0u32..4, status()).prop_map(|(barber, date, time, status)| Appointment {
        id: format!("apt_{barber}_{date}_{time}"),
        customer_id: "cus_001".to_string(),
        barber_id: format!("barber{barber}"),
        service_id: "svc_001".to_string(),
        date: day(date),
        time: slot(time),
        status,
        created_at: day(0),
        price: None,
    })
}

fn customer(loyalty_cuts: u32, free_cuts_available: u32) -> Customer {
    let mut customer = Customer::register(
        NewCustomer {
            name: "John Doe".to_string(),
            phone: "11987654321".to_string(),
            email: None,
        },
        day(0),
        "Bronze",
    );
    customer.loyalty_cuts = loyalty_cuts;
    customer.free_cuts_available = free_cuts_available;
    customer
}

proptest! {
    #[test]
    fn points_are_floor_of_amount_times_rate(amount in money(), rate in rate()) {
        let expected = (amount * rate).floor().to_u64().unwrap();
        prop_assert_eq!(calculate_loyalty_points(amount, rate), expected);
    }

    #[test]
    fn points_are_monotonic_in_amount(a in money(), b in money(), rate in rate()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calculate_loyalty_points(low, rate) <= calculate_loyalty_points(high, rate));
    }

    #[test]
    fn every_balance_has_exactly_one_tier(table in tier_table(), points in 0u64..10_000) {
        let tier = get_tier_by_points(points, &table);
        prop_assert!(tier.contains(points));

        let containing = table.tiers().iter().filter(|t| t.contains(points)).count();
        prop_assert_eq!(containing, 1);
    }

    #[test]
    fn next_tier_needs_points_unless_topmost(table in tier_table(), points in 0u64..10_000) {
        let in_top = get_tier_by_points(points, &table) == table.highest();
        match get_next_tier(points, &table) {
            Some(next) => {
                prop_assert!(!in_top);
                prop_assert!(next.points_needed > 0);
                prop_assert_eq!(next.tier.min_points, points + next.points_needed);
            }
            None => prop_assert!(in_top),
        }
    }

    #[test]
    fn empty_schedule_has_every_slot_open(barber in 0u32..3, date in 0u32..3, time in 0u32..20) {
        let barber_id = format!("barber{barber}");
        prop_assert!(is_slot_available(slot(time), &[], &barber_id, day(date)));
    }

    #[test]
    fn slot_is_taken_iff_a_live_appointment_matches(
        appointments in proptest::collection::vec(appointment(), 0..12),
        barber in 0u32..3,
        date in 0u32..3,
        time in 0u32..4,
    ) {
        let barber_id = format!("barber{barber}");
        let blocked = appointments.iter().any(|a| {
            a.status != AppointmentStatus::Cancelled
                && a.barber_id == barber_id
                && a.date == day(date)
                && a.time == slot(time)
        });
        prop_assert_eq!(
            is_slot_available(slot(time), &appointments, &barber_id, day(date)),
            !blocked
        );
    }

    #[test]
    fn cancelling_conflicts_frees_the_slot(
        mut appointments in proptest::collection::vec(appointment(), 1..12),
    ) {
        let target = appointments[0].clone();
        for a in appointments.iter_mut() {
            if a.occupies(&target.barber_id, target.date, target.time) {
                a.status = AppointmentStatus::Cancelled;
            }
        }
        prop_assert!(is_slot_available(target.time, &appointments, &target.barber_id, target.date));
    }

    #[test]
    fn paid_cut_cycles_below_ten(cuts in 0u32..DEFAULT_FREE_CUT_CYCLE, free in 0u32..100) {
        let mut customer = customer(cuts, free);
        let earned = record_paid_cut(&mut customer, DEFAULT_FREE_CUT_CYCLE);

        prop_assert!(customer.loyalty_cuts < DEFAULT_FREE_CUT_CYCLE);
        if cuts == DEFAULT_FREE_CUT_CYCLE - 1 {
            prop_assert!(earned);
            prop_assert_eq!(customer.loyalty_cuts, 0);
            prop_assert_eq!(customer.free_cuts_available, free + 1);
        } else {
            prop_assert!(!earned);
            prop_assert_eq!(customer.loyalty_cuts, cuts + 1);
            prop_assert_eq!(customer.free_cuts_available, free);
        }
    }

    #[test]
    fn redeem_spends_one_and_keeps_cycle(cuts in 0u32..DEFAULT_FREE_CUT_CYCLE, free in 0u32..100) {
        let mut customer = customer(cuts, free);
        match redeem_free_cut(&mut customer) {
            Ok(()) => {
                prop_assert!(free > 0);
                prop_assert_eq!(customer.free_cuts_available, free - 1);
            }
            Err(_) => {
                prop_assert_eq!(free, 0);
                prop_assert_eq!(customer.free_cuts_available, 0);
            }
        }
        prop_assert_eq!(customer.loyalty_cuts, cuts);
    }
}
