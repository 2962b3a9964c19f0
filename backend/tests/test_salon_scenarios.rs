//! End-to-end salon scenarios
//!
//! Each test runs a small salon to completion and checks the rendered trace
//! or the final customer outcomes.

use salon_simulator_core_rs::{
    BarberConfig, ClockFormat, CustomerConfig, CustomerOutcome, CustomerStatus, Salon,
    SalonConfig, ScenarioConfig, SimulationError,
};

fn trace(salon: &Salon) -> Vec<String> {
    let clock = ClockFormat::default();
    salon
        .event_log()
        .records()
        .iter()
        .map(|r| r.render(&clock))
        .collect()
}

fn single_barber(capacity: usize, close_time: usize, customers: Vec<CustomerConfig>) -> SalonConfig {
    SalonConfig {
        capacity,
        open_time: 0,
        close_time,
        barbers: vec![BarberConfig::new("Anne", 0, close_time)],
        customers,
        ..SalonConfig::default()
    }
}

fn outcome(salon: &Salon, name: &str) -> Option<CustomerOutcome> {
    salon.state().customer_by_name(name).and_then(|c| c.outcome())
}

#[test]
fn test_single_haircut_day() {
    let config = single_barber(1, 60, vec![CustomerConfig::new("Customer-1", 0, 20)]);
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(100).unwrap();

    assert_eq!(
        trace(&salon),
        vec![
            "[09:00] [Hair Salon] opened",
            "[09:00] [Anne] started shift",
            "[09:00] [Customer-1] entered",
            "[09:00] [Anne] started cutting [Customer-1]'s hair",
            "[09:20] [Anne] ended cutting [Customer-1]'s hair",
            "[09:20] [Customer-1] left satisfied",
            "[10:00] [Anne] ended shift",
            "[10:00] [Hair Salon] closed",
        ]
    );
}

#[test]
fn test_zero_capacity_rejects_every_walk_in() {
    let config = single_barber(0, 60, vec![CustomerConfig::new("Customer-1", 5, 20)]);
    let mut salon = Salon::new(config).unwrap();
    let report = salon.simulate(100).unwrap();

    let at_5: Vec<String> = trace(&salon)
        .into_iter()
        .filter(|line| line.starts_with("[09:05]"))
        .collect();
    assert_eq!(
        at_5,
        vec!["[09:05] [Customer-1] entered", "[09:05] [Customer-1] left impatiently"]
    );
    assert_eq!(report.rejected_full, 1);
    assert!(salon.event_log().events_of_type("HaircutStarted").is_empty());
}

#[test]
fn test_unserved_customer_leaves_at_deadline() {
    let config = single_barber(
        1,
        120,
        vec![
            CustomerConfig::new("Customer-1", 0, 60),
            CustomerConfig::new("Customer-2", 10, 20),
        ],
    );
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(200).unwrap();

    let departures = salon.event_log().events_for_customer("Customer-2");
    let last = departures.last().unwrap();
    assert_eq!(last.minute(), 40);
    assert_eq!(last.message(), "left unfulfilled");
    assert_eq!(outcome(&salon, "Customer-2"), Some(CustomerOutcome::Abandoned));
}

#[test]
fn test_closing_with_queue_turns_customers_away() {
    let config = SalonConfig {
        capacity: 5,
        open_time: 0,
        close_time: 100,
        barbers: vec![BarberConfig::new("Anne", 0, 100), BarberConfig::new("Ben", 0, 100)],
        customers: vec![
            CustomerConfig::new("Customer-1", 80, 20),
            CustomerConfig::new("Customer-2", 81, 19),
            CustomerConfig::new("Customer-3", 90, 20),
        ],
        ..SalonConfig::default()
    };
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(300).unwrap();

    let tail: Vec<String> = trace(&salon)
        .into_iter()
        .filter(|line| line.starts_with("[10:40]"))
        .collect();
    assert_eq!(
        tail,
        vec![
            "[10:40] [Anne] ended cutting [Customer-1]'s hair",
            "[10:40] [Customer-1] left satisfied",
            "[10:40] [Anne] ended shift",
            "[10:40] [Ben] ended cutting [Customer-2]'s hair",
            "[10:40] [Customer-2] left satisfied",
            "[10:40] [Ben] ended shift",
            "[10:40] [Customer-3] left furiously",
            "[10:40] [Hair Salon] closed",
        ]
    );
    assert_eq!(salon.event_log().last_minute(), Some(100));
}

#[test]
fn test_late_walk_in_rejected_closed() {
    let config = single_barber(
        2,
        60,
        vec![
            CustomerConfig::new("Customer-1", 50, 30),
            CustomerConfig::new("Customer-2", 61, 20),
        ],
    );
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(200).unwrap();

    assert_eq!(outcome(&salon, "Customer-1"), Some(CustomerOutcome::Satisfied));
    assert_eq!(outcome(&salon, "Customer-2"), Some(CustomerOutcome::RejectedClosed));
    assert!(trace(&salon).contains(&"[10:01] [Customer-2] left cursing themselves".to_string()));
}

#[test]
fn test_walk_in_at_closing_minute_is_admitted() {
    let config = SalonConfig {
        capacity: 2,
        open_time: 0,
        close_time: 60,
        barbers: vec![BarberConfig::new("Anne", 0, 90)],
        customers: vec![CustomerConfig::new("Customer-1", 60, 20)],
        ..SalonConfig::default()
    };
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(200).unwrap();

    assert_eq!(outcome(&salon, "Customer-1"), Some(CustomerOutcome::Satisfied));
}

#[test]
fn test_customer_after_closing_never_arrives() {
    let config = single_barber(1, 60, vec![CustomerConfig::new("Customer-1", 150, 20)]);
    let mut salon = Salon::new(config).unwrap();
    let report = salon.simulate(200).unwrap();

    let customer = salon.state().customer_by_name("Customer-1").unwrap();
    assert_eq!(customer.status(), CustomerStatus::NotStarted);
    assert_eq!(report.never_arrived, 1);
}

#[test]
fn test_earliest_started_barber_takes_the_customer() {
    let config = SalonConfig {
        capacity: 1,
        open_time: 0,
        close_time: 60,
        barbers: vec![BarberConfig::new("Zoe", 10, 60), BarberConfig::new("Anne", 0, 60)],
        customers: vec![CustomerConfig::new("Customer-1", 10, 20)],
        ..SalonConfig::default()
    };
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(100).unwrap();

    let lines = trace(&salon);
    assert!(lines.contains(&"[09:10] [Anne] started cutting [Customer-1]'s hair".to_string()));
    assert_eq!(
        salon.state().barber_by_name("Zoe").unwrap().customers_served(),
        0
    );
}

#[test]
fn test_oversized_service_duration_is_rejected() {
    let config = single_barber(1, 60, vec![CustomerConfig::new("Customer-1", 1, usize::MAX)]);

    assert!(matches!(
        Salon::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));
}

#[test]
fn test_invalid_configs_are_rejected() {
    let no_barbers = SalonConfig {
        barbers: vec![],
        ..single_barber(1, 60, vec![])
    };
    let empty_shift = SalonConfig {
        barbers: vec![BarberConfig::new("Anne", 0, 60), BarberConfig::new("Ben", 30, 30)],
        ..single_barber(1, 60, vec![])
    };
    let no_patience = SalonConfig {
        max_wait: 0,
        ..single_barber(1, 60, vec![])
    };
    let unnamed = single_barber(1, 60, vec![CustomerConfig::new("", 0, 20)]);
    let uncovered = SalonConfig {
        barbers: vec![BarberConfig::new("Anne", 0, 30)],
        ..single_barber(1, 60, vec![])
    };

    for config in [no_barbers, empty_shift, no_patience, unnamed, uncovered] {
        assert!(matches!(
            Salon::new(config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_standard_day_resolves_every_arrival() {
    let scenario = ScenarioConfig::standard_day();
    let mut salon = scenario.build().unwrap();
    let report = salon.simulate(scenario.horizon).unwrap();

    assert!(salon.is_closed());
    assert_eq!(report.still_waiting, 0);
    assert_eq!(report.in_service, 0);
    assert_eq!(report.finished() + report.never_arrived, 48);

    let served: usize = report.barbers.iter().map(|b| b.customers_served).sum();
    assert_eq!(served, report.satisfied);

    // Every arrival is either turned away or served
    for customer in salon.state().customers() {
        if customer.status() != CustomerStatus::NotStarted {
            assert!(customer.is_finished(), "{} unresolved", customer.name());
        }
    }
}

#[test]
fn test_standard_day_is_reproducible() {
    let scenario = ScenarioConfig::standard_day();

    let first = scenario.build().unwrap().simulate(scenario.horizon).unwrap();
    let second = scenario.build().unwrap().simulate(scenario.horizon).unwrap();

    assert_eq!(first.trace_digest, second.trace_digest);
    assert_eq!(first.config_hash, second.config_hash);
    assert_eq!(first, second);
}
