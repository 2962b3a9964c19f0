// Ordering of the tick phases within a single minute.

use crate::orchestrator::engine::{BarberConfig, CustomerConfig, Salon, SalonConfig};

fn lines_at(salon: &Salon, minute: usize) -> Vec<String> {
    salon
        .event_log()
        .events_at_minute(minute)
        .iter()
        .map(|e| format!("{} {}", e.actor(), e.message()))
        .collect()
}

#[test]
fn test_opening_precedes_everything_else() {
    let config = SalonConfig {
        capacity: 1,
        open_time: 0,
        close_time: 60,
        barbers: vec![BarberConfig::new("Anne", 0, 60)],
        customers: vec![CustomerConfig::new("Customer-1", 0, 20)],
        ..SalonConfig::default()
    };
    let mut salon = Salon::new(config).unwrap();
    salon.tick().unwrap();

    assert_eq!(
        lines_at(&salon, 0),
        vec![
            "Hair Salon opened",
            "Anne started shift",
            "Customer-1 entered",
            "Anne started cutting [Customer-1]'s hair",
        ]
    );
}

#[test]
fn test_haircut_straddling_closing_keeps_salon_open() {
    let config = SalonConfig {
        capacity: 1,
        open_time: 0,
        close_time: 60,
        barbers: vec![BarberConfig::new("Anne", 0, 60)],
        customers: vec![
            CustomerConfig::new("Customer-1", 50, 25),
            CustomerConfig::new("Customer-2", 65, 20),
        ],
        ..SalonConfig::default()
    };
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(200).unwrap();

    assert!(lines_at(&salon, 60).is_empty());
    assert_eq!(
        lines_at(&salon, 65),
        vec!["Customer-2 entered", "Customer-2 left cursing themselves"]
    );
    assert_eq!(
        lines_at(&salon, 75),
        vec![
            "Anne ended cutting [Customer-1]'s hair",
            "Customer-1 left satisfied",
            "Anne ended shift",
            "Hair Salon closed",
        ]
    );
    assert_eq!(salon.closed_at(), Some(75));
}

#[test]
fn test_barber_freed_at_deadline_still_serves() {
    let config = SalonConfig {
        capacity: 1,
        open_time: 0,
        close_time: 100,
        barbers: vec![BarberConfig::new("Anne", 0, 100)],
        customers: vec![
            CustomerConfig::new("Customer-1", 0, 40),
            CustomerConfig::new("Customer-2", 10, 20),
        ],
        ..SalonConfig::default()
    };
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(40).unwrap();

    assert_eq!(
        salon.state().customer_by_name("Customer-2").unwrap().queue_deadline(),
        Some(40)
    );
    assert_eq!(
        lines_at(&salon, 40),
        vec![
            "Anne ended cutting [Customer-1]'s hair",
            "Customer-1 left satisfied",
            "Anne started cutting [Customer-2]'s hair",
        ]
    );
}

#[test]
fn test_shift_handover_serves_waiting_customer() {
    let config = SalonConfig {
        capacity: 2,
        open_time: 0,
        close_time: 60,
        barbers: vec![BarberConfig::new("Anne", 0, 30), BarberConfig::new("Erin", 30, 60)],
        customers: vec![
            CustomerConfig::new("Customer-1", 0, 30),
            CustomerConfig::new("Customer-2", 5, 10),
        ],
        ..SalonConfig::default()
    };
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(30).unwrap();

    assert_eq!(
        lines_at(&salon, 30),
        vec![
            "Anne ended cutting [Customer-1]'s hair",
            "Customer-1 left satisfied",
            "Anne ended shift",
            "Erin started shift",
            "Erin started cutting [Customer-2]'s hair",
        ]
    );
    assert_eq!(salon.state().active_barbers().len(), 1);
    assert!(salon.state().pending_barbers().is_empty());
}

#[test]
fn test_fifo_order_under_contention() {
    let config = SalonConfig {
        capacity: 3,
        open_time: 0,
        close_time: 120,
        barbers: vec![BarberConfig::new("Anne", 0, 120)],
        customers: vec![
            CustomerConfig::new("Customer-1", 0, 10),
            CustomerConfig::new("Customer-2", 1, 10),
            CustomerConfig::new("Customer-3", 2, 10),
            CustomerConfig::new("Customer-4", 3, 10),
        ],
        ..SalonConfig::default()
    };
    let mut salon = Salon::new(config).unwrap();
    salon.simulate(120).unwrap();

    let served: Vec<&str> = salon
        .event_log()
        .events_of_type("HaircutStarted")
        .iter()
        .filter_map(|e| e.customer())
        .collect();
    assert_eq!(served, vec!["Customer-1", "Customer-2", "Customer-3", "Customer-4"]);
    assert_eq!(
        salon.event_log().events_of_type("HaircutStarted")[3].minute(),
        30
    );
}
