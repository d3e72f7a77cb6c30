use super::*;

#[test]
fn tickets_increase_monotonically() {
    let mut stream = RequestStream::default();
    let a = stream.issue();
    let b = stream.issue();
    assert!(b > a);
    assert_eq!(a.seq(), 1);
    assert_eq!(b.seq(), 2);
}

#[test]
fn latest_ticket_is_applied_once() {
    let mut stream = RequestStream::default();
    let ticket = stream.issue();
    assert_eq!(stream.accept(ticket), Resolution::Applied);
    assert_eq!(stream.accept(ticket), Resolution::Stale);
    assert_eq!(stream.last_applied(), 1);
}

#[test]
fn older_ticket_is_stale_after_newer_applied() {
    let mut stream = RequestStream::default();
    let first = stream.issue();
    let second = stream.issue();

    assert!(stream.accept(second).is_applied());
    assert_eq!(stream.accept(first), Resolution::Stale);
    assert_eq!(stream.last_applied(), second.seq());
}

#[test]
fn older_ticket_is_stale_even_when_it_arrives_first() {
    let mut stream = RequestStream::default();
    let first = stream.issue();
    let second = stream.issue();

    assert_eq!(stream.accept(first), Resolution::Stale);
    assert!(stream.accept(second).is_applied());
}

#[test]
fn invalidate_stales_outstanding_tickets() {
    let mut stream = RequestStream::default();
    let ticket = stream.issue();
    stream.invalidate();
    assert!(!stream.is_current(ticket));
    assert_eq!(stream.accept(ticket), Resolution::Stale);

    let next = stream.issue();
    assert!(stream.is_current(next));
}
