use std::cell::{Cell, RefCell};
use std::rc::Rc;

use analysis_dashboard::core::{DataPoint, SeriesRef};
use analysis_dashboard::loader::{LoadTicket, SeriesCache, SeriesStore};
use proptest::prelude::*;

fn reject_requests(series_id: &str) {
    panic!("unexpected request for series `{series_id}`");
}

fn refs(ids: &[&str]) -> Vec<SeriesRef> {
    ids.iter()
        .map(|id| SeriesRef::new(*id, format!("series {id}")))
        .collect()
}

fn points(y: f64) -> Vec<DataPoint> {
    vec![DataPoint::new(1.0, y), DataPoint::new(2.0, y + 1.0)]
}

fn recording_store() -> (SeriesStore<impl FnMut(&str)>, Rc<RefCell<Vec<String>>>) {
    let requested = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requested);
    let store = SeriesStore::new(move |id: &str| sink.borrow_mut().push(id.to_owned()));
    (store, requested)
}

#[test]
fn all_cached_series_fire_synchronously_without_requests() {
    let mut cache = SeriesCache::new();
    cache.insert("cpu", points(1.0));
    cache.insert("mem", points(2.0));
    let mut store = SeriesStore::with_cache(reject_requests, cache);

    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    let ticket = store
        .load_series_data(&refs(&["cpu", "mem"]), move |cache| {
            assert!(cache.contains("cpu") && cache.contains("mem"));
            counter.set(counter.get() + 1);
        })
        .expect("load");

    assert_eq!(ticket, LoadTicket::Ready);
    assert_eq!(fired.get(), 1);
    assert_eq!(store.pending_count(), 0);
    assert_eq!(store.waiter_count(), 0);
}

#[test]
fn empty_series_list_is_ready_immediately() {
    let (mut store, requested) = recording_store();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);

    let ticket = store
        .load_series_data(&[], move |_| flag.set(true))
        .expect("load");

    assert!(ticket.is_ready());
    assert!(fired.get());
    assert!(requested.borrow().is_empty());
}

#[test]
fn only_missing_series_are_requested() {
    let mut cache = SeriesCache::new();
    cache.insert("cpu", points(1.0));
    let requested = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requested);
    let mut store =
        SeriesStore::with_cache(move |id: &str| sink.borrow_mut().push(id.to_owned()), cache);

    store
        .load_series_data(&refs(&["cpu", "mem", "disk"]), |_| {})
        .expect("load");

    assert_eq!(*requested.borrow(), vec!["mem", "disk"]);
    assert_eq!(store.pending_ids().collect::<Vec<_>>(), vec!["mem", "disk"]);
}

#[test]
fn fires_once_after_last_missing_series_arrives() {
    let (mut store, _) = recording_store();
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);

    let ticket = store
        .load_series_data(&refs(&["a", "b", "c"]), move |cache| {
            assert_eq!(cache.len(), 3);
            counter.set(counter.get() + 1);
        })
        .expect("load");
    assert!(ticket.request_id().is_some());

    assert_eq!(store.notify_loaded("b", points(1.0)), 0);
    assert_eq!(store.notify_loaded("a", points(2.0)), 0);
    assert_eq!(fired.get(), 0);
    assert_eq!(store.notify_loaded("c", points(3.0)), 1);
    assert_eq!(fired.get(), 1);

    // A late duplicate notification must not fire again.
    assert_eq!(store.notify_loaded("c", points(9.0)), 0);
    assert_eq!(fired.get(), 1);
    assert_eq!(store.cache().get("c"), Some(points(3.0).as_slice()));
}

#[test]
fn overlapping_requests_each_get_their_own_completion() {
    let (mut store, requested) = recording_store();
    let fired = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&fired);
    store
        .load_series_data(&refs(&["a", "shared"]), move |_| first.borrow_mut().push(1))
        .expect("first load");
    let second = Rc::clone(&fired);
    store
        .load_series_data(&refs(&["shared", "b"]), move |_| second.borrow_mut().push(2))
        .expect("second load");

    assert_eq!(*requested.borrow(), vec!["a", "shared", "b"]);

    store.notify_loaded("shared", points(0.0));
    store.notify_loaded("b", points(0.0));
    assert_eq!(*fired.borrow(), vec![2]);
    store.notify_loaded("a", points(0.0));
    assert_eq!(*fired.borrow(), vec![2, 1]);
    assert_eq!(store.pending_count(), 0);
}

#[test]
fn requests_completed_by_the_same_series_fire_in_registration_order() {
    let (mut store, _) = recording_store();
    let fired = Rc::new(RefCell::new(Vec::new()));

    for tag in ["first", "second", "third"] {
        let sink = Rc::clone(&fired);
        store
            .load_series_data(&refs(&["x"]), move |_| sink.borrow_mut().push(tag))
            .expect("load");
    }

    assert_eq!(store.notify_loaded("x", points(0.0)), 3);
    assert_eq!(*fired.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn cancelled_request_never_fires_but_still_fills_cache() {
    let (mut store, _) = recording_store();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);

    let ticket = store
        .load_series_data(&refs(&["a"]), move |_| flag.set(true))
        .expect("load");
    let request_id = ticket.request_id().expect("pending request");

    assert!(store.cancel(request_id));
    assert!(!store.cancel(request_id));
    store.notify_loaded("a", points(0.0));

    assert!(!fired.get());
    assert!(store.cache().contains("a"));
}

#[test]
fn in_flight_series_is_not_requested_again_after_cancel() {
    let (mut store, requested) = recording_store();

    let ticket = store.load_series_data(&refs(&["a"]), |_| {}).expect("load");
    store.cancel(ticket.request_id().expect("pending"));
    store.load_series_data(&refs(&["a"]), |_| {}).expect("reload");

    assert_eq!(*requested.borrow(), vec!["a"]);
}

#[test]
fn unrequested_notification_still_populates_cache() {
    let (mut store, _) = recording_store();
    assert_eq!(store.notify_loaded("preloaded", points(5.0)), 0);
    assert!(store.cache().contains("preloaded"));
}

proptest! {
    #[test]
    fn completion_is_independent_of_arrival_order(
        order in Just((0..6).collect::<Vec<usize>>()).prop_shuffle()
    ) {
        let ids: Vec<String> = (0..6).map(|i| format!("s{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let (mut store, requested) = recording_store();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);

        store
            .load_series_data(&refs(&id_refs), move |_| counter.set(counter.get() + 1))
            .expect("load");
        prop_assert_eq!(requested.borrow().len(), 6);

        for (step, index) in order.iter().enumerate() {
            prop_assert_eq!(fired.get(), 0);
            store.notify_loaded(&ids[*index], points(step as f64));
        }
        prop_assert_eq!(fired.get(), 1);
        prop_assert_eq!(store.pending_count(), 0);
        prop_assert_eq!(store.waiter_count(), 0);
    }
}
