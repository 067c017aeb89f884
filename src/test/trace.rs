use crate::net::RouterId;
use crate::sim::{DvrOpts, Simulation};
use crate::topo::sample::build_sample;
use crate::viz::{TraceEventKind, TraceLog};

#[test]
fn trace_starts_with_topology_and_ends_with_convergence() {
    let mut sim = Simulation::default();
    build_sample(&mut sim).unwrap();
    sim.trace = Some(TraceLog::default());
    sim.run().unwrap();

    let events = &sim.trace.as_ref().expect("trace enabled").events;
    assert_eq!(events.len(), 1 + 3 + 1);

    match &events[0].kind {
        TraceEventKind::Topology { routers, links } => {
            assert_eq!(routers, &vec![RouterId(1), RouterId(2), RouterId(3)]);
            assert_eq!(links.len(), 3);
        }
        other => panic!("expected Topology event, got {other:?}"),
    }
    assert_eq!(events[0].seq, 0);

    let stepped: Vec<RouterId> = events
        .iter()
        .filter_map(|e| match &e.kind {
            TraceEventKind::Step { router, table, .. } => {
                assert_eq!(table.router, *router);
                Some(*router)
            }
            _ => None,
        })
        .collect();
    assert_eq!(stepped, vec![RouterId(1), RouterId(2), RouterId(3)]);

    assert!(matches!(
        events.last().unwrap().kind,
        TraceEventKind::Converged { rounds: 1 }
    ));
}

#[test]
fn trace_records_max_iterations_outcome() {
    let mut sim = Simulation::new(DvrOpts {
        max_rounds: 1,
        ..DvrOpts::default()
    });
    let ids: Vec<RouterId> = (0..4).map(|_| sim.add_router()).collect();
    for w in ids.windows(2) {
        sim.add_link(w[0], w[1], 1.0).unwrap();
    }
    sim.trace = Some(TraceLog::default());
    sim.run().unwrap();

    let events = &sim.trace.as_ref().unwrap().events;
    assert!(matches!(
        events.last().unwrap().kind,
        TraceEventKind::MaxIterations { rounds: 1 }
    ));
}

#[test]
fn rerun_clears_previous_trace() {
    let mut sim = Simulation::default();
    build_sample(&mut sim).unwrap();
    sim.trace = Some(TraceLog::default());
    sim.run().unwrap();
    sim.run().unwrap();

    let events = &sim.trace.as_ref().unwrap().events;
    let metas = events
        .iter()
        .filter(|e| matches!(e.kind, TraceEventKind::Topology { .. }))
        .count();
    assert_eq!(metas, 1);
}

#[test]
fn trace_events_serialize_with_kind_tag() {
    let mut sim = Simulation::default();
    build_sample(&mut sim).unwrap();
    sim.trace = Some(TraceLog::default());
    sim.run().unwrap();

    let v = serde_json::to_value(&sim.trace.as_ref().unwrap().events).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr[0]["kind"], "topology");
    assert_eq!(arr[1]["kind"], "step");
    assert_eq!(arr[1]["router"], 1);
    assert_eq!(arr[1]["round"], 1);
    assert_eq!(arr.last().unwrap()["kind"], "converged");
}

#[test]
fn manual_stepping_after_an_edit_starts_a_fresh_trace() {
    let mut sim = Simulation::default();
    build_sample(&mut sim).unwrap();
    sim.trace = Some(TraceLog::default());
    while sim.step().unwrap() {}

    let r4 = sim.add_router();
    sim.add_link(RouterId(3), r4, 1.0).unwrap();
    while sim.step().unwrap() {}

    let events = &sim.trace.as_ref().unwrap().events;
    let metas: Vec<_> = events
        .iter()
        .filter_map(|e| match &e.kind {
            TraceEventKind::Topology { routers, .. } => Some(routers.len()),
            _ => None,
        })
        .collect();
    assert_eq!(metas, vec![4]);
    assert!(matches!(events[0].kind, TraceEventKind::Topology { .. }));
    let converged = events
        .iter()
        .filter(|e| matches!(e.kind, TraceEventKind::Converged { .. }))
        .count();
    assert_eq!(converged, 1);
}
