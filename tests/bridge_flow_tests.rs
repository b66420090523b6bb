use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kline_bridge::api::{
    BridgeConfig, ChartBridge, ChartCapabilities, HostState, SessionState, WatchedSlot,
};
use kline_bridge::core::{ChartOptions, Coordinate, IndicatorFilter, KLineData, Precision};
use kline_bridge::extensions::{BridgeEvent, FnObserver};
use kline_bridge::protocol::{ChartOperation, OperationName, RecordingTransport};
use kline_bridge::BridgeError;
use serde_json::json;

fn recording_observer(
    id: &str,
) -> (
    Box<FnObserver<impl FnMut(&BridgeEvent)>>,
    Rc<RefCell<Vec<BridgeEvent>>>,
) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let observer = FnObserver::new(id, move |event: &BridgeEvent| {
        sink.borrow_mut().push(event.clone());
    });
    (Box::new(observer), events)
}

fn build_bridge(config: &BridgeConfig) -> (ChartBridge<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::new();
    let bridge = ChartBridge::new(transport.clone(), config);
    (bridge, transport)
}

fn make_ready(bridge: &mut ChartBridge<RecordingTransport>) {
    bridge.on_surface_loaded().expect("init");
    bridge.inbound_sender().deliver("inited");
    assert!(bridge.pump_inbound().expect("pump"));
}

#[test]
fn surface_load_sends_init_with_configured_options() {
    let options = ChartOptions::default()
        .with_timezone("Europe/Berlin")
        .with_styles(json!({"grid": {"show": false}}));
    let (mut bridge, transport) = build_bridge(&BridgeConfig::new(options.clone()));

    bridge.on_surface_loaded().expect("init");

    let envelopes = transport.envelopes().expect("decode");
    assert_eq!(envelopes.len(), 1);
    assert_eq!(
        ChartOperation::from_envelope(&envelopes[0]).expect("typed"),
        ChartOperation::Init { options }
    );
    assert_eq!(bridge.session_state(), SessionState::Bootstrapping);
}

#[test]
fn capability_calls_before_ready_are_dropped_silently() {
    let (mut bridge, transport) = build_bridge(&BridgeConfig::default());
    let (observer, events) = recording_observer("spy");
    bridge.register_observer(observer).expect("register");

    bridge.resize().expect("dropped, not an error");
    bridge
        .scroll_to_real_time(Some(200))
        .expect("dropped, not an error");

    assert!(transport.messages().is_empty());
    assert_eq!(
        *events.borrow(),
        vec![
            BridgeEvent::OperationDropped {
                name: OperationName::Resize
            },
            BridgeEvent::OperationDropped {
                name: OperationName::ScrollToRealTime
            },
        ]
    );
}

#[test]
fn capability_calls_after_ready_are_sent_in_call_order() {
    let (mut bridge, transport) = build_bridge(&BridgeConfig::default());
    make_ready(&mut bridge);
    transport.clear();

    bridge.scroll_by_distance(50.0, None).expect("scroll");
    bridge
        .zoom_at_coordinate(1.2, Some(Coordinate::new(10.0, 20.0)), Some(100))
        .expect("zoom");
    bridge.zoom_at_data_index(0.8, 4, None).expect("zoom index");
    bridge.zoom_at_timestamp(1.1, 1_000, None).expect("zoom ts");
    bridge.scroll_to_data_index(9, Some(10)).expect("scroll index");
    bridge.scroll_to_timestamp(2_000, None).expect("scroll ts");
    bridge
        .remove_indicator(Some(IndicatorFilter::by_name("MA")))
        .expect("remove");
    bridge.create_indicator("EMA".into(), None, None).expect("create");
    bridge.set_precision(Precision::price_only(5)).expect("precision");
    bridge.set_styles(json!({"candle": {}})).expect("styles");
    bridge.apply_new_data(Vec::new(), None).expect("data");
    bridge.resize().expect("resize");

    assert_eq!(
        transport.function_names(),
        vec![
            OperationName::ScrollByDistance,
            OperationName::ZoomAtCoordinate,
            OperationName::ZoomAtDataIndex,
            OperationName::ZoomAtTimestamp,
            OperationName::ScrollToDataIndex,
            OperationName::ScrollToTimestamp,
            OperationName::RemoveIndicator,
            OperationName::CreateIndicator,
            OperationName::SetPrecision,
            OperationName::SetStyles,
            OperationName::ApplyNewData,
            OperationName::Resize,
        ]
    );
}

#[test]
fn explicit_calls_do_not_touch_the_snapshot_memo() {
    let (mut bridge, transport) = build_bridge(&BridgeConfig::default());
    make_ready(&mut bridge);
    transport.clear();

    bridge.set_precision(Precision::new(2, 0)).expect("explicit");
    assert!(bridge.snapshot_memo().get(WatchedSlot::Precision).is_none());

    bridge
        .update_host_state(HostState::default().with_precision(Precision::new(2, 0)))
        .expect("watched");
    assert_eq!(
        transport.function_names(),
        vec![OperationName::SetPrecision, OperationName::SetPrecision]
    );
}

#[test]
fn update_data_streams_a_single_bar_on_request() {
    let (mut bridge, transport) = build_bridge(&BridgeConfig::default());
    make_ready(&mut bridge);
    transport.clear();

    let last = KLineData::new(60_000, 10.0, 11.0, 9.5, 10.5)
        .expect("bar")
        .with_volume(1_200.0)
        .expect("volume");
    bridge.update_data(last.clone()).expect("stream");

    let envelopes = transport.envelopes().expect("decode");
    assert_eq!(envelopes[0].function, OperationName::UpdateData);
    assert_eq!(
        envelopes[0].params["data"],
        serde_json::to_value(&last).expect("bar json")
    );
}

#[test]
fn inited_fires_once_even_when_repeated() {
    let (mut bridge, _transport) = build_bridge(&BridgeConfig::default());
    let (observer, events) = recording_observer("spy");
    bridge.register_observer(observer).expect("register");

    bridge.on_surface_loaded().expect("init");
    let sender = bridge.inbound_sender();
    sender.deliver("inited");
    sender.deliver("inited");
    assert!(bridge.pump_inbound().expect("pump"));

    sender.deliver("inited");
    assert!(!bridge.pump_inbound().expect("pump again"));

    let inited = events
        .borrow()
        .iter()
        .filter(|event| matches!(event, BridgeEvent::Inited { .. }))
        .count();
    assert_eq!(inited, 1);
    assert_eq!(bridge.session_state(), SessionState::Ready);
}

#[test]
fn unrecognized_inbound_messages_leave_the_session_bootstrapping() {
    let (mut bridge, transport) = build_bridge(
        &BridgeConfig::default().with_precision(Precision::new(2, 0)),
    );
    bridge.on_surface_loaded().expect("init");

    let sender = bridge.inbound_sender();
    sender.deliver("ready");
    sender.deliver(r#"{"function":"inited"}"#);
    assert!(!bridge.pump_inbound().expect("pump"));

    assert_eq!(bridge.session_state(), SessionState::Bootstrapping);
    assert_eq!(bridge.observe().expect("observe"), 0);
    assert_eq!(transport.function_names(), vec![OperationName::Init]);
}

#[test]
fn configured_state_is_synced_right_after_ready() {
    let config = BridgeConfig::new(ChartOptions::default().with_styles(json!({"grid": {}})))
        .with_precision(Precision::new(2, 0))
        .with_data_list(Vec::new());
    let (mut bridge, transport) = build_bridge(&config);

    make_ready(&mut bridge);

    assert_eq!(
        transport.function_names(),
        vec![
            OperationName::Init,
            OperationName::SetStyles,
            OperationName::SetPrecision,
            OperationName::ApplyNewData,
        ]
    );
}

#[test]
fn reload_starts_a_new_session_and_resends_every_slot() {
    let config = BridgeConfig::default().with_precision(Precision::new(2, 0));
    let (mut bridge, transport) = build_bridge(&config);
    make_ready(&mut bridge);
    assert_eq!(bridge.snapshot_memo().len(), 1);

    let session_id = bridge.reload_surface();
    assert_eq!(session_id, 1);
    assert_eq!(bridge.session_state(), SessionState::Bootstrapping);
    assert!(bridge.snapshot_memo().is_empty());
    assert_eq!(bridge.entrance_transition(), None);

    transport.clear();
    make_ready(&mut bridge);
    assert_eq!(
        transport.function_names(),
        vec![OperationName::Init, OperationName::SetPrecision]
    );
}

#[test]
fn stale_inited_from_previous_surface_is_discarded_on_reload() {
    let (mut bridge, _transport) = build_bridge(&BridgeConfig::default());
    bridge.on_surface_loaded().expect("init");
    bridge.inbound_sender().deliver("inited");

    bridge.reload_surface();
    assert!(!bridge.pump_inbound().expect("pump"));
    assert_eq!(bridge.session_state(), SessionState::Bootstrapping);
}

#[test]
fn transport_fault_is_reported_and_leaves_the_slot_dirty() {
    let (mut bridge, transport) = build_bridge(&BridgeConfig::default());
    let (observer, events) = recording_observer("spy");
    bridge.register_observer(observer).expect("register");
    make_ready(&mut bridge);

    transport.fail_with("web content process terminated");
    let err = bridge
        .update_host_state(HostState::default().with_precision(Precision::new(1, 1)))
        .expect_err("fault");
    assert!(matches!(err, BridgeError::Transport(_)));
    assert!(bridge.snapshot_memo().get(WatchedSlot::Precision).is_none());
    assert!(events.borrow().contains(&BridgeEvent::TransportFault {
        detail: "web content process terminated".to_owned()
    }));

    transport.clear_fault();
    transport.clear();
    assert_eq!(bridge.observe().expect("observe"), 1);
    assert_eq!(
        transport.function_names(),
        vec![OperationName::SetPrecision]
    );
}

#[test]
fn surface_errors_are_forwarded_to_observers() {
    let (mut bridge, _transport) = build_bridge(&BridgeConfig::default());
    let (observer, events) = recording_observer("spy");
    bridge.register_observer(observer).expect("register");

    bridge.on_surface_error("failed to load about:blank");

    assert_eq!(
        *events.borrow(),
        vec![BridgeEvent::TransportFault {
            detail: "failed to load about:blank".to_owned()
        }]
    );
}

#[test]
fn init_sent_before_the_surface_loaded_is_lost() {
    let transport = RecordingTransport::unloaded();
    let mut bridge = ChartBridge::new(transport.clone(), &BridgeConfig::default());

    bridge.on_surface_loaded().expect("no error");

    assert!(transport.messages().is_empty());
    assert_eq!(transport.dropped_count(), 1);
    assert!(!bridge.pump_inbound().expect("nothing inbound"));
    assert_eq!(bridge.session_state(), SessionState::Bootstrapping);
}

#[test]
fn entrance_transition_is_offered_once_ready() {
    let (mut bridge, _transport) = build_bridge(&BridgeConfig::default());
    assert_eq!(bridge.entrance_transition(), None);
    make_ready(&mut bridge);
    assert_eq!(
        bridge.entrance_transition(),
        Some(Duration::from_millis(500))
    );

    let (mut plain, _transport) = build_bridge(&BridgeConfig::default().with_fade_in(None));
    make_ready(&mut plain);
    assert_eq!(plain.entrance_transition(), None);
}

#[test]
fn debug_trace_counts_only_when_enabled() {
    let (mut quiet, _transport) = build_bridge(&BridgeConfig::default());
    make_ready(&mut quiet);
    quiet.resize().expect("resize");
    assert_eq!(quiet.debug_trace().count(), 0);
    assert_eq!(quiet.debug_trace().last_message(), None);

    let (mut verbose, _transport) = build_bridge(&BridgeConfig::default().with_debug(true));
    make_ready(&mut verbose);
    let before = verbose.debug_trace().count();
    verbose.resize().expect("resize");
    assert_eq!(verbose.debug_trace().count(), before + 1);
    assert_eq!(
        verbose.debug_trace().last_message(),
        Some("calling function: resize")
    );
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let (mut bridge, _transport) = build_bridge(&BridgeConfig::default());
    let (first, _) = recording_observer("widget");
    let (duplicate, _) = recording_observer("widget");
    let (anonymous, _) = recording_observer("");

    bridge.register_observer(first).expect("first");
    assert!(bridge.register_observer(duplicate).is_err());
    assert!(bridge.register_observer(anonymous).is_err());
    assert_eq!(bridge.observer_count(), 1);

    assert!(bridge.unregister_observer("widget"));
    assert!(!bridge.unregister_observer("widget"));
    assert_eq!(bridge.observer_count(), 0);
}

#[test]
fn boxed_transport_objects_are_accepted() {
    let recorder = RecordingTransport::new();
    let boxed: Box<dyn kline_bridge::protocol::OutboundTransport> = Box::new(recorder.clone());
    let mut bridge = ChartBridge::new(boxed, &BridgeConfig::default());

    bridge.on_surface_loaded().expect("init");
    assert_eq!(recorder.function_names(), vec![OperationName::Init]);
}
