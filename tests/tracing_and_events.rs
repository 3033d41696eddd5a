//! Integration tests for tracing and event monitoring.
//!
//! Each test declares its own registry, so they can run in parallel.

use singleton_manager::{define_local_registry, define_registry, RegistryEvent};
use std::sync::{Arc, Mutex};

fn collect(events: &Arc<Mutex<Vec<String>>>) -> impl Fn(&RegistryEvent) + Send + Sync + 'static {
    let events = events.clone();
    move |event| events.lock().unwrap().push(event.to_string())
}

#[test]
fn test_basic_tracing() {
    define_registry!(traced1);

    let events = Arc::new(Mutex::new(Vec::new()));
    traced1::set_trace_callback(collect(&events));

    traced1::register(42i32).unwrap();
    let _: Arc<i32> = traced1::get().unwrap();
    let _ = traced1::has_been_registered::<i32>();

    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            "register { type_name: i32, registered: true }",
            "get { type_name: i32, found: true }",
            "contains { type_name: i32, found: true }",
        ]
    );
}

#[test]
fn test_rejected_operations_are_traced() {
    define_registry!(traced2);

    let events = Arc::new(Mutex::new(Vec::new()));
    traced2::set_trace_callback(collect(&events));

    traced2::register(1u32).unwrap();
    let _ = traced2::register(2u32);
    let _ = traced2::get::<f32>();
    let _ = traced2::unregister::<f32>();

    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            "register { type_name: u32, registered: true }",
            "register { type_name: u32, registered: false }",
            "get { type_name: f32, found: false }",
            "unregister { type_name: f32, found: false }",
        ]
    );

    traced2::clear_trace_callback();
}

#[test]
fn test_replace_and_clear_events() {
    define_local_registry!(traced3);

    let events = Arc::new(Mutex::new(Vec::new()));
    traced3::set_trace_callback(collect(&events));

    traced3::register_or_replace(1i64);
    traced3::register_or_replace(2i64);
    traced3::register_or_replace("x".to_string());
    traced3::clear();

    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            "replace { type_name: i64, replaced: false }",
            "replace { type_name: i64, replaced: true }",
            "replace { type_name: alloc::string::String, replaced: false }",
            "clear { entries: 2 }",
        ]
    );
}

#[test]
fn test_clear_trace_callback() {
    define_registry!(traced5);

    let events = Arc::new(Mutex::new(Vec::new()));
    traced5::set_trace_callback(collect(&events));

    traced5::register(1u8).unwrap();
    traced5::clear_trace_callback();

    traced5::register_or_replace(2u8);
    let _: Arc<u8> = traced5::get().unwrap();

    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_trace_callback_with_custom_logic() {
    define_registry!(traced6);

    let counts = Arc::new(Mutex::new((0, 0, 0)));
    let counts_clone = counts.clone();

    traced6::set_trace_callback(move |event| {
        let mut counts = counts_clone.lock().unwrap();
        match event {
            RegistryEvent::Register { .. } | RegistryEvent::Replace { .. } => counts.0 += 1,
            RegistryEvent::Get { .. } => counts.1 += 1,
            RegistryEvent::Contains { .. } => counts.2 += 1,
            _ => {}
        }
    });

    traced6::register(10i16).unwrap();
    traced6::register_or_replace(20i16);
    let _: Arc<i16> = traced6::get().unwrap();
    let _ = traced6::try_get::<i16>();
    let _ = traced6::has_been_registered::<i16>();

    assert_eq!(*counts.lock().unwrap(), (2, 2, 1));

    traced6::clear_trace_callback();
}

#[test]
fn test_trace_callback_replacement() {
    define_registry!(traced7);

    let events1 = Arc::new(Mutex::new(Vec::new()));
    let events2 = Arc::new(Mutex::new(Vec::new()));

    traced7::set_trace_callback(collect(&events1));
    traced7::register(100usize).unwrap();

    traced7::set_trace_callback(collect(&events2));
    traced7::register_or_replace(200usize);

    assert_eq!(events1.lock().unwrap().len(), 1);
    assert_eq!(events2.lock().unwrap().len(), 1);

    traced7::clear_trace_callback();
}

#[test]
fn test_callback_can_use_different_registry() {
    define_registry!(main_registry);
    define_registry!(log_registry);

    main_registry::set_trace_callback(move |event| {
        log_registry::register_or_replace(format!("Last event: {}", event));
    });

    main_registry::register(42i32).unwrap();
    let value: Arc<i32> = main_registry::get().unwrap();
    assert_eq!(*value, 42);

    let last_log: Arc<String> = log_registry::get().unwrap();
    assert_eq!(
        &**last_log,
        "Last event: get { type_name: i32, found: true }"
    );

    main_registry::clear_trace_callback();
}

#[test]
fn test_callback_can_use_own_registry() {
    define_registry!(self_logging);

    self_logging::set_trace_callback(|event| {
        if let RegistryEvent::Register { .. } = event {
            self_logging::register_or_replace(event.clone());
        }
    });

    self_logging::register(5u8).unwrap();
    self_logging::clear_trace_callback();

    assert_eq!(
        *self_logging::get::<RegistryEvent>().unwrap(),
        RegistryEvent::Register {
            type_name: "u8",
            registered: true
        }
    );
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_successful_lookups_are_logged() {
    define_local_registry!(logged);

    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(log.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        logged::register(1u8).unwrap();
        assert_eq!(*logged::get::<u8>().unwrap(), 1);
        assert!(logged::has_been_registered::<u8>());
    });

    let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("singleton lookup"));
    assert!(!output.contains("singleton lookup failed"));
    assert!(output.contains("singleton presence check"));
}
