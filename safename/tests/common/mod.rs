//! Shared helpers for integration tests.

#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use safename::selector;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::EnvFilter;

/// Routes library events to the test output, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds an encoded name from a table id and payload.
pub fn encode_name(id: u8, payload: &[u8]) -> String {
    let mut name = String::new();
    name.push(selector::selector_for(id).expect("table id has a selector"));
    name.push_str(&URL_SAFE_NO_PAD.encode(payload));
    name
}

/// Literals section from a `zstd -1` frame: FSE-compressed Huffman table
/// followed by one stream.
pub const ZSTD_LITERALS: [u8; 138] = [
    0x17, 0x70, 0x6d, 0x1b, 0x00, 0x95, 0x56, 0x0d, 0x9c, 0x78, 0xc0, 0xb0,
    0x9f, 0xa2, 0x8c, 0xaa, 0xea, 0x5d, 0xe8, 0x5b, 0xaa, 0xaa, 0x2a, 0x88,
    0xd0, 0x63, 0x0c, 0xd0, 0x50, 0x07, 0x23, 0xe0, 0x21, 0xd9, 0xfd, 0x93,
    0x61, 0x84, 0x40, 0x4f, 0x81, 0x60, 0x3a, 0x4e, 0x6a, 0xdd, 0x46, 0x11,
    0xee, 0xae, 0xdd, 0xf0, 0x5e, 0x36, 0xfb, 0x8c, 0x8f, 0xa7, 0x35, 0xb7,
    0x9b, 0xba, 0x76, 0xff, 0xd9, 0xf8, 0xb7, 0x56, 0x85, 0x94, 0x03, 0x3c,
    0x69, 0x2c, 0x19, 0x9c, 0xea, 0x77, 0x31, 0x44, 0xec, 0x41, 0xa5, 0xae,
    0x42, 0x94, 0xe3, 0x2b, 0xdd, 0x96, 0xde, 0xcd, 0x7f, 0xba, 0xc8, 0xf1,
    0x9a, 0x3f, 0x16, 0x18, 0x5e, 0xab, 0x49, 0xb5, 0xa4, 0x77, 0xd6, 0x91,
    0x36, 0xb1, 0x8a, 0x62, 0x6b, 0x1b, 0x67, 0x79, 0x25, 0x27, 0xf8, 0x3b,
    0x6d, 0x0b, 0x91, 0xec, 0xde, 0xe9, 0x84, 0x2e, 0xa1, 0x61, 0x2f, 0xfc,
    0xf3, 0xd9, 0xd5, 0xfd, 0x75, 0x06,
];

/// What [`ZSTD_LITERALS`] decodes to.
pub const ZSTD_DECODED: &str = concat!(
    "ituerneheseesgtal1dn5ezottibadlnreeacsidsopmodh_fo5tnwtheuyd_imd",
    "dsk1suemu8bonuestteyton_esr_b_oni_2taaahdoennr2chlce.p_vnntleeat",
    "ieettne_ltointq8shetiogte2rtrer5_montyrpiab6qvbwahieeooc2s072nal",
    ".khuv",
);

/// An event recorded by [`EventCapture`].
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Layer that records every event it sees.
#[derive(Debug, Clone, Default)]
pub struct EventCapture(Arc<Mutex<Vec<CapturedEvent>>>);

impl EventCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.0.lock().unwrap().clone()
    }
}

struct FieldVisitor<'a>(&'a mut Vec<(String, String)>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{:?}", value)));
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Vec::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.0.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields,
        });
    }
}
