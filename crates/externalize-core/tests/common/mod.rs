#![allow(dead_code)]

use externalize_core::{Declaration, Event, EventType, Externalized};

#[derive(Debug)]
pub struct SampleEvent;

const SAMPLE_EVENT: &[&dyn Declaration] = &[&Externalized::to("target")];

impl Event for SampleEvent {
    fn declarations(&self) -> &'static [&'static dyn Declaration] {
        SAMPLE_EVENT
    }
}

#[derive(Debug)]
pub struct UnnamedEvent;

const UNNAMED_EVENT: &[&dyn Declaration] = &[&Externalized::new()];

impl Event for UnnamedEvent {
    fn declarations(&self) -> &'static [&'static dyn Declaration] {
        UNNAMED_EVENT
    }
}

#[derive(Debug)]
pub struct AnotherSampleEvent;

impl Event for AnotherSampleEvent {}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlaced {
    pub order_id: u64,
    pub region: &'static str,
}

impl Event for OrderPlaced {
    fn event_type(&self) -> EventType {
        EventType::named("com::acme::myapp::orders::OrderPlaced")
    }
}
