//! Leaf payloads stored by the three caches (§4.6).

use std::sync::Arc;

use verse_ir::ControllerIr;
use verse_transition::{AssertHit, TraceRow};

/// A cached trace + transitions pair for one agent under one mode starting
/// at one init (GLOSSARY "Segment"). Generic over the transition type
/// because [`crate::SimTraceCache`] and [`crate::TubeCache`] share this
/// exact shape (§4.6 "same structure") but cache point and interval traces
/// respectively, whose transition kinds differ (`SimTransition` vs
/// `VerifyTransition`).
#[derive(Clone, Debug)]
pub struct CachedSegment<Tr> {
    pub trace: Vec<TraceRow>,
    pub asserts: Vec<AssertHit>,
    pub transitions: Vec<Tr>,
    pub controller: Arc<ControllerIr>,
    pub run_num: u64,
    pub node_id: usize,
}

/// The [`crate::ReachTransCache`] leaf: no trace, just the asserts and
/// verification transitions a node produced at a given reach-tube init.
#[derive(Clone, Debug)]
pub struct CachedRTTrans {
    pub asserts: Vec<AssertHit>,
    pub transitions: Vec<verse_transition::VerifyTransition>,
    pub controller: Arc<ControllerIr>,
    pub run_num: u64,
    pub node_id: usize,
}
