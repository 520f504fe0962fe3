//! Fluent builders for assembling a `ControllerIr` and its `Agent`s without
//! parsing controller source — used by tests and by embedding applications
//! that construct controllers programmatically.
//!
//! # Usage
//!
//! ```rust
//! use verse_ir::{ArgKind, ControllerIrBuilder, Expr, ModePath};
//!
//! let controller = ControllerIrBuilder::new()
//!     .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
//!     .continuous_fields(vec!["x", "y", "v"])
//!     .args(vec![ArgKind::Ego, ArgKind::Others, ArgKind::Map])
//!     .path(ModePath::new("mode", Expr::BoolLit(true), Expr::ModeLit("Normal".into())))
//!     .build();
//!
//! assert_eq!(controller.get_paths().len(), 1);
//! ```

use std::sync::Arc;

use verse_core::{AgentId, ModeTuple, Region};

use crate::agent::{Agent, ArgKind, ControllerIr, ModeCategory, StateDef};
use crate::error::{IrError, IrResult};
use crate::path::{Assert, ModePath};

/// Fluent builder for a [`ControllerIr`].
#[derive(Default)]
pub struct ControllerIrBuilder {
    mode_defs: Vec<ModeCategory>,
    continuous_fields: Vec<String>,
    discrete_fields: Vec<String>,
    args: Vec<ArgKind>,
    paths: Vec<ModePath>,
    asserts: Vec<Assert>,
}

impl ControllerIrBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one mode category with its enum values, in declaration order.
    pub fn mode_category(
        mut self,
        name: impl Into<String>,
        values: Vec<impl Into<String>>,
    ) -> Self {
        self.mode_defs.push(ModeCategory::new(
            name,
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn continuous_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
        self.continuous_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn discrete_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
        self.discrete_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn args(mut self, args: Vec<ArgKind>) -> Self {
        self.args = args;
        self
    }

    pub fn path(mut self, path: ModePath) -> Self {
        self.paths.push(path);
        self
    }

    pub fn paths(mut self, paths: Vec<ModePath>) -> Self {
        self.paths.extend(paths);
        self
    }

    pub fn assert(mut self, assert: Assert) -> Self {
        self.asserts.push(assert);
        self
    }

    /// Assemble the `ControllerIr`. Duplicate mode category declarations
    /// are a construction-time error — everything else is validated lazily
    /// against concrete agents (`ControllerIrBuilder::agent`).
    pub fn try_build(self) -> IrResult<ControllerIr> {
        for (i, cat) in self.mode_defs.iter().enumerate() {
            if self.mode_defs[..i].iter().any(|c| c.name == cat.name) {
                return Err(IrError::DuplicateModeCategory(cat.name.clone()));
            }
        }
        Ok(ControllerIr::new(
            self.mode_defs,
            StateDef::new(self.continuous_fields, self.discrete_fields),
            self.args,
            self.paths,
            self.asserts,
        ))
    }

    /// Like [`try_build`](Self::try_build), panicking on malformed input.
    /// Intended for tests and call sites that already validated their data.
    pub fn build(self) -> ControllerIr {
        self.try_build().expect("malformed controller IR")
    }
}

/// Validates and assembles an [`Agent`] against an already-built
/// [`ControllerIr`] (init mode tuple length/values, init region dimension).
pub fn build_agent(
    id: impl Into<AgentId>,
    controller: Arc<ControllerIr>,
    init_region: Region,
    init_mode: ModeTuple,
    static_data: Vec<f64>,
) -> IrResult<Agent> {
    if init_mode.len() != controller.num_mode_categories() {
        return Err(IrError::InitModeLengthMismatch {
            expected: controller.num_mode_categories(),
            got: init_mode.len(),
        });
    }
    for (cat, value) in controller.mode_defs.iter().zip(&init_mode.0) {
        if !cat.contains(value.as_str()) {
            return Err(IrError::InitModeValueUnknown {
                category: cat.name.clone(),
                value: value.as_str().to_string(),
            });
        }
    }
    let expected_dims = controller.state_defs.num_continuous();
    if init_region.dims() != expected_dims {
        return Err(IrError::InitRegionDimMismatch {
            expected: expected_dims,
            got: init_region.dims(),
        });
    }
    Ok(Agent::new(id.into(), controller, init_region, init_mode, static_data))
}
