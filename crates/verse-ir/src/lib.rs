//! `verse-ir` — controller intermediate representation.
//!
//! Represents one agent's controller as a flat list of guarded mode paths
//! plus declared mode and state types, and the expression AST guards/resets
//! are built from.
//!
//! | Module      | Contents                                            |
//! |-------------|------------------------------------------------------|
//! | [`expr`]    | `Expr`, `BinOp`, `UnOp`, `BoolOp`, `QuantKind`       |
//! | [`path`]    | `ModePath`, `Assert`, `SourceLoc`                   |
//! | [`agent`]   | `ControllerIr`, `ModeCategory`, `StateDef`, `ArgKind`, `Agent` |
//! | [`builder`] | `ControllerIrBuilder`, `build_agent`                |
//! | [`error`]   | `IrError`, `IrResult`                               |

pub mod agent;
pub mod builder;
pub mod error;
pub mod expr;
pub mod path;


pub use agent::{Agent, ArgKind, ControllerIr, ModeCategory, StateDef};
pub use builder::{build_agent, ControllerIrBuilder};
pub use error::{IrError, IrResult};
pub use expr::{BinOp, BoolOp, Expr, QuantKind, UnOp};
pub use path::{Assert, ModePath, SourceLoc};
