//! The whitelisted `Call` function table (§4.2, §9).

use verse_core::Interval;

use crate::error::{GuardError, GuardResult};
use crate::value::Value;

fn arity(name: &str, args: &[Value], expected: usize) -> GuardResult<()> {
    if args.len() != expected {
        return Err(GuardError::ArityMismatch {
            name: name.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn as_interval(name: &str, v: &Value) -> GuardResult<Interval> {
    v.as_interval()
        .ok_or_else(|| GuardError::TypeMismatch { context: name.to_string() })
}

/// Evaluate a whitelisted function call. Sound (interval-preserving) for
/// `min`/`max`/`abs`; `sqrt`/`sin`/`cos` only accept `Scalar` arguments —
/// these are not interval-monotonic in general, so an `Interval` operand is
/// rejected rather than silently under-approximated.
pub fn call_fn(name: &str, args: &[Value]) -> GuardResult<Value> {
    match name {
        "min" => {
            arity(name, args, 2)?;
            let a = as_interval(name, &args[0])?;
            let b = as_interval(name, &args[1])?;
            Ok(Value::from_interval(a.min(b)))
        }
        "max" => {
            arity(name, args, 2)?;
            let a = as_interval(name, &args[0])?;
            let b = as_interval(name, &args[1])?;
            Ok(Value::from_interval(a.max(b)))
        }
        "abs" => {
            arity(name, args, 1)?;
            let a = as_interval(name, &args[0])?;
            Ok(Value::from_interval(a.abs()))
        }
        "sqrt" => scalar_fn(name, args, f64::sqrt),
        "sin" => scalar_fn(name, args, f64::sin),
        "cos" => scalar_fn(name, args, f64::cos),
        other => Err(GuardError::UnknownFunction(other.to_string())),
    }
}

fn scalar_fn(name: &str, args: &[Value], f: fn(f64) -> f64) -> GuardResult<Value> {
    arity(name, args, 1)?;
    match &args[0] {
        Value::Scalar(v) => Ok(Value::Scalar(f(*v))),
        Value::Interval(_, _) => Err(GuardError::UnsupportedIntervalFunction(name.to_string())),
        _ => Err(GuardError::TypeMismatch { context: name.to_string() }),
    }
}
