//! Builds an [`Env`] from a sensor template (§3 "Environment binding").

use verse_sensor::{ContBinding, ContTemplate, DiscBinding, DiscBindings, LengthDict};

use crate::env::Env;
use crate::value::Value;

/// Bind every `ego.<field>` directly; `others.<field>` base lists are left
/// unbound here — only the indices an `Updater` actually needs get bound,
/// by `apply_updater` (§4.2.1, §9 "makes repeated evaluations ... cheap").
pub fn build_env(cont: &ContTemplate, disc: &DiscBindings, length_dict: &LengthDict) -> Env {
    let mut env = Env::new();

    for (name, binding) in cont {
        if let ContBinding::Ego(iv) = binding {
            env.bind(name.clone(), Value::from_interval(*iv));
        }
    }
    for (name, binding) in disc {
        if let DiscBinding::Ego(v) = binding {
            env.bind(name.clone(), Value::from(v.clone()));
        }
    }
    for (field, len) in length_dict {
        env.set_others_len(field.clone(), *len);
    }
    // `length_dict` only covers continuous fields (§4.1); discrete/mode
    // `others.<field>` lists need their length registered too so a
    // quantifier over a mode field can be unrolled.
    for (name, binding) in disc {
        if let DiscBinding::Others(values) = binding {
            if let Some(field) = name.strip_prefix("others.") {
                env.set_others_len(field.to_string(), values.len());
            }
        }
    }

    env
}
