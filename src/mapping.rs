//! Field pairing between resource model structs and their wire structs.
//!
//! Each resource type declares a table of pairings, one per synchronized
//! attribute. A pairing knows how to push a tri-state local value into the
//! outbound API struct (`to_remote`) and how to overwrite the local value
//! from a decoded response (`to_local`). Each supported shape pair is its
//! own pairing type wired from plain field accessors, so an unsupported
//! combination simply does not construct.
//!
//! Conversion failures are recorded as diagnostics and never stop the rest
//! of the table from being processed.

use std::collections::BTreeSet;

use crate::framework::{Diagnostics, Value};

type Get<S, T> = fn(&S) -> &T;
type GetMut<S, T> = fn(&mut S) -> &mut T;

pub trait FieldPairing<L, R>: Send + Sync {
    /// Attribute name, used in conversion diagnostics.
    fn name(&self) -> &'static str;

    /// Push the local value into a freshly built remote struct. Null locals
    /// leave the remote field at its zero value unless the rule says
    /// otherwise (sets normalize to an empty list).
    fn to_remote(&self, local: &L, remote: &mut R, diags: &mut Diagnostics);

    /// Overwrite the local value from a decoded response.
    fn to_local(&self, remote: &R, local: &mut L, diags: &mut Diagnostics);
}

/// The full pairing table for one resource type.
pub type PairingSet<L, R> = Vec<Box<dyn FieldPairing<L, R>>>;

pub fn to_remote<L, R>(pairings: &PairingSet<L, R>, local: &L, remote: &mut R) -> Diagnostics {
    let mut diags = Diagnostics::new();
    for pairing in pairings {
        pairing.to_remote(local, remote, &mut diags);
    }
    diags
}

pub fn to_local<L, R>(pairings: &PairingSet<L, R>, remote: &R, local: &mut L) -> Diagnostics {
    let mut diags = Diagnostics::new();
    for pairing in pairings {
        pairing.to_local(remote, local, &mut diags);
    }
    diags
}

struct StringPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<String>>,
    local_mut: GetMut<L, Value<String>>,
    remote: Get<R, String>,
    remote_mut: GetMut<R, String>,
}

impl<L, R> FieldPairing<L, R> for StringPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, _diags: &mut Diagnostics) {
        if let Value::Known(s) = (self.local)(local) {
            *(self.remote_mut)(remote) = s.clone();
        }
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        *(self.local_mut)(local) = Value::Known((self.remote)(remote).clone());
    }
}

struct OptStringPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<String>>,
    local_mut: GetMut<L, Value<String>>,
    remote: Get<R, Option<String>>,
    remote_mut: GetMut<R, Option<String>>,
}

impl<L, R> FieldPairing<L, R> for OptStringPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, _diags: &mut Diagnostics) {
        if let Value::Known(s) = (self.local)(local) {
            *(self.remote_mut)(remote) = Some(s.clone());
        }
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        *(self.local_mut)(local) = Value::from((self.remote)(remote).clone());
    }
}

/// Local string attribute backed by a required remote integer. The
/// identifier fields use this: ids must be strings on the Terraform side
/// for import to work, but the API keys records by number.
struct StringIdPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<String>>,
    local_mut: GetMut<L, Value<String>>,
    remote: Get<R, i64>,
    remote_mut: GetMut<R, i64>,
}

impl<L, R> FieldPairing<L, R> for StringIdPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, diags: &mut Diagnostics) {
        if let Value::Known(s) = (self.local)(local) {
            match s.parse::<i64>() {
                Ok(n) => *(self.remote_mut)(remote) = n,
                Err(e) => diags.add_error(
                    "Error converting value",
                    format!(
                        "Could not convert the {} value {:?} to an integer: {}",
                        self.name, s, e
                    ),
                ),
            }
        }
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        *(self.local_mut)(local) = Value::Known((self.remote)(remote).to_string());
    }
}

struct OptStringIdPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<String>>,
    local_mut: GetMut<L, Value<String>>,
    remote: Get<R, Option<i64>>,
    remote_mut: GetMut<R, Option<i64>>,
}

impl<L, R> FieldPairing<L, R> for OptStringIdPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, diags: &mut Diagnostics) {
        if let Value::Known(s) = (self.local)(local) {
            match s.parse::<i64>() {
                Ok(n) => *(self.remote_mut)(remote) = Some(n),
                Err(e) => diags.add_error(
                    "Error converting value",
                    format!(
                        "Could not convert the {} value {:?} to an integer: {}",
                        self.name, s, e
                    ),
                ),
            }
        }
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        *(self.local_mut)(local) = (self.remote)(remote).as_ref().map(|n| n.to_string()).into();
    }
}

struct BoolPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<bool>>,
    local_mut: GetMut<L, Value<bool>>,
    remote: Get<R, bool>,
    remote_mut: GetMut<R, bool>,
}

impl<L, R> FieldPairing<L, R> for BoolPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, _diags: &mut Diagnostics) {
        // a null local is indistinguishable from false on a required bool
        if let Value::Known(b) = (self.local)(local) {
            *(self.remote_mut)(remote) = *b;
        }
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        *(self.local_mut)(local) = Value::Known(*(self.remote)(remote));
    }
}

struct OptBoolPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<bool>>,
    local_mut: GetMut<L, Value<bool>>,
    remote: Get<R, Option<bool>>,
    remote_mut: GetMut<R, Option<bool>>,
}

impl<L, R> FieldPairing<L, R> for OptBoolPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, _diags: &mut Diagnostics) {
        if let Value::Known(b) = (self.local)(local) {
            *(self.remote_mut)(remote) = Some(*b);
        }
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        *(self.local_mut)(local) = Value::from(*(self.remote)(remote));
    }
}

struct IntPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<i64>>,
    local_mut: GetMut<L, Value<i64>>,
    remote: Get<R, i64>,
    remote_mut: GetMut<R, i64>,
}

impl<L, R> FieldPairing<L, R> for IntPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, _diags: &mut Diagnostics) {
        if let Value::Known(n) = (self.local)(local) {
            *(self.remote_mut)(remote) = *n;
        }
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        *(self.local_mut)(local) = Value::Known(*(self.remote)(remote));
    }
}

struct OptIntPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<i64>>,
    local_mut: GetMut<L, Value<i64>>,
    remote: Get<R, Option<i64>>,
    remote_mut: GetMut<R, Option<i64>>,
}

impl<L, R> FieldPairing<L, R> for OptIntPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, _diags: &mut Diagnostics) {
        if let Value::Known(n) = (self.local)(local) {
            *(self.remote_mut)(remote) = Some(*n);
        }
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        *(self.local_mut)(local) = Value::from(*(self.remote)(remote));
    }
}

struct StringSetPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<BTreeSet<String>>>,
    local_mut: GetMut<L, Value<BTreeSet<String>>>,
    remote: Get<R, Option<Vec<String>>>,
    remote_mut: GetMut<R, Option<Vec<String>>>,
}

impl<L, R> FieldPairing<L, R> for StringSetPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, _diags: &mut Diagnostics) {
        // always send a list, never omit the field: the API treats an
        // omitted list as "leave unchanged" while the practitioner's null
        // means "no elements"
        *(self.remote_mut)(remote) = match (self.local)(local) {
            Value::Known(set) => Some(set.iter().cloned().collect()),
            _ => Some(Vec::new()),
        };
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        // an empty response list only materializes as an empty set when the
        // prior local value had elements tracked; otherwise it stays null
        let prior_known = (self.local)(local).is_known();
        *(self.local_mut)(local) = match (self.remote)(remote) {
            Some(items) if !items.is_empty() || prior_known => {
                Value::Known(items.iter().cloned().collect())
            }
            _ => Value::Null,
        };
    }
}

struct IntSetPairing<L, R> {
    name: &'static str,
    local: Get<L, Value<BTreeSet<i64>>>,
    local_mut: GetMut<L, Value<BTreeSet<i64>>>,
    remote: Get<R, Option<Vec<i64>>>,
    remote_mut: GetMut<R, Option<Vec<i64>>>,
}

impl<L, R> FieldPairing<L, R> for IntSetPairing<L, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_remote(&self, local: &L, remote: &mut R, _diags: &mut Diagnostics) {
        *(self.remote_mut)(remote) = match (self.local)(local) {
            Value::Known(set) => Some(set.iter().copied().collect()),
            _ => Some(Vec::new()),
        };
    }

    fn to_local(&self, remote: &R, local: &mut L, _diags: &mut Diagnostics) {
        let prior_known = (self.local)(local).is_known();
        *(self.local_mut)(local) = match (self.remote)(remote) {
            Some(items) if !items.is_empty() || prior_known => {
                Value::Known(items.iter().copied().collect())
            }
            _ => Value::Null,
        };
    }
}

/// Constructors for the supported shape pairs.
pub mod pair {
    use super::*;

    pub fn string<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<String>>,
        local_mut: GetMut<L, Value<String>>,
        remote: Get<R, String>,
        remote_mut: GetMut<R, String>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(StringPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn opt_string<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<String>>,
        local_mut: GetMut<L, Value<String>>,
        remote: Get<R, Option<String>>,
        remote_mut: GetMut<R, Option<String>>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(OptStringPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn string_id<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<String>>,
        local_mut: GetMut<L, Value<String>>,
        remote: Get<R, i64>,
        remote_mut: GetMut<R, i64>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(StringIdPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn opt_string_id<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<String>>,
        local_mut: GetMut<L, Value<String>>,
        remote: Get<R, Option<i64>>,
        remote_mut: GetMut<R, Option<i64>>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(OptStringIdPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn bool<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<bool>>,
        local_mut: GetMut<L, Value<bool>>,
        remote: Get<R, bool>,
        remote_mut: GetMut<R, bool>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(BoolPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn opt_bool<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<bool>>,
        local_mut: GetMut<L, Value<bool>>,
        remote: Get<R, Option<bool>>,
        remote_mut: GetMut<R, Option<bool>>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(OptBoolPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn int<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<i64>>,
        local_mut: GetMut<L, Value<i64>>,
        remote: Get<R, i64>,
        remote_mut: GetMut<R, i64>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(IntPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn opt_int<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<i64>>,
        local_mut: GetMut<L, Value<i64>>,
        remote: Get<R, Option<i64>>,
        remote_mut: GetMut<R, Option<i64>>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(OptIntPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn string_set<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<BTreeSet<String>>>,
        local_mut: GetMut<L, Value<BTreeSet<String>>>,
        remote: Get<R, Option<Vec<String>>>,
        remote_mut: GetMut<R, Option<Vec<String>>>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(StringSetPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }

    pub fn int_set<L: 'static, R: 'static>(
        name: &'static str,
        local: Get<L, Value<BTreeSet<i64>>>,
        local_mut: GetMut<L, Value<BTreeSet<i64>>>,
        remote: Get<R, Option<Vec<i64>>>,
        remote_mut: GetMut<R, Option<Vec<i64>>>,
    ) -> Box<dyn FieldPairing<L, R>> {
        Box::new(IntSetPairing {
            name,
            local,
            local_mut,
            remote,
            remote_mut,
        })
    }
}
