//! Recursive comparison of two type graphs

use std::collections::HashSet;

use apicompat_types::{GraphError, Info, Kind, Type, parse_tags};
use tracing::trace;

use crate::{Violation, ViolationKind};

/// State for one comparison of an old type against a new one.
///
/// Nodes are tracked by address, so the graphs must stay borrowed (and
/// unmodified) for the checker's whole lifetime.
pub struct Checker<'a, F> {
    old: &'a Info,
    new: &'a Info,
    ignore: F,
    /// Every node either side has been entered with
    visited: HashSet<*const Type>,
    /// Resolved (old, new) pairs already compared
    compared: HashSet<(*const Type, *const Type)>,
    violations: Vec<Violation>,
}

impl<'a, F> Checker<'a, F>
where
    F: Fn(&Info, &Type) -> bool,
{
    pub fn new(old: &'a Info, new: &'a Info, ignore: F) -> Self {
        Self {
            old,
            new,
            ignore,
            visited: HashSet::new(),
            compared: HashSet::new(),
            violations: Vec::new(),
        }
    }

    /// Compare `root_new` against `root_old`, returning every violation.
    ///
    /// Fails only when a stub cannot be resolved in its own graph.
    pub fn run(mut self, root_old: &'a Type, root_new: &'a Type) -> Result<Vec<Violation>, GraphError> {
        self.check(Some(root_old), Some(root_new), "")?;
        Ok(self.violations)
    }

    fn report(&mut self, path: &str, kind: ViolationKind) {
        self.violations.push(Violation::new(path, kind));
    }

    fn check(&mut self, t0: Option<&'a Type>, t1: Option<&'a Type>, path: &str) -> Result<(), GraphError> {
        let (t0, t1) = match (t0, t1) {
            (Some(t0), Some(t1)) => (t0, t1),
            _ => {
                self.report(path, ViolationKind::NilType);
                return Ok(());
            }
        };

        // Once both nodes have been entered, their subtrees are either done
        // or on the stack already.
        let fresh0 = self.visited.insert(t0 as *const Type);
        let fresh1 = self.visited.insert(t1 as *const Type);
        if !fresh0 && !fresh1 {
            trace!(path, "already visited");
            return Ok(());
        }

        let t0 = self.old.deref(t0)?;
        let t1 = self.new.deref(t1)?;
        // a definition reached again through another stub
        if !self.compared.insert((t0 as *const Type, t1 as *const Type)) {
            trace!(path, name = %t0.name, "already compared");
            return Ok(());
        }
        if (self.ignore)(self.old, t0) || (self.ignore)(self.new, t1) {
            trace!(path, name = %t0.name, "ignored");
            return Ok(());
        }

        if t0.kind != t1.kind {
            self.report(
                path,
                ViolationKind::IncompatibleKinds {
                    old: t0.kind,
                    new: t1.kind,
                },
            );
            return Ok(());
        }

        match t0.kind {
            Kind::Array | Kind::Slice => {
                self.check(t0.elem.as_deref(), t1.elem.as_deref(), &format!("{}[]", path))?;
            }
            Kind::Chan => {
                self.check(t0.elem.as_deref(), t1.elem.as_deref(), &format!("(<-{})", path))?;
            }
            Kind::Ptr => {
                self.check(t0.elem.as_deref(), t1.elem.as_deref(), &format!("(*{})", path))?;
            }
            Kind::Map => {
                self.check(t0.key.as_deref(), t1.key.as_deref(), &format!("{}[key]", path))?;
                self.check(t0.elem.as_deref(), t1.elem.as_deref(), &format!("{}[]", path))?;
            }
            Kind::Func => self.check_func(t0, t1, path)?,
            Kind::Struct => self.check_struct(t0, t1, path)?,
            _ => {}
        }

        self.check_methods(t0, t1, path)
    }

    /// Parameters and results are compared by position only
    fn check_func(&mut self, t0: &'a Type, t1: &'a Type, path: &str) -> Result<(), GraphError> {
        if t0.ins.len() != t1.ins.len() {
            self.report(
                path,
                ViolationKind::ParamCount {
                    old: t0.ins.len(),
                    new: t1.ins.len(),
                },
            );
        } else {
            for (i, (p0, p1)) in t0.ins.iter().zip(&t1.ins).enumerate() {
                self.check(Some(p0), Some(p1), &format!("{}(param {})", path, i))?;
            }
            if t0.variadic != t1.variadic {
                self.report(path, ViolationKind::VariadicChanged);
            }
        }

        if t0.outs.len() != t1.outs.len() {
            self.report(
                path,
                ViolationKind::ResultCount {
                    old: t0.outs.len(),
                    new: t1.outs.len(),
                },
            );
        } else {
            for (i, (r0, r1)) in t0.outs.iter().zip(&t1.outs).enumerate() {
                self.check(Some(r0), Some(r1), &format!("{}(result {})", path, i))?;
            }
        }

        Ok(())
    }

    /// Old fields must survive; new fields are fine
    fn check_struct(&mut self, t0: &'a Type, t1: &'a Type, path: &str) -> Result<(), GraphError> {
        for f0 in &t0.fields {
            let field_path = format!("{}.{}", path, f0.name);
            let Some(f1) = t1.field_by_name(&f0.name) else {
                self.report(&field_path, ViolationKind::FieldMissing);
                continue;
            };
            self.check(Some(&f0.ty), Some(&f1.ty), &field_path)?;
            self.check_tags(&f0.tag, &f1.tag, &field_path);
        }
        Ok(())
    }

    /// Every old tag key must keep its value. A key dropped from the new tag
    /// compares as the empty string.
    fn check_tags(&mut self, tag0: &str, tag1: &str, path: &str) {
        let tags1 = parse_tags(tag1);
        for (key, val0) in parse_tags(tag0) {
            let val1 = tags1.get(&key).map(String::as_str).unwrap_or("");
            if val1 != val0 {
                let new = val1.to_string();
                self.report(path, ViolationKind::TagChanged { key, old: val0, new });
            }
        }
    }

    fn check_methods(&mut self, t0: &'a Type, t1: &'a Type, path: &str) -> Result<(), GraphError> {
        for (name, m0) in &t0.methods {
            let Some(m1) = t1.method(name) else {
                self.report(path, ViolationKind::MethodMissing { name: name.clone() });
                continue;
            };
            if !m0.ptr_receiver && m1.ptr_receiver {
                self.report(path, ViolationKind::ReceiverNarrowed { name: name.clone() });
            }
            self.check(Some(&m0.ty), Some(&m1.ty), &format!("{}.{}", path, name))?;
        }
        Ok(())
    }
}
