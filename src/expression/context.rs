use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::{
    change::strategy::StrategyRegistry,
    expression::expr::Expression,
    expression::value::{Shape, Value},
    foundation::core::{Point, Point3, StatementId},
    foundation::error::{GeoError, GeoResult},
    options::style::Style,
};

/// Evaluation scope threaded through resolution.
///
/// When a caller is set, every variable read records the caller as a dependent of that variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    caller: Option<StatementId>,
}

impl Scope {
    /// Scope of a statement being resolved; reads register dependencies.
    pub fn statement(id: StatementId) -> Self {
        Self { caller: Some(id) }
    }

    /// Scope without a caller; reads register nothing.
    pub fn detached() -> Self {
        Self { caller: None }
    }

    pub fn caller(self) -> Option<StatementId> {
        self.caller
    }
}

/// Everything kept about one resolved statement.
#[derive(Clone, Debug)]
pub struct StatementRecord {
    pub id: StatementId,
    pub index: usize,
    pub expression: Expression,
    /// Variable bound by the statement, for assignments.
    pub binding: Option<String>,
    /// Style the statement's command was built with.
    pub style: Style,
}

/// Per-compile symbol table and dependency graph.
#[derive(Debug)]
pub struct ExpressionContext {
    references: HashMap<String, Value>,
    dependents: HashMap<String, BTreeSet<StatementId>>,
    statements: BTreeMap<StatementId, StatementRecord>,
    binders: HashMap<String, StatementId>,
    strategies: StrategyRegistry,
}

impl Default for ExpressionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionContext {
    /// Fresh context seeded with `pi`, `e`, `origin` and `origin3d`.
    pub fn new() -> Self {
        let mut ctx = Self {
            references: HashMap::new(),
            dependents: HashMap::new(),
            statements: BTreeMap::new(),
            binders: HashMap::new(),
            strategies: StrategyRegistry::standard(),
        };
        ctx.add_reference("pi", Value::Number(std::f64::consts::PI));
        ctx.add_reference("e", Value::Number(std::f64::consts::E));
        ctx.add_reference("origin", Value::Point(Shape::new(Point::ORIGIN)));
        ctx.add_reference("origin3d", Value::Point3d(Shape::new(Point3::ORIGIN)));
        ctx
    }

    /// Read a binding. A caller in `scope` becomes a dependent of `name`.
    pub fn get_reference(&mut self, name: &str, scope: Scope) -> GeoResult<Value> {
        let Some(value) = self.references.get(name) else {
            return Err(GeoError::unknown_variable(name));
        };
        let value = value.clone();
        if let Some(caller) = scope.caller() {
            self.dependents
                .entry(name.to_string())
                .or_default()
                .insert(caller);
        }
        Ok(value)
    }

    /// Read a binding without recording any dependency.
    pub fn peek(&self, name: &str) -> Option<&Value> {
        self.references.get(name)
    }

    pub fn has_reference(&self, name: &str) -> bool {
        self.references.contains_key(name)
    }

    pub fn add_reference(&mut self, name: impl Into<String>, value: Value) {
        self.references.insert(name.into(), value);
    }

    /// Overwrite a binding. Dependents are not notified.
    pub fn update_reference(&mut self, name: &str, value: Value) {
        self.add_reference(name, value);
    }

    pub fn dependents_of(&self, name: &str) -> impl Iterator<Item = StatementId> + '_ {
        self.dependents.get(name).into_iter().flatten().copied()
    }

    pub fn record_statement(&mut self, record: StatementRecord) {
        if let Some(name) = &record.binding {
            self.binders.insert(name.clone(), record.id);
        }
        self.statements.insert(record.id, record);
    }

    pub fn statement(&self, id: StatementId) -> Option<&StatementRecord> {
        self.statements.get(&id)
    }

    /// Latest statement that bound `name`.
    pub fn binder_of(&self, name: &str) -> Option<StatementId> {
        self.binders.get(name).copied()
    }

    pub(crate) fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    /// Resolve a recorded statement again against the current bindings.
    pub fn re_resolve(&mut self, id: StatementId) -> GeoResult<Value> {
        let Some(record) = self.statements.get(&id) else {
            return Err(GeoError::change(format!("statement {id} is not recorded")));
        };
        let mut expression = record.expression.clone();
        let value = expression.resolve(self, Scope::statement(id))?;
        if let Some(record) = self.statements.get_mut(&id) {
            record.expression = expression;
        }
        Ok(value)
    }

    /// Every statement that transitively depends on `name`, so that each statement comes after
    /// all the statements it reads from. Ties are broken by statement index.
    #[tracing::instrument(skip(self))]
    pub fn ordered_dependents(&self, name: &str) -> GeoResult<Vec<StatementId>> {
        let mut nodes: BTreeSet<StatementId> = BTreeSet::new();
        let mut pending: Vec<&str> = vec![name];
        let mut seen_names: HashSet<&str> = HashSet::new();
        while let Some(var) = pending.pop() {
            if !seen_names.insert(var) {
                continue;
            }
            // Statements that failed to resolve were never recorded.
            for id in self.dependents.get(var).into_iter().flatten() {
                if !self.statements.contains_key(id) {
                    continue;
                }
                if nodes.insert(*id)
                    && let Some(binding) = self.binding_of(*id)
                {
                    pending.push(binding);
                }
            }
        }

        // Edges run from a statement to the later statements that read the binding it produced.
        let mut indeg: BTreeMap<StatementId, u32> = nodes.iter().map(|id| (*id, 0)).collect();
        let mut outs: BTreeMap<StatementId, Vec<StatementId>> = BTreeMap::new();
        for &from in &nodes {
            let Some(binding) = self.binding_of(from) else {
                continue;
            };
            for to in self.dependents.get(binding).into_iter().flatten() {
                if !nodes.contains(to) || !self.reads_binding_from(binding, from, *to) {
                    continue;
                }
                outs.entry(from).or_default().push(*to);
                if let Some(d) = indeg.get_mut(to) {
                    *d = d.saturating_add(1);
                }
            }
        }

        // Kahn topo with deterministic tie-break on statement index.
        let mut ready: BTreeSet<(usize, StatementId)> = indeg
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(id, _)| (self.index_of(*id), *id))
            .collect();
        let mut order = Vec::with_capacity(nodes.len());
        while let Some((_, id)) = ready.pop_first() {
            order.push(id);
            for next in outs.get(&id).into_iter().flatten() {
                if let Some(d) = indeg.get_mut(next) {
                    *d = d.saturating_sub(1);
                    if *d == 0 {
                        ready.insert((self.index_of(*next), *next));
                    }
                }
            }
        }

        if order.len() != nodes.len() {
            let stuck: Vec<String> = nodes
                .iter()
                .filter(|id| !order.contains(id))
                .map(|id| id.to_string())
                .collect();
            return Err(GeoError::change(format!(
                "dependency cycle through statements {}",
                stuck.join(", ")
            )));
        }
        Ok(order)
    }

    /// Whether `to` saw the value of `name` bound by `from`: `to` runs later and no recorded
    /// statement in between rebinds `name`.
    fn reads_binding_from(&self, name: &str, from: StatementId, to: StatementId) -> bool {
        let (lo, hi) = (self.index_of(from), self.index_of(to));
        if hi <= lo {
            return false;
        }
        !self.statements.values().any(|r| {
            (lo + 1..hi).contains(&r.index) && r.binding.as_deref() == Some(name)
        })
    }

    fn binding_of(&self, id: StatementId) -> Option<&str> {
        self.statements.get(&id)?.binding.as_deref()
    }

    fn index_of(&self, id: StatementId) -> usize {
        self.statements
            .get(&id)
            .map(|r| r.index)
            .unwrap_or_else(|| id.index())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/context.rs"]
mod tests;
